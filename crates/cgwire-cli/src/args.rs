use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "cgwire", version, about = "Decode and encode sensor telemetry frames")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode one uplink frame and print it as JSON.
    Decode(DecodeArgs),
    /// Encode a downlink from a JSON or YAML message.
    Encode(EncodeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameFormat {
    /// TLV frame, possibly escaped, fragmented or encrypted.
    Tlv,
    /// PheasantCo2 LoRa envelope.
    LoraCo2,
    /// Robb LoRa envelope.
    LoraRobb,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[arg(long, value_enum, default_value = "tlv")]
    pub format: FrameFormat,

    /// Input is base64 rather than hex.
    #[arg(long)]
    pub base64: bool,

    /// Sender MAC, used to pick the cipher key.
    #[arg(long, env = "CGWIRE_MAC")]
    pub mac: Option<String>,

    /// YAML key table.
    #[arg(long, env = "CGWIRE_KEYS")]
    pub keys: Option<PathBuf>,

    /// Frame bytes.
    pub data: String,
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Print base64 rather than hex.
    #[arg(long)]
    pub base64: bool,

    /// Message file, or `-` for stdin.
    pub input: PathBuf,
}
