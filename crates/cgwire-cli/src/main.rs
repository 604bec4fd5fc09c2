//! cgwire - decode device uplinks and build downlinks from the command line.

mod args;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context as _};
use base64::Engine;
use clap::Parser as _;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cgwire_codec::{
    decode_frame, decode_lora_co2, decode_lora_full, encode_frame, DefaultKey, KeyLookup,
    KeyTable, MessagePod,
};

use crate::args::{Cli, Command, DecodeArgs, EncodeArgs, FrameFormat};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Decode(args) => run_decode(args),
        Command::Encode(args) => run_encode(args),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to init logging")
}

fn run_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let raw = parse_input(&args.data, args.base64)?;
    tracing::debug!(len = raw.len(), format = ?args.format, "decoding frame");

    let pod = match args.format {
        FrameFormat::Tlv => {
            let keys = load_keys(args.keys.as_deref())?;
            decode_frame(&raw, args.mac.as_deref(), &*keys)
        }
        FrameFormat::LoraCo2 => decode_lora_co2(&raw),
        FrameFormat::LoraRobb => decode_lora_full(&raw),
    }
    .context("failed to decode frame")?;

    println!("{}", serde_json::to_string_pretty(&pod)?);
    Ok(())
}

fn run_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let pod = read_message(&args.input)?;
    let frame = encode_frame(&pod).context("failed to encode message")?;
    tracing::info!(len = frame.len(), command = ?pod.command, "encoded downlink");

    if args.base64 {
        println!("{}", base64::engine::general_purpose::STANDARD.encode(&frame));
    } else {
        println!("{}", hex::encode(&frame));
    }
    Ok(())
}

fn parse_input(data: &str, is_base64: bool) -> anyhow::Result<Vec<u8>> {
    let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    if data.is_empty() {
        bail!("no frame data given");
    }

    if is_base64 {
        base64::engine::general_purpose::STANDARD
            .decode(&data)
            .context("input is not valid base64")
    } else {
        hex::decode(&data).context("input is not valid hex")
    }
}

fn load_keys(path: Option<&Path>) -> anyhow::Result<Box<dyn KeyLookup>> {
    let Some(path) = path else {
        return Ok(Box::new(DefaultKey));
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read key table: {:?}", path))?;
    let table = KeyTable::from_yaml(&text)
        .with_context(|| format!("failed to parse key table: {:?}", path))?;
    tracing::info!(devices = table.devices.len(), "loaded key table");
    Ok(Box::new(table))
}

fn read_message(input: &Path) -> anyhow::Result<MessagePod> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to open file: {:?}", input))?
    };

    let is_yaml = input
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    if is_yaml {
        serde_yaml::from_str(&text).context("failed to parse YAML message")
    } else {
        serde_json::from_str(&text).context("failed to parse JSON message")
    }
}
