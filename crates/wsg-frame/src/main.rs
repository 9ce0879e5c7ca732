//! wsg-frame - build a WSG command frame and print it
//!
//! Usage: `wsg-frame <command> [payload-hex]`
//!
//! `<command>` is a command name (`grasp`, `get_system_state`) or a raw id
//! (`0x25`). The frame goes to stdout; logs go to stderr.

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wsg_protocol::{CommandId, CommandMessage, LengthField};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Hex,
    Json,
}

/// Settings read from the environment
#[derive(Debug, Clone, Copy)]
struct Config {
    length_field: LengthField,
    output: OutputFormat,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        let length_field = std::env::var("WSG_LENGTH_FIELD").unwrap_or_else(|_| "le16".to_string());
        let output = std::env::var("WSG_OUTPUT").unwrap_or_else(|_| "hex".to_string());
        Ok(Self {
            length_field: parse_length_field(&length_field)?,
            output: parse_output(&output)?,
        })
    }
}

fn parse_length_field(value: &str) -> anyhow::Result<LengthField> {
    match value.trim().to_ascii_lowercase().as_str() {
        "le16" => Ok(LengthField::Le16),
        "low-byte" | "low_byte" => Ok(LengthField::LowByteOnly),
        other => anyhow::bail!("WSG_LENGTH_FIELD must be le16 or low-byte, got {other:?}"),
    }
}

fn parse_output(value: &str) -> anyhow::Result<OutputFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "hex" => Ok(OutputFormat::Hex),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("WSG_OUTPUT must be hex or json, got {other:?}"),
    }
}

/// Parse a command given by name or by `0x`-prefixed id
fn parse_command(arg: &str) -> anyhow::Result<CommandId> {
    let arg = arg.trim();
    if let Some(digits) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        let id = u8::from_str_radix(digits, 16)
            .with_context(|| format!("Invalid command id {arg:?}"))?;
        return Ok(CommandId::try_from(id)?);
    }
    Ok(arg.parse()?)
}

/// Parse a payload written as hex, with optional spaces or colons between bytes
fn parse_payload(arg: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = arg
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&digits).with_context(|| format!("Invalid payload hex {arg:?}"))
}

/// JSON output record
#[derive(Serialize)]
struct FrameReport {
    command: CommandId,
    id: u8,
    payload_len: usize,
    frame: String,
}

fn render(message: &CommandMessage, config: Config) -> anyhow::Result<String> {
    let frame = message.serialize_with(config.length_field);
    match config.output {
        OutputFormat::Hex => Ok(hex::encode_upper(&frame)),
        OutputFormat::Json => {
            let report = FrameReport {
                command: message.command(),
                id: message.command().as_u8(),
                payload_len: message.payload().len(),
                frame: hex::encode_upper(&frame),
            };
            Ok(serde_json::to_string(&report)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wsg_frame=info,wsg_protocol=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!("Config: {:?}", config);

    let mut args = std::env::args().skip(1);
    let command = args
        .next()
        .context("usage: wsg-frame <command> [payload-hex]")?;
    let command = parse_command(&command)?;
    let payload = match args.next() {
        Some(arg) => parse_payload(&arg)?,
        None => Vec::new(),
    };

    if config.length_field == LengthField::LowByteOnly && payload.len() > 0xFF {
        tracing::warn!(
            "Payload is {} bytes; low-byte length field will not describe it",
            payload.len()
        );
    }

    let message = CommandMessage::new(command, payload)?;
    tracing::info!("Framing {} ({} byte frame)", command, message.frame_len());

    println!("{}", render(&message, config)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("grasp").unwrap(), CommandId::Grasp);
        assert_eq!(parse_command("0x40").unwrap(), CommandId::GetSystemState);
        assert!(parse_command("0x27").is_err());
        assert!(parse_command("0xZZ").is_err());
        assert!(parse_command("squeeze").is_err());
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("010203").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_payload("01 02:03").unwrap(), vec![1, 2, 3]);
        assert!(parse_payload("").unwrap().is_empty());
        assert!(parse_payload("0").is_err());
    }

    #[test]
    fn test_parse_config_values() {
        assert_eq!(parse_length_field("LE16").unwrap(), LengthField::Le16);
        assert_eq!(parse_length_field("low-byte").unwrap(), LengthField::LowByteOnly);
        assert!(parse_length_field("be16").is_err());
        assert_eq!(parse_output("json").unwrap(), OutputFormat::Json);
        assert!(parse_output("yaml").is_err());
    }

    #[test]
    fn test_render_hex() {
        let message = CommandMessage::new(CommandId::Grasp, Vec::new()).unwrap();
        let config = Config {
            length_field: LengthField::Le16,
            output: OutputFormat::Hex,
        };
        assert_eq!(render(&message, config).unwrap(), "AAAAAA2500007140");
    }

    #[test]
    fn test_render_json() {
        let message = CommandMessage::new(CommandId::Grasp, Vec::new()).unwrap();
        let config = Config {
            length_field: LengthField::Le16,
            output: OutputFormat::Json,
        };
        let json: serde_json::Value = serde_json::from_str(&render(&message, config).unwrap()).unwrap();
        assert_eq!(json["command"], "grasp");
        assert_eq!(json["id"], 0x25);
        assert_eq!(json["payload_len"], 0);
        assert_eq!(json["frame"], "AAAAAA2500007140");
    }
}
