use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use gsm_cards::{
    Card, CardAction, CardActionType, CardKind, CardUrl, EncoderConfig, JsonEncoder, KeyEncoding,
    PayloadEncoder, WireFormat,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about = "Greentic Messaging card payload CLI")]
struct Cli {
    /// Emit JSON output
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy, Default)]
struct EncoderArgs {
    /// Rewrite payload keys to snake_case
    #[arg(long)]
    snake_case: bool,
    /// Keep payload keys in input order instead of sorting them
    #[arg(long)]
    declared_order: bool,
    /// Indent the encoded payload
    #[arg(long)]
    pretty: bool,
}

impl EncoderArgs {
    fn encoder(self) -> JsonEncoder {
        let mut config = EncoderConfig::default();
        if self.snake_case {
            config = config.with_key_encoding(KeyEncoding::ConvertToSnakeCase);
        }
        if self.declared_order {
            config = config.declared_key_order();
        }
        if self.pretty {
            config = config.pretty();
        }
        JsonEncoder::new(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON document into a card action value string
    EncodeValue {
        /// JSON text, or `-` to read stdin
        input: String,
        #[command(flatten)]
        encoder: EncoderArgs,
    },
    /// Build a card action and print its wire JSON
    Action {
        #[arg(long = "type")]
        action_type: CardActionType,
        /// Wire-ready value stored as given
        #[arg(long, conflicts_with = "value_json", required_unless_present = "value_json")]
        value: Option<String>,
        /// JSON document encoded into the value
        #[arg(long)]
        value_json: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        display_text: Option<String>,
        #[arg(long)]
        channel_data: Option<String>,
        #[arg(long)]
        image: Option<CardUrl>,
        #[command(flatten)]
        encoder: EncoderArgs,
    },
    /// Decode a card payload file and print it normalized
    Check {
        #[arg(long)]
        kind: CardKind,
        #[arg()]
        file: PathBuf,
    },
    /// List supported card kinds
    Kinds,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedValue<'a> {
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckedCard<'a> {
    kind: CardKind,
    content_type: &'a str,
    payload: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KindEntry {
    kind: CardKind,
    content_type: &'static str,
    compatibility: gsm_cards::Compatibility,
}

fn main() -> Result<()> {
    gsm_telemetry::install(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
    let cli = Cli::parse();
    let output = run(&cli, &mut std::io::stdin().lock())?;
    println!("{output}");
    Ok(())
}

fn run(cli: &Cli, stdin: &mut dyn Read) -> Result<String> {
    match &cli.command {
        Commands::EncodeValue { input, encoder } => {
            let text = if input == "-" {
                let mut buf = String::new();
                stdin
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            } else {
                input.clone()
            };
            let value: Value = serde_json::from_str(&text).context("input is not valid JSON")?;
            let encoded = encoder.encoder().encode(&value)?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&EncodedValue { value: &encoded })?)
            } else {
                Ok(encoded)
            }
        }
        Commands::Action {
            action_type,
            value,
            value_json,
            title,
            text,
            display_text,
            channel_data,
            image,
            encoder,
        } => {
            let mut action = match (value, value_json) {
                (Some(raw), None) => CardAction::from_raw(*action_type, raw.as_str()),
                (None, Some(json)) => {
                    let payload: Value =
                        serde_json::from_str(json).context("--value-json is not valid JSON")?;
                    CardAction::from_value_with(*action_type, &payload, &encoder.encoder())?
                }
                _ => bail!("exactly one of --value or --value-json is required"),
            };
            if let Some(title) = title {
                action = action.with_title(title.as_str());
            }
            if let Some(text) = text {
                action = action.with_text(text.as_str());
            }
            if let Some(display_text) = display_text {
                action = action.with_display_text(display_text.as_str());
            }
            if let Some(channel_data) = channel_data {
                action = action.with_channel_data(channel_data.as_str());
            }
            if let Some(image) = image {
                action = action.with_image(image.clone());
            }
            Ok(serde_json::to_string_pretty(&action.to_wire())?)
        }
        Commands::Check { kind, file } => {
            let value = read_payload(file)?;
            let card = Card::decode(*kind, &value)
                .with_context(|| format!("{} is not a valid {kind} card", file.display()))?;
            tracing::info!(kind = %kind, file = %file.display(), "card payload accepted");
            let payload = card.to_wire();
            if cli.json {
                Ok(serde_json::to_string_pretty(&CheckedCard {
                    kind: *kind,
                    content_type: card.content_type(),
                    payload,
                })?)
            } else {
                Ok(format!(
                    "ok: {kind} card ({})\n{}",
                    card.content_type(),
                    serde_json::to_string_pretty(&payload)?
                ))
            }
        }
        Commands::Kinds => {
            let entries: Vec<KindEntry> = CardKind::ALL
                .into_iter()
                .map(|kind| KindEntry {
                    kind,
                    content_type: kind.content_type(),
                    compatibility: kind.compatibility(),
                })
                .collect();
            if cli.json {
                return Ok(serde_json::to_string_pretty(&entries)?);
            }
            let lines: Vec<String> = entries
                .iter()
                .map(|entry| {
                    let compat = entry.compatibility;
                    let limits = match (compat.max_buttons, compat.max_images) {
                        (Some(buttons), Some(images)) => {
                            format!(" max_buttons={buttons} max_images={images}")
                        }
                        _ => String::new(),
                    };
                    format!(
                        "{:<10} {:<42} teams={} extensions={} connectors={}{limits}",
                        entry.kind.as_str(),
                        entry.content_type,
                        compat.bots_in_teams,
                        compat.messaging_extensions,
                        compat.connectors,
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn read_payload(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml_bw::from_str(&content)
            .with_context(|| format!("failed to parse yaml {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_args(args: &[&str]) -> Result<String> {
        run_with_stdin(args, "")
    }

    fn run_with_stdin(args: &[&str], stdin: &str) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("gsm-cli-cards").chain(args.iter().copied()))?;
        run(&cli, &mut Cursor::new(stdin.as_bytes().to_vec()))
    }

    #[test]
    fn encode_value_prints_compact_json() {
        let out = run_args(&["encode-value", r#"{"b": 1, "a": [true]}"#]).unwrap();
        assert_eq!(out, r#"{"a":[true],"b":1}"#);
    }

    #[test]
    fn encode_value_can_keep_input_order() {
        let out = run_args(&["encode-value", "--declared-order", r#"{"b": 1, "a": 2}"#]).unwrap();
        assert_eq!(out, r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn encode_value_reports_key_collisions() {
        let err = run_args(&["encode-value", "--snake-case", r#"{"fooBar": 1, "foo_bar": 2}"#])
            .unwrap_err();
        assert!(err.to_string().contains("both encode as `foo_bar`"));
    }

    #[test]
    fn encode_value_honours_encoder_flags() {
        let out = run_with_stdin(
            &["encode-value", "--snake-case", "-"],
            r#"{"requestId": 7, "approverName": "Ada"}"#,
        )
        .unwrap();
        assert_eq!(out, r#"{"approver_name":"Ada","request_id":7}"#);
    }

    #[test]
    fn encode_value_json_output_wraps_the_string() {
        let out = run_args(&["--json", "encode-value", r#"{"url":"https://example.com"}"#]).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["value"], r#"{"url":"https://example.com"}"#);
    }

    #[test]
    fn action_with_typed_value() {
        let out = run_args(&[
            "action",
            "--type",
            "openUrl",
            "--value-json",
            r#"{"url":"https://example.com"}"#,
            "--title",
            "Open",
        ])
        .unwrap();
        let wire: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(wire["type"], "openUrl");
        assert_eq!(wire["value"], r#"{"url":"https://example.com"}"#);
        assert_eq!(wire["title"], "Open");
        assert!(wire.get("text").is_none());
    }

    #[test]
    fn action_image_is_printed_as_given() {
        let out = run_args(&[
            "action",
            "--type",
            "imBack",
            "--value",
            "yes",
            "--image",
            "icons/Yes.png",
        ])
        .unwrap();
        let wire: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(wire["image"], "icons/Yes.png");
    }

    #[test]
    fn action_rejects_unknown_type_and_missing_value() {
        assert!(run_args(&["action", "--type", "frobnicate", "--value", "x"]).is_err());
        assert!(run_args(&["action", "--type", "imBack"]).is_err());
        assert!(
            run_args(&["action", "--type", "imBack", "--value", "a", "--value-json", "1"])
                .is_err()
        );
    }

    #[test]
    fn check_normalizes_a_card_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signin.json");
        fs::write(
            &path,
            r#"{"buttons":[{"value":"https://login.example.com/","type":"signin","title":null}],"text":"Sign in","extra":1}"#,
        )
        .unwrap();

        let out = run_args(&["--json", "check", "--kind", "signin", path.to_str().unwrap()]).unwrap();
        let checked: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(checked["contentType"], "application/vnd.microsoft.card.signin");
        assert_eq!(
            checked["payload"],
            serde_json::json!({
                "text": "Sign in",
                "buttons": [{"type": "signin", "value": "https://login.example.com/"}]
            })
        );
    }

    #[test]
    fn check_reports_the_failing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumb.yaml");
        fs::write(&path, "title: Hello\nsubtitle: x\ntext: y\nimages: []\nbuttons: []\n").unwrap();

        let err = run_args(&["check", "--kind", "thumbnail", path.to_str().unwrap()]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("is not a valid thumbnail card"));
        assert!(message.contains("missing required field `tap`"));
    }

    #[test]
    fn kinds_lists_every_card_kind() {
        let out = run_args(&["kinds"]).unwrap();
        assert_eq!(out.lines().count(), CardKind::ALL.len());
        assert!(out.contains("application/vnd.microsoft.card.receipt"));

        let json: Value = serde_json::from_str(&run_args(&["--json", "kinds"]).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "hero");
        assert_eq!(json[0]["compatibility"]["maxButtons"], 6);
        assert_eq!(json[0]["compatibility"]["botsInTeams"], true);
    }
}
