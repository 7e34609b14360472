//! Turns card action payloads into the opaque string stored in `CardAction::value`.

mod config;
mod float_guard;
mod keys;

use serde::Serialize;

use crate::error::EncodingError;

pub use config::{EncoderConfig, KeyEncoding, NonFiniteFloats, OutputFormatting};

/// Serializes typed action payloads to their canonical JSON text.
///
/// Implementations must be deterministic: the same value always yields the same
/// string for a given encoder.
pub trait PayloadEncoder {
    fn encode<T>(&self, value: &T) -> Result<String, EncodingError>
    where
        T: Serialize + ?Sized;
}

/// The stock `serde_json` backed encoder.
///
/// ```
/// use gsm_cards::{JsonEncoder, PayloadEncoder};
/// use serde_json::json;
///
/// let encoded = JsonEncoder::default()
///     .encode(&json!({"url": "https://example.com"}))
///     .unwrap();
/// assert_eq!(encoded, r#"{"url":"https://example.com"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl From<EncoderConfig> for JsonEncoder {
    fn from(config: EncoderConfig) -> Self {
        Self::new(config)
    }
}

impl PayloadEncoder for JsonEncoder {
    fn encode<T>(&self, value: &T) -> Result<String, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        if self.config.non_finite_floats == NonFiniteFloats::Reject {
            float_guard::check(value)?;
        }

        let pretty = self.config.formatting.pretty;
        let encoded = if self.config.rewrites_tree() {
            let tree = serde_json::to_value(value)?;
            let tree = keys::rewrite(
                tree,
                self.config.key_encoding,
                self.config.formatting.sorted_keys,
            )?;
            if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            }
        } else if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(encoded)
    }
}

/// Identity encoding for values that are already wire-ready (URLs, phone numbers, echo text).
pub fn encode_raw(value: impl Into<String>) -> String {
    value.into()
}
