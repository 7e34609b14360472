use serde::{Deserialize, Serialize};

/// How object keys are written when a typed payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEncoding {
    /// Keys exactly as the value's `Serialize` impl names them.
    #[default]
    UseDefaultKeys,
    /// `oneTwo` becomes `one_two`, `myURLValue` becomes `my_url_value`.
    ConvertToSnakeCase,
}

/// What to do with NaN and infinite floats, which JSON cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NonFiniteFloats {
    #[default]
    Reject,
    Null,
}

/// Layout of the encoded text.
///
/// Keys are sorted unless `sorted_keys` is turned off, so values backed by hash
/// maps encode to the same string on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputFormatting {
    pub pretty: bool,
    pub sorted_keys: bool,
}

impl Default for OutputFormatting {
    fn default() -> Self {
        Self {
            pretty: false,
            sorted_keys: true,
        }
    }
}

/// Encoder settings for typed card action values.
///
/// The default produces compact JSON with the value's own key names in sorted
/// order, and rejects non-finite numbers.
///
/// ```
/// use gsm_cards::{EncoderConfig, KeyEncoding};
///
/// let cfg: EncoderConfig = serde_json::from_str(
///     r#"{"keyEncoding":"convertToSnakeCase","formatting":{"sortedKeys":false}}"#,
/// )
/// .unwrap();
/// assert_eq!(cfg.key_encoding, KeyEncoding::ConvertToSnakeCase);
/// assert!(!cfg.formatting.sorted_keys);
/// assert!(!cfg.formatting.pretty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderConfig {
    pub key_encoding: KeyEncoding,
    pub formatting: OutputFormatting,
    pub non_finite_floats: NonFiniteFloats,
}

impl EncoderConfig {
    pub fn with_key_encoding(mut self, key_encoding: KeyEncoding) -> Self {
        self.key_encoding = key_encoding;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.formatting.pretty = true;
        self
    }

    /// Keeps keys in the order the value serializes them instead of sorting.
    pub fn declared_key_order(mut self) -> Self {
        self.formatting.sorted_keys = false;
        self
    }

    pub fn with_non_finite_floats(mut self, policy: NonFiniteFloats) -> Self {
        self.non_finite_floats = policy;
        self
    }

    /// True when the encoded tree has to be rewritten before it is printed.
    pub(crate) fn rewrites_tree(&self) -> bool {
        self.key_encoding != KeyEncoding::UseDefaultKeys || self.formatting.sorted_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default_config() {
        let cfg: EncoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EncoderConfig::default());
        assert!(cfg.formatting.sorted_keys);
        assert!(cfg.rewrites_tree());
    }

    #[test]
    fn declared_order_with_default_keys_skips_the_rewrite() {
        let cfg = EncoderConfig::default().declared_key_order();
        assert!(!cfg.formatting.sorted_keys);
        assert!(!cfg.rewrites_tree());
    }

    #[test]
    fn builders_compose() {
        let cfg = EncoderConfig::default()
            .with_key_encoding(KeyEncoding::ConvertToSnakeCase)
            .with_non_finite_floats(NonFiniteFloats::Null)
            .pretty();
        assert!(cfg.formatting.pretty);
        assert!(cfg.formatting.sorted_keys);
        assert_eq!(cfg.non_finite_floats, NonFiniteFloats::Null);
        assert!(cfg.rewrites_tree());
    }
}
