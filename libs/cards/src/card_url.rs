use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

// Only used to check that a relative reference is well formed.
const RELATIVE_CHECK_BASE: &str = "https://relative.invalid/";

/// A URL exactly as the sender wrote it.
///
/// The text is checked when the value is built but stored and emitted verbatim,
/// so `https://Example.com` does not come back as `https://example.com/`.
/// Relative references such as `images/a.png` are accepted; they have no
/// [`CardUrl::absolute`] form.
///
/// ```
/// use gsm_cards::CardUrl;
///
/// let url: CardUrl = "https://Example.com".parse().unwrap();
/// assert_eq!(url.as_str(), "https://Example.com");
/// assert_eq!(url.absolute().map(|u| u.host_str()), Some(Some("example.com")));
///
/// let relative: CardUrl = "images/a.png".parse().unwrap();
/// assert!(relative.is_relative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardUrl {
    raw: String,
    absolute: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCardUrl {
    #[error("url is empty")]
    Empty,
    #[error("url contains whitespace or control characters")]
    Whitespace,
    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

impl CardUrl {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidCardUrl> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidCardUrl::Empty);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidCardUrl::Whitespace);
        }
        match Url::parse(&raw) {
            Ok(url) => Ok(Self {
                raw,
                absolute: Some(url),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_CHECK_BASE)?.join(&raw)?;
                Ok(Self {
                    raw,
                    absolute: None,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed form, for absolute URLs only.
    pub fn absolute(&self) -> Option<&Url> {
        self.absolute.as_ref()
    }

    pub fn is_relative(&self) -> bool {
        self.absolute.is_none()
    }
}

impl From<Url> for CardUrl {
    fn from(url: Url) -> Self {
        Self {
            raw: url.as_str().to_string(),
            absolute: Some(url),
        }
    }
}

impl FromStr for CardUrl {
    type Err = InvalidCardUrl;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for CardUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for CardUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for CardUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CardUrl::parse(raw.as_str())
            .map_err(|err| serde::de::Error::custom(format!("invalid url `{raw}`: {err}")))
    }
}
