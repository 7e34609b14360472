//! The closed set of card variants and their shared contract.

mod hero;
mod receipt;
mod signin;
mod thumbnail;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodingError;
use crate::wire::WireFormat;

pub use hero::HeroCard;
pub use receipt::{Fact, ReceiptCard, ReceiptItem};
pub use signin::SigninCard;
pub use thumbnail::ThumbnailCard;

/// Implemented by every card variant.
pub trait RenderableCard: WireFormat + Into<Card> {
    const KIND: CardKind;
}

/// Which client surfaces render a card kind, plus advisory size hints.
///
/// Nothing in this crate enforces these values; a sender may consult them before
/// building a card for a given surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub bots_in_teams: bool,
    pub messaging_extensions: bool,
    pub connectors: bool,
    pub bot_framework: bool,
    /// Buttons Teams renders before truncating.
    pub max_buttons: Option<usize>,
    /// Images Teams renders before truncating.
    pub max_images: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Hero,
    Thumbnail,
    Signin,
    Receipt,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        CardKind::Hero,
        CardKind::Thumbnail,
        CardKind::Signin,
        CardKind::Receipt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Hero => "hero",
            CardKind::Thumbnail => "thumbnail",
            CardKind::Signin => "signin",
            CardKind::Receipt => "receipt",
        }
    }

    /// Attachment `contentType` the envelope layer uses for this kind.
    pub fn content_type(self) -> &'static str {
        match self {
            CardKind::Hero => "application/vnd.microsoft.card.hero",
            CardKind::Thumbnail => "application/vnd.microsoft.card.thumbnail",
            CardKind::Signin => "application/vnd.microsoft.card.signin",
            CardKind::Receipt => "application/vnd.microsoft.card.receipt",
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.content_type().eq_ignore_ascii_case(content_type.trim()))
    }

    pub fn compatibility(self) -> Compatibility {
        match self {
            CardKind::Hero | CardKind::Thumbnail => Compatibility {
                bots_in_teams: true,
                messaging_extensions: true,
                connectors: false,
                bot_framework: true,
                max_buttons: Some(6),
                max_images: Some(1),
            },
            CardKind::Signin | CardKind::Receipt => Compatibility {
                bots_in_teams: true,
                messaging_extensions: false,
                connectors: false,
                bot_framework: true,
                max_buttons: None,
                max_images: None,
            },
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card kind `{0}` (expected hero, thumbnail, signin or receipt)")]
pub struct UnknownCardKind(pub String);

impl FromStr for CardKind {
    type Err = UnknownCardKind;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownCardKind(name.to_string()))
    }
}

/// Any one card variant.
///
/// The wire payload carries no discriminator of its own; the kind travels in the
/// attachment envelope, so decoding takes the kind the caller already chose.
///
/// ```
/// use gsm_cards::{Card, CardKind};
/// use serde_json::json;
///
/// let card = Card::decode(
///     CardKind::Signin,
///     &json!({"text": "Sign in", "buttons": []}),
/// )
/// .unwrap();
/// assert_eq!(card.kind(), CardKind::Signin);
/// assert_eq!(card.content_type(), "application/vnd.microsoft.card.signin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Card {
    Hero(HeroCard),
    Thumbnail(ThumbnailCard),
    Signin(SigninCard),
    Receipt(ReceiptCard),
}

impl Card {
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Hero(_) => HeroCard::KIND,
            Card::Thumbnail(_) => ThumbnailCard::KIND,
            Card::Signin(_) => SigninCard::KIND,
            Card::Receipt(_) => ReceiptCard::KIND,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.kind().content_type()
    }

    pub fn to_wire(&self) -> Value {
        match self {
            Card::Hero(card) => card.to_wire(),
            Card::Thumbnail(card) => card.to_wire(),
            Card::Signin(card) => card.to_wire(),
            Card::Receipt(card) => card.to_wire(),
        }
    }

    pub fn decode(kind: CardKind, value: &Value) -> Result<Self, DecodingError> {
        let decoded = match kind {
            CardKind::Hero => HeroCard::from_wire(value).map(Card::from),
            CardKind::Thumbnail => ThumbnailCard::from_wire(value).map(Card::from),
            CardKind::Signin => SigninCard::from_wire(value).map(Card::from),
            CardKind::Receipt => ReceiptCard::from_wire(value).map(Card::from),
        };
        if let Err(err) = &decoded {
            tracing::debug!(kind = %kind, error = %err, "card payload rejected");
        }
        decoded
    }

    pub fn from_json(kind: CardKind, text: &str) -> Result<Self, DecodingError> {
        let value: Value = serde_json::from_str(text)?;
        Self::decode(kind, &value)
    }
}
