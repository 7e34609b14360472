use serde::{Deserialize, Serialize};

use crate::action::CardAction;
use crate::card_url::CardUrl;
use crate::wire::WireFormat;

/// An image shown on a card, with optional alt text and tap action.
///
/// The URL may be relative (`images/a.png`); the client resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImage {
    url: CardUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tap: Option<CardAction>,
}

impl CardImage {
    pub fn new(url: impl Into<CardUrl>) -> Self {
        Self {
            url: url.into(),
            alt: None,
            tap: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_tap(mut self, tap: CardAction) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn url(&self) -> &CardUrl {
        &self.url
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn tap(&self) -> Option<&CardAction> {
        self.tap.as_ref()
    }
}

impl WireFormat for CardImage {
    const NAME: &'static str = "CardImage";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CardActionType;
    use crate::error::DecodingError;
    use serde_json::json;

    fn url(raw: &str) -> CardUrl {
        CardUrl::parse(raw).unwrap()
    }

    #[test]
    fn minimal_image_encodes_url_only() {
        let image = CardImage::new(url("https://cdn.example.com/a.png"));
        assert_eq!(image.to_wire(), json!({"url": "https://cdn.example.com/a.png"}));
    }

    #[test]
    fn tap_action_round_trips() {
        let image = CardImage::new(url("https://cdn.example.com/a.png"))
            .with_alt("a chart")
            .with_tap(CardAction::from_raw(
                CardActionType::ShowImage,
                "https://cdn.example.com/a-large.png",
            ));
        let decoded = CardImage::from_wire(&image.to_wire()).unwrap();
        assert_eq!(decoded, image);
        assert_eq!(decoded.tap().map(CardAction::action_type), Some(CardActionType::ShowImage));
    }

    #[test]
    fn nested_tap_errors_carry_the_path() {
        let err = CardImage::from_wire(&json!({
            "url": "https://cdn.example.com/a.png",
            "tap": {"type": "showImage"}
        }))
        .unwrap_err();
        assert_eq!(err.path(), Some("CardImage.tap"));
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn missing_url_fails() {
        let err = CardImage::from_wire(&json!({"alt": "x"})).unwrap_err();
        assert!(matches!(err, DecodingError::MissingField { .. }));
        assert_eq!(err.field(), Some("url"));
    }

    #[test]
    fn relative_and_mixed_case_urls_survive_a_round_trip() {
        for raw in ["images/a.png", "HTTPS://CDN.example.com/A.png"] {
            let wire = json!({"url": raw});
            let image = CardImage::from_wire(&wire).unwrap();
            assert_eq!(image.to_wire(), wire);
        }
        assert!(CardImage::from_wire(&json!({"url": "images/a.png"}))
            .unwrap()
            .url()
            .is_relative());
    }
}
