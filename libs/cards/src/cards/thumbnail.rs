use serde::{Deserialize, Serialize};

use super::{Card, CardKind, RenderableCard};
use crate::action::CardAction;
use crate::image::CardImage;
use crate::wire::WireFormat;

/// A card with a thumbnail image, title, text, and action buttons.
///
/// `images` and `buttons` keep the caller's order, which is the display order.
/// `tap` may repeat one of the buttons or be an independent action.
///
/// ```
/// use gsm_cards::{CardAction, CardActionType, CardImage, ThumbnailCard, WireFormat};
/// use url::Url;
///
/// let open = CardAction::from_raw(CardActionType::OpenUrl, "https://example.com/report");
/// let card = ThumbnailCard::new(
///     "Weekly report",
///     "Week 42",
///     "Revenue is up 4%",
///     vec![CardImage::new(Url::parse("https://example.com/chart.png").unwrap())],
///     vec![open.clone()],
///     open,
/// );
///
/// let wire = card.to_wire();
/// assert_eq!(wire["buttons"][0]["type"], "openUrl");
/// assert_eq!(ThumbnailCard::from_wire(&wire).unwrap(), card);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailCard {
    title: String,
    subtitle: String,
    text: String,
    images: Vec<CardImage>,
    buttons: Vec<CardAction>,
    tap: CardAction,
}

impl ThumbnailCard {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        text: impl Into<String>,
        images: Vec<CardImage>,
        buttons: Vec<CardAction>,
        tap: CardAction,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            text: text.into(),
            images,
            buttons,
            tap,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Shown under the title.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Description or prompt shown under the title or subtitle.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn images(&self) -> &[CardImage] {
        &self.images
    }

    pub fn buttons(&self) -> &[CardAction] {
        &self.buttons
    }

    pub fn tap(&self) -> &CardAction {
        &self.tap
    }
}

impl WireFormat for ThumbnailCard {
    const NAME: &'static str = "ThumbnailCard";
}

impl RenderableCard for ThumbnailCard {
    const KIND: CardKind = CardKind::Thumbnail;
}

impl From<ThumbnailCard> for Card {
    fn from(card: ThumbnailCard) -> Self {
        Card::Thumbnail(card)
    }
}
