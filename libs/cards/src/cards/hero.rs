use serde::{Deserialize, Serialize};

use super::{Card, CardKind, RenderableCard};
use crate::action::CardAction;
use crate::image::CardImage;
use crate::wire::WireFormat;

/// A card with a single large image, title, text, and action buttons.
///
/// Same fields as [`ThumbnailCard`](super::ThumbnailCard); clients render the
/// image full width above the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroCard {
    title: String,
    subtitle: String,
    text: String,
    images: Vec<CardImage>,
    buttons: Vec<CardAction>,
    tap: CardAction,
}

impl HeroCard {
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

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

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

impl WireFormat for HeroCard {
    const NAME: &'static str = "HeroCard";
}

impl RenderableCard for HeroCard {
    const KIND: CardKind = CardKind::Hero;
}

impl From<HeroCard> for Card {
    fn from(card: HeroCard) -> Self {
        Card::Hero(card)
    }
}
