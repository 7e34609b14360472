use serde::{Deserialize, Serialize};

use super::{Card, CardKind, RenderableCard};
use crate::action::CardAction;
use crate::image::CardImage;
use crate::wire::WireFormat;

/// A key/value row on a receipt (order number, payment method, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    key: String,
    value: String,
}

impl Fact {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl WireFormat for Fact {
    const NAME: &'static str = "Fact";
}

/// One purchased line on a receipt. Prices are display strings, currency included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<CardImage>,
    price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tap: Option<CardAction>,
}

impl ReceiptItem {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            text: None,
            image: None,
            price: price.into(),
            quantity: None,
            tap: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image(mut self, image: CardImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_tap(mut self, tap: CardAction) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&CardImage> {
        self.image.as_ref()
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }

    pub fn tap(&self) -> Option<&CardAction> {
        self.tap.as_ref()
    }
}

impl WireFormat for ReceiptItem {
    const NAME: &'static str = "ReceiptItem";
}

/// An itemized receipt with totals.
///
/// `tax`, `vat` and `tap` are optional; everything else is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptCard {
    title: String,
    facts: Vec<Fact>,
    items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tap: Option<CardAction>,
    total: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vat: Option<String>,
    buttons: Vec<CardAction>,
}

impl ReceiptCard {
    pub fn new(
        title: impl Into<String>,
        facts: Vec<Fact>,
        items: Vec<ReceiptItem>,
        total: impl Into<String>,
        buttons: Vec<CardAction>,
    ) -> Self {
        Self {
            title: title.into(),
            facts,
            items,
            tap: None,
            total: total.into(),
            tax: None,
            vat: None,
            buttons,
        }
    }

    pub fn with_tax(mut self, tax: impl Into<String>) -> Self {
        self.tax = Some(tax.into());
        self
    }

    pub fn with_vat(mut self, vat: impl Into<String>) -> Self {
        self.vat = Some(vat.into());
        self
    }

    pub fn with_tap(mut self, tap: CardAction) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn items(&self) -> &[ReceiptItem] {
        &self.items
    }

    pub fn tap(&self) -> Option<&CardAction> {
        self.tap.as_ref()
    }

    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn tax(&self) -> Option<&str> {
        self.tax.as_deref()
    }

    pub fn vat(&self) -> Option<&str> {
        self.vat.as_deref()
    }

    pub fn buttons(&self) -> &[CardAction] {
        &self.buttons
    }
}

impl WireFormat for ReceiptCard {
    const NAME: &'static str = "ReceiptCard";
}

impl RenderableCard for ReceiptCard {
    const KIND: CardKind = CardKind::Receipt;
}

impl From<ReceiptCard> for Card {
    fn from(card: ReceiptCard) -> Self {
        Card::Receipt(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CardActionType;
    use serde_json::json;

    fn receipt() -> ReceiptCard {
        ReceiptCard::new(
            "Order 1234",
            vec![Fact::new("Order Number", "1234"), Fact::new("Payment", "VISA 5555-****")],
            vec![
                ReceiptItem::new("Data Transfer", "$38.45").with_quantity("368"),
                ReceiptItem::new("App Service", "$45.00").with_subtitle("Standard tier"),
            ],
            "$90.95",
            vec![CardAction::from_raw(CardActionType::OpenUrl, "https://example.com/orders/1234")],
        )
        .with_tax("$7.50")
    }

    #[test]
    fn optional_totals_are_omitted_when_absent() {
        let wire = receipt().to_wire();
        let obj = wire.as_object().unwrap();
        assert_eq!(obj.get("tax"), Some(&json!("$7.50")));
        assert!(!obj.contains_key("vat"));
        assert!(!obj.contains_key("tap"));
        assert!(!wire["items"][0].as_object().unwrap().contains_key("subtitle"));
    }

    #[test]
    fn receipt_round_trips() {
        let card = receipt();
        assert_eq!(ReceiptCard::from_wire(&card.to_wire()).unwrap(), card);
    }

    #[test]
    fn facts_and_items_keep_order() {
        let wire = receipt().to_wire();
        assert_eq!(wire["facts"][0]["key"], "Order Number");
        assert_eq!(wire["facts"][1]["key"], "Payment");
        assert_eq!(wire["items"][1]["title"], "App Service");
    }

    #[test]
    fn item_without_price_fails_with_path() {
        let mut wire = receipt().to_wire();
        wire["items"][0].as_object_mut().unwrap().remove("price");
        let err = ReceiptCard::from_wire(&wire).unwrap_err();
        assert_eq!(err.path(), Some("ReceiptCard.items[0]"));
        assert_eq!(err.field(), Some("price"));
    }
}
