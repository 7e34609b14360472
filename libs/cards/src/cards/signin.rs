use serde::{Deserialize, Serialize};

use super::{Card, CardKind, RenderableCard};
use crate::action::CardAction;
use crate::wire::WireFormat;

/// Asks the user to sign in; the button usually carries a `signin` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninCard {
    text: String,
    buttons: Vec<CardAction>,
}

impl SigninCard {
    pub fn new(text: impl Into<String>, buttons: Vec<CardAction>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn buttons(&self) -> &[CardAction] {
        &self.buttons
    }
}

impl WireFormat for SigninCard {
    const NAME: &'static str = "SigninCard";
}

impl RenderableCard for SigninCard {
    const KIND: CardKind = CardKind::Signin;
}

impl From<SigninCard> for Card {
    fn from(card: SigninCard) -> Self {
        Card::Signin(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CardActionType;
    use serde_json::json;

    #[test]
    fn signin_card_wire_shape() {
        let card = SigninCard::new(
            "Please sign in",
            vec![
                CardAction::from_raw(CardActionType::Signin, "https://login.example.com/oauth")
                    .with_title("Sign in"),
            ],
        );
        assert_eq!(
            card.to_wire(),
            json!({
                "text": "Please sign in",
                "buttons": [{
                    "type": "signin",
                    "value": "https://login.example.com/oauth",
                    "title": "Sign in"
                }]
            })
        );
    }

    #[test]
    fn buttons_must_be_an_array() {
        let err = SigninCard::from_wire(&json!({"text": "x", "buttons": {}})).unwrap_err();
        assert_eq!(err.path(), Some("SigninCard"));
        assert_eq!(err.field(), Some("buttons"));
        assert!(err.to_string().contains("expected a sequence"));
    }
}
