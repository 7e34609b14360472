use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card_url::CardUrl;
use crate::encoder::{JsonEncoder, PayloadEncoder, encode_raw};
use crate::error::EncodingError;
use crate::wire::WireFormat;

/// What the platform does when a card action is activated.
///
/// The tag tells the platform how to read [`CardAction::value`]; the model itself
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardActionType {
    MessageBack,
    /// URL to be opened in the built-in browser.
    OpenUrl,
    /// Text sent to the bot and shown to every conversation participant.
    ImBack,
    /// Text sent to the bot; some clients also show it in the feed.
    PostBack,
    /// Phone number to dial, e.g. `123123123123`.
    Call,
    PlayAudio,
    PlayVideo,
    ShowImage,
    DownloadFile,
    /// URL of an OAuth flow to start.
    Signin,
}

impl CardActionType {
    pub const ALL: [CardActionType; 10] = [
        CardActionType::MessageBack,
        CardActionType::OpenUrl,
        CardActionType::ImBack,
        CardActionType::PostBack,
        CardActionType::Call,
        CardActionType::PlayAudio,
        CardActionType::PlayVideo,
        CardActionType::ShowImage,
        CardActionType::DownloadFile,
        CardActionType::Signin,
    ];

    /// Wire tag for the action type.
    pub fn as_str(self) -> &'static str {
        match self {
            CardActionType::MessageBack => "messageBack",
            CardActionType::OpenUrl => "openUrl",
            CardActionType::ImBack => "imBack",
            CardActionType::PostBack => "postBack",
            CardActionType::Call => "call",
            CardActionType::PlayAudio => "playAudio",
            CardActionType::PlayVideo => "playVideo",
            CardActionType::ShowImage => "showImage",
            CardActionType::DownloadFile => "downloadFile",
            CardActionType::Signin => "signin",
        }
    }
}

impl fmt::Display for CardActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the wire tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card action type `{0}`")]
pub struct UnknownActionType(pub String);

impl FromStr for CardActionType {
    type Err = UnknownActionType;

    // Case-sensitive: `OpenUrl` is not `openUrl` on the wire.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        CardActionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| UnknownActionType(tag.to_string()))
    }
}

/// A clickable button or tap target on a card.
///
/// `value` is always a plain string at rest. Structured payloads are encoded when
/// the action is built, so the wire carries a JSON string inside the JSON object.
///
/// ```
/// use gsm_cards::{CardAction, CardActionType};
/// use serde_json::json;
///
/// let action = CardAction::from_value(
///     CardActionType::OpenUrl,
///     &json!({"url": "https://example.com"}),
/// )
/// .unwrap()
/// .with_title("Open");
///
/// assert_eq!(action.value(), r#"{"url":"https://example.com"}"#);
/// assert_eq!(
///     serde_json::to_value(&action).unwrap(),
///     json!({
///         "type": "openUrl",
///         "value": "{\"url\":\"https://example.com\"}",
///         "title": "Open"
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAction {
    #[serde(rename = "type")]
    action_type: CardActionType,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<CardUrl>,
}

impl CardAction {
    /// Builds an action around a value that is already wire-ready.
    pub fn from_raw(action_type: CardActionType, value: impl Into<String>) -> Self {
        Self {
            action_type,
            value: encode_raw(value),
            title: None,
            text: None,
            display_text: None,
            channel_data: None,
            image: None,
        }
    }

    /// Builds an action whose value is `value` encoded with the default [`JsonEncoder`].
    pub fn from_value<T>(action_type: CardActionType, value: &T) -> Result<Self, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        Self::from_value_with(action_type, value, &JsonEncoder::default())
    }

    /// Builds an action whose value is `value` encoded with `encoder`.
    ///
    /// On failure no action is produced.
    pub fn from_value_with<T, E>(
        action_type: CardActionType,
        value: &T,
        encoder: &E,
    ) -> Result<Self, EncodingError>
    where
        T: Serialize + ?Sized,
        E: PayloadEncoder,
    {
        match encoder.encode(value) {
            Ok(encoded) => {
                tracing::trace!(
                    action_type = %action_type,
                    value_len = encoded.len(),
                    "encoded card action value"
                );
                Ok(Self::from_raw(action_type, encoded))
            }
            Err(err) => {
                tracing::debug!(
                    action_type = %action_type,
                    error = %err,
                    "card action value rejected by encoder"
                );
                Err(err)
            }
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Text shown in the chat feed when the button is clicked.
    pub fn with_display_text(mut self, display_text: impl Into<String>) -> Self {
        self.display_text = Some(display_text.into());
        self
    }

    pub fn with_channel_data(mut self, channel_data: impl Into<String>) -> Self {
        self.channel_data = Some(channel_data.into());
        self
    }

    /// Icon shown on the button next to the label.
    pub fn with_image(mut self, image: impl Into<CardUrl>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn action_type(&self) -> CardActionType {
        self.action_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    pub fn channel_data(&self) -> Option<&str> {
        self.channel_data.as_deref()
    }

    pub fn image(&self) -> Option<&CardUrl> {
        self.image.as_ref()
    }
}

impl WireFormat for CardAction {
    const NAME: &'static str = "CardAction";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodingError;
    use serde_json::json;

    #[test]
    fn action_type_tags_round_trip() {
        for kind in CardActionType::ALL {
            assert_eq!(kind.as_str().parse::<CardActionType>(), Ok(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
        assert!("OpenUrl".parse::<CardActionType>().is_err());
    }

    #[test]
    fn raw_constructor_stores_value_verbatim() {
        let action = CardAction::from_raw(CardActionType::Call, "123123123123");
        assert_eq!(action.value(), "123123123123");
        assert_eq!(action.title(), None);
        assert_eq!(
            action.to_wire(),
            json!({"type": "call", "value": "123123123123"})
        );
    }

    #[test]
    fn typed_value_is_double_encoded_on_the_wire() {
        let action =
            CardAction::from_value(CardActionType::MessageBack, &json!({"choice": 2})).unwrap();
        let wire = action.to_json();
        assert_eq!(wire, r#"{"type":"messageBack","value":"{\"choice\":2}"}"#);
    }

    #[test]
    fn all_optional_fields_round_trip() {
        let action = CardAction::from_raw(CardActionType::ImBack, "yes")
            .with_title("Yes")
            .with_text("yes please")
            .with_display_text("I said yes")
            .with_channel_data("{\"teams\":true}")
            .with_image(CardUrl::parse("https://cdn.example.com/yes.png").unwrap());
        let wire = action.to_wire();
        assert_eq!(wire["displayText"], "I said yes");
        assert_eq!(wire["channelData"], "{\"teams\":true}");
        assert_eq!(wire["image"], "https://cdn.example.com/yes.png");
        assert_eq!(CardAction::from_wire(&wire).unwrap(), action);
    }

    #[test]
    #[tracing_test::traced_test]
    fn rejected_payload_is_logged_and_yields_no_action() {
        let result = CardAction::from_value(CardActionType::PostBack, &[f64::NAN]);
        assert!(matches!(result, Err(EncodingError::NonFiniteNumber(_))));
        assert!(logs_contain("card action value rejected by encoder"));
    }

    #[test]
    fn missing_value_fails() {
        let err = CardAction::from_wire(&json!({"type": "imBack"})).unwrap_err();
        assert!(matches!(err, DecodingError::MissingField { .. }));
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn missing_type_fails() {
        let err = CardAction::from_wire(&json!({"value": "x"})).unwrap_err();
        assert!(matches!(err, DecodingError::MissingField { .. }));
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn unknown_type_fails() {
        let err = CardAction::from_json(r#"{"type":"frobnicate","value":"x"}"#).unwrap_err();
        match err {
            DecodingError::UnknownActionType { path, tag } => {
                assert_eq!(path, "CardAction");
                assert_eq!(tag, "frobnicate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn structured_value_on_the_wire_is_rejected() {
        let err =
            CardAction::from_wire(&json!({"type": "postBack", "value": {"a": 1}})).unwrap_err();
        assert!(matches!(err, DecodingError::Invalid { .. }));
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn invalid_image_url_fails() {
        let err = CardAction::from_wire(&json!({
            "type": "openUrl",
            "value": "https://example.com",
            "image": "not a url"
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("image"));
        assert!(err.to_string().contains("invalid url `not a url`"));
    }

    #[test]
    fn null_optionals_are_absent_but_null_value_is_not() {
        let action = CardAction::from_wire(&json!({
            "type": "imBack",
            "value": "yes",
            "title": null,
            "image": null
        }))
        .unwrap();
        assert_eq!(action.title(), None);
        assert_eq!(action.to_wire(), json!({"type": "imBack", "value": "yes"}));

        let err = CardAction::from_wire(&json!({"type": "imBack", "value": null})).unwrap_err();
        assert!(matches!(err, DecodingError::Invalid { .. }));
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn image_url_is_emitted_as_sent() {
        let wire = json!({
            "type": "openUrl",
            "value": "x",
            "image": "https://Example.com"
        });
        let action = CardAction::from_wire(&wire).unwrap();
        assert_eq!(action.to_wire(), wire);
        assert_eq!(action.image().map(CardUrl::as_str), Some("https://Example.com"));
    }

    #[test]
    fn plain_serde_rejects_unknown_tags_too() {
        let err = serde_json::from_str::<CardAction>(r#"{"type":"frobnicate","value":"x"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant `frobnicate`"));
    }
}
