//! Wire encoding shared by cards, actions and their value objects.
//!
//! Entities derive their serde impls; this module only adds the entity name used
//! to root error paths and turns deserializer failures into [`DecodingError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::error::DecodingError;

/// Encode/decode contract for cards, actions and their value objects.
pub trait WireFormat: Serialize + DeserializeOwned {
    /// Entity name used as the root of decoding error paths.
    const NAME: &'static str;

    /// Encodes to the wire object. Absent optional fields are omitted.
    fn to_wire(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn from_wire(value: &Value) -> Result<Self, DecodingError> {
        decode(Self::NAME, value)
    }

    fn from_json(text: &str) -> Result<Self, DecodingError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_wire(&value)
    }

    fn to_json(&self) -> String {
        self.to_wire().to_string()
    }
}

pub(crate) fn decode<T>(entity: &'static str, value: &Value) -> Result<T, DecodingError>
where
    T: DeserializeOwned,
{
    if !value.is_object() {
        return Err(DecodingError::Invalid {
            path: entity.to_string(),
            field: None,
            message: "expected a JSON object".into(),
        });
    }
    serde_path_to_error::deserialize(value).map_err(|err| {
        let segments: Vec<&Segment> = err.path().iter().collect();
        classify(entity, &segments, &err.inner().to_string())
    })
}

fn render(entity: &str, segments: &[&Segment]) -> String {
    let mut path = entity.to_string();
    for segment in segments {
        match segment {
            Segment::Seq { index } => path.push_str(&format!("[{index}]")),
            Segment::Map { key } => {
                path.push('.');
                path.push_str(key);
            }
            Segment::Enum { variant } => {
                path.push('.');
                path.push_str(variant);
            }
            Segment::Unknown => path.push_str(".?"),
        }
    }
    path
}

fn between_backticks(text: &str) -> Option<&str> {
    text.split('`').nth(1)
}

// serde reports missing fields at the enclosing object and every other data error
// at the offending key.
fn classify(entity: &str, segments: &[&Segment], message: &str) -> DecodingError {
    if message.starts_with("missing field `") {
        if let Some(field) = between_backticks(message) {
            return DecodingError::MissingField {
                path: render(entity, segments),
                field: field.to_string(),
            };
        }
    }

    let (parent, field) = match segments.split_last() {
        Some((Segment::Map { key }, parent)) => (parent, Some(key.clone())),
        _ => (segments, None),
    };

    if message.starts_with("unknown variant `") && field.as_deref() == Some("type") {
        if let Some(tag) = between_backticks(message) {
            return DecodingError::UnknownActionType {
                path: render(entity, parent),
                tag: tag.to_string(),
            };
        }
    }

    let message = match &field {
        Some(field) => format!("field `{field}`: {message}"),
        None => message.to_string(),
    };
    DecodingError::Invalid {
        path: render(entity, parent),
        field,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub_title: Option<String>,
        #[serde(default)]
        rows: Vec<Row>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        key: String,
    }

    impl WireFormat for Sample {
        const NAME: &'static str = "Sample";
    }

    #[test]
    fn null_optional_is_absent() {
        let sample = Sample::from_wire(&json!({"title": "t", "subTitle": null})).unwrap();
        assert_eq!(sample.sub_title, None);
        assert_eq!(sample.to_wire(), json!({"title": "t", "rows": []}));
    }

    #[test]
    fn missing_field_names_the_enclosing_entity() {
        let err = Sample::from_wire(&json!({"title": "t", "rows": [{"key": "a"}, {}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Sample.rows[1]: missing required field `key`");
        assert_eq!(err.field(), Some("key"));
    }

    #[test]
    fn wrong_type_names_the_field() {
        let err = Sample::from_wire(&json!({"title": 7})).unwrap_err();
        assert_eq!(err.path(), Some("Sample"));
        assert_eq!(err.field(), Some("title"));
        assert!(err.to_string().starts_with("Sample: field `title`: invalid type"));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Sample::from_wire(&json!(["t"])).unwrap_err();
        assert_eq!(err.to_string(), "Sample: expected a JSON object");
    }

    #[test]
    fn malformed_text_is_a_json_error() {
        let err = Sample::from_json("{\"title\":").unwrap_err();
        assert!(matches!(err, DecodingError::Json(_)));
    }
}
