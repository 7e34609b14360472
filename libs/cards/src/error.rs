use std::fmt::Display;

use thiserror::Error;

/// Raised when a typed action payload cannot be represented by the configured encoder.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("non-finite number {0} cannot be encoded as JSON")]
    NonFiniteNumber(f64),
    #[error("two payload keys both encode as `{0}`")]
    KeyCollision(String),
    #[error("value is not serializable: {0}")]
    Unsupported(String),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl serde::ser::Error for EncodingError {
    fn custom<T: Display>(msg: T) -> Self {
        EncodingError::Unsupported(msg.to_string())
    }
}

/// Raised when a wire payload does not describe a valid card, image or action.
///
/// `path` names the entity being decoded, e.g. `ThumbnailCard.buttons[1]`.
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: String },
    #[error("{path}: unknown card action type `{tag}`")]
    UnknownActionType { path: String, tag: String },
    /// Wrong JSON type, malformed URL, or a payload that is not an object.
    #[error("{path}: {message}")]
    Invalid {
        path: String,
        field: Option<String>,
        message: String,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodingError {
    /// Name of the field that caused the failure, when one is known.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodingError::MissingField { field, .. } => Some(field.as_str()),
            DecodingError::UnknownActionType { .. } => Some("type"),
            DecodingError::Invalid { field, .. } => field.as_deref(),
            DecodingError::Json(_) => None,
        }
    }

    /// Path of the entity that failed to decode.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodingError::MissingField { path, .. }
            | DecodingError::UnknownActionType { path, .. }
            | DecodingError::Invalid { path, .. } => Some(path.as_str()),
            DecodingError::Json(_) => None,
        }
    }
}
