//! Bot Framework card attachments for Greentic messaging.
//!
//! Cards are immutable value types. Each one converts to and from the JSON object
//! the platform expects through [`WireFormat`], built on their derived `serde`
//! impls. Card actions carry their payload as an opaque string: raw
//! strings are stored as given, typed values are encoded with a [`PayloadEncoder`]
//! when the action is built.
//!
//! Nothing here performs I/O. Sending the attachment and choosing the envelope
//! `contentType` belong to the egress layer.

pub mod action;
mod card_url;
pub mod cards;
pub mod encoder;
pub mod error;
pub mod image;
mod wire;

pub use action::{CardAction, CardActionType, UnknownActionType};
pub use card_url::{CardUrl, InvalidCardUrl};
pub use cards::{
    Card, CardKind, Compatibility, Fact, HeroCard, ReceiptCard, ReceiptItem, RenderableCard,
    SigninCard, ThumbnailCard, UnknownCardKind,
};
pub use encoder::{
    EncoderConfig, JsonEncoder, KeyEncoding, NonFiniteFloats, OutputFormatting, PayloadEncoder,
    encode_raw,
};
pub use error::{DecodingError, EncodingError};
pub use image::CardImage;
pub use wire::WireFormat;
