//! Typed LSP message layer.
//!
//! - **Primitives**: the leaf scalar types of the LSP meta-model
//! - **Encode / Decode**: generic JSON codec dispatch over primitives,
//!   sequences, tuples, maps, optionals and unions
//! - **Message**: the static contract every request/notification type
//!   declares to the session
//! - **Types**: the message and structure catalogue
//! - **Comparators**: position ordering and range containment

pub mod comparators;
pub mod decode;
pub mod encode;
pub mod message;
pub mod primitives;
pub mod types;

pub use decode::Decode;
pub use encode::Encode;
pub use message::{Message, MessageKind, Notification, Request};

use thiserror::Error;

use crate::json::JsonError;

/// Error types for encoding and decoding LSP payloads
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] JsonError),

    #[error("JSON value is not an array")]
    NotAnArray,

    #[error("JSON value is not an object")]
    NotAnObject,

    #[error("JSON array does not match tuple length")]
    TupleLengthMismatch,

    #[error("no types matched the OneOf")]
    OneOfMismatch,

    #[error("number does not fit in {0}")]
    NumberOutOfRange(&'static str),

    #[error("invalid {name} value '{value}'")]
    InvalidEnum { name: &'static str, value: String },
}
