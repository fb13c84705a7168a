//! The static contract between message types and the session.
//!
//! Every LSP message type declares its wire method, whether it carries
//! params, and — for requests — the result and error payload types. The
//! session dispatches purely on these facts, so the catalogue can live
//! outside the core.

use super::decode::Decode;
use super::encode::Encode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Notification,
}

/// Facts common to requests and notifications.
pub trait Message: Encode + Decode + Default {
    /// The method name used in the JSON-RPC envelope.
    const METHOD: &'static str;

    /// Whether the message body travels in a `params` member. When false the
    /// message is dispatched default-constructed.
    const HAS_PARAMS: bool;

    const KIND: MessageKind;
}

/// A message that expects a correlated response.
pub trait Request: Message {
    /// The payload of a successful (`result`) response.
    type Success: Encode + Decode;

    /// The payload of an error response. Requests without a declared error
    /// payload set [`Request::HAS_FAILURE`] to false and use [`super::primitives::Null`]
    /// as an inert stand-in.
    type Failure: Encode + Decode;

    const HAS_FAILURE: bool;
}

/// A fire-and-forget message.
pub trait Notification: Message {}
