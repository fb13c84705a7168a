//! The base scalar types of the LSP meta-model.

/// The JSON null payload. LSP uses it as an explicit union alternative
/// (`integer | null` and the like), so it is a real type here rather than an
/// absence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

pub type Boolean = bool;

/// Signed 32-bit integer, the meta-model's `integer`.
pub type Integer = i32;

/// Unsigned 31-bit-safe integer, the meta-model's `uinteger`.
pub type Uinteger = u32;

/// 64-bit float, the meta-model's `decimal`.
pub type Decimal = f64;

/// A document URI, transported as a plain string.
pub type DocumentUri = String;

/// A general URI, transported as a plain string.
pub type Uri = String;
