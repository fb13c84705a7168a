//! JSON value model.
//!
//! A structured interface for reading and building JSON messages. The node
//! type is [`serde_json::Value`]; this module layers the kind taxonomy and
//! Result-returning accessors the codec is written against on top of it via
//! [`ValueExt`], and provides [`Builder`] as the value factory.
//!
//! Numbers keep their parsed representation: integers that fit in a signed
//! 64-bit present as [`Kind::I64`], larger non-negative integers as
//! [`Kind::U64`], and non-integral numbers as [`Kind::F64`]. Serialisation is
//! canonical compact JSON, and floats always render with a decimal point so a
//! reparse yields the same kind.

use serde_json::{Map, Number};
use thiserror::Error;

pub use serde_json::Value;

/// The JSON value kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    I64,
    U64,
    F64,
    String,
    Array,
    Object,
}

/// Error types for JSON parsing and value access
#[derive(Debug, Error)]
pub enum JsonError {
    /// Syntax errors, propagated verbatim from the parser.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("value is {got:?}, not {wanted}")]
    IncorrectType { wanted: &'static str, got: Kind },

    #[error("index >= array length of {length}")]
    IndexOutOfBounds { length: usize },

    #[error("object has no field with name '{0}'")]
    NoSuchMember(String),
}

/// Kind-aware accessors over a JSON value
pub trait ValueExt {
    /// The kind of this JSON value.
    fn kind(&self) -> Kind;

    /// This value serialised as canonical compact JSON.
    fn json(&self) -> String;

    fn try_null(&self) -> Result<(), JsonError>;
    fn try_bool(&self) -> Result<bool, JsonError>;
    fn try_i64(&self) -> Result<i64, JsonError>;
    fn try_u64(&self) -> Result<u64, JsonError>;
    fn try_f64(&self) -> Result<f64, JsonError>;
    fn try_string(&self) -> Result<&str, JsonError>;

    /// The array element at `index`.
    fn element(&self, index: usize) -> Result<&Value, JsonError>;

    /// The object member named `name`.
    fn member(&self, name: &str) -> Result<&Value, JsonError>;

    /// The number of elements if this is an array, the number of members if
    /// this is an object, otherwise 0.
    fn count(&self) -> usize;

    /// The member names of this JSON object.
    fn member_names(&self) -> Result<Vec<&str>, JsonError>;

    /// True if this value is an object with a member named `name`.
    fn has(&self, name: &str) -> bool;
}

impl ValueExt for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) => {
                if n.is_i64() {
                    Kind::I64
                } else if n.is_u64() {
                    Kind::U64
                } else {
                    Kind::F64
                }
            }
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn json(&self) -> String {
        self.to_string()
    }

    fn try_null(&self) -> Result<(), JsonError> {
        if self.is_null() {
            Ok(())
        } else {
            Err(incorrect_type(self, "Null"))
        }
    }

    fn try_bool(&self) -> Result<bool, JsonError> {
        self.as_bool().ok_or_else(|| incorrect_type(self, "Bool"))
    }

    fn try_i64(&self) -> Result<i64, JsonError> {
        self.as_i64().ok_or_else(|| incorrect_type(self, "I64"))
    }

    fn try_u64(&self) -> Result<u64, JsonError> {
        self.as_u64().ok_or_else(|| incorrect_type(self, "U64"))
    }

    fn try_f64(&self) -> Result<f64, JsonError> {
        self.as_f64().ok_or_else(|| incorrect_type(self, "F64"))
    }

    fn try_string(&self) -> Result<&str, JsonError> {
        self.as_str().ok_or_else(|| incorrect_type(self, "String"))
    }

    fn element(&self, index: usize) -> Result<&Value, JsonError> {
        let elements = self
            .as_array()
            .ok_or_else(|| incorrect_type(self, "Array"))?;
        elements.get(index).ok_or(JsonError::IndexOutOfBounds {
            length: elements.len(),
        })
    }

    fn member(&self, name: &str) -> Result<&Value, JsonError> {
        let members = self
            .as_object()
            .ok_or_else(|| incorrect_type(self, "Object"))?;
        members
            .get(name)
            .ok_or_else(|| JsonError::NoSuchMember(name.to_string()))
    }

    fn count(&self) -> usize {
        match self {
            Value::Array(elements) => elements.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        }
    }

    fn member_names(&self) -> Result<Vec<&str>, JsonError> {
        let members = self
            .as_object()
            .ok_or_else(|| incorrect_type(self, "Object"))?;
        Ok(members.keys().map(String::as_str).collect())
    }

    fn has(&self, name: &str) -> bool {
        self.as_object().is_some_and(|members| members.contains_key(name))
    }
}

fn incorrect_type(value: &Value, wanted: &'static str) -> JsonError {
    JsonError::IncorrectType {
        wanted,
        got: value.kind(),
    }
}

/// A single member of a JSON object
#[derive(Clone, Debug)]
pub struct Member {
    /// The member name
    pub name: String,
    /// The member value
    pub value: Value,
}

impl Member {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Factory for JSON values: parses message text and constructs every value
/// shape the codec emits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder;

impl Builder {
    pub fn new() -> Self {
        Self
    }

    /// Parses `json` into a value tree.
    pub fn parse(&self, json: &str) -> Result<Value, JsonError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn null(&self) -> Value {
        Value::Null
    }

    pub fn bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    pub fn i64(&self, value: i64) -> Value {
        Value::Number(value.into())
    }

    pub fn u64(&self, value: u64) -> Value {
        Value::Number(value.into())
    }

    /// Non-finite numbers have no JSON form and become null.
    pub fn f64(&self, value: f64) -> Value {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }

    pub fn string(&self, value: impl Into<String>) -> Value {
        Value::String(value.into())
    }

    pub fn array(&self, elements: Vec<Value>) -> Value {
        Value::Array(elements)
    }

    pub fn object(&self, members: Vec<Member>) -> Value {
        let mut map = Map::new();
        for member in members {
            map.insert(member.name, member.value);
        }
        Value::Object(map)
    }
}
