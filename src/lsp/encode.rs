//! Serialisation half of the codec.
//!
//! One `Encode` impl per leaf primitive, plus generic impls for the
//! containers (sequences, tuples, maps, optionals, boxes, unions) so that
//! message codecs compose field-by-field.

use std::collections::HashMap;

use super::primitives::Null;
use super::CodecError;
use crate::json::{Builder, Member, Value};
use crate::one_of::{OneOf2, OneOf3, OneOf4};

/// Serialises a payload to a JSON value.
pub trait Encode {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError>;
}

impl Encode for Null {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.null())
    }
}

impl Encode for bool {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.bool(*self))
    }
}

impl Encode for i32 {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.i64(i64::from(*self)))
    }
}

impl Encode for u32 {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.u64(u64::from(*self)))
    }
}

impl Encode for f64 {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.f64(*self))
    }
}

impl Encode for String {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.string(self.as_str()))
    }
}

/// Forwards to the contained value; an empty optional encodes as null.
/// Absent-member handling belongs to the containing object codec, which
/// skips the member entirely rather than calling this.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        match self {
            Some(value) => value.encode(b),
            None => Ok(b.null()),
        }
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        (**self).encode(b)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        let mut elements = Vec::with_capacity(self.len());
        for element in self {
            elements.push(element.encode(b)?);
        }
        Ok(b.array(elements))
    }
}

impl<V: Encode> Encode for HashMap<String, V> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        let mut members = Vec::with_capacity(self.len());
        for (name, value) in self {
            members.push(Member::new(name.as_str(), value.encode(b)?));
        }
        Ok(b.object(members))
    }
}

macro_rules! tuple_encode {
    ($($ty:ident . $idx:tt),+) => {
        impl<$($ty: Encode),+> Encode for ($($ty,)+) {
            fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
                Ok(b.array(vec![$(self.$idx.encode(b)?),+]))
            }
        }
    };
}

tuple_encode!(T0.0);
tuple_encode!(T0.0, T1.1);
tuple_encode!(T0.0, T1.1, T2.2);
tuple_encode!(T0.0, T1.1, T2.2, T3.3);

impl<A: Encode, B: Encode> Encode for OneOf2<A, B> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        match self {
            Self::A(v) => v.encode(b),
            Self::B(v) => v.encode(b),
        }
    }
}

impl<A: Encode, B: Encode, C: Encode> Encode for OneOf3<A, B, C> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        match self {
            Self::A(v) => v.encode(b),
            Self::B(v) => v.encode(b),
            Self::C(v) => v.encode(b),
        }
    }
}

impl<A: Encode, B: Encode, C: Encode, D: Encode> Encode for OneOf4<A, B, C, D> {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        match self {
            Self::A(v) => v.encode(b),
            Self::B(v) => v.encode(b),
            Self::C(v) => v.encode(b),
            Self::D(v) => v.encode(b),
        }
    }
}
