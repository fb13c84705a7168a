//! Deserialisation half of the codec.
//!
//! Mirrors [`super::encode`]: one `Decode` impl per leaf primitive plus
//! generic impls for the containers. Union decoding tries alternatives in
//! declaration order and keeps the first success — LSP unions are
//! non-disjoint, so the order is part of the contract.

use std::collections::HashMap;

use super::primitives::Null;
use super::CodecError;
use crate::json::{Kind, Value, ValueExt};
use crate::one_of::{OneOf2, OneOf3, OneOf4};

/// Deserialises a payload from a JSON value.
pub trait Decode: Sized {
    fn decode(v: &Value) -> Result<Self, CodecError>;
}

impl Decode for Null {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        v.try_null()?;
        Ok(Null)
    }
}

impl Decode for bool {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        Ok(v.try_bool()?)
    }
}

impl Decode for i32 {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        i32::try_from(v.try_i64()?).map_err(|_| CodecError::NumberOutOfRange("Integer"))
    }
}

impl Decode for u32 {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        u32::try_from(v.try_u64()?).map_err(|_| CodecError::NumberOutOfRange("Uinteger"))
    }
}

impl Decode for f64 {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        Ok(v.try_f64()?)
    }
}

impl Decode for String {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        Ok(v.try_string()?.to_string())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        T::decode(v).map(Some)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        T::decode(v).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        if v.kind() != Kind::Array {
            return Err(CodecError::NotAnArray);
        }
        let mut out = Vec::with_capacity(v.count());
        for i in 0..v.count() {
            out.push(T::decode(v.element(i)?)?);
        }
        Ok(out)
    }
}

impl<V: Decode> Decode for HashMap<String, V> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        if v.kind() != Kind::Object {
            return Err(CodecError::NotAnObject);
        }
        let mut out = HashMap::with_capacity(v.count());
        for name in v.member_names()? {
            out.insert(name.to_string(), V::decode(v.member(name)?)?);
        }
        Ok(out)
    }
}

macro_rules! tuple_decode {
    ($count:literal; $($ty:ident . $idx:tt),+) => {
        impl<$($ty: Decode),+> Decode for ($($ty,)+) {
            fn decode(v: &Value) -> Result<Self, CodecError> {
                if v.kind() != Kind::Array {
                    return Err(CodecError::NotAnArray);
                }
                if v.count() != $count {
                    return Err(CodecError::TupleLengthMismatch);
                }
                Ok(($($ty::decode(v.element($idx)?)?,)+))
            }
        }
    };
}

tuple_decode!(1; T0.0);
tuple_decode!(2; T0.0, T1.1);
tuple_decode!(3; T0.0, T1.1, T2.2);
tuple_decode!(4; T0.0, T1.1, T2.2, T3.3);

impl<A: Decode, B: Decode> Decode for OneOf2<A, B> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        A::decode(v)
            .map(Self::A)
            .or_else(|_| B::decode(v).map(Self::B))
            .map_err(|_| CodecError::OneOfMismatch)
    }
}

impl<A: Decode, B: Decode, C: Decode> Decode for OneOf3<A, B, C> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        A::decode(v)
            .map(Self::A)
            .or_else(|_| B::decode(v).map(Self::B))
            .or_else(|_| C::decode(v).map(Self::C))
            .map_err(|_| CodecError::OneOfMismatch)
    }
}

impl<A: Decode, B: Decode, C: Decode, D: Decode> Decode for OneOf4<A, B, C, D> {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        A::decode(v)
            .map(Self::A)
            .or_else(|_| B::decode(v).map(Self::B))
            .or_else(|_| C::decode(v).map(Self::C))
            .or_else(|_| D::decode(v).map(Self::D))
            .map_err(|_| CodecError::OneOfMismatch)
    }
}
