//! Ordered tagged unions for LSP's sum types.
//!
//! The LSP meta-model leans heavily on unions whose JSON shapes overlap
//! (`integer | string | null` and friends), so the order alternatives are
//! declared in is significant: decoding tries them first to last and keeps
//! the first match. The `Decode` impls in [`crate::lsp::decode`] preserve
//! that order.
//!
//! An absent union is modelled as `Option<OneOf2<..>>` at the field that
//! owns it; recursive payloads break the cycle with `Box` at the recursive
//! edge.

/// A value holding one of two alternatives.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOf2<A, B> {
    A(A),
    B(B),
}

impl<A: Default, B> Default for OneOf2<A, B> {
    fn default() -> Self {
        Self::A(A::default())
    }
}

/// A value holding one of three alternatives.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOf3<A, B, C> {
    A(A),
    B(B),
    C(C),
}

impl<A: Default, B, C> Default for OneOf3<A, B, C> {
    fn default() -> Self {
        Self::A(A::default())
    }
}

/// A value holding one of four alternatives.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOf4<A, B, C, D> {
    A(A),
    B(B),
    C(C),
    D(D),
}

impl<A: Default, B, C, D> Default for OneOf4<A, B, C, D> {
    fn default() -> Self {
        Self::A(A::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_alternative() {
        let v: OneOf2<i32, String> = OneOf2::default();
        assert_eq!(v, OneOf2::A(0));
    }

    #[test]
    fn equality_is_tag_and_value() {
        assert_eq!(OneOf2::<i32, i32>::A(1), OneOf2::A(1));
        assert_ne!(OneOf2::<i32, i32>::A(1), OneOf2::B(1));
        assert_ne!(OneOf2::<i32, i32>::A(1), OneOf2::A(2));
    }
}
