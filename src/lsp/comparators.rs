//! Position ordering and range containment.
//!
//! `Position` orders lexicographically (line, then character), which the
//! derived `Ord` already provides; `compare` exists for callers that want
//! the three-way result spelled out.

use std::cmp::Ordering;

use super::types::{Position, Range};

/// Three-way comparison of two positions.
pub fn compare(a: Position, b: Position) -> Ordering {
    a.cmp(&b)
}

/// True if the range `[r.start, r.end)` contains `p`.
pub fn contains_exclusive(r: Range, p: Position) -> bool {
    p >= r.start && p < r.end
}

/// True if the range `[r.start, r.end]` contains `p`.
pub fn contains_inclusive(r: Range, p: Position) -> bool {
    p >= r.start && p <= r.end
}
