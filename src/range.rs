//! Addressing and range semantics for ordered collections
//!
//! Index ranges are sent to the server unchanged: the collection length is
//! not known client-side, so negative indices keep the protocol's own
//! "offset from the end" meaning (-1 = last element).

use std::ops::Range;

use bytes::Bytes;

use crate::error::DomainError;
use crate::value::Number;

/// Inclusive index range over a list or sorted set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    pub from: i64,
    pub to: i64,
}

impl RangeSpec {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// The whole collection (0, -1)
    pub fn all() -> Self {
        Self::new(0, -1)
    }

    /// Only the last element (-1, -1)
    pub fn last() -> Self {
        Self::new(-1, -1)
    }

    /// Validate for the wire
    ///
    /// Both bounds are whole numbers by construction, so this never rewrites
    /// them; resolving a resolved range returns it unchanged.
    pub fn resolve(self) -> std::result::Result<Self, DomainError> {
        Ok(self)
    }

    /// The positions this range denotes in a collection of `len` elements
    ///
    /// Mirrors the server: negative bounds count from the end, bounds are
    /// clamped into `[0, len - 1]`, and an inverted or out-of-bounds range is
    /// empty rather than an error.
    pub fn to_absolute(&self, len: u64) -> Range<u64> {
        let len = len as i128;
        let normalize = |bound: i64| {
            let bound = bound as i128;
            if bound < 0 {
                len + bound
            } else {
                bound
            }
        };

        let start = normalize(self.from).max(0);
        let end = normalize(self.to).min(len - 1);

        if len == 0 || start > end {
            return 0..0;
        }
        start as u64..(end as u64 + 1)
    }

    pub(crate) fn wire_args(&self) -> [Bytes; 2] {
        [
            Bytes::from(self.from.to_string()),
            Bytes::from(self.to.to_string()),
        ]
    }
}

/// Inclusive score bounds for sorted-set queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    min: f64,
    max: f64,
}

impl ScoreRange {
    /// Both bounds must be finite; `min > max` is allowed and matches nothing
    pub fn new(min: f64, max: f64) -> std::result::Result<Self, DomainError> {
        for bound in [min, max] {
            if !bound.is_finite() {
                return Err(DomainError::InvalidScore(bound));
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }

    pub(crate) fn wire_args(&self) -> [Bytes; 2] {
        // finite bounds always have a canonical form
        [score_text(self.min), score_text(self.max)]
    }
}

fn score_text(score: f64) -> Bytes {
    Bytes::from(Number::Float(score).to_string())
}

/// A sorted-set member together with its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub member: Bytes,
    pub score: f64,
}

impl ScoredEntry {
    pub fn new(member: impl Into<Bytes>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}
