// crates/otio-core/src/interval.rs

//! `ContinuousInterval`: a clopen `[start, end)` span of [`Ordinate`]s.

use crate::Ordinate;
use std::fmt;

/// A clopen interval `[start, end)`. `start == end` denotes the unique
/// empty interval; either endpoint may be infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuousInterval {
    /// Inclusive lower bound.
    pub start: Ordinate,
    /// Exclusive upper bound.
    pub end: Ordinate,
}

impl ContinuousInterval {
    /// Construct `[start, end)`.
    ///
    /// # Panics
    /// Panics if `start > end` (an invariant violation by the caller, not a
    /// runtime degeneracy).
    #[must_use]
    pub fn new(start: Ordinate, end: Ordinate) -> Self {
        assert!(
            matches!(start.partial_cmp(&end), Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)),
            "ContinuousInterval::new: start must be <= end"
        );
        Self { start, end }
    }

    /// The unique empty interval at a point.
    #[must_use]
    pub fn empty_at(point: Ordinate) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// An interval unbounded in both directions.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            start: Ordinate::NegInf,
            end: Ordinate::PosInf,
        }
    }

    /// `true` iff `start == end` (no ordinates are contained).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `end - start`.
    #[must_use]
    pub fn duration(self) -> Ordinate {
        self.end.sub(self.start)
    }

    /// Clopen containment: `o` is inside iff `start <= o < end`.
    #[must_use]
    pub fn contains(self, o: Ordinate) -> bool {
        matches!(
            self.start.partial_cmp(&o),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        ) && matches!(o.partial_cmp(&self.end), Some(std::cmp::Ordering::Less))
    }

    /// `true` iff `other` is entirely contained in `self`.
    #[must_use]
    pub fn contains_interval(self, other: Self) -> bool {
        if other.is_empty() {
            return self.contains(other.start) || self.start == other.start;
        }
        matches!(
            self.start.partial_cmp(&other.start),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        ) && matches!(
            other.end.partial_cmp(&self.end),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )
    }

    /// Intersection, empty iff the two spans do not overlap (clopen rule:
    /// `a.end <= b.start` or `b.end <= a.start`).
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        let starts_le = |a: Ordinate, b: Ordinate| {
            matches!(
                a.partial_cmp(&b),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            )
        };
        if starts_le(self.end, other.start) || starts_le(other.end, self.start) {
            // Disjoint (or touching at a clopen boundary): empty at the
            // later of the two starts.
            let at = if starts_le(self.start, other.start) {
                other.start
            } else {
                self.start
            };
            return Self::empty_at(at);
        }
        let start = if starts_le(self.start, other.start) {
            other.start
        } else {
            self.start
        };
        let end = if starts_le(self.end, other.end) {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Union of two *overlapping or touching* intervals. Returns `None` if
    /// the two spans are disjoint with a genuine gap between them.
    #[must_use]
    pub fn union_overlapping(self, other: Self) -> Option<Self> {
        let touch_or_overlap = !self.intersection(other).is_empty()
            || self.end == other.start
            || other.end == self.start;
        if !touch_or_overlap {
            return None;
        }
        let le = |a: Ordinate, b: Ordinate| {
            matches!(
                a.partial_cmp(&b),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            )
        };
        let start = if le(self.start, other.start) {
            self.start
        } else {
            other.start
        };
        let end = if le(self.end, other.end) {
            other.end
        } else {
            self.end
        };
        Some(Self { start, end })
    }

    /// Translate both endpoints by `offset`.
    #[must_use]
    pub fn translate(self, offset: Ordinate) -> Self {
        Self {
            start: self.start.add(offset),
            end: self.end.add(offset),
        }
    }

    /// Scale both endpoints by `factor` (a negative factor flips the
    /// interval's sense; the endpoints are re-ordered so `start <= end`
    /// still holds).
    #[must_use]
    pub fn scale(self, factor: Ordinate) -> Self {
        let a = self.start.mul(factor);
        let b = self.end.mul(factor);
        match a.partial_cmp(&b) {
            Some(std::cmp::Ordering::Greater) => Self { start: b, end: a },
            _ => Self { start: a, end: b },
        }
    }
}

impl fmt::Display for ContinuousInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
