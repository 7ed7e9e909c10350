// crates/otio-curves/src/linear.rs

//! `LinearMonotonicCurve`: an ordered knot sequence, piecewise-linear
//! between knots, strictly increasing in `in` (not required monotonic in
//! `out`).

use otio_core::{ContinuousInterval, Error, Ordinate};

/// A single knot `(in, out)` of a [`LinearMonotonicCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knot {
    /// Input-axis ordinate.
    pub r#in: Ordinate,
    /// Output-axis ordinate.
    pub out: Ordinate,
}

/// A piecewise-linear curve, strictly increasing in `in`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearMonotonicCurve {
    knots: Vec<Knot>,
}

impl LinearMonotonicCurve {
    /// Construct from knots, validating that `in` is strictly increasing.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if there are fewer than two knots or
    /// `in` is not strictly increasing.
    pub fn new(knots: Vec<Knot>) -> Result<Self, Error> {
        if knots.len() < 2 {
            return Err(Error::Malformed {
                reason: "a linear curve needs at least two knots".to_string(),
            });
        }
        for w in knots.windows(2) {
            if !matches!(
                w[0].r#in.partial_cmp(&w[1].r#in),
                Some(std::cmp::Ordering::Less)
            ) {
                return Err(Error::Malformed {
                    reason: "linear curve knots must be strictly increasing in `in`".to_string(),
                });
            }
        }
        Ok(Self { knots })
    }

    /// The knots, in order.
    #[must_use]
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// `[first.in, last.in)`.
    #[must_use]
    pub fn input_bounds(&self) -> ContinuousInterval {
        ContinuousInterval::new(self.knots[0].r#in, self.knots[self.knots.len() - 1].r#in)
    }

    /// The union of per-segment output spans (since `out` need not be
    /// monotonic, this is `[min(out), max(out))`-ish expressed as the
    /// smallest interval containing every knot's `out`).
    #[must_use]
    pub fn output_bounds(&self) -> ContinuousInterval {
        let mut lo = self.knots[0].out;
        let mut hi = self.knots[0].out;
        for k in &self.knots[1..] {
            if matches!(k.out.partial_cmp(&lo), Some(std::cmp::Ordering::Less)) {
                lo = k.out;
            }
            if matches!(k.out.partial_cmp(&hi), Some(std::cmp::Ordering::Greater)) {
                hi = k.out;
            }
        }
        ContinuousInterval::new(lo, hi)
    }

    fn segment_for(&self, x: Ordinate) -> Result<usize, Error> {
        let bounds = self.input_bounds();
        if !bounds.contains(x) {
            // x == input_bounds().end is rejected here too; callers that need
            // the closed endpoint go through eval_closed instead.
            return Err(Error::OutOfBounds {
                ordinate: x,
                bounds,
            });
        }
        // Binary search for the segment i such that knots[i].in <= x < knots[i+1].in.
        let mut lo = 0usize;
        let mut hi = self.knots.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if matches!(
                self.knots[mid].r#in.partial_cmp(&x),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Linear interpolation between the bracketing knots, exact in
    /// rational arithmetic.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside `input_bounds()`.
    pub fn eval(&self, x: Ordinate) -> Result<Ordinate, Error> {
        let i = self.segment_for(x)?;
        let (a, b) = (self.knots[i], self.knots[i + 1]);
        if x == a.r#in {
            return Ok(a.out);
        }
        let span_in = b.r#in.sub(a.r#in);
        let t = x.sub(a.r#in).div(span_in);
        Ok(a.out.add(t.mul(b.out.sub(a.out))))
    }

    /// Like [`Self::eval`] but treats `input_bounds()` as closed on the
    /// right, for callers (interval hulls, splits, topology composition)
    /// that need the limit value at the excluded endpoint.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside the closed span.
    pub fn eval_closed(&self, x: Ordinate) -> Result<Ordinate, Error> {
        let last = self.knots[self.knots.len() - 1];
        if x == last.r#in {
            return Ok(last.out);
        }
        self.eval(x)
    }

    /// The smallest interval containing every `out` value attained over
    /// `iv ∩ input_bounds()`; since `out` need not be monotonic, this
    /// walks every knot inside the clipped range, not just its endpoints.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if `iv` does not overlap `input_bounds()`.
    pub fn project_interval(&self, iv: ContinuousInterval) -> Result<ContinuousInterval, Error> {
        let clipped = self.input_bounds().intersection(iv);
        if clipped.is_empty() {
            return Err(Error::Empty);
        }
        let start_val = self.eval_closed(clipped.start)?;
        let mut lo = start_val;
        let mut hi = start_val;
        for k in &self.knots {
            let after_start = matches!(
                k.r#in.partial_cmp(&clipped.start),
                Some(std::cmp::Ordering::Greater)
            );
            let before_end = matches!(
                k.r#in.partial_cmp(&clipped.end),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            );
            if after_start && before_end {
                if k.out < lo {
                    lo = k.out;
                }
                if k.out > hi {
                    hi = k.out;
                }
            }
        }
        let end_val = self.eval_closed(clipped.end)?;
        if end_val < lo {
            lo = end_val;
        }
        if end_val > hi {
            hi = end_val;
        }
        Ok(ContinuousInterval::new(lo, hi))
    }

    /// Split at `x`, which must lie strictly inside `input_bounds()`
    /// (callers at the `Mapping` layer handle the `x == start` boundary,
    /// which would otherwise leave an empty left half).
    #[must_use]
    pub fn split_at(&self, x: Ordinate) -> (Self, Self) {
        let y = self
            .eval(x)
            .expect("caller validated x is interior to input_bounds()");
        let mut left: Vec<Knot> = self
            .knots
            .iter()
            .copied()
            .take_while(|k| matches!(k.r#in.partial_cmp(&x), Some(std::cmp::Ordering::Less)))
            .collect();
        left.push(Knot { r#in: x, out: y });
        let mut right = vec![Knot { r#in: x, out: y }];
        right.extend(
            self.knots
                .iter()
                .copied()
                .filter(|k| matches!(k.r#in.partial_cmp(&x), Some(std::cmp::Ordering::Greater))),
        );
        (
            Self::new(left).expect("left half keeps >= 2 knots when x is interior"),
            Self::new(right).expect("right half keeps >= 2 knots when x is interior"),
        )
    }

    /// Construct the inverse curve (swap `in`/`out`), valid only if `out`
    /// is itself strictly monotonic.
    ///
    /// # Errors
    /// Returns [`Error::NotInvertible`] if `out` is not strictly monotonic.
    pub fn invert(&self) -> Result<Self, Error> {
        let increasing = self
            .knots
            .windows(2)
            .all(|w| matches!(w[0].out.partial_cmp(&w[1].out), Some(std::cmp::Ordering::Less)));
        let decreasing = self
            .knots
            .windows(2)
            .all(|w| matches!(w[0].out.partial_cmp(&w[1].out), Some(std::cmp::Ordering::Greater)));
        if !increasing && !decreasing {
            return Err(Error::NotInvertible {
                reason: "linear curve has repeated or non-monotonic `out` values",
            });
        }
        let mut swapped: Vec<Knot> = self
            .knots
            .iter()
            .map(|k| Knot {
                r#in: k.out,
                out: k.r#in,
            })
            .collect();
        if decreasing {
            swapped.reverse();
        }
        Self::new(swapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> LinearMonotonicCurve {
        LinearMonotonicCurve::new(vec![
            Knot {
                r#in: Ordinate::from_int(0),
                out: Ordinate::from_int(0),
            },
            Knot {
                r#in: Ordinate::from_int(10),
                out: Ordinate::from_int(100),
            },
        ])
        .unwrap()
    }

    #[test]
    fn eval_interpolates_linearly() {
        let c = curve();
        assert_eq!(c.eval(Ordinate::from_int(5)).unwrap(), Ordinate::from_int(50));
    }

    #[test]
    fn eval_out_of_bounds_errors() {
        let c = curve();
        assert!(c.eval(Ordinate::from_int(11)).is_err());
    }

    #[test]
    fn invert_round_trips() {
        let c = curve();
        let inv = c.invert().unwrap();
        let y = c.eval(Ordinate::from_int(3)).unwrap();
        assert_eq!(inv.eval(y).unwrap(), Ordinate::from_int(3));
    }

    #[test]
    fn split_at_shares_boundary_value() {
        let c = curve();
        let (left, right) = c.split_at(Ordinate::from_int(4));
        assert_eq!(left.eval(Ordinate::from_int(4)).unwrap(), Ordinate::from_int(40));
        assert_eq!(right.eval(Ordinate::from_int(4)).unwrap(), Ordinate::from_int(40));
        assert_eq!(left.input_bounds().end, Ordinate::from_int(4));
        assert_eq!(right.input_bounds().start, Ordinate::from_int(4));
    }

    #[test]
    fn project_interval_takes_hull_over_knots() {
        let c = LinearMonotonicCurve::new(vec![
            Knot { r#in: Ordinate::from_int(0), out: Ordinate::from_int(0) },
            Knot { r#in: Ordinate::from_int(5), out: Ordinate::from_int(-10) },
            Knot { r#in: Ordinate::from_int(10), out: Ordinate::from_int(100) },
        ])
        .unwrap();
        let hull = c.project_interval(ContinuousInterval::new(Ordinate::from_int(0), Ordinate::from_int(10))).unwrap();
        assert_eq!(hull.start, Ordinate::from_int(-10));
        assert_eq!(hull.end, Ordinate::from_int(100));
    }

    #[test]
    fn rejects_non_increasing_knots() {
        let err = LinearMonotonicCurve::new(vec![
            Knot {
                r#in: Ordinate::from_int(5),
                out: Ordinate::from_int(0),
            },
            Knot {
                r#in: Ordinate::from_int(5),
                out: Ordinate::from_int(1),
            },
        ]);
        assert!(err.is_err());
    }
}
