// crates/otio-mapping/src/mapping.rs

//! `Mapping`: a tagged union over the four kinds of 1-D input->output
//! correspondence a timeline edge can carry, sharing one evaluation
//! contract instead of going through a trait object.

use otio_core::{AffineTransform, ContinuousInterval, Error, Ordinate};
use otio_curves::{BezierCurve, LinearMonotonicCurve};

/// A single piecewise mapping atom.
#[derive(Clone, Debug, PartialEq)]
pub enum Mapping {
    /// No ordinates are reachable; carries its (possibly empty)
    /// input span for bookkeeping.
    Empty {
        /// The span this mapping would have covered, had it not been empty.
        input_bounds: ContinuousInterval,
    },
    /// An offset+scale transform, valid over `input_bounds`.
    Affine {
        /// The transform applied to every input ordinate.
        transform: AffineTransform,
        /// The span over which this mapping is defined.
        input_bounds: ContinuousInterval,
    },
    /// An exact piecewise-linear curve.
    Linear(LinearMonotonicCurve),
    /// A cubic bezier curve (approximate; see `otio_curves::bezier`).
    Bezier(BezierCurve),
}

impl Mapping {
    /// Build an affine mapping over `input_bounds`.
    #[must_use]
    pub fn affine(transform: AffineTransform, input_bounds: ContinuousInterval) -> Self {
        Self::Affine {
            transform,
            input_bounds,
        }
    }

    /// The empty mapping over `input_bounds` (normally a zero-width span).
    #[must_use]
    pub fn empty(input_bounds: ContinuousInterval) -> Self {
        Self::Empty { input_bounds }
    }

    /// The span of input ordinates this mapping accepts.
    #[must_use]
    pub fn input_bounds(&self) -> ContinuousInterval {
        match self {
            Self::Empty { input_bounds } | Self::Affine { input_bounds, .. } => *input_bounds,
            Self::Linear(curve) => curve.input_bounds(),
            Self::Bezier(curve) => curve.input_bounds(),
        }
    }

    /// The smallest interval containing every output ordinate this
    /// mapping can produce.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] for the `Empty` variant.
    pub fn output_bounds(&self) -> Result<ContinuousInterval, Error> {
        match self {
            Self::Empty { .. } => Err(Error::Empty),
            Self::Affine {
                transform,
                input_bounds,
            } => {
                if input_bounds.is_empty() {
                    return Err(Error::Empty);
                }
                let a = transform.apply(input_bounds.start);
                let b = transform.apply(input_bounds.end);
                Ok(if a < b {
                    ContinuousInterval::new(a, b)
                } else {
                    ContinuousInterval::new(b, a)
                })
            }
            Self::Linear(curve) => Ok(curve.output_bounds()),
            Self::Bezier(curve) => curve.project_interval(curve.input_bounds()),
        }
    }

    /// Evaluate at a single input ordinate.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `o` is outside `input_bounds()`,
    /// or [`Error::Empty`] for the `Empty` variant.
    pub fn project_ordinate(&self, o: Ordinate) -> Result<Ordinate, Error> {
        match self {
            Self::Empty { input_bounds } => Err(if input_bounds.contains(o) {
                Error::Empty
            } else {
                Error::OutOfBounds {
                    ordinate: o,
                    bounds: *input_bounds,
                }
            }),
            Self::Affine {
                transform,
                input_bounds,
            } => {
                if !input_bounds.contains(o) {
                    return Err(Error::OutOfBounds {
                        ordinate: o,
                        bounds: *input_bounds,
                    });
                }
                Ok(transform.apply(o))
            }
            Self::Linear(curve) => curve.eval(o),
            Self::Bezier(curve) => curve.eval(o),
        }
    }

    /// Like [`Self::project_ordinate`] but treats `input_bounds()` as
    /// closed on the right. Used by topology composition, which needs
    /// the limit value at a segment's excluded upper endpoint.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] for the `Empty` variant, or
    /// [`Error::OutOfBounds`] if `o` is outside the closed span.
    pub fn project_ordinate_inclusive(&self, o: Ordinate) -> Result<Ordinate, Error> {
        match self {
            Self::Empty { .. } => Err(Error::Empty),
            Self::Affine { transform, .. } => Ok(transform.apply(o)),
            Self::Linear(curve) => curve.eval_closed(o),
            Self::Bezier(curve) => curve.eval_closed(o),
        }
    }

    /// Project a whole interval, taking the hull of every output value
    /// attained over `iv ∩ input_bounds()`.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if `iv` does not overlap `input_bounds()`.
    pub fn project_interval(&self, iv: ContinuousInterval) -> Result<ContinuousInterval, Error> {
        let clipped = self.input_bounds().intersection(iv);
        if clipped.is_empty() {
            return Err(Error::Empty);
        }
        match self {
            Self::Empty { .. } => Err(Error::Empty),
            Self::Affine { transform, .. } => {
                let a = transform.apply(clipped.start);
                let b = transform.apply(clipped.end);
                Ok(if a < b {
                    ContinuousInterval::new(a, b)
                } else {
                    ContinuousInterval::new(b, a)
                })
            }
            Self::Linear(curve) => curve.project_interval(clipped),
            Self::Bezier(curve) => curve.project_interval(clipped),
        }
    }

    /// Invert input and output axes.
    ///
    /// # Errors
    /// Returns [`Error::NotInvertible`] if the mapping is not injective
    /// (a zero-scale affine transform, or a curve whose `out` is not
    /// itself strictly monotonic), or [`Error::Empty`] for the `Empty`
    /// variant.
    pub fn inverse(&self) -> Result<Self, Error> {
        match self {
            Self::Empty { .. } => Err(Error::Empty),
            Self::Affine {
                transform,
                input_bounds,
            } => {
                let inv = transform.inverse()?;
                let a = transform.apply(input_bounds.start);
                let b = transform.apply(input_bounds.end);
                let bounds = if a < b {
                    ContinuousInterval::new(a, b)
                } else {
                    ContinuousInterval::new(b, a)
                };
                Ok(Self::Affine {
                    transform: inv,
                    input_bounds: bounds,
                })
            }
            Self::Linear(curve) => Ok(Self::Linear(curve.invert()?)),
            Self::Bezier(curve) => {
                // Bezier curves are never inverted exactly: approximate
                // first, then invert the resulting linear curve.
                let lin = curve.linearize(otio_curves::LinearizeConfig::default());
                Ok(Self::Linear(lin.invert()?))
            }
        }
    }

    /// Restrict to `iv ∩ input_bounds()`, returning `Empty` if the two
    /// spans do not overlap.
    #[must_use]
    pub fn trim_to_input(&self, iv: ContinuousInterval) -> Self {
        let bounds = self.input_bounds();
        let trimmed = bounds.intersection(iv);
        if trimmed.is_empty() {
            return Self::Empty {
                input_bounds: trimmed,
            };
        }
        let mut cur = self.clone();
        if trimmed.start != cur.input_bounds().start {
            let (_, right) = cur
                .split_at_input(trimmed.start)
                .expect("trimmed.start lies within input_bounds() by construction");
            cur = right;
        }
        if trimmed.end != cur.input_bounds().end {
            let (left, _) = cur
                .split_at_input(trimmed.end)
                .expect("trimmed.end lies within input_bounds() by construction");
            cur = left;
        }
        cur
    }

    /// Split into two mappings sharing a boundary at `o`: the left half
    /// covers `[input_bounds.start, o)`, the right half `[o, input_bounds.end)`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `o` is outside `input_bounds()`.
    pub fn split_at_input(&self, o: Ordinate) -> Result<(Self, Self), Error> {
        let bounds = self.input_bounds();
        if !bounds.contains(o) {
            return Err(Error::OutOfBounds {
                ordinate: o,
                bounds,
            });
        }
        if o == bounds.start {
            return Ok((
                Self::Empty {
                    input_bounds: ContinuousInterval::empty_at(o),
                },
                self.clone(),
            ));
        }
        match self {
            Self::Empty { .. } => unreachable!("an Empty mapping's input_bounds() is itself empty, so contains() above never succeeds"),
            Self::Affine {
                transform,
                input_bounds,
            } => Ok((
                Self::Affine {
                    transform: *transform,
                    input_bounds: ContinuousInterval::new(input_bounds.start, o),
                },
                Self::Affine {
                    transform: *transform,
                    input_bounds: ContinuousInterval::new(o, input_bounds.end),
                },
            )),
            Self::Linear(curve) => {
                let (l, r) = curve.split_at(o);
                Ok((Self::Linear(l), Self::Linear(r)))
            }
            Self::Bezier(curve) => {
                let (l, r) = curve.split_at(o);
                Ok((Self::Bezier(l), Self::Bezier(r)))
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn affine_split_then_reproject_matches_whole(scale in 1i64..20, offset in -50i64..50, bound in 1i64..100, at in 0i64..100) {
            let bound = bound.max(1);
            let at = at % bound;
            let m = Mapping::affine(
                AffineTransform {
                    offset: Ordinate::from_int(offset),
                    scale: Ordinate::from_int(scale),
                },
                ContinuousInterval::new(Ordinate::from_int(0), Ordinate::from_int(bound)),
            );
            let whole = m.project_ordinate(Ordinate::from_int(at)).unwrap();
            if at > 0 {
                let (_, right) = m.split_at_input(Ordinate::from_int(at)).unwrap();
                prop_assert_eq!(right.project_ordinate(Ordinate::from_int(at)).unwrap(), whole);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otio_core::Rational;

    fn iv(a: i64, b: i64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::from_int(a), Ordinate::from_int(b))
    }

    #[test]
    fn affine_projects_ordinate() {
        let m = Mapping::affine(
            AffineTransform {
                offset: Ordinate::from_int(10),
                scale: Ordinate::from_int(2),
            },
            iv(0, 5),
        );
        assert_eq!(m.project_ordinate(Ordinate::from_int(3)).unwrap(), Ordinate::from_int(16));
    }

    #[test]
    fn affine_rejects_out_of_bounds_ordinate() {
        let m = Mapping::affine(AffineTransform::identity(), iv(0, 5));
        assert!(m.project_ordinate(Ordinate::from_int(5)).is_err());
    }

    #[test]
    fn split_at_start_yields_empty_left_half() {
        let m = Mapping::affine(AffineTransform::identity(), iv(0, 5));
        let (left, right) = m.split_at_input(Ordinate::from_int(0)).unwrap();
        assert!(matches!(left, Mapping::Empty { .. }));
        assert_eq!(right.input_bounds(), iv(0, 5));
    }

    #[test]
    fn split_at_interior_partitions_input_bounds() {
        let m = Mapping::affine(
            AffineTransform {
                offset: Ordinate::ZERO,
                scale: Ordinate::from_int(3),
            },
            iv(0, 10),
        );
        let (left, right) = m.split_at_input(Ordinate::from_int(4)).unwrap();
        assert_eq!(left.input_bounds(), iv(0, 4));
        assert_eq!(right.input_bounds(), iv(4, 10));
        assert_eq!(left.project_ordinate(Ordinate::from_int(3)).unwrap(), Ordinate::from_int(9));
        assert_eq!(right.project_ordinate(Ordinate::from_int(4)).unwrap(), Ordinate::from_int(12));
    }

    #[test]
    fn trim_to_input_clips_both_sides() {
        let m = Mapping::affine(AffineTransform::identity(), iv(0, 10));
        let trimmed = m.trim_to_input(iv(3, 7));
        assert_eq!(trimmed.input_bounds(), iv(3, 7));
    }

    #[test]
    fn trim_to_input_disjoint_yields_empty() {
        let m = Mapping::affine(AffineTransform::identity(), iv(0, 10));
        let trimmed = m.trim_to_input(iv(20, 30));
        assert!(matches!(trimmed, Mapping::Empty { .. }));
    }

    #[test]
    fn affine_inverse_round_trips() {
        let m = Mapping::affine(
            AffineTransform {
                offset: Ordinate::from_int(5),
                scale: Ordinate::from_ratio(1, 2),
            },
            iv(0, 10),
        );
        let inv = m.inverse().unwrap();
        let y = m.project_ordinate(Ordinate::from_int(4)).unwrap();
        assert_eq!(inv.project_ordinate(y).unwrap(), Ordinate::from_int(4));
    }

    #[test]
    fn zero_scale_affine_is_not_invertible() {
        let m = Mapping::affine(
            AffineTransform {
                offset: Ordinate::ZERO,
                scale: Ordinate::ZERO,
            },
            iv(0, 10),
        );
        assert!(m.inverse().is_err());
    }

    #[test]
    fn linear_mapping_shares_split_contract() {
        let curve = LinearMonotonicCurve::new(vec![
            otio_curves::Knot {
                r#in: Ordinate::from_int(0),
                out: Ordinate::from_int(0),
            },
            otio_curves::Knot {
                r#in: Ordinate::from_int(10),
                out: Ordinate::from_int(100),
            },
        ])
        .unwrap();
        let m = Mapping::Linear(curve);
        let (left, right) = m.split_at_input(Ordinate::from_int(4)).unwrap();
        // 4 is excluded from `left`'s clopen span and belongs to `right`;
        // compare via the inclusive evaluator instead of the boundary.
        assert_eq!(
            left.project_ordinate_inclusive(Ordinate::from_int(4)).unwrap(),
            right.project_ordinate(Ordinate::from_int(4)).unwrap()
        );
    }

    #[test]
    fn empty_mapping_always_errors() {
        let m = Mapping::empty(iv(2, 2));
        assert!(m.project_ordinate(Ordinate::from_int(2)).is_err());
        assert!(m.output_bounds().is_err());
    }

    #[test]
    fn rational_offset_affine_is_exact() {
        let m = Mapping::affine(
            AffineTransform {
                offset: Ordinate::Finite(Rational::new(1, 3)),
                scale: Ordinate::from_int(1),
            },
            iv(0, 1),
        );
        let y = m.project_ordinate(Ordinate::ZERO).unwrap();
        assert_eq!(y, Ordinate::Finite(Rational::new(1, 3)));
    }
}
