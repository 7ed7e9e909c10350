// crates/otio-topology/src/topology.rs

//! `Topology`: an ordered, gapless sequence of [`Mapping`]s over a
//! shared input axis, with `join`/`trim_input`/`invert`/`split_at_input`.

use otio_core::{ContinuousInterval, Error, Ordinate};
use otio_curves::{Knot, LinearMonotonicCurve, LinearizeConfig};
use otio_mapping::Mapping;
use std::cmp::Ordering;

/// An ordered, gapless sequence of mappings sharing one input axis.
///
/// The zero-segment form (see [`Topology::empty_at`]) represents a space
/// unreachable through the composition (e.g. trimmed to zero duration).
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    segments: Vec<Mapping>,
    bounds: ContinuousInterval,
}

impl Topology {
    /// Build from a contiguous, non-empty sequence of mappings.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `segments` is empty or any two
    /// adjacent mappings do not share a boundary (`segments[i].input_bounds().end
    /// == segments[i + 1].input_bounds().start`).
    pub fn new(segments: Vec<Mapping>) -> Result<Self, Error> {
        if segments.is_empty() {
            return Err(Error::Malformed {
                reason: "a topology needs at least one segment; use Topology::empty_at for the zero-segment form".to_string(),
            });
        }
        for w in segments.windows(2) {
            if w[0].input_bounds().end != w[1].input_bounds().start {
                return Err(Error::Malformed {
                    reason: "topology segments must be contiguous, no gaps or overlaps".to_string(),
                });
            }
        }
        let bounds = ContinuousInterval::new(
            segments[0].input_bounds().start,
            segments[segments.len() - 1].input_bounds().end,
        );
        Ok(Self { segments, bounds })
    }

    /// The zero-segment topology for an unreachable space.
    #[must_use]
    pub fn empty_at(point: Ordinate) -> Self {
        Self {
            segments: Vec::new(),
            bounds: ContinuousInterval::empty_at(point),
        }
    }

    /// `true` iff this is the zero-segment form.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Mapping] {
        &self.segments
    }

    /// The overall input span.
    #[must_use]
    pub fn input_bounds(&self) -> ContinuousInterval {
        self.bounds
    }

    /// The union of every segment's output bounds.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if there are no segments, or every
    /// segment is itself `Empty`.
    pub fn output_bounds(&self) -> Result<ContinuousInterval, Error> {
        let mut acc: Option<ContinuousInterval> = None;
        for seg in &self.segments {
            if let Ok(b) = seg.output_bounds() {
                acc = Some(match acc {
                    None => b,
                    Some(a) => hull(a, b),
                });
            }
        }
        acc.ok_or(Error::Empty)
    }

    fn segment_for(&self, o: Ordinate) -> Result<usize, Error> {
        if self.segments.is_empty() || !self.bounds.contains(o) {
            return Err(Error::OutOfBounds {
                ordinate: o,
                bounds: self.bounds,
            });
        }
        let mut lo = 0usize;
        let mut hi = self.segments.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if matches!(
                self.segments[mid].input_bounds().start.partial_cmp(&o),
                Some(Ordering::Less | Ordering::Equal)
            ) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Evaluate at a single input ordinate by dispatching to the
    /// bracketing segment.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `o` is outside `input_bounds()`,
    /// or [`Error::Empty`] if the bracketing segment is `Empty`.
    pub fn project_ordinate(&self, o: Ordinate) -> Result<Ordinate, Error> {
        let i = self.segment_for(o)?;
        self.segments[i].project_ordinate(o)
    }

    /// Project a whole interval, taking the hull of every segment's
    /// contribution over `iv ∩ input_bounds()`.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if `iv` does not overlap `input_bounds()`,
    /// or every overlapping segment is itself `Empty`.
    pub fn project_interval(&self, iv: ContinuousInterval) -> Result<ContinuousInterval, Error> {
        let clipped = self.bounds.intersection(iv);
        if clipped.is_empty() {
            return Err(Error::Empty);
        }
        let mut acc: Option<ContinuousInterval> = None;
        for seg in &self.segments {
            let overlap = seg.input_bounds().intersection(clipped);
            if overlap.is_empty() {
                continue;
            }
            if let Ok(part) = seg.project_interval(overlap) {
                acc = Some(match acc {
                    None => part,
                    Some(a) => hull(a, part),
                });
            }
        }
        acc.ok_or(Error::Empty)
    }

    /// Drop segments outside `iv`, trimming the partial boundary
    /// segments via [`Mapping::trim_to_input`].
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the trimmed segments somehow fail
    /// contiguity (an internal invariant violation, not a caller error).
    pub fn trim_input(&self, iv: ContinuousInterval) -> Result<Self, Error> {
        let clipped = self.bounds.intersection(iv);
        if clipped.is_empty() {
            return Ok(Self::empty_at(clipped.start));
        }
        let mut kept = Vec::new();
        for seg in &self.segments {
            let overlap = seg.input_bounds().intersection(clipped);
            if overlap.is_empty() {
                continue;
            }
            kept.push(seg.trim_to_input(overlap));
        }
        Self::new(kept)
    }

    /// Invert every segment and reorder by output, producing a topology
    /// over the old output axis.
    ///
    /// # Errors
    /// Returns [`Error::NotInvertible`] if any segment is not invertible,
    /// or if the inverted segments do not reassemble into a gapless
    /// sequence (the original topology was not output-monotonic).
    pub fn invert(&self) -> Result<Self, Error> {
        if self.segments.is_empty() {
            return Ok(self.clone());
        }
        let mut inverted = self
            .segments
            .iter()
            .map(Mapping::inverse)
            .collect::<Result<Vec<_>, _>>()?;
        inverted.sort_by(|a, b| {
            a.input_bounds()
                .start
                .partial_cmp(&b.input_bounds().start)
                .unwrap_or(Ordering::Equal)
        });
        Self::new(inverted).map_err(|_| Error::NotInvertible {
            reason: "segments do not reassemble into a gapless sequence once inverted; the topology was not output-monotonic",
        })
    }

    /// Split into two topologies sharing a boundary at `o`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `o` is outside `input_bounds()`.
    pub fn split_at_input(&self, o: Ordinate) -> Result<(Self, Self), Error> {
        if o == self.bounds.start {
            return Ok((Self::empty_at(o), self.clone()));
        }
        let i = self.segment_for(o)?;
        let (left_piece, right_piece) = self.segments[i].split_at_input(o)?;
        let mut left = self.segments[..i].to_vec();
        left.push(left_piece);
        let mut right = vec![right_piece];
        right.extend(self.segments[i + 1..].iter().cloned());
        Ok((Self::new(left)?, Self::new(right)?))
    }

    /// Left-to-right composition `b2c ∘ a2b`: an ordinate in `a`-space
    /// goes through `a2b` into `b`-space, then through `b2c` into
    /// `c`-space. Walks `a2b`'s segments; for each, finds the `b2c`
    /// segments overlapping its output range and composes the atoms
    /// (`affine∘affine = affine`; otherwise by knot resampling, with
    /// either curved side linearized first).
    ///
    /// Assumes each `a2b` segment is monotonic non-decreasing in output
    /// (true of every mapping this system constructs from a composition
    /// tree); a `b2c`-reachable non-monotonic segment returns
    /// [`Error::Malformed`] rather than silently producing a
    /// gap-violating topology.
    ///
    /// # Errors
    /// Returns [`Error::Unreachable`] if an `a2b` segment's output never
    /// overlaps `b2c`'s domain, or propagates composition errors.
    pub fn join(a2b: &Self, b2c: &Self) -> Result<Self, Error> {
        if a2b.segments.is_empty() {
            return Ok(a2b.clone());
        }
        let mut out = Vec::new();
        for seg in &a2b.segments {
            let a_range = seg.input_bounds();
            if matches!(seg, Mapping::Empty { .. }) {
                out.push(Mapping::empty(a_range));
                continue;
            }
            let b_range = match seg.output_bounds() {
                Ok(b) => b,
                Err(_) => {
                    out.push(Mapping::empty(a_range));
                    continue;
                }
            };
            let clipped_b = b2c.bounds.intersection(b_range);
            if clipped_b.is_empty() {
                return Err(Error::Unreachable {
                    source: a_range.to_string(),
                    destination: b_range.to_string(),
                });
            }
            for bseg in &b2c.segments {
                let overlap = bseg.input_bounds().intersection(clipped_b);
                if overlap.is_empty() {
                    continue;
                }
                let a_sub = preimage_range(seg, overlap)?;
                if a_sub.is_empty() {
                    continue;
                }
                let restricted_inner = seg.trim_to_input(a_sub);
                let restricted_outer = bseg.trim_to_input(overlap);
                out.push(compose(&restricted_outer, &restricted_inner)?);
            }
        }
        Self::new(out)
    }
}

fn hull(a: ContinuousInterval, b: ContinuousInterval) -> ContinuousInterval {
    a.union_overlapping(b).unwrap_or_else(|| {
        let start = if a.start < b.start { a.start } else { b.start };
        let end = if a.end > b.end { a.end } else { b.end };
        ContinuousInterval::new(start, end)
    })
}

/// The `a`-subrange of `seg` whose image is exactly `b_overlap`.
fn preimage_range(seg: &Mapping, b_overlap: ContinuousInterval) -> Result<ContinuousInterval, Error> {
    let inv = seg.inverse()?;
    inv.project_interval(b_overlap)
}

fn inner_knots_in_a(inner: &Mapping) -> Vec<Ordinate> {
    match inner {
        Mapping::Affine { input_bounds, .. } => vec![input_bounds.start, input_bounds.end],
        Mapping::Linear(curve) => curve.knots().iter().map(|k| k.r#in).collect(),
        Mapping::Bezier(curve) => curve
            .linearize(LinearizeConfig::default())
            .knots()
            .iter()
            .map(|k| k.r#in)
            .collect(),
        Mapping::Empty { .. } => Vec::new(),
    }
}

fn outer_knots_in_b(outer: &Mapping) -> Vec<Ordinate> {
    match outer {
        Mapping::Affine { .. } | Mapping::Empty { .. } => Vec::new(),
        Mapping::Linear(curve) => curve.knots().iter().map(|k| k.r#in).collect(),
        Mapping::Bezier(curve) => curve
            .linearize(LinearizeConfig::default())
            .knots()
            .iter()
            .map(|k| k.r#in)
            .collect(),
    }
}

/// Compose `outer ∘ inner` into a single mapping over `inner.input_bounds()`.
fn compose(outer: &Mapping, inner: &Mapping) -> Result<Mapping, Error> {
    if matches!(outer, Mapping::Empty { .. }) || matches!(inner, Mapping::Empty { .. }) {
        return Ok(Mapping::empty(inner.input_bounds()));
    }
    if let (Mapping::Affine { transform: ot, .. }, Mapping::Affine { transform: it, .. }) = (outer, inner) {
        return Ok(Mapping::affine(ot.compose(*it), inner.input_bounds()));
    }

    let a_bounds = inner.input_bounds();
    let mut a_points = inner_knots_in_a(inner);
    if !matches!(outer, Mapping::Affine { .. }) {
        if let Ok(inv) = inner.inverse() {
            for b in outer_knots_in_b(outer) {
                if let Ok(a) = inv.project_ordinate_inclusive(b) {
                    if a_bounds.contains(a) || a == a_bounds.end {
                        a_points.push(a);
                    }
                }
            }
        }
    }
    a_points.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
    a_points.dedup();
    if a_points.len() < 2 {
        a_points = vec![a_bounds.start, a_bounds.end];
    }

    let mut knots = Vec::with_capacity(a_points.len());
    for a in a_points {
        let b = inner.project_ordinate_inclusive(a)?;
        let c = outer.project_ordinate_inclusive(b)?;
        knots.push(Knot { r#in: a, out: c });
    }
    Ok(Mapping::Linear(LinearMonotonicCurve::new(knots)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use otio_core::AffineTransform;

    fn iv(a: i64, b: i64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::from_int(a), Ordinate::from_int(b))
    }

    fn identity_over(a: i64, b: i64) -> Mapping {
        Mapping::affine(AffineTransform::identity(), iv(a, b))
    }

    fn scaled_over(a: i64, b: i64, scale: i64, offset: i64) -> Mapping {
        Mapping::affine(
            AffineTransform {
                offset: Ordinate::from_int(offset),
                scale: Ordinate::from_int(scale),
            },
            iv(a, b),
        )
    }

    #[test]
    fn single_segment_projects_like_its_mapping() {
        let t = Topology::new(vec![scaled_over(0, 10, 2, 3)]).unwrap();
        assert_eq!(t.project_ordinate(Ordinate::from_int(4)).unwrap(), Ordinate::from_int(11));
    }

    #[test]
    fn rejects_non_contiguous_segments() {
        let err = Topology::new(vec![identity_over(0, 5), identity_over(6, 10)]);
        assert!(err.is_err());
    }

    #[test]
    fn project_ordinate_ties_pick_left_segment_at_interior_boundary() {
        let t = Topology::new(vec![scaled_over(0, 5, 1, 0), scaled_over(5, 10, 1, 100)]).unwrap();
        assert_eq!(t.project_ordinate(Ordinate::from_int(5)).unwrap(), Ordinate::from_int(105));
    }

    #[test]
    fn project_ordinate_at_final_endpoint_is_out_of_bounds() {
        let t = Topology::new(vec![identity_over(0, 10)]).unwrap();
        assert!(t.project_ordinate(Ordinate::from_int(10)).is_err());
    }

    #[test]
    fn trim_input_narrows_bounds_and_preserves_values() {
        let t = Topology::new(vec![identity_over(0, 10)]).unwrap();
        let trimmed = t.trim_input(iv(3, 7)).unwrap();
        assert_eq!(trimmed.input_bounds(), iv(3, 7));
        assert_eq!(trimmed.project_ordinate(Ordinate::from_int(5)).unwrap(), Ordinate::from_int(5));
    }

    #[test]
    fn split_at_input_shares_boundary() {
        let t = Topology::new(vec![scaled_over(0, 10, 3, 0)]).unwrap();
        let (left, right) = t.split_at_input(Ordinate::from_int(4)).unwrap();
        assert_eq!(left.input_bounds(), iv(0, 4));
        assert_eq!(right.input_bounds(), iv(4, 10));
    }

    #[test]
    fn invert_round_trips_identity() {
        let t = Topology::new(vec![scaled_over(0, 10, 2, 1)]).unwrap();
        let inv = t.invert().unwrap();
        let y = t.project_ordinate(Ordinate::from_int(3)).unwrap();
        assert_eq!(inv.project_ordinate(y).unwrap(), Ordinate::from_int(3));
    }

    #[test]
    fn join_composes_two_affine_topologies() {
        // a2b: a -> a + 10 over [0, 20); b2c: b -> 2b over [0, 30).
        let a2b = Topology::new(vec![scaled_over(0, 20, 1, 10)]).unwrap();
        let b2c = Topology::new(vec![scaled_over(0, 30, 2, 0)]).unwrap();
        let composed = Topology::join(&a2b, &b2c).unwrap();
        // a=5 -> b=15 -> c=30.
        assert_eq!(composed.project_ordinate(Ordinate::from_int(5)).unwrap(), Ordinate::from_int(30));
    }

    #[test]
    fn join_splits_at_downstream_boundary() {
        // a2b: identity over [0, 10) into b-space.
        // b2c: two segments in b-space, [0,5) doubles, [5,10) adds 100.
        let a2b = Topology::new(vec![identity_over(0, 10)]).unwrap();
        let b2c = Topology::new(vec![scaled_over(0, 5, 2, 0), scaled_over(5, 10, 1, 100)]).unwrap();
        let composed = Topology::join(&a2b, &b2c).unwrap();
        assert_eq!(composed.segments().len(), 2);
        assert_eq!(composed.project_ordinate(Ordinate::from_int(2)).unwrap(), Ordinate::from_int(4));
        assert_eq!(composed.project_ordinate(Ordinate::from_int(7)).unwrap(), Ordinate::from_int(107));
    }

    #[test]
    fn join_reports_unreachable_when_b_range_misses_downstream() {
        let a2b = Topology::new(vec![scaled_over(0, 10, 1, 1000)]).unwrap();
        let b2c = Topology::new(vec![identity_over(0, 5)]).unwrap();
        assert!(Topology::join(&a2b, &b2c).is_err());
    }

    #[test]
    fn empty_segment_composes_to_empty() {
        let a2b = Topology::new(vec![Mapping::empty(iv(0, 10))]).unwrap();
        let b2c = Topology::new(vec![identity_over(0, 10)]).unwrap();
        let composed = Topology::join(&a2b, &b2c).unwrap();
        assert!(matches!(composed.segments()[0], Mapping::Empty { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use otio_core::AffineTransform;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn join_then_project_matches_composing_mappings_directly(
            scale_ab in 1i64..5, offset_ab in 0i64..20,
            scale_bc in 1i64..5, offset_bc in 0i64..20,
            bound in 1i64..50, at in 0i64..50,
        ) {
            let bound = bound.max(1);
            let at = at % bound;
            let a2b = Topology::new(vec![Mapping::affine(
                AffineTransform { offset: Ordinate::from_int(offset_ab), scale: Ordinate::from_int(scale_ab) },
                ContinuousInterval::new(Ordinate::from_int(0), Ordinate::from_int(bound)),
            )]).unwrap();
            let b_bound = scale_ab * bound + offset_ab + 1;
            let b2c = Topology::new(vec![Mapping::affine(
                AffineTransform { offset: Ordinate::from_int(offset_bc), scale: Ordinate::from_int(scale_bc) },
                ContinuousInterval::new(Ordinate::from_int(0), Ordinate::from_int(b_bound)),
            )]).unwrap();
            let composed = Topology::join(&a2b, &b2c).unwrap();
            let direct_b = a2b.project_ordinate(Ordinate::from_int(at)).unwrap();
            let direct_c = b2c.project_ordinate(direct_b).unwrap();
            prop_assert_eq!(composed.project_ordinate(Ordinate::from_int(at)).unwrap(), direct_c);
        }
    }
}
