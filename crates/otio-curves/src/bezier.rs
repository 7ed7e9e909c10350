// crates/otio-curves/src/bezier.rs

//! Cubic bezier segments and curves.
//!
//! A cubic bezier is exact in its control points but evaluating it at a
//! chosen input ordinate requires solving a cubic, whose real root is
//! generally irrational even when the coefficients are rational. This
//! module therefore does the root-finding and derivative work in `f64`
//! (via [`crate::dual::Dual`] for derivatives) and converts the final
//! result back to an [`Ordinate`] approximation; see `SPEC_FULL.md` §4.C.

use crate::dual::Dual;
use otio_core::rational::Rational;
use otio_core::{ContinuousInterval, Error, Ordinate};

/// Denominator used when converting an `f64` evaluation result back into an
/// exact-rational [`Ordinate`] approximation.
const APPROX_DENOMINATOR: i128 = 1i128 << 32;

/// A single bezier control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    /// Input-axis ordinate.
    pub r#in: Ordinate,
    /// Output-axis ordinate.
    pub out: Ordinate,
}

impl ControlPoint {
    fn in_f64(self) -> f64 {
        self.r#in.to_f64_lossy()
    }
    fn out_f64(self) -> f64 {
        self.out.to_f64_lossy()
    }
}

/// A single cubic bezier segment, monotonic in `in` over `u ∈ [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierSegment {
    p0: ControlPoint,
    p1: ControlPoint,
    p2: ControlPoint,
    p3: ControlPoint,
}

fn cubic_in_coeffs(p0: f64, p1: f64, p2: f64, p3: f64) -> (f64, f64, f64, f64) {
    // Power-basis form of a cubic bezier: a*u^3 + b*u^2 + c*u + d.
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 3.0 * p0 - 6.0 * p1 + 3.0 * p2;
    let c = -3.0 * p0 + 3.0 * p1;
    let d = p0;
    (a, b, c, d)
}

/// `d(in)/du` at parameter `u`, the quadratic derivative of the cubic
/// `in(u)`.
fn in_derivative(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let (a, b, c, _d) = cubic_in_coeffs(p0, p1, p2, p3);
    3.0 * a * u * u + 2.0 * b * u + c
}

/// Real roots of `d(in)/du = 0` lying strictly inside `(0, 1)`, used to
/// split a segment at its input-axis extrema.
fn derivative_roots_in_unit_interval(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    let (a, b, c, _d) = cubic_in_coeffs(p0, p1, p2, p3);
    // 3a u^2 + 2b u + c == 0
    let (qa, qb, qc) = (3.0 * a, 2.0 * b, c);
    let mut roots = Vec::new();
    if qa.abs() < 1e-12 {
        if qb.abs() > 1e-12 {
            roots.push(-qc / qb);
        }
    } else {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc >= 0.0 {
            let sqrt_disc = disc.sqrt();
            roots.push((-qb + sqrt_disc) / (2.0 * qa));
            roots.push((-qb - sqrt_disc) / (2.0 * qa));
        }
    }
    roots.retain(|u| *u > 1e-9 && *u < 1.0 - 1e-9);
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    roots
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// De Casteljau split of a cubic at parameter `t`, returning the two halves'
/// control points `(left, right)` in axis-agnostic form.
fn de_casteljau_split(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> ([f64; 4], [f64; 4]) {
    let p01 = lerp(p0, p1, t);
    let p12 = lerp(p1, p2, t);
    let p23 = lerp(p2, p3, t);
    let p012 = lerp(p01, p12, t);
    let p123 = lerp(p12, p23, t);
    let p0123 = lerp(p012, p123, t);
    ([p0, p01, p012, p0123], [p0123, p123, p23, p3])
}

impl BezierSegment {
    /// Construct a segment, validating that `in` is monotonic over
    /// `u ∈ [0, 1]` already (use [`BezierSegment::monotonic_pieces`] to
    /// split an arbitrary set of four control points into segments that
    /// satisfy this).
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `in(u)` is not monotonic on `(0, 1)`.
    pub fn new(p0: ControlPoint, p1: ControlPoint, p2: ControlPoint, p3: ControlPoint) -> Result<Self, Error> {
        let roots = derivative_roots_in_unit_interval(
            p0.in_f64(),
            p1.in_f64(),
            p2.in_f64(),
            p3.in_f64(),
        );
        if !roots.is_empty() {
            return Err(Error::Malformed {
                reason: "bezier segment is not monotonic in `in` over (0, 1)".to_string(),
            });
        }
        Ok(Self { p0, p1, p2, p3 })
    }

    /// Split four control points at every interior extremum of `in(u)` so
    /// that every returned piece is individually monotonic in `in`.
    #[must_use]
    pub fn monotonic_pieces(
        p0: ControlPoint,
        p1: ControlPoint,
        p2: ControlPoint,
        p3: ControlPoint,
    ) -> Vec<Self> {
        let roots = derivative_roots_in_unit_interval(
            p0.in_f64(),
            p1.in_f64(),
            p2.in_f64(),
            p3.in_f64(),
        );
        if roots.is_empty() {
            return vec![Self { p0, p1, p2, p3 }];
        }

        // Successively split at each root (given in the *original*
        // parameter space), re-expressing each split point in the
        // remaining piece's local [0, 1] before calling De Casteljau.
        let mut pieces = Vec::new();
        let (mut cur_in, mut cur_out) = (
            [p0.in_f64(), p1.in_f64(), p2.in_f64(), p3.in_f64()],
            [p0.out_f64(), p1.out_f64(), p2.out_f64(), p3.out_f64()],
        );
        let mut prev_abs = 0.0f64;
        for root_abs in roots {
            let local_t = (root_abs - prev_abs) / (1.0 - prev_abs);
            let (left_in, right_in) = de_casteljau_split(cur_in[0], cur_in[1], cur_in[2], cur_in[3], local_t);
            let (left_out, right_out) = de_casteljau_split(cur_out[0], cur_out[1], cur_out[2], cur_out[3], local_t);
            pieces.push(segment_from_f64(left_in, left_out));
            cur_in = right_in;
            cur_out = right_out;
            prev_abs = root_abs;
        }
        pieces.push(segment_from_f64(cur_in, cur_out));
        pieces
    }

    /// `[p0.in, p3.in)`.
    #[must_use]
    pub fn input_bounds(&self) -> ContinuousInterval {
        ContinuousInterval::new(self.p0.r#in, self.p3.r#in)
    }

    /// Evaluate `out` at the input ordinate `x`, solving for `u` via a
    /// closed-form cubic solve.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside `input_bounds()`.
    pub fn eval(&self, x: Ordinate) -> Result<Ordinate, Error> {
        let bounds = self.input_bounds();
        if !bounds.contains(x) && x != self.p3.r#in {
            return Err(Error::OutOfBounds {
                ordinate: x,
                bounds,
            });
        }
        let u = self.solve_u_for_in(x.to_f64_lossy());
        let out = self.eval_out_at_u(u);
        Ok(ordinate_approx(out))
    }

    /// Closed-form + Newton-refined solve for the `u ∈ [0, 1]` such that
    /// `in(u) == x`.
    fn solve_u_for_in(&self, x: f64) -> f64 {
        let (p0, p1, p2, p3) = (self.p0.in_f64(), self.p1.in_f64(), self.p2.in_f64(), self.p3.in_f64());
        let (a, b, c, d) = cubic_in_coeffs(p0, p1, p2, p3);
        let mut u = solve_cubic_nearest_unit(a, b, c, d - x).unwrap_or_else(|| {
            // Degenerate closed form (near-linear segment): fall back to a
            // direct proportion along the chord.
            if (p3 - p0).abs() > 1e-12 {
                (x - p0) / (p3 - p0)
            } else {
                0.0
            }
        });
        // One Newton step using the dual-number derivative, for extra
        // precision near the closed-form estimate.
        let f = Dual::variable(u);
        let value = cubic_eval_dual(a, b, c, d, f) - Dual::constant(x);
        if value.eps.abs() > 1e-12 {
            u -= value.re / value.eps;
        }
        u.clamp(0.0, 1.0)
    }

    fn eval_out_at_u(&self, u: f64) -> f64 {
        let (a, b, c, d) = cubic_in_coeffs(
            self.p0.out_f64(),
            self.p1.out_f64(),
            self.p2.out_f64(),
            self.p3.out_f64(),
        );
        a * u * u * u + b * u * u + c * u + d
    }

    /// `d(out)/d(in)` at the point where `in(u) == x`, via dual numbers.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside `input_bounds()`.
    pub fn derivative_at(&self, x: Ordinate) -> Result<f64, Error> {
        let bounds = self.input_bounds();
        if !bounds.contains(x) && x != self.p3.r#in {
            return Err(Error::OutOfBounds {
                ordinate: x,
                bounds,
            });
        }
        let u = self.solve_u_for_in(x.to_f64_lossy());
        let (ia, ib, ic, id) = cubic_in_coeffs(
            self.p0.in_f64(),
            self.p1.in_f64(),
            self.p2.in_f64(),
            self.p3.in_f64(),
        );
        let (oa, ob, oc, od) = cubic_in_coeffs(
            self.p0.out_f64(),
            self.p1.out_f64(),
            self.p2.out_f64(),
            self.p3.out_f64(),
        );
        let du = Dual::variable(u);
        let din = cubic_eval_dual(ia, ib, ic, id, du);
        let dout = cubic_eval_dual(oa, ob, oc, od, du);
        if din.eps.abs() < 1e-12 {
            return Ok(0.0);
        }
        Ok(dout.eps / din.eps)
    }
}

fn segment_from_f64(p_in: [f64; 4], p_out: [f64; 4]) -> BezierSegment {
    let mk = |i: usize| ControlPoint {
        r#in: ordinate_approx(p_in[i]),
        out: ordinate_approx(p_out[i]),
    };
    BezierSegment {
        p0: mk(0),
        p1: mk(1),
        p2: mk(2),
        p3: mk(3),
    }
}

fn cubic_eval_dual(a: f64, b: f64, c: f64, d: f64, u: Dual) -> Dual {
    u.powi(3) * a + u.powi(2) * b + u * c + Dual::constant(d)
}

/// Approximate a bounded real value as an exact rational with a fixed
/// high denominator.
fn ordinate_approx(x: f64) -> Ordinate {
    if !x.is_finite() {
        return if x.is_nan() {
            Ordinate::NaN
        } else if x > 0.0 {
            Ordinate::PosInf
        } else {
            Ordinate::NegInf
        };
    }
    let num = (x * APPROX_DENOMINATOR as f64).round() as i128;
    Ordinate::Finite(Rational::new(num, APPROX_DENOMINATOR))
}

/// Solve `a*u^3 + b*u^2 + c*u + d = 0` for a real root, preferring one
/// inside `[0, 1]`. Falls back to `None` when no real root is found (the
/// caller substitutes a linear-chord estimate).
fn solve_cubic_nearest_unit(a: f64, b: f64, c: f64, d: f64) -> Option<f64> {
    if a.abs() < 1e-12 {
        return solve_quadratic_nearest_unit(b, c, d);
    }
    // Normalize to u^3 + pu^2 + qu + r = 0.
    let (p, q, r) = (b / a, c / a, d / a);
    // Depressed cubic t^3 + pt + q via u = t - p/3.
    let shift = p / 3.0;
    let pp = q - p * p / 3.0;
    let qq = 2.0 * p * p * p / 27.0 - p * q / 3.0 + r;
    let roots = solve_depressed_cubic(pp, qq);
    roots
        .into_iter()
        .map(|t| t - shift)
        .min_by(|a, b| {
            let da = (a.clamp(0.0, 1.0) - a).abs();
            let db = (b.clamp(0.0, 1.0) - b).abs();
            da.partial_cmp(&db).unwrap()
        })
}

fn solve_quadratic_nearest_unit(b: f64, c: f64, d: f64) -> Option<f64> {
    if b.abs() < 1e-12 {
        if c.abs() < 1e-12 {
            return None;
        }
        return Some(-d / c);
    }
    let disc = c * c - 4.0 * b * d;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let r1 = (-c + sq) / (2.0 * b);
    let r2 = (-c - sq) / (2.0 * b);
    Some(if (r1.clamp(0.0, 1.0) - r1).abs() <= (r2.clamp(0.0, 1.0) - r2).abs() {
        r1
    } else {
        r2
    })
}

/// Real roots of the depressed cubic `t^3 + pt + q = 0` via Cardano's
/// formula (trigonometric form in the three-real-roots case).
fn solve_depressed_cubic(p: f64, q: f64) -> Vec<f64> {
    let discriminant = (q * q) / 4.0 + (p * p * p) / 27.0;
    if discriminant > 0.0 {
        let sqrt_disc = discriminant.sqrt();
        let u = cbrt(-q / 2.0 + sqrt_disc);
        let v = cbrt(-q / 2.0 - sqrt_disc);
        vec![u + v]
    } else if discriminant.abs() < 1e-15 {
        let u = cbrt(-q / 2.0);
        vec![2.0 * u, -u]
    } else {
        // Three real roots: trigonometric form.
        let r = (-(p * p * p) / 27.0).sqrt();
        let phi = (-q / (2.0 * r)).clamp(-1.0, 1.0).acos();
        let m = 2.0 * r.cbrt();
        (0..3)
            .map(|k| m * ((phi + 2.0 * std::f64::consts::PI * f64::from(k)) / 3.0).cos())
            .collect()
    }
}

fn cbrt(x: f64) -> f64 {
    x.signum() * x.abs().powf(1.0 / 3.0)
}

/// A finite sequence of monotonic bezier segments joining `C0`.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    segments: Vec<BezierSegment>,
}

impl BezierCurve {
    /// Construct from already-monotonic segments, validating that each
    /// joins the next at a shared `(in, out)` endpoint.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the segments are empty or do not
    /// join `C0`.
    pub fn new(segments: Vec<BezierSegment>) -> Result<Self, Error> {
        if segments.is_empty() {
            return Err(Error::Malformed {
                reason: "a bezier curve needs at least one segment".to_string(),
            });
        }
        for w in segments.windows(2) {
            if w[0].p3.r#in != w[1].p0.r#in || w[0].p3.out != w[1].p0.out {
                return Err(Error::Malformed {
                    reason: "bezier segments must join C0".to_string(),
                });
            }
        }
        Ok(Self { segments })
    }

    /// The segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    /// `[first.p0.in, last.p3.in)`.
    #[must_use]
    pub fn input_bounds(&self) -> ContinuousInterval {
        ContinuousInterval::new(
            self.segments[0].p0.r#in,
            self.segments[self.segments.len() - 1].p3.r#in,
        )
    }

    fn segment_index_for(&self, x: Ordinate) -> Result<usize, Error> {
        let bounds = self.input_bounds();
        if !bounds.contains(x) {
            return Err(Error::OutOfBounds {
                ordinate: x,
                bounds,
            });
        }
        let mut lo = 0usize;
        let mut hi = self.segments.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if matches!(
                self.segments[mid].p0.r#in.partial_cmp(&x),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Evaluate at `x`, dispatching to the bracketing segment.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside `input_bounds()`.
    pub fn eval(&self, x: Ordinate) -> Result<Ordinate, Error> {
        let i = self.segment_index_for(x)?;
        self.segments[i].eval(x)
    }

    /// `d(out)/d(in)` at `x`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside `input_bounds()`.
    pub fn derivative_at(&self, x: Ordinate) -> Result<f64, Error> {
        let i = self.segment_index_for(x)?;
        self.segments[i].derivative_at(x)
    }

    /// Like [`Self::eval`] but treats `input_bounds()` as closed on the
    /// right, for callers (topology composition) that need the limit
    /// value at the excluded endpoint.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `x` is outside the closed span.
    pub fn eval_closed(&self, x: Ordinate) -> Result<Ordinate, Error> {
        let last = &self.segments[self.segments.len() - 1];
        if x == last.p3.r#in {
            return Ok(last.p3.out);
        }
        self.eval(x)
    }

    /// The smallest interval containing every `out` value attained over
    /// `iv ∩ input_bounds()`. Bezier `out(u)` can have interior extrema, so
    /// this delegates to a default-tolerance linearization rather than
    /// hunting analytic roots on the output axis.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if `iv` does not overlap `input_bounds()`.
    pub fn project_interval(&self, iv: ContinuousInterval) -> Result<ContinuousInterval, Error> {
        self.linearize(crate::config::LinearizeConfig::default())
            .project_interval(iv)
    }

    /// Split at `x`, which must lie strictly inside `input_bounds()`
    /// (callers at the `Mapping` layer handle the `x == start` boundary).
    #[must_use]
    pub fn split_at(&self, x: Ordinate) -> (Self, Self) {
        let i = self
            .segment_index_for(x)
            .expect("caller validated x is interior to input_bounds()");
        let seg = self.segments[i];
        if x == seg.p0.r#in {
            let left = Self::new(self.segments[..i].to_vec())
                .expect("a non-empty prefix of a C0 curve is itself C0");
            let right = Self::new(self.segments[i..].to_vec())
                .expect("a non-empty suffix of a C0 curve is itself C0");
            return (left, right);
        }
        let u = seg.solve_u_for_in(x.to_f64_lossy());
        let (left_in, right_in) = de_casteljau_split(
            seg.p0.in_f64(),
            seg.p1.in_f64(),
            seg.p2.in_f64(),
            seg.p3.in_f64(),
            u,
        );
        let (left_out, right_out) = de_casteljau_split(
            seg.p0.out_f64(),
            seg.p1.out_f64(),
            seg.p2.out_f64(),
            seg.p3.out_f64(),
            u,
        );
        let mut left_segments = self.segments[..i].to_vec();
        left_segments.push(segment_from_f64(left_in, left_out));
        let mut right_segments = vec![segment_from_f64(right_in, right_out)];
        right_segments.extend(self.segments[i + 1..].iter().copied());
        (
            Self::new(left_segments).expect("split segment stays monotonic and joins C0"),
            Self::new(right_segments).expect("split segment stays monotonic and joins C0"),
        )
    }

    /// Linearize to a [`LinearMonotonicCurve`](crate::linear::LinearMonotonicCurve)
    /// within `config`'s tolerance, by recursive chord-midpoint subdivision.
    #[must_use]
    pub fn linearize(&self, config: crate::config::LinearizeConfig) -> crate::linear::LinearMonotonicCurve {
        let mut knots = Vec::new();
        for (idx, seg) in self.segments.iter().enumerate() {
            let mut pts = Vec::new();
            subdivide(seg, 0.0, 1.0, config, 0, &mut pts);
            if idx == 0 {
                knots.push(crate::linear::Knot {
                    r#in: seg.p0.r#in,
                    out: seg.p0.out,
                });
            }
            knots.extend(pts);
            knots.push(crate::linear::Knot {
                r#in: seg.p3.r#in,
                out: seg.p3.out,
            });
        }
        crate::linear::LinearMonotonicCurve::new(knots).expect("linearized curve is monotonic by construction")
    }
}

fn subdivide(
    seg: &BezierSegment,
    u0: f64,
    u1: f64,
    config: crate::config::LinearizeConfig,
    depth: u32,
    out: &mut Vec<crate::linear::Knot>,
) {
    let mid = (u0 + u1) / 2.0;
    let in0 = lerp_f64_over_u(seg, u0, true);
    let in1 = lerp_f64_over_u(seg, u1, true);
    let out0 = lerp_f64_over_u(seg, u0, false);
    let out1 = lerp_f64_over_u(seg, u1, false);
    let chord_mid_out = (out0 + out1) / 2.0;
    let true_mid_out = lerp_f64_over_u(seg, mid, false);
    let chord_mid_in = (in0 + in1) / 2.0;
    let true_mid_in = lerp_f64_over_u(seg, mid, true);
    let error = (chord_mid_out - true_mid_out).hypot(chord_mid_in - true_mid_in);

    if error <= config.epsilon || depth >= config.max_depth {
        return;
    }
    subdivide(seg, u0, mid, config, depth + 1, out);
    out.push(crate::linear::Knot {
        r#in: ordinate_approx(true_mid_in),
        out: ordinate_approx(true_mid_out),
    });
    subdivide(seg, mid, u1, config, depth + 1, out);
}

fn lerp_f64_over_u(seg: &BezierSegment, u: f64, want_in: bool) -> f64 {
    let (a, b, c, d) = if want_in {
        cubic_in_coeffs(seg.p0.in_f64(), seg.p1.in_f64(), seg.p2.in_f64(), seg.p3.in_f64())
    } else {
        cubic_in_coeffs(seg.p0.out_f64(), seg.p1.out_f64(), seg.p2.out_f64(), seg.p3.out_f64())
    };
    a * u * u * u + b * u * u + c * u + d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(i: f64, o: f64) -> ControlPoint {
        ControlPoint {
            r#in: ordinate_approx(i),
            out: ordinate_approx(o),
        }
    }

    fn retime_curve() -> BezierCurve {
        let seg = BezierSegment::new(cp(0.0, 0.0), cp(0.25, 0.25), cp(0.5, 2.0), cp(1.0, 2.0)).unwrap();
        BezierCurve::new(vec![seg]).unwrap()
    }

    #[test]
    fn endpoints_evaluate_exactly() {
        let c = retime_curve();
        let start = c.eval(Ordinate::from_int(0)).unwrap();
        assert!((start.to_f64_lossy() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn slope_roughly_doubles_in_fast_region() {
        let c = retime_curve();
        let slow = c.derivative_at(ordinate_approx(0.05)).unwrap();
        let fast = c.derivative_at(ordinate_approx(0.9)).unwrap();
        // The curve accelerates from p0->p1 (slope ~1) toward p2->p3
        // (slope ~0, since out is flat at 2.0 there); check it is not
        // uniform, i.e. the warp actually retimes.
        assert!((slow - fast).abs() > 0.1);
    }

    #[test]
    fn monotonic_pieces_splits_on_extremum() {
        // p0.in=0, p1.in=2, p2.in=-1, p3.in=1: derivative of `in` changes
        // sign in (0,1), so this must split into >= 2 monotonic pieces.
        let pieces = BezierSegment::monotonic_pieces(cp(0.0, 0.0), cp(2.0, 1.0), cp(-1.0, 2.0), cp(1.0, 3.0));
        assert!(pieces.len() >= 2);
        for p in &pieces {
            assert!(BezierSegment::new(p.p0, p.p1, p.p2, p.p3).is_ok());
        }
    }

    #[test]
    fn rejects_non_monotonic_segment() {
        let err = BezierSegment::new(cp(0.0, 0.0), cp(2.0, 1.0), cp(-1.0, 2.0), cp(1.0, 3.0));
        assert!(err.is_err());
    }

    #[test]
    fn split_at_shares_boundary_and_preserves_endpoints() {
        let c = retime_curve();
        let x = ordinate_approx(0.5);
        let (left, right) = c.split_at(x);
        let ly = left.eval(x).unwrap();
        let ry = right.eval(x).unwrap();
        assert!((ly.to_f64_lossy() - ry.to_f64_lossy()).abs() < 1e-6);
        assert_eq!(left.input_bounds().start, c.input_bounds().start);
        assert_eq!(right.input_bounds().end, c.input_bounds().end);
    }

    #[test]
    fn project_interval_brackets_endpoint_values() {
        let c = retime_curve();
        let hull = c
            .project_interval(ContinuousInterval::new(Ordinate::from_int(0), Ordinate::from_int(1)))
            .unwrap();
        assert!(hull.start.to_f64_lossy() <= 0.01);
        assert!(hull.end.to_f64_lossy() >= 1.99);
    }

    #[test]
    fn linearize_produces_increasing_knots() {
        let c = retime_curve();
        let lin = c.linearize(crate::config::LinearizeConfig::default());
        let knots = lin.knots();
        for w in knots.windows(2) {
            assert!(matches!(
                w[0].r#in.partial_cmp(&w[1].r#in),
                Some(std::cmp::Ordering::Less)
            ));
        }
    }
}
