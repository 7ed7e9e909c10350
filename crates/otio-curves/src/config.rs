// crates/otio-curves/src/config.rs

//! Tuning knobs for curve construction and linearization.
//!
//! Grouped into a plain `Copy + Default` struct and threaded explicitly
//! through constructors, mirroring the teacher's `ReplayConfig`
//! (`sezkp-core/src/replay.rs`) rather than hiding tolerances in statics.

/// Tolerance and depth knobs for bezier linearization.
#[derive(Clone, Copy, Debug)]
pub struct LinearizeConfig {
    /// Maximum allowed distance, in output units, between a chord midpoint
    /// and the true curve evaluation at `u = 0.5` before a segment is split
    /// further. Spec default: `1/4096`.
    pub epsilon: f64,
    /// Hard cap on recursive subdivision depth, guarding against runaway
    /// recursion on pathological control points.
    pub max_depth: u32,
}

impl Default for LinearizeConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0 / 4096.0,
            max_depth: 24,
        }
    }
}
