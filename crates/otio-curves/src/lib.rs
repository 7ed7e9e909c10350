// crates/otio-curves/src/lib.rs

//! Monotonic linear-knot curves and cubic bezier curves used by the
//! [`Mapping`](https://docs.rs/otio-mapping) `Linear`/`Bezier` variants.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod bezier;
pub mod config;
pub mod dual;
pub mod linear;

pub use bezier::{BezierCurve, BezierSegment, ControlPoint};
pub use config::LinearizeConfig;
pub use dual::Dual;
pub use linear::{Knot, LinearMonotonicCurve};
