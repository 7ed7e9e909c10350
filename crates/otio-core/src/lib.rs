// crates/otio-core/src/lib.rs

//! Exact-rational ordinates, clopen intervals, discrete sampling, affine
//! transforms, and the shared error type for the temporal-coordinate
//! engine.
//!
//! This crate has no dependency on any other crate in the workspace; every
//! other crate depends on it for `Ordinate`, `ContinuousInterval`, and
//! `Error`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod affine;
mod discrete;
mod error;
mod interval;
mod ordinate;
pub mod rational;

pub use affine::AffineTransform;
pub use discrete::DiscreteSampling;
pub use error::Error;
pub use interval::ContinuousInterval;
pub use ordinate::Ordinate;
pub use rational::Rational;
