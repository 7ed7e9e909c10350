// crates/otio-topology/src/lib.rs

//! [`Topology`]: ordered, gapless mapping sequences with
//! join/trim/split/invert, the algebra composition trees reduce down to.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod topology;

pub use topology::Topology;
