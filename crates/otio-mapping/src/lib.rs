// crates/otio-mapping/src/lib.rs

//! [`Mapping`]: a tagged union over empty/affine/linear/bezier atoms that
//! share one projection contract, used as the edge label in a topology
//! or composition tree.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod mapping;

pub use mapping::Mapping;
