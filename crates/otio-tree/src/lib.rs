// crates/otio-tree/src/lib.rs

//! The composition tree: a tagged arena of timeline/stack/track/clip/
//! gap/warp nodes, addressed by non-owning handles, with per-node
//! intrinsic topologies ready for [`otio_project`] to walk.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod node;
mod tree;

pub use node::{CompositionNode, MediaReference, NodeId, SpaceLabel, SpaceRef};
pub use tree::{CompositionTree, Edge};
