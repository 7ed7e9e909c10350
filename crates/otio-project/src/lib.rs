// crates/otio-project/src/lib.rs

//! Build-once reachability index ([`TopologicalMap`]) and the
//! cut-point/segment-table projection algorithm ([`ProjectionBuilder`])
//! that reduces a composition tree down to a per-row mapping table
//! between two named spaces.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod projection;
mod topological_map;

pub use projection::{
    build_projection, index_to_interval, ordinate_to_index, project_instantaneous_cc, project_interval_cc,
    MappingEntry, ProjectionBuilder, SegmentRow,
};
pub use topological_map::{build_topological_map, TopologicalMap};
