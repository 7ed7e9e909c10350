// crates/otio-core/src/error.rs

//! Shared error type for every fallible operation across the workspace.
//!
//! One enum, reused by `otio-curves`, `otio-mapping`, `otio-topology`,
//! `otio-tree`, and `otio-project` so a caller never has to match against
//! more than one error type when walking a composed projection.

use crate::{ContinuousInterval, Ordinate};
use thiserror::Error;

/// Every error kind a caller of this workspace can observe.
///
/// The core never logs or retries (see `SPEC_FULL.md` §7); every error
/// surfaces to the caller with enough context to act on it without
/// re-deriving the failing state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An ordinate or interval fell outside a mapping's or topology's
    /// `input_bounds`.
    #[error("ordinate {ordinate:?} is outside input bounds {bounds:?}")]
    OutOfBounds {
        /// The offending ordinate.
        ordinate: Ordinate,
        /// The bounds it was checked against.
        bounds: ContinuousInterval,
    },

    /// Evaluation reached a segment with no visible destination.
    #[error("evaluation hit an Empty segment with no visible destination")]
    Empty,

    /// An inverse was requested of a mapping or topology that is not
    /// monotonic in its output.
    #[error("mapping is not invertible: {reason}")]
    NotInvertible {
        /// Human-readable detail (e.g. which segment or knot failed).
        reason: &'static str,
    },

    /// No path exists between the requested source and destination spaces.
    #[error("no path from {source} to {destination}")]
    Unreachable {
        /// Source space, formatted as `node#space`.
        source: String,
        /// Destination space, formatted as `node#space`.
        destination: String,
    },

    /// A discrete query was made against a space with no sampling
    /// definition.
    #[error("space has no discrete sampling definition")]
    NoDiscreteInfo,

    /// An ordinate could not be converted to an integer because it is
    /// infinite, `NaN`, or exceeds the representable integer range.
    #[error("ordinate {ordinate:?} cannot be converted to an integer")]
    Overflow {
        /// The ordinate that failed conversion.
        ordinate: Ordinate,
    },

    /// An invariant was violated during construction (a caller/loader bug,
    /// not a runtime degeneracy).
    #[error("malformed construction: {reason}")]
    Malformed {
        /// Human-readable detail.
        reason: String,
    },
}
