// crates/otio-tree/src/node.rs

//! The tagged [`CompositionNode`] shapes and the stable, non-owning
//! handles (`NodeId`, `SpaceRef`) used to refer to them.

use crate::tree::CompositionTree;
use otio_core::{ContinuousInterval, DiscreteSampling};
use otio_topology::Topology;

/// A stable, non-owning reference to a node in a [`CompositionTree`]'s
/// arena. Valid only while the tree that produced it is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named coordinate space a node exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpaceLabel {
    /// The space every node exposes: how the node looks to its parent.
    Presentation,
    /// A clip's own media-rate space.
    Media,
    /// A warp's input space (its child's presentation).
    PreWarp,
    /// A warp's output space (its presentation, as seen by its parent).
    PostWarp,
}

/// A value handle to a space on a node; never owning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpaceRef {
    /// The node the space belongs to.
    pub node: NodeId,
    /// Which of the node's spaces.
    pub space: SpaceLabel,
}

/// An opaque handle to externally loaded media; the core never
/// interprets its contents (see `SPEC_FULL.md` §6, document loader).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaReference {
    /// Loader-assigned identifier, opaque to this crate.
    pub name: String,
}

/// A tagged composition node: a sum type, not a virtual hierarchy (see
/// the "tagged unions over inheritance" design note).
#[derive(Clone, Debug, PartialEq)]
pub enum CompositionNode {
    /// Thin wrapper delegating to its root stack.
    Timeline {
        /// The document's single top-level stack.
        root_stack: NodeId,
    },
    /// Parallel overlay: every child shares the stack's presentation
    /// bounds.
    Stack {
        /// Overlaid children, in z-order (lowest index topmost).
        children: Vec<NodeId>,
        /// The stack's own presentation bounds.
        bounds: ContinuousInterval,
    },
    /// Sequential concatenation: children laid end to end.
    Track {
        /// Children in presentation order.
        children: Vec<NodeId>,
        /// `[0, sum of children's durations)`.
        bounds: ContinuousInterval,
    },
    /// A leaf referencing external media.
    Clip {
        /// The clip's presentation bounds.
        bounds: ContinuousInterval,
        /// The external media this clip presents.
        media_reference: MediaReference,
        /// Discrete sampling definition for the `media` space, if any.
        media_sampling: Option<DiscreteSampling>,
    },
    /// An empty leaf: presentation projects to no child.
    Gap {
        /// The gap's presentation bounds.
        bounds: ContinuousInterval,
    },
    /// A retiming node: `warp_topology` maps `post_warp` (this node's
    /// presentation) to `pre_warp` (its child's presentation).
    Warp {
        /// The node being retimed.
        child: NodeId,
        /// `post_warp -> pre_warp`.
        warp_topology: Topology,
    },
}

impl CompositionNode {
    /// This node's presentation bounds.
    #[must_use]
    pub fn presentation_bounds(&self, tree: &CompositionTree) -> ContinuousInterval {
        match self {
            Self::Timeline { root_stack } => tree
                .node(*root_stack)
                .expect("root_stack was validated on construction")
                .presentation_bounds(tree),
            Self::Stack { bounds, .. }
            | Self::Track { bounds, .. }
            | Self::Clip { bounds, .. }
            | Self::Gap { bounds } => *bounds,
            Self::Warp { warp_topology, .. } => warp_topology.input_bounds(),
        }
    }

    /// The spaces this node exposes.
    #[must_use]
    pub fn spaces(&self) -> Vec<SpaceLabel> {
        match self {
            Self::Clip { .. } => vec![SpaceLabel::Presentation, SpaceLabel::Media],
            Self::Warp { .. } => vec![
                SpaceLabel::Presentation,
                SpaceLabel::PreWarp,
                SpaceLabel::PostWarp,
            ],
            Self::Timeline { .. } | Self::Stack { .. } | Self::Track { .. } | Self::Gap { .. } => {
                vec![SpaceLabel::Presentation]
            }
        }
    }
}
