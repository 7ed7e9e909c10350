// crates/otio-tree/src/tree.rs

//! [`CompositionTree`]: a flat arena of [`CompositionNode`]s, built
//! bottom-up (children must exist before the parent that references
//! them), with non-owning [`NodeId`] handles.

use crate::node::{CompositionNode, MediaReference, NodeId, SpaceLabel, SpaceRef};
use otio_core::{AffineTransform, ContinuousInterval, DiscreteSampling, Error, Ordinate};
use otio_mapping::Mapping;
use otio_topology::Topology;

/// A single edge of a node's intrinsic topology: where it leads and the
/// mapping that gets you there.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// The child node this edge leads to.
    pub destination: NodeId,
    /// `presentation -> destination.presentation`, local to this edge's
    /// sub-range of the source node's presentation axis.
    pub topology: Topology,
}

/// A flat, append-only arena of composition nodes.
#[derive(Clone, Debug, Default)]
pub struct CompositionTree {
    nodes: Vec<CompositionNode>,
}

impl CompositionTree {
    /// An empty tree, ready for bottom-up construction.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Look up a node by id.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `id` is out of range.
    pub fn node(&self, id: NodeId) -> Result<&CompositionNode, Error> {
        self.nodes.get(id.index()).ok_or_else(|| Error::Malformed {
            reason: format!("node id {} is out of range", id.index()),
        })
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` iff no nodes have been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check_child(&self, id: NodeId) -> Result<(), Error> {
        if id.index() >= self.nodes.len() {
            return Err(Error::Malformed {
                reason: format!(
                    "child node id {} references a node not yet in the arena",
                    id.index()
                ),
            });
        }
        Ok(())
    }

    fn push(&mut self, node: CompositionNode) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("arena has fewer than u32::MAX nodes"));
        self.nodes.push(node);
        id
    }

    /// Push a `Gap` leaf.
    pub fn push_gap(&mut self, bounds: ContinuousInterval) -> NodeId {
        self.push(CompositionNode::Gap { bounds })
    }

    /// Push a `Clip` leaf.
    pub fn push_clip(
        &mut self,
        bounds: ContinuousInterval,
        media_reference: MediaReference,
        media_sampling: Option<DiscreteSampling>,
    ) -> NodeId {
        self.push(CompositionNode::Clip {
            bounds,
            media_reference,
            media_sampling,
        })
    }

    /// Push a `Track`, laying `children` end to end; the track's own
    /// bounds are computed as the sum of their durations.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `children` is empty or references
    /// a node not yet in the arena.
    pub fn push_track(&mut self, children: Vec<NodeId>) -> Result<NodeId, Error> {
        if children.is_empty() {
            return Err(Error::Malformed {
                reason: "a track needs at least one child".to_string(),
            });
        }
        for &c in &children {
            self.check_child(c)?;
        }
        let mut end = Ordinate::ZERO;
        for &c in &children {
            let dur = self.node(c)?.presentation_bounds(self).duration();
            end = end.add(dur);
        }
        let bounds = ContinuousInterval::new(Ordinate::ZERO, end);
        Ok(self.push(CompositionNode::Track { children, bounds }))
    }

    /// Push a `Stack` overlaying `children` within `bounds`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `children` is empty or references
    /// a node not yet in the arena.
    pub fn push_stack(&mut self, children: Vec<NodeId>, bounds: ContinuousInterval) -> Result<NodeId, Error> {
        if children.is_empty() {
            return Err(Error::Malformed {
                reason: "a stack needs at least one child".to_string(),
            });
        }
        for &c in &children {
            self.check_child(c)?;
        }
        Ok(self.push(CompositionNode::Stack { children, bounds }))
    }

    /// Push a `Warp` retiming `child` through `warp_topology`
    /// (`post_warp -> pre_warp`).
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `child` references a node not yet
    /// in the arena.
    pub fn push_warp(&mut self, child: NodeId, warp_topology: Topology) -> Result<NodeId, Error> {
        self.check_child(child)?;
        Ok(self.push(CompositionNode::Warp { child, warp_topology }))
    }

    /// Push a `Timeline` wrapping `root_stack`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `root_stack` references a node
    /// not yet in the arena.
    pub fn push_timeline(&mut self, root_stack: NodeId) -> Result<NodeId, Error> {
        self.check_child(root_stack)?;
        Ok(self.push(CompositionNode::Timeline { root_stack }))
    }

    /// The outgoing edges of `id`'s intrinsic topology: presentation to
    /// each reachable child's presentation. Leaves (`Clip`, `Gap`) and
    /// `Timeline` (a thin single-child wrapper handled specially by
    /// callers that already know the root) return according to
    /// `SPEC_FULL.md` §4.F.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `id` is out of range.
    pub fn intrinsic_edges(&self, id: NodeId) -> Result<Vec<Edge>, Error> {
        match self.node(id)? {
            CompositionNode::Gap { .. } | CompositionNode::Clip { .. } => Ok(Vec::new()),
            CompositionNode::Timeline { root_stack } => {
                let bounds = self.node(*root_stack)?.presentation_bounds(self);
                Ok(vec![Edge {
                    destination: *root_stack,
                    topology: Topology::new(vec![Mapping::affine(AffineTransform::identity(), bounds)])?,
                }])
            }
            CompositionNode::Stack { children, bounds } => {
                let mut edges = Vec::with_capacity(children.len());
                for &child in children {
                    let child_bounds = self.node(child)?.presentation_bounds(self);
                    let visible = bounds.intersection(child_bounds);
                    if visible.is_empty() {
                        continue;
                    }
                    edges.push(Edge {
                        destination: child,
                        topology: Topology::new(vec![Mapping::affine(AffineTransform::identity(), visible)])?,
                    });
                }
                Ok(edges)
            }
            CompositionNode::Track { children, .. } => {
                let mut edges = Vec::with_capacity(children.len());
                let mut cursor = Ordinate::ZERO;
                for &child in children {
                    let dur = self.node(child)?.presentation_bounds(self).duration();
                    let span = ContinuousInterval::new(cursor, cursor.add(dur));
                    let transform = AffineTransform {
                        offset: cursor.neg(),
                        scale: Ordinate::from_int(1),
                    };
                    edges.push(Edge {
                        destination: child,
                        topology: Topology::new(vec![Mapping::affine(transform, span)])?,
                    });
                    cursor = cursor.add(dur);
                }
                Ok(edges)
            }
            CompositionNode::Warp { child, warp_topology } => Ok(vec![Edge {
                destination: *child,
                topology: warp_topology.clone(),
            }]),
        }
    }

    /// The `presentation -> media` topology for a `Clip`, if it has
    /// discrete sampling (otherwise the media space exists but carries
    /// only an identity mapping, with discrete queries failing
    /// `NoDiscreteInfo`).
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `id` is out of range or is not a
    /// `Clip`.
    pub fn clip_media_topology(&self, id: NodeId) -> Result<Topology, Error> {
        match self.node(id)? {
            CompositionNode::Clip { bounds, .. } => {
                Topology::new(vec![Mapping::affine(AffineTransform::identity(), *bounds)])
            }
            _ => Err(Error::Malformed {
                reason: "clip_media_topology called on a non-Clip node".to_string(),
            }),
        }
    }

    /// The discrete sampling definition for a space, if any.
    ///
    /// # Errors
    /// Returns [`Error::NoDiscreteInfo`] if the node/space combination
    /// has no sampling definition.
    pub fn discrete_sampling(&self, space: SpaceRef) -> Result<DiscreteSampling, Error> {
        match (self.node(space.node)?, space.space) {
            (CompositionNode::Clip { media_sampling: Some(s), .. }, SpaceLabel::Media) => Ok(*s),
            _ => Err(Error::NoDiscreteInfo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(a: i64, b: i64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::from_int(a), Ordinate::from_int(b))
    }

    #[test]
    fn track_edges_offset_by_cumulative_duration() {
        let mut tree = CompositionTree::new();
        let clip0 = tree.push_clip(iv(0, 1), MediaReference { name: "a".into() }, None);
        let clip1 = tree.push_clip(iv(0, 1), MediaReference { name: "b".into() }, None);
        let track = tree.push_track(vec![clip0, clip1]).unwrap();
        assert_eq!(tree.node(track).unwrap().presentation_bounds(&tree), iv(0, 2));

        let edges = tree.intrinsic_edges(track).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].destination, clip0);
        assert_eq!(
            edges[0].topology.project_ordinate(Ordinate::from_int(0)).unwrap(),
            Ordinate::from_int(0)
        );
        assert_eq!(
            edges[1].topology.project_ordinate(Ordinate::from_int(1)).unwrap(),
            Ordinate::ZERO
        );
    }

    #[test]
    fn stack_edges_are_identity_restricted_to_each_child() {
        let mut tree = CompositionTree::new();
        let a = tree.push_clip(iv(0, 5), MediaReference { name: "a".into() }, None);
        let b = tree.push_clip(iv(0, 5), MediaReference { name: "b".into() }, None);
        let stack = tree.push_stack(vec![a, b], iv(0, 5)).unwrap();
        let edges = tree.intrinsic_edges(stack).unwrap();
        assert_eq!(edges.len(), 2);
        for e in &edges {
            assert_eq!(e.topology.project_ordinate(Ordinate::from_int(3)).unwrap(), Ordinate::from_int(3));
        }
    }

    #[test]
    fn gap_has_no_edges() {
        let mut tree = CompositionTree::new();
        let gap = tree.push_gap(iv(0, 3));
        assert!(tree.intrinsic_edges(gap).unwrap().is_empty());
    }

    #[test]
    fn rejects_forward_reference() {
        let mut tree = CompositionTree::new();
        let phantom = NodeId(7);
        assert!(tree.push_track(vec![phantom]).is_err());
    }

    #[test]
    fn clip_media_topology_is_identity_over_bounds() {
        let mut tree = CompositionTree::new();
        let clip = tree.push_clip(iv(0, 2), MediaReference { name: "a".into() }, None);
        let media = tree.clip_media_topology(clip).unwrap();
        assert_eq!(
            media.project_ordinate(Ordinate::from_ratio(1, 4)).unwrap(),
            Ordinate::from_ratio(1, 4)
        );
    }
}
