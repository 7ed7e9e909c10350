// crates/otio-project/src/topological_map.rs

//! [`TopologicalMap`]: a build-once, read-many index of every
//! `(node, space)` pair reachable from a composition root.

use otio_core::Error;
use otio_tree::{CompositionTree, NodeId, SpaceLabel, SpaceRef};
use std::collections::{HashMap, HashSet};

/// Every reachable `(node, space)` pair from a root, plus the
/// presentation-chain adjacency needed to answer "reachable from N?"
/// queries, built once by walking the tree's intrinsic edges.
///
/// Invalid if the `CompositionTree` it was built from is mutated
/// afterwards; the tree has no mutation API post-construction, so this
/// is enforced by never exposing one, rather than by a runtime check.
#[derive(Clone, Debug)]
pub struct TopologicalMap {
    root: NodeId,
    spaces: HashSet<SpaceRef>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl TopologicalMap {
    /// The root node this map was built from.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// `true` iff `space` is reachable from the root along the
    /// presentation chain (including the root's own extra spaces, e.g. a
    /// clip's `Media` space or a warp's `PreWarp`/`PostWarp`).
    #[must_use]
    pub fn is_reachable(&self, space: SpaceRef) -> bool {
        self.spaces.contains(&space)
    }

    /// Every reachable `(node, space)` pair, in no particular order.
    pub fn reachable_spaces(&self) -> impl Iterator<Item = &SpaceRef> {
        self.spaces.iter()
    }

    /// The presentation-chain children of `node` discovered during the
    /// build (empty for leaves or nodes outside the map).
    #[must_use]
    pub fn children_of(&self, node: NodeId) -> &[NodeId] {
        self.children.get(&node).map_or(&[], Vec::as_slice)
    }

    /// `true` iff `dst` lies in the presentation-chain subtree rooted at
    /// `src` (i.e. a downward walk from `src` reaches `dst`'s node).
    #[must_use]
    pub fn is_reachable_from(&self, src: NodeId, dst: NodeId) -> bool {
        if src == dst {
            return true;
        }
        let mut stack = self.children_of(src).to_vec();
        while let Some(n) = stack.pop() {
            if n == dst {
                return true;
            }
            stack.extend(self.children_of(n).iter().copied());
        }
        false
    }
}

/// Walk `tree` from `root` along its intrinsic edges, recording every
/// reachable `(node, space)` pair.
///
/// # Errors
/// Returns [`Error::Malformed`] if `root` or any descendant id is out of
/// range (a malformed tree, caught at map-build time rather than at
/// first projection).
pub fn build_topological_map(tree: &CompositionTree, root: NodeId) -> Result<TopologicalMap, Error> {
    let mut spaces = HashSet::new();
    let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    let mut stack = vec![root];
    let mut visited = HashSet::new();
    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        let n = tree.node(node)?;
        for space in n.spaces() {
            spaces.insert(SpaceRef { node, space });
        }
        let edges = tree.intrinsic_edges(node)?;
        let mut kids = Vec::with_capacity(edges.len());
        for edge in &edges {
            kids.push(edge.destination);
            stack.push(edge.destination);
        }
        children.insert(node, kids);
    }
    Ok(TopologicalMap { root, spaces, children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use otio_core::{ContinuousInterval, Ordinate};
    use otio_tree::MediaReference;

    fn iv(a: i64, b: i64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::from_int(a), Ordinate::from_int(b))
    }

    #[test]
    fn track_children_are_reachable_from_their_track() {
        let mut tree = CompositionTree::new();
        let clip0 = tree.push_clip(iv(0, 1), MediaReference { name: "a".into() }, None);
        let clip1 = tree.push_clip(iv(0, 1), MediaReference { name: "b".into() }, None);
        let track = tree.push_track(vec![clip0, clip1]).unwrap();
        let stack = tree.push_stack(vec![track], iv(0, 2)).unwrap();
        let timeline = tree.push_timeline(stack).unwrap();

        let map = build_topological_map(&tree, timeline).unwrap();
        assert!(map.is_reachable_from(timeline, clip0));
        assert!(map.is_reachable_from(timeline, clip1));
        assert!(map.is_reachable(SpaceRef {
            node: clip0,
            space: SpaceLabel::Media,
        }));
    }

    #[test]
    fn sibling_track_children_are_not_mutually_reachable() {
        let mut tree = CompositionTree::new();
        let clip_a = tree.push_clip(iv(0, 1), MediaReference { name: "a".into() }, None);
        let clip_b = tree.push_clip(iv(0, 1), MediaReference { name: "b".into() }, None);
        let track_a = tree.push_track(vec![clip_a]).unwrap();
        let track_b = tree.push_track(vec![clip_b]).unwrap();
        let stack = tree.push_stack(vec![track_a, track_b], iv(0, 1)).unwrap();

        let map = build_topological_map(&tree, stack).unwrap();
        assert!(!map.is_reachable_from(track_a, clip_b));
    }
}
