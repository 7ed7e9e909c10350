// crates/otio-project/src/projection.rs

//! [`ProjectionBuilder`]: cut-point collection, segment enumeration, and
//! per-row destination bookkeeping over a composition tree, plus the
//! external-interface functions named in `spec.md` §6.

use otio_core::{AffineTransform, ContinuousInterval, Error, Ordinate};
use otio_mapping::Mapping;
use otio_topology::Topology;
use otio_tree::{CompositionTree, SpaceLabel, SpaceRef};
use std::cmp::Ordering;

use crate::topological_map::TopologicalMap;

/// One mapping in the shared pool: a composed mapping from the
/// projection's source space to `destination`.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingEntry {
    /// `source -> destination`, valid over its own `input_bounds()`.
    pub mapping: Mapping,
    /// The space this entry's mapping projects into.
    pub destination: SpaceRef,
}

/// A non-overlapping row of the projection's segment table: a source-space
/// sub-range and the pool entries reaching a destination over it.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentRow {
    /// The row's source-space sub-range.
    pub bounds: ContinuousInterval,
    /// Indices into the owning [`ProjectionBuilder`]'s pool.
    pub mapping_indices: Vec<usize>,
}

/// A segment table built from one source space reference, ready to be
/// stitched into a destination-specific topology via [`Self::projection_to`].
#[derive(Clone, Debug)]
pub struct ProjectionBuilder {
    source: SpaceRef,
    rows: Vec<SegmentRow>,
    pool: Vec<MappingEntry>,
}

impl ProjectionBuilder {
    /// The source space this builder was built from.
    #[must_use]
    pub fn source(&self) -> SpaceRef {
        self.source
    }

    /// The segment table's rows, in source-space order.
    #[must_use]
    pub fn rows(&self) -> &[SegmentRow] {
        &self.rows
    }

    /// The shared mapping pool.
    #[must_use]
    pub fn pool(&self) -> &[MappingEntry] {
        &self.pool
    }

    /// Stitch the rows reaching `dst` into a single topology over the
    /// source space.
    ///
    /// # Errors
    /// Returns [`Error::Unreachable`] if no row reaches `dst` at all.
    pub fn projection_to(&self, dst: SpaceRef) -> Result<Topology, Error> {
        let mut found = false;
        let mut segments = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let hit = row
                .mapping_indices
                .iter()
                .map(|&i| &self.pool[i])
                .find(|entry| entry.destination == dst);
            match hit {
                Some(entry) => {
                    found = true;
                    segments.push(entry.mapping.clone());
                }
                None => segments.push(Mapping::empty(row.bounds)),
            }
        }
        if !found {
            return Err(Error::Unreachable {
                source: format!("{:?}", self.source),
                destination: format!("{:?}", dst),
            });
        }
        Topology::new(segments)
    }
}

struct RawEntry {
    bounds: ContinuousInterval,
    mapping: Mapping,
    destination: SpaceRef,
}

/// Build a segment table projecting out of `src`.
///
/// # Errors
/// Returns [`Error::Malformed`] for a malformed tree, or propagates a
/// composition failure encountered while walking it.
pub fn build_projection(
    tree: &CompositionTree,
    map: &TopologicalMap,
    src: SpaceRef,
) -> Result<ProjectionBuilder, Error> {
    if !map.is_reachable(src) {
        return Err(Error::Unreachable {
            source: format!("{src:?}"),
            destination: "source space is not reachable from the map's root".to_string(),
        });
    }
    if src.space != SpaceLabel::Presentation {
        return Err(Error::Unreachable {
            source: format!("{src:?}"),
            destination: "build_projection only starts from a Presentation space".to_string(),
        });
    }
    let bounds = tree.node(src.node)?.presentation_bounds(tree);
    let identity = Topology::new(vec![Mapping::affine(AffineTransform::identity(), bounds)])?;

    let mut raw = Vec::new();
    collect(tree, src.node, &identity, &mut raw)?;

    let mut cuts: Vec<Ordinate> = Vec::with_capacity(raw.len() * 2);
    for r in &raw {
        cuts.push(r.bounds.start);
        cuts.push(r.bounds.end);
    }
    cuts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    cuts.dedup();

    let mut rows = Vec::new();
    let mut pool = Vec::new();
    for w in cuts.windows(2) {
        let row_bounds = ContinuousInterval::new(w[0], w[1]);
        if row_bounds.is_empty() {
            continue;
        }
        let mut indices = Vec::new();
        for r in &raw {
            let overlap = r.bounds.intersection(row_bounds);
            if overlap.is_empty() {
                continue;
            }
            let trimmed = r.mapping.trim_to_input(overlap);
            indices.push(pool.len());
            pool.push(MappingEntry {
                mapping: trimmed,
                destination: r.destination,
            });
        }
        rows.push(SegmentRow {
            bounds: row_bounds,
            mapping_indices: indices,
        });
    }

    Ok(ProjectionBuilder { source: src, rows, pool })
}

/// Restrict `local` (`source -> node.presentation`) to the sub-range whose
/// image lies in `target` (a descendant edge's own presentation domain).
fn restrict_to_range(local: &Topology, target: ContinuousInterval) -> Result<Topology, Error> {
    let inverted = local.invert()?;
    match inverted.project_interval(target) {
        Ok(preimage) => local.trim_input(preimage),
        Err(Error::Empty) => Ok(Topology::empty_at(local.input_bounds().start)),
        Err(e) => Err(e),
    }
}

fn collect(tree: &CompositionTree, node: otio_tree::NodeId, local: &Topology, raw: &mut Vec<RawEntry>) -> Result<(), Error> {
    if local.is_empty() {
        return Ok(());
    }
    for seg in local.segments() {
        raw.push(RawEntry {
            bounds: seg.input_bounds(),
            mapping: seg.clone(),
            destination: SpaceRef {
                node,
                space: SpaceLabel::Presentation,
            },
        });
    }

    match tree.node(node)? {
        otio_tree::CompositionNode::Clip { .. } => {
            let media_topology = tree.clip_media_topology(node)?;
            let restricted = restrict_to_range(local, media_topology.input_bounds())?;
            if !restricted.is_empty() {
                let composed = Topology::join(&restricted, &media_topology)?;
                for seg in composed.segments() {
                    raw.push(RawEntry {
                        bounds: seg.input_bounds(),
                        mapping: seg.clone(),
                        destination: SpaceRef {
                            node,
                            space: SpaceLabel::Media,
                        },
                    });
                }
            }
            Ok(())
        }
        otio_tree::CompositionNode::Gap { .. } => Ok(()),
        otio_tree::CompositionNode::Warp { child, warp_topology } => {
            let restricted = restrict_to_range(local, warp_topology.input_bounds())?;
            if restricted.is_empty() {
                return Ok(());
            }
            let composed = Topology::join(&restricted, warp_topology)?;
            for seg in composed.segments() {
                raw.push(RawEntry {
                    bounds: seg.input_bounds(),
                    mapping: seg.clone(),
                    destination: SpaceRef {
                        node,
                        space: SpaceLabel::PreWarp,
                    },
                });
            }
            collect(tree, *child, &composed, raw)
        }
        otio_tree::CompositionNode::Timeline { .. }
        | otio_tree::CompositionNode::Stack { .. }
        | otio_tree::CompositionNode::Track { .. } => {
            for edge in tree.intrinsic_edges(node)? {
                let restricted = restrict_to_range(local, edge.topology.input_bounds())?;
                if restricted.is_empty() {
                    continue;
                }
                let composed = Topology::join(&restricted, &edge.topology)?;
                collect(tree, edge.destination, &composed, raw)?;
            }
            Ok(())
        }
    }
}

/// `project_instantaneous_cc(src, dst, o)`: project a single ordinate
/// from `src` to `dst`.
///
/// # Errors
/// `OutOfBounds`, `Empty`, `NotInvertible`, or `Unreachable` as specified.
pub fn project_instantaneous_cc(
    tree: &CompositionTree,
    map: &TopologicalMap,
    src: SpaceRef,
    dst: SpaceRef,
    o: Ordinate,
) -> Result<Ordinate, Error> {
    build_projection(tree, map, src)?.projection_to(dst)?.project_ordinate(o)
}

/// `project_interval_cc(src, dst, iv)`: project an interval from `src` to
/// `dst`.
///
/// # Errors
/// `OutOfBounds` or `Empty` as specified.
pub fn project_interval_cc(
    tree: &CompositionTree,
    map: &TopologicalMap,
    src: SpaceRef,
    dst: SpaceRef,
    iv: ContinuousInterval,
) -> Result<ContinuousInterval, Error> {
    build_projection(tree, map, src)?.projection_to(dst)?.project_interval(iv)
}

/// `ordinate_to_index(item, space, domain, o)`: the discrete sample index
/// covering ordinate `o` in `space`.
///
/// # Errors
/// Returns [`Error::NoDiscreteInfo`] if `space` has no sampling
/// definition.
pub fn ordinate_to_index(tree: &CompositionTree, space: SpaceRef, o: Ordinate) -> Result<i64, Error> {
    tree.discrete_sampling(space)?.index_for_ordinate(o)
}

/// `index_to_interval(item, space, domain, i)`: the ordinate interval
/// covered by discrete sample `i` in `space`.
///
/// # Errors
/// Returns [`Error::NoDiscreteInfo`] if `space` has no sampling
/// definition.
pub fn index_to_interval(tree: &CompositionTree, space: SpaceRef, index: i64) -> Result<ContinuousInterval, Error> {
    Ok(tree.discrete_sampling(space)?.interval_for_index(index))
}
