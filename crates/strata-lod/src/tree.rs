//! Eagerly built terrain quadtree with distance-driven leaf selection and
//! greater-or-equal neighbor lookup.

use glam::{DVec2, DVec3};

use crate::{Crossing, LodConfig, LodError, NodeId, QuadNode, Quadrant, Side, TerrainTransform};

/// Deepest tree the arena will allocate (about 22 million nodes).
pub const MAX_DEPTH: usize = 12;

/// Counters from one realignment pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RealignStats {
    /// Nodes whose flags were evaluated.
    pub visited: usize,
    /// Nodes that were split this pass.
    pub splits: usize,
    /// Active leaves on the resulting frontier.
    pub leaves: usize,
    /// Depth of the finest active leaf.
    pub deepest: u8,
}

/// A complete quadtree stored in heap order.
///
/// Every level down to `max_depth` is allocated at construction and never
/// reallocated; realignment only flips leaf flags. The active leaves of
/// the last realignment are kept as a flat frontier list.
#[derive(Clone, Debug)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    max_depth: u8,
    frontier: Vec<NodeId>,
}

impl QuadTree {
    /// Build the full tree down to `max_depth`.
    ///
    /// A depth of 0 yields a single root that is permanently a leaf.
    pub fn new(max_depth: usize) -> Result<Self, LodError> {
        if max_depth > MAX_DEPTH {
            return Err(LodError::DepthTooLarge {
                depth: max_depth,
                max: MAX_DEPTH,
            });
        }
        let depth_limit = max_depth as u8;
        let total = Self::node_count_for_depth(max_depth);

        let mut nodes = Vec::with_capacity(total);
        nodes.push(QuadNode::new(DVec2::ZERO, 1.0, 0, None, depth_limit));

        // Heap order: children of slot i are appended while visiting slot i,
        // so they land at 4i + 1 ..= 4i + 4.
        let mut index = 0;
        while !nodes[index].is_bottom_of_tree {
            let parent = &nodes[index];
            let half = parent.size * 0.5;
            let origin = parent.position;
            let depth = parent.depth + 1;
            for quadrant in Quadrant::ALL {
                let (ox, oy) = quadrant.offset();
                nodes.push(QuadNode::new(
                    origin + DVec2::new(ox, oy) * half,
                    half,
                    depth,
                    Some(quadrant),
                    depth_limit,
                ));
            }
            index += 1;
        }
        debug_assert_eq!(nodes.len(), total);

        Ok(Self {
            nodes,
            max_depth: depth_limit,
            frontier: vec![NodeId::ROOT],
        })
    }

    /// Number of nodes in a complete quadtree of the given depth.
    pub fn node_count_for_depth(max_depth: usize) -> usize {
        ((1usize << (2 * (max_depth + 1))) - 1) / 3
    }

    /// Total number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the bottom level.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from a tree at least this deep.
    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id.index()]
    }

    /// Access a node, or `None` if `id` is outside this tree.
    pub fn get(&self, id: NodeId) -> Option<&QuadNode> {
        self.nodes.get(id.index())
    }

    /// Parent of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        id.parent()
    }

    /// The four children of `id` in [`Quadrant::ALL`] order, or `None` at
    /// the bottom of the tree.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        if self.node(id).is_bottom_of_tree {
            None
        } else {
            Some(Quadrant::ALL.map(|q| id.child(q)))
        }
    }

    /// All node ids, root first, level by level.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Active leaves selected by the last realignment, in depth-first
    /// quadrant order.
    pub fn active_leaves(&self) -> &[NodeId] {
        &self.frontier
    }

    /// Whether `id` is on the current frontier: a leaf with no leaf above it.
    pub fn is_active_leaf(&self, id: NodeId) -> bool {
        if !self.node(id).is_leaf {
            return false;
        }
        let mut cursor = id.parent();
        while let Some(ancestor) = cursor {
            if self.node(ancestor).is_leaf {
                return false;
            }
            cursor = ancestor.parent();
        }
        true
    }

    /// Re-evaluate which nodes are leaves for a viewer at `viewer` (world
    /// space).
    ///
    /// A node splits when the squared planar distance from its world-space
    /// center to the viewer is below the square of its depth's range.
    /// Subtrees under a leaf are not visited and keep stale flags.
    pub fn align_to(
        &mut self,
        viewer: DVec3,
        config: &LodConfig,
        transform: &TerrainTransform,
    ) -> RealignStats {
        let mut stats = RealignStats::default();
        self.frontier.clear();
        let viewer = TerrainTransform::planar(viewer);
        self.align_node(NodeId::ROOT, viewer, config, transform, &mut stats);
        stats
    }

    fn align_node(
        &mut self,
        id: NodeId,
        viewer: DVec2,
        config: &LodConfig,
        transform: &TerrainTransform,
        stats: &mut RealignStats,
    ) {
        stats.visited += 1;
        let node = &mut self.nodes[id.index()];

        let threshold = if node.is_bottom_of_tree {
            None
        } else {
            config.range_squared(node.depth as usize)
        };

        let split = threshold.is_some_and(|threshold| {
            let center = transform.to_world_xz(node.center, config.scale);
            center.distance_squared(viewer) < threshold
        });

        if split {
            node.is_leaf = false;
            stats.splits += 1;
            for quadrant in Quadrant::ALL {
                self.align_node(id.child(quadrant), viewer, config, transform, stats);
            }
        } else {
            node.is_leaf = true;
            stats.leaves += 1;
            stats.deepest = stats.deepest.max(node.depth);
            self.frontier.push(id);
        }
    }

    /// The adjacent node across `side` that is at the same depth or
    /// coarser, or `None` on the terrain boundary.
    ///
    /// Results are meaningful for nodes on or above the current frontier;
    /// below it the leaf flags being consulted are stale.
    pub fn neighbor(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let quadrant = id.quadrant()?;
        let parent = id.parent()?;
        match side.crossing(quadrant) {
            Crossing::Sibling(sibling) => Some(parent.child(sibling)),
            Crossing::Outside(mirror) => {
                let outer = self.neighbor(parent, side)?;
                if self.node(outer).is_leaf {
                    Some(outer)
                } else {
                    Some(outer.child(mirror))
                }
            }
        }
    }

    /// Neighbors on all four sides, indexed by [`Side::index`].
    pub fn neighbors(&self, id: NodeId) -> [Option<NodeId>; 4] {
        Side::ALL.map(|side| self.neighbor(id, side))
    }

    /// Active leaf containing a normalized terrain point, or `None` outside
    /// the unit square.
    pub fn find_leaf(&self, point: DVec2) -> Option<NodeId> {
        let mut id = NodeId::ROOT;
        if !self.node(id).contains(point) {
            return None;
        }
        loop {
            let node = self.node(id);
            if node.is_leaf {
                return Some(id);
            }
            id = id.child(node.quadrant_of(point));
        }
    }
}
