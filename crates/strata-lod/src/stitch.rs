//! Per-edge stitching classification for active patches.
//!
//! Adjacent patches at different depths have different vertex densities
//! along their shared edge. The renderer removes the resulting T-junctions
//! by choosing a patch mesh variant whose edges on the coarser side are
//! collapsed to the neighbor's spacing; this module works out which edges
//! need that.

use glam::{DVec2, DVec3};

use crate::{NodeId, QuadTree, Side};

/// What a patch edge touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeStitch {
    /// Outer edge of the terrain; nothing to match.
    Boundary,
    /// Neighbor at the same depth; vertices line up.
    Equal,
    /// Neighbor `levels` depths coarser.
    Coarser {
        /// Depth difference, at least 1.
        levels: u8,
    },
}

impl EdgeStitch {
    /// Classify the edge between `node` and the result of its neighbor
    /// query on one side.
    pub fn classify(tree: &QuadTree, node: NodeId, neighbor: Option<NodeId>) -> Self {
        let Some(neighbor) = neighbor else {
            return EdgeStitch::Boundary;
        };
        let depth = tree.node(node).depth();
        let neighbor_depth = tree.node(neighbor).depth();
        debug_assert!(neighbor_depth <= depth, "neighbor finer than patch");
        match depth.saturating_sub(neighbor_depth) {
            0 => EdgeStitch::Equal,
            levels => EdgeStitch::Coarser { levels },
        }
    }

    /// Depth difference across the edge; 0 for boundary and equal edges.
    pub fn levels(self) -> u8 {
        match self {
            EdgeStitch::Coarser { levels } => levels,
            EdgeStitch::Boundary | EdgeStitch::Equal => 0,
        }
    }
}

/// Set of sides whose neighbor is coarser, one bit per [`Side::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StitchMask(u8);

impl StitchMask {
    /// No coarser edges.
    pub const NONE: StitchMask = StitchMask(0);

    /// Build a mask from four per-side classifications.
    pub fn from_stitches(stitches: &[EdgeStitch; 4]) -> Self {
        let mut mask = StitchMask::NONE;
        for side in Side::ALL {
            if matches!(stitches[side.index()], EdgeStitch::Coarser { .. }) {
                mask.insert(side);
            }
        }
        mask
    }

    /// Mark `side` as facing a coarser neighbor.
    pub fn insert(&mut self, side: Side) {
        self.0 |= 1 << side.index();
    }

    /// Whether `side` faces a coarser neighbor.
    pub fn contains(self, side: Side) -> bool {
        self.0 & (1 << side.index()) != 0
    }

    /// Variant index in `0..16` for picking one of sixteen patch meshes.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Number of coarser edges.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether every edge matches its neighbor.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Everything the renderer needs to draw one active leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchDescriptor {
    /// The active leaf.
    pub node: NodeId,
    /// Lower corner in normalized terrain space.
    pub position: DVec2,
    /// Edge length in normalized terrain space.
    pub size: f64,
    /// Tree depth of the leaf.
    pub depth: u8,
    /// World position of the lower corner, at the terrain's base height.
    pub world_origin: DVec3,
    /// World edge length.
    pub world_size: f64,
    /// Neighbor resolution per side, indexed by [`Side::index`].
    pub neighbors: [Option<NodeId>; 4],
    /// Edge classification per side, indexed by [`Side::index`].
    pub stitches: [EdgeStitch; 4],
    /// Sides facing a coarser neighbor.
    pub mask: StitchMask,
}

impl PatchDescriptor {
    /// Classification of one edge.
    pub fn stitch(&self, side: Side) -> EdgeStitch {
        self.stitches[side.index()]
    }

    /// Largest depth step across any edge of this patch.
    pub fn max_level_step(&self) -> u8 {
        self.stitches.iter().map(|s| s.levels()).max().unwrap_or(0)
    }
}
