//! Terrain surface: owns the quadtree, its LOD config and its placement in
//! the world.

use glam::DVec3;
use tracing::{debug, trace, warn};

use crate::{
    EdgeStitch, LodConfig, LodError, NodeId, PatchDescriptor, QuadNode, QuadTree, RealignStats,
    Side, StitchMask, TerrainTransform,
};

/// A quadtree-subdivided terrain square placed in the world.
///
/// Call [`TerrainSurface::realign`] once per frame with the viewer
/// position, then read [`TerrainSurface::patches`] (or walk the tree from
/// [`TerrainSurface::root`]) to issue draws.
#[derive(Clone, Debug)]
pub struct TerrainSurface {
    config: LodConfig,
    transform: TerrainTransform,
    tree: QuadTree,
}

impl TerrainSurface {
    /// Build the full quadtree for `config`.
    pub fn new(config: LodConfig, transform: TerrainTransform) -> Result<Self, LodError> {
        let tree = QuadTree::new(config.max_depth())?;
        if !config.is_monotonic() {
            warn!(ranges = ?config.ranges(), "LOD ranges do not shrink with depth");
        }
        debug!(
            max_depth = config.max_depth(),
            nodes = tree.node_count(),
            scale = config.scale,
            "Built terrain quadtree"
        );
        Ok(Self {
            config,
            transform,
            tree,
        })
    }

    /// Current LOD config.
    pub fn lod_config(&self) -> &LodConfig {
        &self.config
    }

    /// Replace the LOD config.
    ///
    /// The tree is rebuilt only when the number of levels changes; new
    /// ranges and scale take effect at the next realignment. A rebuilt
    /// tree starts with a single root leaf.
    pub fn set_lod_config(&mut self, config: LodConfig) -> Result<(), LodError> {
        if config.max_depth() != self.tree.max_depth() as usize {
            self.tree = QuadTree::new(config.max_depth())?;
            debug!(
                max_depth = config.max_depth(),
                nodes = self.tree.node_count(),
                "Rebuilt terrain quadtree for new LOD depth"
            );
        }
        if !config.is_monotonic() {
            warn!(ranges = ?config.ranges(), "LOD ranges do not shrink with depth");
        }
        self.config = config;
        Ok(())
    }

    /// World placement.
    pub fn transform(&self) -> &TerrainTransform {
        &self.transform
    }

    /// Move or rescale the terrain. Takes effect at the next realignment.
    pub fn set_transform(&mut self, transform: TerrainTransform) {
        self.transform = transform;
    }

    /// The underlying tree.
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Root node, for renderers that walk the tree themselves.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Access a node.
    pub fn node(&self, id: NodeId) -> &QuadNode {
        self.tree.node(id)
    }

    /// Re-select the active leaves for a viewer at `viewer` (world space).
    pub fn realign(&mut self, viewer: DVec3) -> RealignStats {
        let stats = self.tree.align_to(viewer, &self.config, &self.transform);
        trace!(
            visited = stats.visited,
            splits = stats.splits,
            leaves = stats.leaves,
            deepest = stats.deepest,
            "Realigned terrain"
        );
        stats
    }

    /// Active leaves from the last realignment.
    pub fn active_leaves(&self) -> &[NodeId] {
        self.tree.active_leaves()
    }

    /// Same-depth-or-coarser neighbor across `side`.
    pub fn neighbor(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.tree.neighbor(id, side)
    }

    /// World position of the node's lower corner and its world edge length.
    pub fn world_footprint(&self, id: NodeId) -> (DVec3, f64) {
        let node = self.tree.node(id);
        (
            self.transform.to_world(node.position(), self.config.scale),
            self.transform.world_size(node.size(), self.config.scale),
        )
    }

    /// Active leaf whose footprint holds the world point's XZ projection.
    pub fn find_leaf(&self, world: DVec3) -> Option<NodeId> {
        let local = self.transform.to_local(world, self.config.scale)?;
        self.tree.find_leaf(local)
    }

    /// Describe one node for drawing: placement plus per-edge stitching.
    pub fn patch(&self, id: NodeId) -> PatchDescriptor {
        let node = self.tree.node(id);
        let neighbors = self.tree.neighbors(id);
        let stitches = neighbors.map(|neighbor| EdgeStitch::classify(&self.tree, id, neighbor));
        let (world_origin, world_size) = self.world_footprint(id);
        PatchDescriptor {
            node: id,
            position: node.position(),
            size: node.size(),
            depth: node.depth(),
            world_origin,
            world_size,
            neighbors,
            stitches,
            mask: StitchMask::from_stitches(&stitches),
        }
    }

    /// Patch descriptors for every active leaf, in frontier order.
    pub fn patches(&self) -> Vec<PatchDescriptor> {
        self.tree
            .active_leaves()
            .iter()
            .map(|&id| self.patch(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> TerrainSurface {
        TerrainSurface::new(
            LodConfig::new(vec![100.0, 50.0], 200.0),
            TerrainTransform::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_surface_has_single_root_patch() {
        let surface = surface();
        let patches = surface.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].node, surface.root());
        assert_eq!(patches[0].stitches, [EdgeStitch::Boundary; 4]);
        assert_eq!(patches[0].world_size, 200.0);
    }

    #[test]
    fn test_transform_moves_split_region() {
        let mut surface = surface();
        surface.set_transform(TerrainTransform::new(DVec3::new(1000.0, 0.0, 1000.0), 1.0));
        // The old center is now far from the terrain.
        surface.realign(DVec3::new(100.0, 0.0, 100.0));
        assert_eq!(surface.active_leaves().len(), 1);

        surface.realign(DVec3::new(1100.0, 0.0, 1100.0));
        assert!(surface.active_leaves().len() > 1);
    }

    #[test]
    fn test_world_scale_multiplies_footprint() {
        let surface = TerrainSurface::new(
            LodConfig::new(vec![100.0], 200.0),
            TerrainTransform::new(DVec3::new(0.0, 7.0, 0.0), 2.0),
        )
        .unwrap();
        let child = surface.tree().children(surface.root()).unwrap()[3];
        let (origin, size) = surface.world_footprint(child);
        assert_eq!(origin, DVec3::new(200.0, 7.0, 200.0));
        assert_eq!(size, 200.0);
    }

    #[test]
    fn test_set_lod_config_rebuilds_on_depth_change() {
        let mut surface = surface();
        surface.realign(DVec3::new(50.0, 0.0, 50.0));
        assert_eq!(surface.tree().max_depth(), 2);

        surface
            .set_lod_config(LodConfig::new(vec![100.0, 50.0, 25.0], 200.0))
            .unwrap();
        assert_eq!(surface.tree().max_depth(), 3);
        assert_eq!(surface.tree().node_count(), 85);
        assert_eq!(surface.active_leaves(), &[NodeId::ROOT]);
    }

    #[test]
    fn test_set_lod_config_keeps_tree_for_same_depth() {
        let mut surface = surface();
        surface.realign(DVec3::new(50.0, 0.0, 50.0));
        let before = surface.active_leaves().len();

        surface
            .set_lod_config(LodConfig::new(vec![10.0, 5.0], 200.0))
            .unwrap();
        assert_eq!(surface.active_leaves().len(), before);

        surface.realign(DVec3::new(50.0, 0.0, 50.0));
        // Root center is ~70.7 away, beyond the new 10 unit range.
        assert_eq!(surface.active_leaves().len(), 1);
    }

    #[test]
    fn test_set_lod_config_rejects_deep_tree() {
        let mut surface = surface();
        let err = surface
            .set_lod_config(LodConfig::halving(1000.0, 20, 200.0))
            .unwrap_err();
        assert!(matches!(err, LodError::DepthTooLarge { depth: 20, .. }));
        assert_eq!(surface.lod_config().max_depth(), 2);
    }

    #[test]
    fn test_find_leaf_world() {
        let mut surface = surface();
        surface.realign(DVec3::new(50.0, 0.0, 50.0));
        let leaf = surface.find_leaf(DVec3::new(10.0, 3.0, 10.0)).unwrap();
        assert_eq!(surface.node(leaf).depth(), 2);
        let far = surface.find_leaf(DVec3::new(190.0, 0.0, 190.0)).unwrap();
        assert_eq!(surface.node(far).depth(), 1);
        assert_eq!(surface.find_leaf(DVec3::new(-1.0, 0.0, 10.0)), None);
    }
}
