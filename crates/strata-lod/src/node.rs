//! A single cell of the terrain quadtree.

use glam::DVec2;

use crate::Quadrant;

/// Index of a node inside a [`QuadTree`](crate::QuadTree) arena.
///
/// Nodes are stored in heap order: the root is 0 and the children of node
/// `i` occupy `4i + 1 ..= 4i + 4` in [`Quadrant::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        NodeId(index as u32)
    }

    /// Parent slot, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<NodeId> {
        (self.0 > 0).then(|| NodeId((self.0 - 1) / 4))
    }

    /// Slot of the child in `quadrant`. Only meaningful if this node is not
    /// at the bottom of its tree.
    #[must_use]
    pub fn child(self, quadrant: Quadrant) -> NodeId {
        NodeId(self.0 * 4 + 1 + quadrant as u32)
    }

    /// Which quadrant of its parent this node fills, `None` for the root.
    #[must_use]
    pub fn quadrant(self) -> Option<Quadrant> {
        (self.0 > 0).then(|| Quadrant::from_index((self.0 as usize - 1) % 4))
    }
}

/// One square cell of the terrain, in normalized terrain space.
///
/// The root covers `[0, 1]²`. Parent and children are implicit in the
/// node's [`NodeId`].
#[derive(Clone, Debug, PartialEq)]
pub struct QuadNode {
    pub(crate) position: DVec2,
    pub(crate) center: DVec2,
    pub(crate) size: f64,
    pub(crate) depth: u8,
    pub(crate) direction: Option<Quadrant>,
    pub(crate) is_leaf: bool,
    pub(crate) is_bottom_of_tree: bool,
}

impl QuadNode {
    pub(crate) fn new(
        position: DVec2,
        size: f64,
        depth: u8,
        direction: Option<Quadrant>,
        max_depth: u8,
    ) -> Self {
        Self {
            position,
            center: position + DVec2::splat(size * 0.5),
            size,
            depth,
            direction,
            is_leaf: true,
            is_bottom_of_tree: depth >= max_depth,
        }
    }

    /// Lower corner of the footprint.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Center of the footprint.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Edge length of the footprint.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Distance from the root, in generations.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Quadrant within the parent; `None` at the root.
    pub fn direction(&self) -> Option<Quadrant> {
        self.direction
    }

    /// Whether this node was the coarsest selected node on its branch at
    /// the last realignment. Flags below a leaf are stale.
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Whether this node sits at the maximum depth and has no children.
    pub fn is_bottom_of_tree(&self) -> bool {
        self.is_bottom_of_tree
    }

    /// Whether the point lies inside this footprint (lower edges inclusive).
    pub fn contains(&self, point: DVec2) -> bool {
        let max = self.position + DVec2::splat(self.size);
        point.cmpge(self.position).all() && point.cmplt(max).all()
    }

    /// Child of this node whose footprint holds `point`.
    pub(crate) fn quadrant_of(&self, point: DVec2) -> Quadrant {
        match (point.x >= self.center.x, point.y >= self.center.y) {
            (false, false) => Quadrant::BottomLeft,
            (true, false) => Quadrant::BottomRight,
            (false, true) => Quadrant::TopLeft,
            (true, true) => Quadrant::TopRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_family_arithmetic() {
        let root = NodeId::ROOT;
        assert_eq!(root.parent(), None);
        assert_eq!(root.quadrant(), None);

        for q in Quadrant::ALL {
            let child = root.child(q);
            assert_eq!(child.parent(), Some(root));
            assert_eq!(child.quadrant(), Some(q));

            let grandchild = child.child(Quadrant::TopRight);
            assert_eq!(grandchild.parent(), Some(child));
            assert_eq!(grandchild.quadrant(), Some(Quadrant::TopRight));
        }
    }

    #[test]
    fn test_center_is_precomputed() {
        let node = QuadNode::new(DVec2::new(0.5, 0.25), 0.25, 2, Some(Quadrant::BottomRight), 4);
        assert_eq!(node.center(), DVec2::new(0.625, 0.375));
        assert!(!node.is_bottom_of_tree());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_bottom_flag_at_max_depth() {
        let node = QuadNode::new(DVec2::ZERO, 0.25, 2, Some(Quadrant::TopLeft), 2);
        assert!(node.is_bottom_of_tree());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_contains_is_half_open() {
        let node = QuadNode::new(DVec2::ZERO, 1.0, 0, None, 1);
        assert!(node.contains(DVec2::ZERO));
        assert!(node.contains(DVec2::new(0.999, 0.5)));
        assert!(!node.contains(DVec2::new(1.0, 0.5)));
        assert!(!node.contains(DVec2::new(-0.001, 0.5)));
    }

    #[test]
    fn test_quadrant_of_point() {
        let node = QuadNode::new(DVec2::ZERO, 1.0, 0, None, 1);
        assert_eq!(node.quadrant_of(DVec2::new(0.1, 0.1)), Quadrant::BottomLeft);
        assert_eq!(node.quadrant_of(DVec2::new(0.9, 0.1)), Quadrant::BottomRight);
        assert_eq!(node.quadrant_of(DVec2::new(0.1, 0.9)), Quadrant::TopLeft);
        assert_eq!(node.quadrant_of(DVec2::new(0.5, 0.5)), Quadrant::TopRight);
    }
}
