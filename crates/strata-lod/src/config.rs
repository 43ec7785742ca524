//! Per-depth split distances for the terrain quadtree.

/// Distance thresholds that drive quadtree subdivision.
///
/// `ranges[d]` is the planar distance under which a node at depth `d`
/// splits into its four children. The number of ranges is the maximum
/// depth of the tree; nodes at that depth are never split.
#[derive(Clone, Debug, PartialEq)]
pub struct LodConfig {
    ranges: Vec<f64>,
    /// Terrain-local edge length of the root node's footprint.
    pub scale: f64,
}

impl LodConfig {
    /// Create a config from split distances (coarsest depth first) and the
    /// root footprint size.
    ///
    /// Ranges are taken as given: no sorting, clamping or validation.
    pub fn new(ranges: Vec<f64>, scale: f64) -> Self {
        Self { ranges, scale }
    }

    /// Six levels halving from 1024 over a 2048 unit root.
    pub fn default_terrain() -> Self {
        Self::new(vec![1024.0, 512.0, 256.0, 128.0, 64.0, 32.0], 2048.0)
    }

    /// Build ranges that halve at every depth, starting from `first`.
    pub fn halving(first: f64, levels: usize, scale: f64) -> Self {
        let ranges = (0..levels).map(|d| first / (1u64 << d) as f64).collect();
        Self::new(ranges, scale)
    }

    /// Maximum tree depth (number of ranges).
    pub fn max_depth(&self) -> usize {
        self.ranges.len()
    }

    /// The split distances, indexed by depth.
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Split distance for `depth`, or `None` at and beyond the bottom.
    pub fn range(&self, depth: usize) -> Option<f64> {
        self.ranges.get(depth).copied()
    }

    /// Squared split distance for `depth`, compared against squared
    /// planar distances during realignment.
    pub fn range_squared(&self, depth: usize) -> Option<f64> {
        self.range(depth).map(|r| r * r)
    }

    /// Whether each depth's capture radius is smaller than the previous.
    ///
    /// Ascending ranges still produce a valid frontier, just with LOD
    /// boundaries in odd places.
    pub fn is_monotonic(&self) -> bool {
        self.ranges.windows(2).all(|w| w[1] < w[0])
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self::default_terrain()
    }
}
