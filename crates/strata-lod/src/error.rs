//! Terrain LOD error types.

/// Errors raised while building a terrain quadtree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LodError {
    /// The config asks for more levels than the node arena can hold.
    #[error("lod config has {depth} levels, at most {max} are supported")]
    DepthTooLarge {
        /// Number of ranges in the rejected config.
        depth: usize,
        /// Deepest supported tree.
        max: usize,
    },
}
