//! Crack-free terrain level of detail: a distance-driven quadtree with
//! greater-or-equal neighbor resolution for edge stitching.

mod config;
mod error;
mod node;
mod quadrant;
mod stitch;
mod surface;
mod transform;
mod tree;

pub use config::LodConfig;
pub use error::LodError;
pub use node::{NodeId, QuadNode};
pub use quadrant::{Crossing, Quadrant, Side};
pub use stitch::{EdgeStitch, PatchDescriptor, StitchMask};
pub use surface::TerrainSurface;
pub use transform::TerrainTransform;
pub use tree::{MAX_DEPTH, QuadTree, RealignStats};
