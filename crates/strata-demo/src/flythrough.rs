//! Headless flythrough: move a viewer across the terrain and summarize
//! the patches a renderer would draw each frame.

use std::collections::BTreeSet;

use glam::DVec3;
use strata_config::{FlythroughConfig, TerrainConfig};
use strata_lod::{LodConfig, LodError, RealignStats, TerrainSurface, TerrainTransform};
use tracing::info;

/// What one frame would submit for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSummary {
    pub frame: u32,
    pub viewer: DVec3,
    pub stats: RealignStats,
    /// Active patches per depth, index = depth.
    pub patches_per_depth: Vec<usize>,
    /// Patch edges that face a coarser neighbor.
    pub coarse_edges: usize,
    /// Largest depth step across any patch edge.
    pub max_level_step: u8,
    /// Distinct stitch mask variants in use.
    pub stitch_variants: usize,
}

/// Aggregate over the whole flythrough.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlythroughReport {
    pub frames: u32,
    pub min_leaves: usize,
    pub max_leaves: usize,
    pub total_splits: usize,
    pub max_level_step: u8,
    pub frames_over_two_to_one: u32,
}

/// Build the terrain described by the config.
pub fn build_surface(terrain: &TerrainConfig) -> Result<TerrainSurface, LodError> {
    let [x, y, z] = terrain.offset;
    TerrainSurface::new(
        LodConfig::new(terrain.lod_ranges.clone(), terrain.scale),
        TerrainTransform::new(DVec3::new(x, y, z), terrain.world_scale),
    )
}

/// Viewer position at `frame`, moving linearly from start to end.
pub fn viewer_at(fly: &FlythroughConfig, frame: u32) -> DVec3 {
    let start = DVec3::from_array(fly.start);
    let end = DVec3::from_array(fly.end);
    if fly.frames <= 1 {
        return start;
    }
    let t = f64::from(frame.min(fly.frames - 1)) / f64::from(fly.frames - 1);
    start.lerp(end, t)
}

/// Summarize the surface after a realignment.
pub fn summarize(
    surface: &TerrainSurface,
    frame: u32,
    viewer: DVec3,
    stats: RealignStats,
) -> FrameSummary {
    let patches = surface.patches();
    let mut patches_per_depth = vec![0; surface.tree().max_depth() as usize + 1];
    let mut coarse_edges = 0;
    let mut max_level_step = 0;
    let mut variants = BTreeSet::new();

    for patch in &patches {
        patches_per_depth[patch.depth as usize] += 1;
        coarse_edges += patch.mask.count() as usize;
        max_level_step = max_level_step.max(patch.max_level_step());
        variants.insert(patch.mask.bits());
    }

    FrameSummary {
        frame,
        viewer,
        stats,
        patches_per_depth,
        coarse_edges,
        max_level_step,
        stitch_variants: variants.len(),
    }
}

/// Run the flythrough, logging a summary every `report_every` frames.
pub fn run(surface: &mut TerrainSurface, fly: &FlythroughConfig) -> FlythroughReport {
    let mut report = FlythroughReport {
        min_leaves: usize::MAX,
        ..Default::default()
    };

    for frame in 0..fly.frames {
        let viewer = viewer_at(fly, frame);
        let stats = surface.realign(viewer);
        let summary = summarize(surface, frame, viewer, stats);

        report.frames += 1;
        report.min_leaves = report.min_leaves.min(stats.leaves);
        report.max_leaves = report.max_leaves.max(stats.leaves);
        report.total_splits += stats.splits;
        report.max_level_step = report.max_level_step.max(summary.max_level_step);
        if summary.max_level_step > 1 {
            report.frames_over_two_to_one += 1;
        }

        if fly.report_every > 0 && frame % fly.report_every == 0 {
            info!(
                frame = summary.frame,
                viewer = ?summary.viewer,
                leaves = summary.stats.leaves,
                deepest = summary.stats.deepest,
                per_depth = ?summary.patches_per_depth,
                coarse_edges = summary.coarse_edges,
                variants = summary.stitch_variants,
                "Frame"
            );
        }
    }

    if report.frames == 0 {
        report.min_leaves = 0;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_terrain() -> TerrainConfig {
        TerrainConfig {
            lod_ranges: vec![100.0, 50.0],
            scale: 200.0,
            offset: [0.0; 3],
            world_scale: 1.0,
        }
    }

    #[test]
    fn test_viewer_path_endpoints() {
        let fly = FlythroughConfig {
            frames: 5,
            start: [0.0, 1.0, 0.0],
            end: [40.0, 1.0, 80.0],
            report_every: 0,
        };
        assert_eq!(viewer_at(&fly, 0), DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(viewer_at(&fly, 2), DVec3::new(20.0, 1.0, 40.0));
        assert_eq!(viewer_at(&fly, 4), DVec3::new(40.0, 1.0, 80.0));
        assert_eq!(viewer_at(&fly, 99), DVec3::new(40.0, 1.0, 80.0));
    }

    #[test]
    fn test_single_frame_stays_at_start() {
        let fly = FlythroughConfig {
            frames: 1,
            start: [3.0, 0.0, 4.0],
            end: [100.0, 0.0, 100.0],
            report_every: 0,
        };
        assert_eq!(viewer_at(&fly, 0), DVec3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn test_summary_counts_patches() {
        let mut surface = build_surface(&small_terrain()).unwrap();
        let viewer = DVec3::new(50.0, 0.0, 50.0);
        let stats = surface.realign(viewer);
        let summary = summarize(&surface, 0, viewer, stats);
        assert_eq!(summary.patches_per_depth, vec![0, 3, 4]);
        // Two depth-2 patches face the coarse right sibling, two the top one.
        assert_eq!(summary.coarse_edges, 4);
        assert_eq!(summary.max_level_step, 1);
    }

    #[test]
    fn test_run_reports_leaf_range() {
        let mut surface = build_surface(&small_terrain()).unwrap();
        let fly = FlythroughConfig {
            frames: 20,
            start: [-500.0, 0.0, 50.0],
            end: [50.0, 0.0, 50.0],
            report_every: 0,
        };
        let report = run(&mut surface, &fly);
        assert_eq!(report.frames, 20);
        assert_eq!(report.min_leaves, 1);
        assert_eq!(report.max_leaves, 7);
        assert_eq!(report.max_level_step, 1);
    }

    #[test]
    fn test_empty_run() {
        let mut surface = build_surface(&small_terrain()).unwrap();
        let fly = FlythroughConfig {
            frames: 0,
            ..Default::default()
        };
        assert_eq!(run(&mut surface, &fly), FlythroughReport::default());
    }
}
