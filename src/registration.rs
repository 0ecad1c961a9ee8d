//! Contracts for the external registration collaborators.
//!
//! The crate orchestrates stitching but does not implement pixel-level
//! matching or the global position solver; both plug in through the traits
//! here.
use crate::config::StitchConfig;
use crate::geometry::Roi;
use crate::overlap::OverlapSet;
use crate::raster::TileStack;
use crate::tile::Tile;
use crate::types::TilePlacement;

/// Result of registering one tile pair.
#[derive(Clone, Copy, Debug)]
pub struct PairwiseResult {
    /// Relative shift of the second tile against the first. Only the
    /// configured number of components is read.
    pub offset: [f32; 3],
    /// Scalar correlation confidence of the match.
    pub cross_correlation: f32,
}

/// Pixel-level pairwise registration (e.g. phase-correlation peak search).
///
/// The ROIs restrict the correlation search to the geometrically plausible
/// overlap band of each raster. Precondition: an ROI carrying the
/// no-overlap sentinel ([`crate::geometry::NO_OVERLAP`]) only reaches an
/// implementation when pairing is sequential; implementations must treat it
/// as "search the whole raster". Returning `None` signals unrecoverable
/// failure for the pair and aborts the run.
pub trait PairwiseRegistration: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn stitch_pairwise(
        &self,
        a: &TileStack,
        b: &TileStack,
        roi_a: &Roi,
        roi_b: &Roi,
        time_a: i32,
        time_b: i32,
        config: &StitchConfig,
    ) -> Option<PairwiseResult>;
}

/// Global position solver reconciling all pairwise estimates into one
/// consistent placement per tile.
///
/// Must accept the edge set in any order. `reference` indexes the tile whose
/// initial model anchors the mosaic frame. Implementations may return
/// placements in any order; callers sort by tile index when they need the
/// input ordering.
pub trait GlobalOptimizer {
    fn optimize(
        &self,
        pairs: &OverlapSet,
        tiles: &[Tile],
        reference: usize,
        config: &StitchConfig,
    ) -> Result<Vec<TilePlacement>, String>;
}
