//! Error taxonomy for a stitching run.
//!
//! Every variant is fatal to the run: the global solver needs a connected,
//! complete edge set, so there is no per-tile graceful degradation. Failures
//! are always surfaced as a structured error, never as an empty success.
use crate::raster::RasterDims;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StitchError {
    /// A tile's pixel data could not be made available. Raised before any
    /// compare pair is built; no partial overlap graph survives.
    #[error("tile {index}: failed to open pixel data: {reason}")]
    TileLoad { index: usize, reason: String },

    /// Tiles disagree on raster width/height or channel/slice counts.
    /// Detected before normalization mutates anything.
    #[error("tile {index}: raster dimensions {found} do not match {expected}")]
    DimensionMismatch {
        index: usize,
        expected: RasterDims,
        found: RasterDims,
    },

    /// The pairwise collaborator produced no result for some pair.
    #[error("pairwise registration failed for tiles {tile_a} and {tile_b}")]
    RegistrationFailure { tile_a: usize, tile_b: usize },

    /// Overlap-graph construction yielded zero pairs.
    #[error("approximate layout has no overlaps")]
    NoOverlapFound,

    /// The global optimizer rejected the pairwise estimates.
    #[error("global optimization failed: {0}")]
    GlobalOptimization(String),

    /// Config file could not be read or parsed.
    #[error("config: {0}")]
    Config(String),
}
