#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod overlap;
pub mod raster;
pub mod registration;
pub mod schedule;
pub mod stitch;
pub mod tile;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: orchestration + run configuration.
pub use crate::config::{Dimensionality, PairingMode, ResourceMode, StitchConfig};
pub use crate::stitch::{stitch_collection, stitch_collection_with_report};

// Run results and the failure taxonomy.
pub use crate::error::StitchError;
pub use crate::types::{PlacementModel, StitchReport, TilePlacement};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use mosaic_stitcher::prelude::*;
/// use mosaic_stitcher::raster::{MemoryRasterSource, TileStack};
///
/// # fn demo(registration: &dyn PairwiseRegistration, optimizer: &dyn GlobalOptimizer) {
/// let stack = TileStack::new(256, 256, 1, 1);
/// let mut tiles = vec![
///     Tile::new_2d(0, [0.0, 0.0], [256.0, 256.0],
///         Box::new(MemoryRasterSource::new(stack.clone()))),
///     Tile::new_2d(1, [200.0, 0.0], [256.0, 256.0],
///         Box::new(MemoryRasterSource::new(stack))),
/// ];
/// let result = stitch_collection(&mut tiles, &StitchConfig::default(), registration, optimizer);
/// println!("placements: {:?}", result.map(|p| p.len()));
/// # }
/// ```
pub mod prelude {
    pub use crate::registration::{GlobalOptimizer, PairwiseRegistration};
    pub use crate::tile::Tile;
    pub use crate::{stitch_collection, StitchConfig, StitchError, TilePlacement};
}
