//! Top-level orchestration of a stitching run.
//!
//! Flow: optional intensity normalization, overlap-graph construction,
//! parallel pairwise registration, global assembly. When overlap computation
//! is disabled the caller's offsets are trusted verbatim and each tile's
//! placement model is seeded directly from them: same output shape, no
//! registration cost.
use crate::config::{PairingMode, StitchConfig};
use crate::error::StitchError;
use crate::normalize::normalize_intensity;
use crate::overlap::find_overlapping_tiles;
use crate::registration::{GlobalOptimizer, PairwiseRegistration};
use crate::schedule::register_pairs;
use crate::tile::Tile;
use crate::types::{PlacementModel, StitchReport, TilePlacement};
use log::{error, info};
use std::time::Instant;

/// Stitch a tile collection into globally consistent placements.
///
/// Tiles are supplied by the caller and outlive the run; their pixel rasters
/// are opened (and, with normalization enabled, mutated) along the way.
/// Fails as a whole on the first unopenable tile, dimension mismatch,
/// unresolvable pair, or an overlap-free layout.
pub fn stitch_collection(
    tiles: &mut [Tile],
    config: &StitchConfig,
    registration: &dyn PairwiseRegistration,
    optimizer: &dyn GlobalOptimizer,
) -> Result<Vec<TilePlacement>, StitchError> {
    stitch_collection_with_report(tiles, config, registration, optimizer)
        .map(|(placements, _)| placements)
}

/// Like [`stitch_collection`], additionally returning a run summary.
pub fn stitch_collection_with_report(
    tiles: &mut [Tile],
    config: &StitchConfig,
    registration: &dyn PairwiseRegistration,
    optimizer: &dyn GlobalOptimizer,
) -> Result<(Vec<TilePlacement>, StitchReport), StitchError> {
    let t0 = Instant::now();

    if config.normalize_intensity {
        normalize_intensity(tiles, config)?;
    }

    let mut pair_count = 0;
    let mut registration_ms = 0.0;
    let mut optimize_ms = 0.0;

    let placements = if config.compute_overlap {
        let mut pairs = find_overlapping_tiles(tiles, config)?;
        if pairs.is_empty() {
            error!("no overlapping tiles could be found given the approximate layout");
            return Err(StitchError::NoOverlapFound);
        }
        pair_count = pairs.len();

        let t_reg = Instant::now();
        register_pairs(tiles, &mut pairs, registration, config)?;
        registration_ms = t_reg.elapsed().as_secs_f64() * 1e3;

        // Anchor the mosaic frame at the first pair's first tile.
        let reference = pairs[0].tile_a;
        let t_opt = Instant::now();
        let placements = optimizer
            .optimize(&pairs, tiles, reference, config)
            .map_err(StitchError::GlobalOptimization)?;
        optimize_ms = t_opt.elapsed().as_secs_f64() * 1e3;
        placements
    } else {
        // Trust the input offsets: every tile gets a translation model built
        // straight from its caller-supplied position.
        let mut placements = Vec::with_capacity(tiles.len());
        for tile in tiles.iter_mut() {
            tile.open(config.virtual_loading)?;
            placements.push(TilePlacement {
                index: tile.index,
                time_point: tile.time_point,
                model: PlacementModel::from_offset(tile.offset, config.dimensionality),
            });
        }
        placements
    };

    let total_ms = t0.elapsed().as_secs_f64() * 1e3;
    info!(
        "finished stitching {} tiles ({} pairs) in {:.1} ms",
        tiles.len(),
        pair_count,
        total_ms
    );

    let report = StitchReport {
        tiles: tiles.len(),
        pairs: pair_count,
        normalized: config.normalize_intensity,
        pairing: match config.pairing {
            PairingMode::Exhaustive => "exhaustive".to_string(),
            PairingMode::Sequential { range } => format!("sequential (range {range})"),
        },
        registration_ms,
        optimize_ms,
        total_ms,
    };
    Ok((placements, report))
}
