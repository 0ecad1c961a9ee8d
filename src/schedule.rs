//! Pairwise-registration scheduling across a fixed pool of worker threads.
//!
//! Pairs are statically partitioned by pair index modulo worker count, so
//! the assignment is deterministic for a given worker count and results are
//! reproducible run-to-run. Workers only read tile rasters and write nothing
//! shared; their per-pair results are merged after the single join barrier.
//! On collaborator failure every in-flight worker is drained first, then the
//! run fails as a whole.
use crate::config::StitchConfig;
use crate::error::StitchError;
use crate::geometry::roi_between;
use crate::overlap::OverlapSet;
use crate::raster::TileStack;
use crate::registration::{PairwiseRegistration, PairwiseResult};
use crate::tile::Tile;
use log::{error, info};
use std::time::Instant;

/// Register every pair in the overlap set, recording relative shift and
/// correlation on each. All tiles must already be opened.
pub fn register_pairs(
    tiles: &[Tile],
    pairs: &mut OverlapSet,
    registration: &dyn PairwiseRegistration,
    config: &StitchConfig,
) -> Result<(), StitchError> {
    if pairs.is_empty() {
        return Ok(());
    }
    let workers = config.resource_mode.worker_count().min(pairs.len());
    let dim = config.dimensionality.ncomponents();
    let t0 = Instant::now();

    let endpoints: Vec<(usize, usize)> = pairs.iter().map(|p| (p.tile_a, p.tile_b)).collect();

    let worker_outputs: Vec<Result<Vec<(usize, PairwiseResult)>, StitchError>> =
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let endpoints = &endpoints;
                    scope.spawn(move || {
                        run_worker(worker, workers, endpoints, tiles, registration, config, dim)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("registration worker panicked"))
                .collect()
        });

    // Every worker has joined; the first failure wins.
    let mut merged: Vec<(usize, PairwiseResult)> = Vec::with_capacity(endpoints.len());
    let mut failure: Option<StitchError> = None;
    for output in worker_outputs {
        match output {
            Ok(results) => merged.extend(results),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }
    if let Some(e) = failure {
        error!("collection registration failed: {e}");
        return Err(e);
    }

    for (i, result) in merged {
        let pair = &mut pairs[i];
        let mut shift = [0.0f32; 3];
        shift[..dim].copy_from_slice(&result.offset[..dim]);
        pair.relative_shift = Some(shift);
        pair.cross_correlation = result.cross_correlation;
    }

    info!(
        "registered {} pairs on {} workers in {:.1} ms",
        pairs.len(),
        workers,
        t0.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}

fn run_worker(
    worker: usize,
    workers: usize,
    endpoints: &[(usize, usize)],
    tiles: &[Tile],
    registration: &dyn PairwiseRegistration,
    config: &StitchConfig,
    dim: usize,
) -> Result<Vec<(usize, PairwiseResult)>, StitchError> {
    let mut out = Vec::new();
    for (i, &(a, b)) in endpoints.iter().enumerate() {
        if i % workers != worker {
            continue;
        }
        let start = Instant::now();
        let raster_a = opened_raster(&tiles[a])?;
        let raster_b = opened_raster(&tiles[b])?;
        let roi_a = roi_between(&tiles[a], &tiles[b], dim);
        let roi_b = roi_between(&tiles[b], &tiles[a], dim);

        let Some(result) = registration.stitch_pairwise(
            raster_a,
            raster_b,
            &roi_a,
            &roi_b,
            tiles[a].time_point,
            tiles[b].time_point,
            config,
        ) else {
            error!("pairwise registration failed for tiles {a} and {b}");
            return Err(StitchError::RegistrationFailure {
                tile_a: a,
                tile_b: b,
            });
        };

        info!(
            "tile {a}[{}] <- tile {b}[{}]: shift {:?} correlation (R)={:.4} ({:.1} ms)",
            tiles[a].time_point,
            tiles[b].time_point,
            &result.offset[..dim],
            result.cross_correlation,
            start.elapsed().as_secs_f64() * 1e3
        );
        out.push((i, result));
    }
    Ok(out)
}

fn opened_raster(tile: &Tile) -> Result<&TileStack, StitchError> {
    tile.raster().ok_or_else(|| StitchError::TileLoad {
        index: tile.index,
        reason: "tile raster not opened before registration".to_string(),
    })
}
