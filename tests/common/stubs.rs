use mosaic_stitcher::config::StitchConfig;
use mosaic_stitcher::geometry::Roi;
use mosaic_stitcher::overlap::OverlapSet;
use mosaic_stitcher::raster::TileStack;
use mosaic_stitcher::registration::{GlobalOptimizer, PairwiseRegistration, PairwiseResult};
use mosaic_stitcher::tile::Tile;
use mosaic_stitcher::{PlacementModel, TilePlacement};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Pairwise stub returning a fixed shift and correlation, counting calls.
pub struct FixedShiftStub {
    pub offset: [f32; 3],
    pub cross_correlation: f32,
    pub calls: AtomicUsize,
}

impl FixedShiftStub {
    pub fn new(offset: [f32; 3], cross_correlation: f32) -> Self {
        Self {
            offset,
            cross_correlation,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PairwiseRegistration for FixedShiftStub {
    fn stitch_pairwise(
        &self,
        _a: &TileStack,
        _b: &TileStack,
        _roi_a: &Roi,
        _roi_b: &Roi,
        _time_a: i32,
        _time_b: i32,
        _config: &StitchConfig,
    ) -> Option<PairwiseResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(PairwiseResult {
            offset: self.offset,
            cross_correlation: self.cross_correlation,
        })
    }
}

/// One observed edge of the overlap graph as handed to the optimizer.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedPair {
    pub tile_a: usize,
    pub tile_b: usize,
    pub relative_shift: [f32; 3],
    pub cross_correlation: f32,
}

/// Optimizer stub that records the edge set it receives and seeds each
/// placement from the tile's input offset.
#[derive(Default)]
pub struct CapturingOptimizer {
    pub seen_pairs: Mutex<Vec<CapturedPair>>,
    pub seen_reference: Mutex<Option<usize>>,
}

impl GlobalOptimizer for CapturingOptimizer {
    fn optimize(
        &self,
        pairs: &OverlapSet,
        tiles: &[Tile],
        reference: usize,
        config: &StitchConfig,
    ) -> Result<Vec<TilePlacement>, String> {
        let mut seen = self.seen_pairs.lock().unwrap();
        for pair in pairs {
            let shift = pair
                .relative_shift
                .ok_or_else(|| format!("pair ({}, {}) has no shift", pair.tile_a, pair.tile_b))?;
            seen.push(CapturedPair {
                tile_a: pair.tile_a,
                tile_b: pair.tile_b,
                relative_shift: shift,
                cross_correlation: pair.cross_correlation,
            });
        }
        *self.seen_reference.lock().unwrap() = Some(reference);

        Ok(tiles
            .iter()
            .map(|t| TilePlacement {
                index: t.index,
                time_point: t.time_point,
                model: PlacementModel::from_offset(t.offset, config.dimensionality),
            })
            .collect())
    }
}

/// Optimizer that must never run.
pub struct NeverOptimizer;

impl GlobalOptimizer for NeverOptimizer {
    fn optimize(
        &self,
        _pairs: &OverlapSet,
        _tiles: &[Tile],
        _reference: usize,
        _config: &StitchConfig,
    ) -> Result<Vec<TilePlacement>, String> {
        panic!("optimizer must not be invoked in this scenario");
    }
}
