//! Per-channel median flat-field normalization.
//!
//! For every channel, a per-pixel median across all field-of-view planes of
//! all tiles forms a median image. The scalar median of that image is the
//! global brightness reference; dividing the median image by it yields a
//! normalized reference, and every tile pixel is divided by the
//! corresponding reference pixel in place.
//!
//! Runs before any geometry or registration step. Channels are independent,
//! so reference construction and application parallelize with Rayon when the
//! `parallel` feature is enabled and the run is not in low-memory mode.
//! Mutation is irreversible; callers needing original pixel data must copy
//! beforehand.
use crate::config::{ResourceMode, StitchConfig};
use crate::error::StitchError;
use crate::raster::{PlaneF32, RasterDims, TileStack};
use crate::tile::Tile;
use log::info;
use std::time::Instant;

/// Normalize all tiles' pixel rasters against per-channel median references.
///
/// Every tile must share the same raster shape; a mismatch fails before any
/// pixel is touched. Tiles are opened eagerly here: normalization rewrites
/// pixel data, so the virtual-loading hint is never forwarded.
pub fn normalize_intensity(tiles: &mut [Tile], config: &StitchConfig) -> Result<(), StitchError> {
    let t0 = Instant::now();

    let mut expected: Option<RasterDims> = None;
    for tile in tiles.iter_mut() {
        let index = tile.index;
        let dims = tile.open(false)?.dims();
        match expected {
            None => expected = Some(dims),
            Some(e) if e != dims => {
                return Err(StitchError::DimensionMismatch {
                    index,
                    expected: e,
                    found: dims,
                })
            }
            Some(_) => {}
        }
    }
    let Some(dims) = expected else {
        return Ok(());
    };

    let parallel = config.resource_mode == ResourceMode::HighThroughput;

    let references = {
        let stacks: Vec<&TileStack> = tiles.iter().filter_map(Tile::raster).collect();
        build_references(&stacks, dims, parallel)
    };
    apply_references(tiles, &references, parallel);

    info!(
        "normalized {} tiles x {} channels x {} fovs in {:.1} ms",
        tiles.len(),
        dims.channels,
        dims.fovs,
        t0.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}

fn build_references(stacks: &[&TileStack], dims: RasterDims, parallel: bool) -> Vec<PlaneF32> {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return (0..dims.channels)
                .into_par_iter()
                .map(|channel| channel_reference(stacks, dims, channel))
                .collect();
        }
    }

    (0..dims.channels)
        .map(|channel| channel_reference(stacks, dims, channel))
        .collect()
}

/// Normalized reference image for one channel: per-pixel median over all
/// FOV planes of all tiles, rescaled by the scalar median of the result.
fn channel_reference(stacks: &[&TileStack], dims: RasterDims, channel: usize) -> PlaneF32 {
    let mut reference = PlaneF32::new(dims.width, dims.height);
    let mut samples = vec![0.0f32; stacks.len() * dims.fovs];

    for y in 0..dims.height {
        for x in 0..dims.width {
            let mut k = 0;
            for stack in stacks {
                for fov in 0..dims.fovs {
                    samples[k] = stack.plane(channel, fov).get(x, y);
                    k += 1;
                }
            }
            reference.set(x, y, median(&mut samples));
        }
    }

    let mut flattened = reference.data.clone();
    let global = median(&mut flattened);
    if global != 0.0 {
        for v in reference.data.iter_mut() {
            *v /= global;
        }
    }
    reference
}

fn apply_references(tiles: &mut [Tile], references: &[PlaneF32], parallel: bool) {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            tiles
                .par_iter_mut()
                .for_each(|tile| apply_to_tile(tile, references));
            return;
        }
    }

    for tile in tiles.iter_mut() {
        apply_to_tile(tile, references);
    }
}

fn apply_to_tile(tile: &mut Tile, references: &[PlaneF32]) {
    let Some(stack) = tile.raster_mut() else {
        return;
    };
    let fovs = stack.fovs();
    for fov in 0..fovs {
        for (channel, reference) in references.iter().enumerate() {
            let plane = stack.plane_mut(channel, fov);
            for (v, &r) in plane.data.iter_mut().zip(reference.data.iter()) {
                // A zero reference pixel would blow up the quotient; leave
                // the pixel as-is instead.
                if r != 0.0 {
                    *v /= r;
                }
            }
        }
    }
}

/// Median of a sample; even-length samples average the two middle elements.
fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[middle - 1] + values[middle]) / 2.0
    } else {
        values[middle]
    }
}
