//! Overlap-graph construction: which tile pairs are worth registering.
use crate::config::{PairingMode, StitchConfig};
use crate::error::StitchError;
use crate::tile::Tile;
use log::{debug, info};

/// One edge of the overlap graph: an unordered pair of tiles (stored as
/// indices into the caller's tile slice, so a pair never owns its tiles)
/// plus the registration result once a worker has processed it.
#[derive(Clone, Debug)]
pub struct ComparePair {
    pub tile_a: usize,
    pub tile_b: usize,
    /// Relative shift of `tile_b` against `tile_a`; populated by the
    /// registration scheduler. Only the configured number of components is
    /// meaningful.
    pub relative_shift: Option<[f32; 3]>,
    pub cross_correlation: f32,
}

impl ComparePair {
    pub fn new(tile_a: usize, tile_b: usize) -> Self {
        Self {
            tile_a,
            tile_b,
            relative_shift: None,
            cross_correlation: 0.0,
        }
    }
}

/// Ordered collection of compare pairs, built once per stitching run.
/// Insertion order determines scheduling order only.
pub type OverlapSet = Vec<ComparePair>;

/// Build the overlap graph for a tile collection.
///
/// Every tile is opened first; a single failure aborts with no partial
/// graph. Sequential pairing connects each tile to its `range` successors in
/// the caller-supplied ordering. Exhaustive pairing (the default) tests all
/// unordered pairs with the inclusive bounding-box test; O(N²) in the tile
/// count, which is cheap next to the registration work downstream.
pub fn find_overlapping_tiles(
    tiles: &mut [Tile],
    config: &StitchConfig,
) -> Result<OverlapSet, StitchError> {
    for tile in tiles.iter_mut() {
        tile.open(config.virtual_loading)?;
    }

    let pairs = match config.pairing {
        PairingMode::Sequential { range } => sequential_pairs(tiles.len(), range),
        PairingMode::Exhaustive => exhaustive_pairs(tiles, config.dimensionality.ncomponents()),
    };

    info!(
        "overlap graph: {} pairs over {} tiles ({:?})",
        pairs.len(),
        tiles.len(),
        config.pairing
    );
    Ok(pairs)
}

fn sequential_pairs(n: usize, range: usize) -> OverlapSet {
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in 1..=range {
            if i + j >= n {
                break;
            }
            pairs.push(ComparePair::new(i, i + j));
        }
    }
    pairs
}

fn exhaustive_pairs(tiles: &[Tile], dim: usize) -> OverlapSet {
    let mut pairs = Vec::new();
    for i in 0..tiles.len() {
        let box_i = tiles[i].aabb(dim);
        for (j, other) in tiles.iter().enumerate().skip(i + 1) {
            if box_i.overlaps(&other.aabb(dim)) {
                debug!("tiles {i} and {j} overlap");
                pairs.push(ComparePair::new(i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests;
