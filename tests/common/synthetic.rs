use mosaic_stitcher::raster::{MemoryRasterSource, TileStack};
use mosaic_stitcher::tile::Tile;

/// 2-D tile backed by a flat-valued in-memory raster.
pub fn flat_tile(index: usize, offset: [f32; 2], size: [f32; 2], value: f32) -> Tile {
    let w = size[0] as usize;
    let h = size[1] as usize;
    let mut stack = TileStack::new(w, h, 1, 1);
    for v in stack.plane_mut(0, 0).as_mut_slice() {
        *v = value;
    }
    Tile::new_2d(index, offset, size, Box::new(MemoryRasterSource::new(stack)))
}

/// `n` 100x100 tiles in a horizontal line with the given x step.
pub fn tile_line(n: usize, step: f32) -> Vec<Tile> {
    (0..n)
        .map(|i| flat_tile(i, [i as f32 * step, 0.0], [100.0, 100.0], 1.0))
        .collect()
}
