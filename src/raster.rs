//! Tile pixel storage: owned f32 planes, per-tile plane stacks, and the
//! source abstraction that makes pixel data available on demand.
pub mod io;
pub mod plane;
pub mod stack;

pub use self::io::{load_grayscale_plane, save_plane_f32, write_json_file, FileRasterSource};
pub use self::plane::PlaneF32;
pub use self::stack::{RasterDims, TileStack};

/// Provider of a tile's pixel data.
///
/// `open` must be idempotent and safe to call multiple times; callers cache
/// the returned stack. `virtual_loading` is a hint to defer or memory-map
/// heavy decoding; sources that cannot honor it load eagerly.
pub trait RasterSource: Send + Sync {
    fn open(&self, virtual_loading: bool) -> Result<TileStack, String>;
}

/// Raster source for pixel data that already lives in memory. Hands out a
/// clone of the wrapped stack on every open.
#[derive(Clone, Debug)]
pub struct MemoryRasterSource {
    stack: TileStack,
}

impl MemoryRasterSource {
    pub fn new(stack: TileStack) -> Self {
        Self { stack }
    }
}

impl RasterSource for MemoryRasterSource {
    fn open(&self, _virtual_loading: bool) -> Result<TileStack, String> {
        Ok(self.stack.clone())
    }
}
