//! One input tile: approximate placement in mosaic coordinates plus the
//! pixel source behind it.
use crate::error::StitchError;
use crate::geometry::Aabb;
use crate::raster::{RasterSource, TileStack};

/// One input image with an approximate position and size in the mosaic's
/// shared coordinate space.
///
/// `offset + size` defines the tile's axis-aligned bounding box; unused
/// trailing components are zero in 2-D. The pixel stack is opened lazily
/// through the tile's [`RasterSource`] and cached; normalization mutates the
/// cached stack in place.
pub struct Tile {
    pub index: usize,
    pub time_point: i32,
    pub offset: [f32; 3],
    pub size: [f32; 3],
    source: Box<dyn RasterSource>,
    raster: Option<TileStack>,
}

impl Tile {
    /// 2-D tile at `offset` with extent `size`. Size components must be
    /// non-negative.
    pub fn new_2d(
        index: usize,
        offset: [f32; 2],
        size: [f32; 2],
        source: Box<dyn RasterSource>,
    ) -> Self {
        Self::new_3d(
            index,
            [offset[0], offset[1], 0.0],
            [size[0], size[1], 0.0],
            source,
        )
    }

    /// 3-D tile at `offset` with extent `size`. Size components must be
    /// non-negative.
    pub fn new_3d(
        index: usize,
        offset: [f32; 3],
        size: [f32; 3],
        source: Box<dyn RasterSource>,
    ) -> Self {
        assert!(
            size.iter().all(|&s| s >= 0.0),
            "tile {index}: size components must be non-negative"
        );
        Self {
            index,
            time_point: 1,
            offset,
            size,
            source,
            raster: None,
        }
    }

    pub fn with_time_point(mut self, time_point: i32) -> Self {
        self.time_point = time_point;
        self
    }

    /// Make the pixel stack available, loading it on first call. Idempotent;
    /// later calls return the cached stack regardless of the flag.
    pub fn open(&mut self, virtual_loading: bool) -> Result<&TileStack, StitchError> {
        if self.raster.is_none() {
            let stack = self
                .source
                .open(virtual_loading)
                .map_err(|reason| StitchError::TileLoad {
                    index: self.index,
                    reason,
                })?;
            self.raster = Some(stack);
        }
        Ok(self.raster.as_ref().expect("raster populated above"))
    }

    /// The cached pixel stack, if [`open`](Tile::open) has succeeded.
    #[inline]
    pub fn raster(&self) -> Option<&TileStack> {
        self.raster.as_ref()
    }

    #[inline]
    pub fn raster_mut(&mut self) -> Option<&mut TileStack> {
        self.raster.as_mut()
    }

    /// The tile's bounding box over the first `dim` axes.
    #[inline]
    pub fn aabb(&self, dim: usize) -> Aabb {
        Aabb::new(self.offset, self.size, dim)
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("index", &self.index)
            .field("time_point", &self.time_point)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("opened", &self.raster.is_some())
            .finish()
    }
}
