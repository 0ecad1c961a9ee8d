//! Per-tile plane stack: all channels of all fields of view for one tile.
use super::plane::PlaneF32;
use serde::Serialize;
use std::fmt;

/// Raster shape descriptor shared by every tile in a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RasterDims {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    /// Fields of view (slices) per channel.
    pub fovs: usize,
}

impl fmt::Display for RasterDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} ({} channels, {} fovs)",
            self.width, self.height, self.channels, self.fovs
        )
    }
}

/// Owned stack of planes for one tile.
///
/// Plane order is field-of-view major: plane `fov * channels + channel`.
/// Every plane has the stack's width and height.
#[derive(Clone, Debug)]
pub struct TileStack {
    width: usize,
    height: usize,
    channels: usize,
    fovs: usize,
    planes: Vec<PlaneF32>,
}

impl TileStack {
    /// Construct a zero-initialized stack of `channels * fovs` planes.
    pub fn new(width: usize, height: usize, channels: usize, fovs: usize) -> Self {
        let planes = (0..channels * fovs)
            .map(|_| PlaneF32::new(width, height))
            .collect();
        Self {
            width,
            height,
            channels,
            fovs,
            planes,
        }
    }

    /// Construct from existing planes. Panics if the plane count is not
    /// `channels * fovs` or any plane disagrees on width/height.
    pub fn from_planes(channels: usize, fovs: usize, planes: Vec<PlaneF32>) -> Self {
        assert_eq!(
            planes.len(),
            channels * fovs,
            "expected {} planes, got {}",
            channels * fovs,
            planes.len()
        );
        assert!(!planes.is_empty(), "a tile stack needs at least one plane");
        let width = planes[0].w;
        let height = planes[0].h;
        for p in &planes {
            assert!(
                p.w == width && p.h == height,
                "all planes in a stack must share dimensions"
            );
        }
        Self {
            width,
            height,
            channels,
            fovs,
            planes,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn fovs(&self) -> usize {
        self.fovs
    }

    #[inline]
    pub fn dims(&self) -> RasterDims {
        RasterDims {
            width: self.width,
            height: self.height,
            channels: self.channels,
            fovs: self.fovs,
        }
    }

    #[inline]
    fn plane_index(&self, channel: usize, fov: usize) -> usize {
        debug_assert!(channel < self.channels && fov < self.fovs);
        fov * self.channels + channel
    }

    #[inline]
    pub fn plane(&self, channel: usize, fov: usize) -> &PlaneF32 {
        &self.planes[self.plane_index(channel, fov)]
    }

    #[inline]
    pub fn plane_mut(&mut self, channel: usize, fov: usize) -> &mut PlaneF32 {
        let i = self.plane_index(channel, fov);
        &mut self.planes[i]
    }

    /// All planes in storage order (field-of-view major).
    pub fn planes(&self) -> &[PlaneF32] {
        &self.planes
    }
}
