//! I/O helpers for tile rasters and JSON reports.
//!
//! - `load_grayscale_plane`: read a PNG/TIFF/etc. into an f32 plane.
//! - `save_plane_f32`: write a plane to a grayscale PNG (debugging aid for
//!   inspecting median reference images).
//! - `FileRasterSource`: a [`RasterSource`] backed by one image file per
//!   plane.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::plane::PlaneF32;
use super::stack::TileStack;
use super::RasterSource;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk, convert to 8-bit grayscale, and widen to f32.
pub fn load_grayscale_plane(path: &Path) -> Result<PlaneF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?
        .into_luma8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    let data = img.into_raw().iter().map(|&v| v as f32).collect();
    Ok(PlaneF32::from_data(w, h, data))
}

/// Save a plane to a grayscale PNG, clamping values to [0, 255].
pub fn save_plane_f32(plane: &PlaneF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(plane.w as u32, plane.h as u32);
    for y in 0..plane.h {
        for (x, &px) in plane.row(y).iter().enumerate() {
            let v = px.clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("failed to save {}: {e}", path.display()))
}

/// Raster source reading one image file per plane.
///
/// Paths are in plane-storage order (field-of-view major): path index
/// `fov * channels + channel`. Decoding is always eager; the virtual-loading
/// hint is accepted but has no effect here.
#[derive(Clone, Debug)]
pub struct FileRasterSource {
    paths: Vec<PathBuf>,
    channels: usize,
    fovs: usize,
}

impl FileRasterSource {
    pub fn new(paths: Vec<PathBuf>, channels: usize, fovs: usize) -> Self {
        assert_eq!(
            paths.len(),
            channels * fovs,
            "expected {} plane paths, got {}",
            channels * fovs,
            paths.len()
        );
        Self {
            paths,
            channels,
            fovs,
        }
    }

    /// Single-channel, single-FOV tile from one image file.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            channels: 1,
            fovs: 1,
        }
    }
}

impl RasterSource for FileRasterSource {
    fn open(&self, _virtual_loading: bool) -> Result<TileStack, String> {
        let mut planes = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            planes.push(load_grayscale_plane(path)?);
        }
        Ok(TileStack::from_planes(self.channels, self.fovs, planes))
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
