//! Run configuration for a stitching invocation.
//!
//! Mirrors the knobs a caller actually controls: mosaic dimensionality,
//! whether overlaps are computed at all, intensity normalization, the
//! pairing scheme, virtual (lazy) tile loading, and the serial-vs-parallel
//! resource trade-off. Loadable from JSON via [`load_config`].
use crate::error::StitchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mosaic dimensionality. Fixed once per run; placement models and relative
/// shifts carry exactly this many components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    Two,
    Three,
}

impl Dimensionality {
    /// Number of coordinate components (2 or 3).
    #[inline]
    pub fn ncomponents(self) -> usize {
        match self {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }
}

/// Serial vs. parallel execution of the registration stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceMode {
    /// One worker thread; lowest peak memory.
    LowMemory,
    /// One worker per available hardware thread.
    HighThroughput,
}

impl ResourceMode {
    pub fn worker_count(self) -> usize {
        match self {
            ResourceMode::LowMemory => 1,
            ResourceMode::HighThroughput => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// How compare pairs are selected from the tile collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Test every unordered tile pair for bounding-box overlap.
    Exhaustive,
    /// Pair tile `i` with tiles `i+1 ..= i+range` in the caller-supplied
    /// ordering, clipped at the collection boundary. No geometry test.
    Sequential { range: usize },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub dimensionality: Dimensionality,
    /// When false, skip registration entirely and trust the input offsets.
    pub compute_overlap: bool,
    /// Apply per-channel median flat-field normalization before anything else.
    /// Mutates tile rasters in place.
    pub normalize_intensity: bool,
    pub pairing: PairingMode,
    /// Forwarded to the tile raster source on open.
    pub virtual_loading: bool,
    pub resource_mode: ResourceMode,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            dimensionality: Dimensionality::Two,
            compute_overlap: true,
            normalize_intensity: false,
            pairing: PairingMode::Exhaustive,
            virtual_loading: false,
            resource_mode: ResourceMode::HighThroughput,
        }
    }
}

/// Read a [`StitchConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<StitchConfig, StitchError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| StitchError::Config(format!("failed to read {}: {e}", path.display())))?;
    let config: StitchConfig = serde_json::from_str(&contents)
        .map_err(|e| StitchError::Config(format!("failed to parse {}: {e}", path.display())))?;
    Ok(config)
}
