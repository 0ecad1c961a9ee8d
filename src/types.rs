//! Placement models and run-level result types.
use crate::config::Dimensionality;
use nalgebra::{Vector2, Vector3};
use serde::Serialize;

/// Transform mapping a tile's local coordinates into the mosaic frame.
///
/// The concrete shape is fixed once at configuration time by the run's
/// dimensionality; pure translation in both cases.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PlacementModel {
    Translation2D(Vector2<f32>),
    Translation3D(Vector3<f32>),
}

impl PlacementModel {
    /// Build a translation model directly from a tile offset.
    pub fn from_offset(offset: [f32; 3], dimensionality: Dimensionality) -> Self {
        match dimensionality {
            Dimensionality::Two => {
                PlacementModel::Translation2D(Vector2::new(offset[0], offset[1]))
            }
            Dimensionality::Three => {
                PlacementModel::Translation3D(Vector3::new(offset[0], offset[1], offset[2]))
            }
        }
    }

    /// The translation components, zero-padded to three.
    pub fn translation(&self) -> [f32; 3] {
        match self {
            PlacementModel::Translation2D(t) => [t.x, t.y, 0.0],
            PlacementModel::Translation3D(t) => [t.x, t.y, t.z],
        }
    }

    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            PlacementModel::Translation2D(_) => Dimensionality::Two,
            PlacementModel::Translation3D(_) => Dimensionality::Three,
        }
    }
}

/// Final placement of one tile in the mosaic frame.
#[derive(Clone, Debug, Serialize)]
pub struct TilePlacement {
    pub index: usize,
    pub time_point: i32,
    pub model: PlacementModel,
}

/// Run-level summary written alongside the placements on request.
#[derive(Clone, Debug, Serialize)]
pub struct StitchReport {
    pub tiles: usize,
    pub pairs: usize,
    pub normalized: bool,
    pub pairing: String,
    pub registration_ms: f64,
    pub optimize_ms: f64,
    pub total_ms: f64,
}
