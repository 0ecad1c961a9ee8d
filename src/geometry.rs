//! Bounding-box overlap tests and overlap-ROI computation.
//!
//! Everything here works on the first `dim` axes of fixed `[f32; 3]`
//! coordinate arrays; trailing components are ignored in 2-D.
use crate::tile::Tile;

/// Axis-aligned bounding box over the first `dim` axes.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub dim: usize,
}

impl Aabb {
    /// Box spanning `[offset, offset + size]` per axis.
    pub fn new(offset: [f32; 3], size: [f32; 3], dim: usize) -> Self {
        debug_assert!(dim == 2 || dim == 3, "dimensionality must be 2 or 3");
        let mut max = offset;
        for d in 0..dim {
            max[d] = offset[d] + size[d];
        }
        Self {
            min: offset,
            max,
            dim,
        }
    }

    /// Inclusive-endpoint interval intersection on every axis: boundary
    /// touching counts as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        debug_assert_eq!(self.dim, other.dim);
        (0..self.dim).all(|d| self.min[d] <= other.max[d] && other.min[d] <= self.max[d])
    }
}

/// Sentinel span marking "no overlap on this axis" in a [`Roi`].
pub const NO_OVERLAP: i32 = -1;

/// The expected overlap band between two tiles, expressed in one tile's
/// local pixel frame and rounded to integer coordinates.
///
/// An axis whose start and end both equal [`NO_OVERLAP`] carries the
/// no-overlap sentinel; [`Roi::has_overlap`] reports whether the region is
/// sentinel-free on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    pub start: [i32; 3],
    pub end: [i32; 3],
    pub dim: usize,
}

impl Roi {
    /// True when no axis carries the no-overlap sentinel.
    pub fn has_overlap(&self) -> bool {
        (0..self.dim).all(|d| self.start[d] != NO_OVERLAP || self.end[d] != NO_OVERLAP)
    }

    /// Span length on `axis` (end − start).
    #[inline]
    pub fn extent(&self, axis: usize) -> i32 {
        self.end[axis] - self.start[axis]
    }
}

/// Compute the overlap region of `t2` against `t1`, in `t1`'s local frame.
///
/// Per axis:
/// - `t2`'s start inside `t1`'s span: the region runs from that start to the
///   smaller of the two ends.
/// - otherwise, `t2`'s end inside `t1`'s span: the region runs from `t1`'s
///   origin to that end.
/// - otherwise, `t2`'s span containing `t1`'s: the whole of `t1` overlaps.
/// - otherwise the axis gets the no-overlap sentinel. Pairs confirmed
///   overlapping by the exhaustive graph builder never hit this case; it is
///   kept for sequentially paired tiles that share no geometry.
pub fn roi_between(t1: &Tile, t2: &Tile, dim: usize) -> Roi {
    debug_assert!(dim == 2 || dim == 3, "dimensionality must be 2 or 3");
    let mut start = [0i32; 3];
    let mut end = [0i32; 3];

    for d in 0..dim {
        let t1_start = t1.offset[d];
        let t1_end = t1.offset[d] + t1.size[d];
        let t2_start = t2.offset[d];
        let t2_end = t2.offset[d] + t2.size[d];

        if t2_start >= t1_start && t2_start <= t1_end {
            start[d] = (t2_start - t1_start).round() as i32;
            end[d] = if t2_end <= t1_end {
                (t2_end - t1_start).round() as i32
            } else {
                t1.size[d].round() as i32
            };
        } else if t2_end >= t1_start && t2_end <= t1_end {
            start[d] = 0;
            end[d] = (t2_end - t1_start).round() as i32;
        } else if t2_start < t1_start && t2_end > t1_end {
            start[d] = 0;
            end[d] = t1.size[d].round() as i32;
        } else {
            start[d] = NO_OVERLAP;
            end[d] = NO_OVERLAP;
        }
    }

    Roi { start, end, dim }
}
