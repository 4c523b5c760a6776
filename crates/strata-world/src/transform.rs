use thiserror::Error;

use crate::heights::CellSkip;

/// Affine map from real elevation (metres) to integer voxel height.
///
/// `voxel(e) = floor(e * vscale + vshift)`. `vscale` is always positive, so
/// the map never inverts the ordering of two elevations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelTransform {
    vscale: f64,
    vshift: f64,
}

impl VoxelTransform {
    /// Returns `None` unless `vscale > 0` and both terms are finite.
    pub fn new(vscale: f64, vshift: f64) -> Option<Self> {
        if vscale.is_finite() && vscale > 0.0 && vshift.is_finite() {
            Some(Self { vscale, vshift })
        } else {
            None
        }
    }

    #[inline]
    pub fn vscale(&self) -> f64 {
        self.vscale
    }

    #[inline]
    pub fn vshift(&self) -> f64 {
        self.vshift
    }

    #[inline]
    pub fn voxel(&self, elevation: f64) -> Result<i32, CellSkip> {
        let y = (elevation * self.vscale + self.vshift).floor();
        if !y.is_finite() {
            return Err(CellSkip::NonFinite { value: elevation });
        }
        if y < i32::MIN as f64 || y > i32::MAX as f64 {
            return Err(CellSkip::OutOfRange { value: elevation });
        }
        Ok(y as i32)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PreconditionError {
    #[error("{raster} raster has no finite values")]
    NoFiniteData { raster: &'static str },
    #[error("{raster} extreme {value} cannot be mapped to a voxel height")]
    Unmappable { raster: &'static str, value: f64 },
    #[error(
        "bed goes below y=1 (lowest bed {bed_min} maps to y={floor_y}); decrease vscale or increase vshift"
    )]
    FloorTooLow { bed_min: f64, floor_y: i32 },
    #[error(
        "surface reaches y={ceiling_y} (highest surface {surf_max}), limit is {limit}; decrease vscale or vshift"
    )]
    CeilingTooHigh {
        surf_max: f64,
        ceiling_y: i32,
        limit: i32,
    },
}

/// Checks that the whole terrain fits between the world floor and `height_limit`.
///
/// `bed_min` / `surf_max` are the extrema over finite cells, `None` when a
/// raster holds no finite value at all.
pub fn check_extents(
    transform: &VoxelTransform,
    bed_min: Option<f64>,
    surf_max: Option<f64>,
    height_limit: i32,
) -> Result<(), PreconditionError> {
    let bed_min = bed_min.ok_or(PreconditionError::NoFiniteData { raster: "bed" })?;
    let surf_max = surf_max.ok_or(PreconditionError::NoFiniteData { raster: "surface" })?;

    let floor_y = transform
        .voxel(bed_min)
        .map_err(|_| PreconditionError::Unmappable {
            raster: "bed",
            value: bed_min,
        })?;
    if floor_y <= 0 {
        return Err(PreconditionError::FloorTooLow { bed_min, floor_y });
    }

    let ceiling_y = transform
        .voxel(surf_max)
        .map_err(|_| PreconditionError::Unmappable {
            raster: "surface",
            value: surf_max,
        })?;
    if ceiling_y >= height_limit {
        return Err(PreconditionError::CeilingTooHigh {
            surf_max,
            ceiling_y,
            limit: height_limit,
        });
    }
    Ok(())
}
