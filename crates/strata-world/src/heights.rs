use thiserror::Error;

use crate::transform::VoxelTransform;

/// Raw elevations for one raster cell, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterCell {
    pub bed: f64,
    pub surf: f64,
    pub thick: f64,
}

impl RasterCell {
    pub const fn new(bed: f64, surf: f64, thick: f64) -> Self {
        Self { bed, surf, thick }
    }
}

/// A cell that cannot be turned into a column. The caller leaves it empty.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CellSkip {
    #[error("elevation {value} is not finite after transform")]
    NonFinite { value: f64 },
    #[error("elevation {value} maps outside the voxel range")]
    OutOfRange { value: f64 },
    #[error("heights {bedrock_y}/{base_y}/{surface_y} cannot be ordered")]
    Unordered {
        bedrock_y: i32,
        base_y: i32,
        surface_y: i32,
    },
}

/// Resolved voxel heights of one column: `0 <= bedrock_y <= base_y <= surface_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightTriple {
    pub bedrock_y: i32,
    pub base_y: i32,
    pub surface_y: i32,
}

impl HeightTriple {
    pub fn resolve(cell: RasterCell, transform: &VoxelTransform) -> Result<Self, CellSkip> {
        let mut bedrock_y = transform.voxel(cell.bed)?;
        let mut base_y = transform.voxel(cell.surf - cell.thick)?;
        let surface_y = transform.voxel(cell.surf)?;

        // Ice that rounds away to nothing still gets one block.
        if cell.thick > 0.0 && surface_y == base_y {
            base_y = base_y.checked_sub(1).ok_or(CellSkip::OutOfRange {
                value: cell.surf - cell.thick,
            })?;
        }
        if base_y < bedrock_y {
            bedrock_y = base_y;
        }

        let triple = Self {
            bedrock_y,
            base_y,
            surface_y,
        };
        if triple.is_ordered() {
            Ok(triple)
        } else {
            Err(CellSkip::Unordered {
                bedrock_y,
                base_y,
                surface_y,
            })
        }
    }

    #[inline]
    pub fn is_ordered(&self) -> bool {
        0 <= self.bedrock_y && self.bedrock_y <= self.base_y && self.base_y <= self.surface_y
    }

    #[inline]
    pub fn rock_height(&self) -> i32 {
        self.bedrock_y
    }

    #[inline]
    pub fn liquid_height(&self) -> i32 {
        self.base_y - self.bedrock_y
    }

    #[inline]
    pub fn frozen_height(&self) -> i32 {
        self.surface_y - self.base_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr() -> VoxelTransform {
        VoxelTransform::new(0.01, 80.0).unwrap()
    }

    fn resolve(bed: f64, surf: f64, thick: f64) -> Result<HeightTriple, CellSkip> {
        HeightTriple::resolve(RasterCell::new(bed, surf, thick), &tr())
    }

    #[test]
    fn bare_ground_has_liquid_up_to_surface() {
        let h = resolve(0.0, 100.0, 0.0).unwrap();
        assert_eq!(
            h,
            HeightTriple {
                bedrock_y: 80,
                base_y: 81,
                surface_y: 81
            }
        );
        assert_eq!(h.frozen_height(), 0);
    }

    #[test]
    fn thin_ice_is_kept_visible() {
        // 150 m and 140 m both land on y=81
        let raw_base = tr().voxel(140.0).unwrap();
        let raw_surf = tr().voxel(150.0).unwrap();
        assert_eq!(raw_base, raw_surf);
        let h = resolve(0.0, 150.0, 10.0).unwrap();
        assert_eq!(h.base_y, raw_base - 1);
        assert_eq!(h.surface_y, raw_surf);
        assert_eq!(h.frozen_height(), 1);
    }

    #[test]
    fn distinct_ice_is_not_decremented() {
        let h = resolve(0.0, 100.0, 50.0).unwrap();
        assert_eq!(
            h,
            HeightTriple {
                bedrock_y: 80,
                base_y: 80,
                surface_y: 81
            }
        );
    }

    #[test]
    fn base_below_bed_clamps_rock() {
        // floating ice shelf whose base sits below the recorded bed
        let h = resolve(500.0, 200.0, 400.0).unwrap();
        assert_eq!(h.base_y, 78);
        assert_eq!(h.bedrock_y, 78);
        assert_eq!(h.liquid_height(), 0);
        assert_eq!(h.frozen_height(), 4);
    }

    #[test]
    fn nan_bed_is_skipped() {
        assert!(matches!(
            resolve(f64::NAN, 100.0, 0.0),
            Err(CellSkip::NonFinite { .. })
        ));
    }

    #[test]
    fn negative_thickness_cannot_be_ordered() {
        assert!(matches!(
            resolve(0.0, 100.0, -500.0),
            Err(CellSkip::Unordered { .. })
        ));
    }

    #[test]
    fn floor_below_zero_is_skipped() {
        assert!(matches!(
            resolve(-9000.0, 100.0, 0.0),
            Err(CellSkip::Unordered { bedrock_y: -10, .. })
        ));
    }
}
