use std::ops::Range;

use strata_blocks::LayerMaterials;
use strata_io::{Raster, RasterError, load_tiff};
use strata_world::{
    CellSkip, HeightTriple, InputParams, RasterCell, Segment, VoxelTransform, build_column,
};

/// The three co-registered input rasters.
#[derive(Clone, Debug)]
pub struct Elevations {
    bed: Raster,
    surf: Raster,
    thick: Raster,
}

impl Elevations {
    pub fn new(bed: Raster, surf: Raster, thick: Raster) -> Result<Self, RasterError> {
        let shape = bed.shape();
        surf.ensure_shape(shape)?;
        thick.ensure_shape(shape)?;
        Ok(Self { bed, surf, thick })
    }

    /// Loads bed (no-data as NaN), surface and thickness (no-data as 0).
    pub fn load(input: &InputParams) -> Result<Self, RasterError> {
        let bed = load_tiff(&input.bed.path, input.bed.nodata, f64::NAN)?;
        let surf = load_tiff(&input.surface.path, input.surface.nodata, 0.0)?;
        let thick = load_tiff(&input.thickness.path, input.thickness.nodata, 0.0)?;
        Self::new(bed, surf, thick)
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.bed.shape()
    }

    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> RasterCell {
        RasterCell::new(self.bed.get(i, j), self.surf.get(i, j), self.thick.get(i, j))
    }

    pub fn bed_min(&self) -> Option<f64> {
        self.bed.nan_min()
    }

    pub fn surf_max(&self) -> Option<f64> {
        self.surf.nan_max()
    }

    /// Lazily resolves every `step`-th cell of `rows`, row-major.
    pub fn columns<'a>(
        &'a self,
        rows: Range<usize>,
        step: usize,
        transform: &'a VoxelTransform,
        materials: &'a LayerMaterials,
    ) -> Columns<'a> {
        let (nrows, _) = self.shape();
        Columns {
            elev: self,
            transform,
            materials,
            step: step.max(1),
            row: rows.start,
            row_end: rows.end.min(nrows),
            col: 0,
        }
    }
}

/// One cell's output column at world position `(x, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColumn {
    pub x: i32,
    pub z: i32,
    pub heights: HeightTriple,
    pub segments: Vec<Segment>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkippedCell {
    pub row: usize,
    pub col: usize,
    pub reason: CellSkip,
}

pub struct Columns<'a> {
    elev: &'a Elevations,
    transform: &'a VoxelTransform,
    materials: &'a LayerMaterials,
    step: usize,
    row: usize,
    row_end: usize,
    col: usize,
}

impl Iterator for Columns<'_> {
    type Item = Result<ResolvedColumn, SkippedCell>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, ncols) = self.elev.shape();
        while self.row < self.row_end {
            if self.col >= ncols {
                self.row += self.step;
                self.col = 0;
                continue;
            }
            let (i, j) = (self.row, self.col);
            self.col += self.step;
            let item = match HeightTriple::resolve(self.elev.cell(i, j), self.transform) {
                Ok(heights) => Ok(ResolvedColumn {
                    x: (j / self.step) as i32,
                    z: (i / self.step) as i32,
                    segments: build_column(&heights, self.materials),
                    heights,
                }),
                Err(reason) => Err(SkippedCell {
                    row: i,
                    col: j,
                    reason,
                }),
            };
            return Some(item);
        }
        None
    }
}
