use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to open raster {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode raster {path}: {source}")]
    Decode {
        path: PathBuf,
        source: tiff::TiffError,
    },
    #[error("raster {path} has {len} samples, expected {width}x{height}")]
    SampleCount {
        path: PathBuf,
        len: usize,
        width: usize,
        height: usize,
    },
    #[error("raster rows have different lengths")]
    Ragged,
    #[error("raster {name} is {got:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        got: (usize, usize),
        expected: (usize, usize),
    },
}

/// Row-major grid of elevations; `[i, j]` is row `i`, column `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub name: String,
    data: Array2<f64>,
}

impl Raster {
    pub fn from_array(name: impl Into<String>, data: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Result<Self, RasterError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(RasterError::Ragged);
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((nrows, ncols), flat).map_err(|_| RasterError::Ragged)?;
        Ok(Self::from_array(name, data))
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    /// Replaces every sample equal to `sentinel` with `value`.
    pub fn replace_nodata(&mut self, sentinel: f64, value: f64) -> usize {
        let mut n = 0;
        self.data.mapv_inplace(|v| {
            if v == sentinel {
                n += 1;
                value
            } else {
                v
            }
        });
        n
    }

    /// Smallest finite sample, ignoring NaN.
    pub fn nan_min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// Largest finite sample, ignoring NaN.
    pub fn nan_max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    pub fn ensure_shape(&self, expected: (usize, usize)) -> Result<(), RasterError> {
        if self.shape() != expected {
            return Err(RasterError::ShapeMismatch {
                name: self.name.clone(),
                got: self.shape(),
                expected,
            });
        }
        Ok(())
    }
}

/// Loads a single-band TIFF, mapping `nodata` samples to `replacement`.
pub fn load_tiff(path: &Path, nodata: f64, replacement: f64) -> Result<Raster, RasterError> {
    let file = File::open(path).map_err(|source| RasterError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source| RasterError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file)).map_err(decode_err)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let image = decoder.read_image().map_err(decode_err)?;

    let samples: Vec<f64> = match image {
        tiff::decoder::DecodingResult::F32(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::F64(data) => data,
        tiff::decoder::DecodingResult::I16(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::U16(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::I32(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::U32(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::U8(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::I8(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::U64(data) => data.iter().map(|&v| v as f64).collect(),
        tiff::decoder::DecodingResult::I64(data) => data.iter().map(|&v| v as f64).collect(),
    };

    let (width, height) = (width as usize, height as usize);
    let len = samples.len();
    let data = Array2::from_shape_vec((height, width), samples).map_err(|_| RasterError::SampleCount {
        path: path.to_path_buf(),
        len,
        width,
        height,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut raster = Raster::from_array(name, data);
    let replaced = raster.replace_nodata(nodata, replacement);
    log::info!(
        "{}: {}x{}, min {}, max {}, {} no-data cells",
        raster.name,
        height,
        width,
        fmt_extreme(raster.nan_min()),
        fmt_extreme(raster.nan_max()),
        replaced
    );
    Ok(raster)
}

fn fmt_extreme(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}
