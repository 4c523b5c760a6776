//! Raster input and on-disk world layout.
#![forbid(unsafe_code)]

pub mod chunk_file;
pub mod level;
pub mod raster;

pub use chunk_file::{read_chunk, write_chunk};
pub use level::{LevelData, WorldDir, read_level, write_level};
pub use raster::{Raster, RasterError, load_tiff};

use strata_blocks::MaterialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("world i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("nbt encoding failed: {0}")]
    Nbt(#[from] fastnbt::error::Error),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error("corrupt chunk file {path}: {reason}")]
    Corrupt { path: String, reason: String },
}
