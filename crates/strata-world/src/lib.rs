//! Elevation transform, height resolution, column synthesis and run parameters.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod column;
pub mod config;
pub mod heights;
pub mod transform;

pub use chunk_coord::ChunkCoord;
pub use column::{Segment, build_column, column_top};
pub use config::{
    ConfigError, InputParams, RasterSource, RunParams, StrataConfig, load_config_from_path,
};
pub use heights::{CellSkip, HeightTriple, RasterCell};
pub use transform::{PreconditionError, VoxelTransform, check_extents};
