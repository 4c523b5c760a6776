//! Batched column writing, deferred relighting and the conversion run loop.
#![forbid(unsafe_code)]

pub mod batch;
pub mod columns;
pub mod pipeline;
pub mod store;

pub use batch::{BatchReport, BatchScope, DirtySet};
pub use columns::{Columns, Elevations, ResolvedColumn, SkippedCell};
pub use pipeline::{RunReport, convert, run};
pub use store::{ChangeSink, ChunkStore, StoreStats};

use strata_io::{RasterError, StoreError};
use strata_world::PreconditionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("terrain does not fit the world: {0}")]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
