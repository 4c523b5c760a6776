use std::time::Instant;

use strata_io::WorldDir;
use strata_world::{RunParams, check_extents};

use crate::RunError;
use crate::columns::Elevations;
use crate::store::ChunkStore;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub cells: u64,
    pub columns_written: u64,
    pub cells_skipped: u64,
    pub batches: u64,
    pub chunks_relit: u64,
    /// Sum of surface heights over written columns.
    pub total_surface: i64,
}

/// Checks preconditions, creates the world and converts every batch.
///
/// Nothing is written to disk if the terrain does not fit the world.
pub fn run(params: &RunParams, elev: &Elevations) -> Result<RunReport, RunError> {
    check_extents(
        &params.transform,
        elev.bed_min(),
        elev.surf_max(),
        params.height_limit,
    )?;
    let dir = WorldDir::create(&params.save_dir, &params.world_name)?;
    log::info!("Writing world to {}", dir.root().display());
    let mut store = ChunkStore::new(
        dir,
        &params.world_name,
        params.chunk_size,
        params.height_limit as usize,
        params.evict_after_save,
    );
    convert(params, elev, &mut store)
}

/// Writes all columns into `store`, relighting and saving after each batch.
pub fn convert(
    params: &RunParams,
    elev: &Elevations,
    store: &mut ChunkStore,
) -> Result<RunReport, RunError> {
    let (nrows, ncols) = elev.shape();
    let step = params.step;
    let rows_per_batch = step * params.batch_size;
    let out_rows = nrows.div_ceil(step);
    let spawn = (
        (ncols / (step * 2)) as i32,
        params.spawn_y,
        (nrows / (step * 2)) as i32,
    );

    let mut report = RunReport::default();
    for batch_start in (0..nrows).step_by(rows_per_batch) {
        let batch_end = (batch_start + rows_per_batch).min(nrows);
        let started = Instant::now();
        let batch = {
            let mut scope = store.begin_batch();
            let mut last_z = None;
            for item in elev.columns(batch_start..batch_end, step, &params.transform, &params.materials) {
                report.cells += 1;
                let col = match item {
                    Ok(col) => col,
                    Err(_) => {
                        report.cells_skipped += 1;
                        continue;
                    }
                };
                if last_z != Some(col.z) {
                    log::debug!("Processing row {}/{}", col.z + 1, out_rows);
                    last_z = Some(col.z);
                }
                scope.write_column(col.x, col.z, &col.segments)?;
                report.total_surface += i64::from(col.heights.surface_y);
            }
            scope.finish()
        };
        report.columns_written += batch.columns;
        report.chunks_relit += batch.chunks_relit as u64;
        report.batches += 1;

        store.save()?;
        store.set_spawn(spawn.0, spawn.1, spawn.2);
        log::info!(
            "rows {}..{} of {}: {} columns, {} chunks relit in {:.2?}",
            batch_start / step,
            batch_end.div_ceil(step),
            out_rows,
            batch.columns,
            batch.chunks_relit,
            started.elapsed()
        );
    }
    // the last spawn update happens after the last checkpoint
    store.save()?;
    Ok(report)
}
