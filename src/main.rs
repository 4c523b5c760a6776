use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use strata_runtime::{Elevations, run};
use strata_world::{RunParams, StrataConfig, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Convert ice-sheet elevation rasters into a voxel world")]
struct Args {
    /// TOML run configuration
    #[arg(long, default_value = "strata.toml")]
    config: PathBuf,

    /// Voxels per metre of elevation
    #[arg(long)]
    vscale: Option<f64>,

    /// Voxel height of sea level
    #[arg(long, allow_negative_numbers = true)]
    vshift: Option<f64>,

    /// Sample every Nth raster cell along both axes
    #[arg(long)]
    step: Option<usize>,

    /// Output rows per relight/save batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// World name
    #[arg(long)]
    name: Option<String>,

    /// Directory the world folder is created in
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Directory holding the bed, surface and thickness rasters
    #[arg(long)]
    input_dir: Option<PathBuf>,
}

impl Args {
    fn apply(&self, cfg: &mut StrataConfig) {
        if let Some(v) = self.vscale {
            cfg.transform.vscale = v;
        }
        if let Some(v) = self.vshift {
            cfg.transform.vshift = v;
        }
        if let Some(v) = self.step {
            cfg.sampling.step = v;
        }
        if let Some(v) = self.batch_size {
            cfg.sampling.batch_size = v;
        }
        if let Some(v) = &self.name {
            cfg.world.name = v.clone();
        }
        if let Some(v) = &self.save_dir {
            cfg.world.save_dir = v.clone();
        }
        if let Some(v) = &self.input_dir {
            cfg.input.dir = v.clone();
        }
    }
}

fn load_config(path: &Path) -> Result<StrataConfig, Box<dyn Error>> {
    if path.exists() {
        log::info!("Loading config from {}", path.display());
        load_config_from_path(path)
    } else {
        log::warn!("Config {} not found; using defaults", path.display());
        Ok(StrataConfig::default())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = load_config(&args.config)?;
    args.apply(&mut cfg);
    let params = RunParams::from_config(&cfg)?;
    log::info!(
        "vscale={} vshift={} step={} batch_size={}",
        params.transform.vscale(),
        params.transform.vshift(),
        params.step,
        params.batch_size
    );

    let started = Instant::now();
    let elev = Elevations::load(&params.input)?;
    let (rows, cols) = elev.shape();
    log::info!("Rasters are {}x{} cells", rows, cols);

    let report = run(&params, &elev)?;
    log::info!(
        "{} columns written, {} cells skipped, {} chunks relit over {} batches",
        report.columns_written,
        report.cells_skipped,
        report.chunks_relit,
        report.batches
    );
    log::info!("{} blocks used", report.total_surface);
    log::info!(
        "World '{}' saved to {} in {:.2?}",
        params.world_name,
        params.world_dir().display(),
        started.elapsed()
    );
    Ok(())
}
