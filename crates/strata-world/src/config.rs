use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use strata_blocks::{LayerMaterials, MaterialError};
use thiserror::Error;

use crate::transform::VoxelTransform;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub input: Input,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub sampling: Sampling,
    #[serde(default)]
    pub world: WorldOut,
    #[serde(default)]
    pub materials: LayerMaterials,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Input {
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_bed")]
    pub bed: PathBuf,
    #[serde(default = "default_surface")]
    pub surface: PathBuf,
    #[serde(default = "default_thickness")]
    pub thickness: PathBuf,
    #[serde(default = "default_nodata")]
    pub bed_nodata: f64,
    #[serde(default = "default_nodata")]
    pub surface_nodata: f64,
    #[serde(default = "default_nodata")]
    pub thickness_nodata: f64,
}
fn default_input_dir() -> PathBuf {
    PathBuf::from("./bedmap2_tiff")
}
fn default_bed() -> PathBuf {
    PathBuf::from("bedmap2_bed.tif")
}
fn default_surface() -> PathBuf {
    PathBuf::from("bedmap2_surface.tif")
}
fn default_thickness() -> PathBuf {
    PathBuf::from("bedmap2_thickness.tif")
}
fn default_nodata() -> f64 {
    32767.0
}
impl Default for Input {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            bed: default_bed(),
            surface: default_surface(),
            thickness: default_thickness(),
            bed_nodata: default_nodata(),
            surface_nodata: default_nodata(),
            thickness_nodata: default_nodata(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Transform {
    #[serde(default = "default_vscale")]
    pub vscale: f64,
    #[serde(default = "default_vshift")]
    pub vshift: f64,
}
fn default_vscale() -> f64 {
    0.01
}
fn default_vshift() -> f64 {
    80.0
}
impl Default for Transform {
    fn default() -> Self {
        Self {
            vscale: default_vscale(),
            vshift: default_vshift(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Sampling {
    #[serde(default = "default_step")]
    pub step: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}
fn default_step() -> usize {
    1
}
// ideally a multiple of the chunk size
fn default_batch_size() -> usize {
    32
}
impl Default for Sampling {
    fn default() -> Self {
        Self {
            step: default_step(),
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldOut {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
    #[serde(default = "default_height_limit")]
    pub height_limit: i32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_spawn_y")]
    pub spawn_y: i32,
    #[serde(default = "default_evict")]
    pub evict_after_save: bool,
}
fn default_name() -> String {
    "Antarctica".to_string()
}
fn default_save_dir() -> PathBuf {
    PathBuf::from("./saves")
}
fn default_height_limit() -> i32 {
    255
}
fn default_chunk_size() -> usize {
    16
}
fn default_spawn_y() -> i32 {
    250
}
fn default_evict() -> bool {
    true
}
impl Default for WorldOut {
    fn default() -> Self {
        Self {
            name: default_name(),
            save_dir: default_save_dir(),
            height_limit: default_height_limit(),
            chunk_size: default_chunk_size(),
            spawn_y: default_spawn_y(),
            evict_after_save: default_evict(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<StrataConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: StrataConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vscale must be finite and > 0 and vshift finite (got vscale={vscale}, vshift={vshift})")]
    Transform { vscale: f64, vshift: f64 },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("world name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Material(#[from] MaterialError),
}

/// A raster file and the sample value it uses for missing data.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterSource {
    pub path: PathBuf,
    pub nodata: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputParams {
    pub bed: RasterSource,
    pub surface: RasterSource,
    pub thickness: RasterSource,
}

/// Validated settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunParams {
    pub input: InputParams,
    pub transform: VoxelTransform,
    pub step: usize,
    pub batch_size: usize,
    pub world_name: String,
    pub save_dir: PathBuf,
    pub height_limit: i32,
    pub chunk_size: usize,
    pub spawn_y: i32,
    pub evict_after_save: bool,
    pub materials: LayerMaterials,
}

impl RunParams {
    pub fn from_config(cfg: &StrataConfig) -> Result<Self, ConfigError> {
        let transform = VoxelTransform::new(cfg.transform.vscale, cfg.transform.vshift).ok_or(
            ConfigError::Transform {
                vscale: cfg.transform.vscale,
                vshift: cfg.transform.vshift,
            },
        )?;
        for (field, v) in [
            ("step", cfg.sampling.step),
            ("batch_size", cfg.sampling.batch_size),
            ("chunk_size", cfg.world.chunk_size),
        ] {
            if v == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        if cfg.world.height_limit < 1 {
            return Err(ConfigError::Zero {
                field: "height_limit",
            });
        }
        if cfg.world.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        cfg.materials.validate()?;

        let dir = &cfg.input.dir;
        Ok(Self {
            input: InputParams {
                bed: RasterSource {
                    path: dir.join(&cfg.input.bed),
                    nodata: cfg.input.bed_nodata,
                },
                surface: RasterSource {
                    path: dir.join(&cfg.input.surface),
                    nodata: cfg.input.surface_nodata,
                },
                thickness: RasterSource {
                    path: dir.join(&cfg.input.thickness),
                    nodata: cfg.input.thickness_nodata,
                },
            },
            transform,
            step: cfg.sampling.step,
            batch_size: cfg.sampling.batch_size,
            world_name: cfg.world.name.clone(),
            save_dir: cfg.world.save_dir.clone(),
            height_limit: cfg.world.height_limit,
            chunk_size: cfg.world.chunk_size,
            spawn_y: cfg.world.spawn_y,
            evict_after_save: cfg.world.evict_after_save,
            materials: cfg.materials,
        })
    }

    /// Directory the world is written to.
    pub fn world_dir(&self) -> PathBuf {
        self.save_dir.join(&self.world_name)
    }
}
