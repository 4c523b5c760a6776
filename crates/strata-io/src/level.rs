use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use strata_world::ChunkCoord;

use crate::StoreError;

const CREATIVE: i32 = 1;

#[derive(Serialize, Deserialize)]
struct LevelDat {
    #[serde(rename = "Data")]
    data: LevelData,
}

/// World-wide metadata stored in `level.dat`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelData {
    pub level_name: String,
    pub game_type: i32,
    pub map_features: bool,
    #[serde(rename = "generatorName")]
    pub generator_name: String,
    #[serde(rename = "generatorOptions")]
    pub generator_options: String,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub spawn_z: i32,
    pub chunk_size: i32,
    pub world_height: i32,
}

impl LevelData {
    /// Flat creative world with no generated structures.
    pub fn flat(name: &str, chunk_size: usize, world_height: usize) -> Self {
        Self {
            level_name: name.to_string(),
            game_type: CREATIVE,
            map_features: false,
            generator_name: "flat".to_string(),
            generator_options: "0".to_string(),
            spawn_x: 0,
            spawn_y: 0,
            spawn_z: 0,
            chunk_size: chunk_size as i32,
            world_height: world_height as i32,
        }
    }
}

/// Directory layout of one saved world.
#[derive(Clone, Debug)]
pub struct WorldDir {
    root: PathBuf,
}

impl WorldDir {
    /// Creates `save_dir/name` fresh, deleting any world already there.
    pub fn create(save_dir: &Path, name: &str) -> Result<Self, StoreError> {
        if !save_dir.is_dir() {
            log::info!("Creating directory {}", save_dir.display());
            fs::create_dir_all(save_dir)?;
        }
        let root = save_dir.join(name);
        if root.exists() {
            log::warn!("Replacing existing world at {}", root.display());
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(root.join("chunks"))?;
        Ok(Self { root })
    }

    /// Opens an existing world without touching it.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn level_path(&self) -> PathBuf {
        self.root.join("level.dat")
    }

    pub fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.root
            .join("chunks")
            .join(format!("c.{}.{}.dat", coord.cx, coord.cz))
    }
}

pub(crate) fn write_gzip_nbt<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = fastnbt::to_bytes(value)?;
    let tmp = path.with_extension("tmp");
    {
        let mut enc = GzEncoder::new(File::create(&tmp)?, Compression::default());
        enc.write_all(&bytes)?;
        enc.finish()?.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn read_gzip_nbt(path: &Path) -> Result<Vec<u8>, StoreError> {
    let mut bytes = Vec::new();
    GzDecoder::new(File::open(path)?).read_to_end(&mut bytes)?;
    Ok(bytes)
}

pub fn write_level(dir: &WorldDir, level: &LevelData) -> Result<(), StoreError> {
    write_gzip_nbt(
        &dir.level_path(),
        &LevelDat {
            data: level.clone(),
        },
    )
}

pub fn read_level(dir: &WorldDir) -> Result<LevelData, StoreError> {
    let bytes = read_gzip_nbt(&dir.level_path())?;
    let dat: LevelDat = fastnbt::from_bytes(&bytes)?;
    Ok(dat.data)
}
