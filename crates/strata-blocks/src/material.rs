use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum skylight level; fully opaque blocks absorb all of it.
pub const MAX_LIGHT: u8 = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(u8)]
pub enum Material {
    #[default]
    Air,
    Stone,
    Dirt,
    Gravel,
    Sand,
    Water,
    Lava,
    Ice,
    PackedIce,
    Snow,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    #[error("unknown material name '{0}'")]
    UnknownName(String),
    #[error("unknown block id {0}")]
    UnknownId(u8),
    #[error("'{layer}' layer cannot be air")]
    AirLayer { layer: &'static str },
}

impl Material {
    pub const ALL: [Material; 10] = [
        Material::Air,
        Material::Stone,
        Material::Dirt,
        Material::Gravel,
        Material::Sand,
        Material::Water,
        Material::Lava,
        Material::Ice,
        Material::PackedIce,
        Material::Snow,
    ];

    /// Legacy block id written to chunk files.
    #[inline]
    pub const fn block_id(self) -> u8 {
        match self {
            Material::Air => 0,
            Material::Stone => 1,
            Material::Dirt => 3,
            Material::Water => 9,
            Material::Lava => 11,
            Material::Sand => 12,
            Material::Gravel => 13,
            Material::Ice => 79,
            Material::Snow => 80,
            Material::PackedIce => 174,
        }
    }

    pub fn from_block_id(id: u8) -> Result<Self, MaterialError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.block_id() == id)
            .ok_or(MaterialError::UnknownId(id))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Material::Air => "air",
            Material::Stone => "stone",
            Material::Dirt => "dirt",
            Material::Gravel => "gravel",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Lava => "lava",
            Material::Ice => "ice",
            Material::PackedIce => "packed_ice",
            Material::Snow => "snow",
        }
    }

    /// How much skylight is lost when entering this block.
    #[inline]
    pub const fn light_opacity(self) -> u8 {
        match self {
            Material::Air => 0,
            Material::Water | Material::Ice => 1,
            _ => MAX_LIGHT,
        }
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, Material::Air)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == key)
            .ok_or_else(|| MaterialError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Material {
    type Error = MaterialError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Material> for &'static str {
    fn from(m: Material) -> Self {
        m.name()
    }
}

/// Material used for each vertical layer of a column, bottom-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMaterials {
    #[serde(default = "default_rock")]
    pub rock: Material,
    #[serde(default = "default_liquid")]
    pub liquid: Material,
    #[serde(default = "default_frozen")]
    pub frozen: Material,
}

fn default_rock() -> Material {
    Material::Stone
}
fn default_liquid() -> Material {
    Material::Water
}
fn default_frozen() -> Material {
    Material::PackedIce
}

impl Default for LayerMaterials {
    fn default() -> Self {
        Self {
            rock: default_rock(),
            liquid: default_liquid(),
            frozen: default_frozen(),
        }
    }
}

impl LayerMaterials {
    pub fn validate(&self) -> Result<(), MaterialError> {
        for (layer, mat) in [
            ("rock", self.rock),
            ("liquid", self.liquid),
            ("frozen", self.frozen),
        ] {
            if mat.is_air() {
                return Err(MaterialError::AirLayer { layer });
            }
        }
        Ok(())
    }
}
