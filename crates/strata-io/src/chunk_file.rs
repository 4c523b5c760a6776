use std::path::Path;

use fastnbt::{ByteArray, IntArray};
use serde::{Deserialize, Serialize};
use strata_blocks::Material;
use strata_chunk::ChunkBuf;
use strata_lighting::LightGrid;
use strata_world::ChunkCoord;

use crate::StoreError;
use crate::level::{read_gzip_nbt, write_gzip_nbt};

#[derive(Serialize, Deserialize)]
struct ChunkDat {
    #[serde(rename = "Level")]
    level: ChunkLevel,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChunkLevel {
    #[serde(rename = "xPos")]
    x_pos: i32,
    #[serde(rename = "zPos")]
    z_pos: i32,
    size: i32,
    height: i32,
    blocks: ByteArray,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sky_light: Option<ByteArray>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height_map: Option<IntArray>,
    light_populated: bool,
}

/// Writes one chunk, with its skylight when it has been lit.
pub fn write_chunk(path: &Path, buf: &ChunkBuf, light: Option<&LightGrid>) -> Result<(), StoreError> {
    let blocks = buf.blocks.iter().map(|m| m.block_id() as i8).collect();
    let level = ChunkLevel {
        x_pos: buf.coord.cx,
        z_pos: buf.coord.cz,
        size: buf.sx as i32,
        height: buf.sy as i32,
        blocks: ByteArray::new(blocks),
        sky_light: light.map(|lg| ByteArray::new(lg.skylight().iter().map(|&l| l as i8).collect())),
        height_map: light.map(|lg| IntArray::new(lg.height_map().to_vec())),
        light_populated: light.is_some(),
    };
    write_gzip_nbt(path, &ChunkDat { level })
}

pub fn read_chunk(path: &Path) -> Result<(ChunkBuf, Option<LightGrid>), StoreError> {
    let bytes = read_gzip_nbt(path)?;
    let dat: ChunkDat = fastnbt::from_bytes(&bytes)?;
    let level = dat.level;
    let corrupt = |reason: &str| StoreError::Corrupt {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    if level.size <= 0 || level.height <= 0 {
        return Err(corrupt("non-positive dimensions"));
    }
    let (s, h) = (level.size as usize, level.height as usize);
    if level.blocks.len() != s * h * s {
        return Err(corrupt("block count does not match dimensions"));
    }
    let blocks = level
        .blocks
        .iter()
        .map(|&b| Material::from_block_id(b as u8))
        .collect::<Result<Vec<_>, _>>()?;
    let coord = ChunkCoord::new(level.x_pos, level.z_pos);
    let buf = ChunkBuf::from_blocks_local(coord, s, h, s, blocks);

    let light = match (level.light_populated, level.sky_light, level.height_map) {
        (true, Some(sky), Some(hm)) => Some(
            LightGrid::from_parts(
                s,
                h,
                s,
                sky.iter().map(|&l| l as u8).collect(),
                hm.iter().copied().collect(),
            )
            .ok_or_else(|| corrupt("light planes do not match dimensions"))?,
        ),
        _ => None,
    };
    Ok((buf, light))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::Segment;

    #[test]
    fn lit_chunk_survives_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.2.-1.dat");
        let mut buf = ChunkBuf::new(ChunkCoord::new(2, -1), 4, 8);
        buf.fill_column(
            3,
            1,
            &[Segment::new(Material::Stone, 5), Segment::new(Material::PackedIce, 2)],
        );
        let lg = LightGrid::compute(&buf);
        write_chunk(&path, &buf, Some(&lg)).unwrap();

        let (back, light) = read_chunk(&path).unwrap();
        assert_eq!(back, buf);
        assert_eq!(light, Some(lg));
    }

    #[test]
    fn unlit_chunk_has_no_light() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.0.0.dat");
        let buf = ChunkBuf::new(ChunkCoord::new(0, 0), 2, 2);
        write_chunk(&path, &buf, None).unwrap();
        let (back, light) = read_chunk(&path).unwrap();
        assert!(back.is_all_air());
        assert!(light.is_none());
    }

    #[test]
    fn garbage_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.0.0.dat");
        std::fs::write(&path, b"not gzip").unwrap();
        assert!(read_chunk(&path).is_err());
    }
}
