//! Chunk block buffers and column fills.
#![forbid(unsafe_code)]

use strata_blocks::Material;
use strata_world::{ChunkCoord, Segment};

#[derive(Clone, Debug, PartialEq)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Material>,
}

impl ChunkBuf {
    pub fn new(coord: ChunkCoord, size: usize, height: usize) -> Self {
        Self {
            coord,
            sx: size,
            sy: height,
            sz: size,
            blocks: vec![Material::Air; size * height * size],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Material {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, m: Material) {
        let i = self.idx(x, y, z);
        self.blocks[i] = m;
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let base_x = self.coord.cx * self.sx as i32;
        let base_z = self.coord.cz * self.sz as i32;
        if wy < 0 || wy >= self.sy as i32 {
            return false;
        }
        wx >= base_x && wx < base_x + self.sx as i32 && wz >= base_z && wz < base_z + self.sz as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Material> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let lx = (wx - self.coord.cx * self.sx as i32) as usize;
        let lz = (wz - self.coord.cz * self.sz as i32) as usize;
        Some(self.get_local(lx, wy as usize, lz))
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Material>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Material::Air);
        }
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: b,
        }
    }

    /// Replaces local column `(lx, lz)` with `segments` stacked from y=0.
    ///
    /// Anything above the stack is cleared to air; blocks past the chunk top are dropped.
    pub fn fill_column(&mut self, lx: usize, lz: usize, segments: &[Segment]) {
        let mut y = 0usize;
        for seg in segments {
            if seg.height <= 0 {
                continue;
            }
            let end = (y + seg.height as usize).min(self.sy);
            for yy in y..end {
                self.set_local(lx, yy, lz, seg.material);
            }
            y = end;
        }
        for yy in y..self.sy {
            self.set_local(lx, yy, lz, Material::Air);
        }
    }

    /// One past the highest non-air block in the column, 0 if empty.
    pub fn column_height(&self, lx: usize, lz: usize) -> usize {
        (0..self.sy)
            .rev()
            .find(|&y| !self.get_local(lx, y, lz).is_air())
            .map_or(0, |y| y + 1)
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_column_stacks_bottom_up() {
        let mut buf = ChunkBuf::new(ChunkCoord::new(0, 0), 4, 8);
        buf.fill_column(
            1,
            2,
            &[
                Segment::new(Material::Stone, 3),
                Segment::new(Material::Water, 2),
                Segment::new(Material::PackedIce, 1),
            ],
        );
        let col: Vec<Material> = (0..8).map(|y| buf.get_local(1, y, 2)).collect();
        use Material::*;
        assert_eq!(col, vec![Stone, Stone, Stone, Water, Water, PackedIce, Air, Air]);
        assert_eq!(buf.column_height(1, 2), 6);
        assert_eq!(buf.column_height(0, 0), 0);
    }

    #[test]
    fn fill_column_clips_and_overwrites() {
        let mut buf = ChunkBuf::new(ChunkCoord::new(0, 0), 2, 4);
        buf.fill_column(0, 0, &[Segment::new(Material::Stone, 10)]);
        assert_eq!(buf.column_height(0, 0), 4);
        buf.fill_column(0, 0, &[Segment::new(Material::Sand, 1)]);
        assert_eq!(buf.get_local(0, 0, 0), Material::Sand);
        assert_eq!(buf.column_height(0, 0), 1);
        assert!(buf.has_non_air());
        buf.fill_column(0, 0, &[]);
        assert!(buf.is_all_air());
    }
}
