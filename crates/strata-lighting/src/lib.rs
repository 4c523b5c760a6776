//! Chunk-local skylight.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use strata_blocks::Material;
use strata_blocks::material::MAX_LIGHT;
use strata_chunk::ChunkBuf;

#[cfg(test)]
mod tests;

// face order: +Y, -Y, +X, -X, +Z, -Z
const FACES: [(i32, i32, i32); 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightGrid {
    pub(crate) sx: usize,
    pub(crate) sy: usize,
    pub(crate) sz: usize,
    pub(crate) skylight: Vec<u8>,
    // per column, index = z * sx + x
    pub(crate) height_map: Vec<i32>,
}

impl LightGrid {
    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            sx,
            sy,
            sz,
            skylight: vec![0; sx * sy * sz],
            height_map: vec![0; sx * sz],
        }
    }

    /// Rebuilds skylight for one chunk from scratch.
    ///
    /// Light enters every column at full strength, loses each block's opacity on
    /// the way down, then floods sideways and down, losing at least 1 per step.
    /// Neighbouring chunks are not consulted.
    pub fn compute(buf: &ChunkBuf) -> Self {
        let (sx, sy, sz) = (buf.sx, buf.sy, buf.sz);
        let mut lg = Self::new(sx, sy, sz);
        let mut queue: VecDeque<(usize, usize, usize, u8)> = VecDeque::new();

        for z in 0..sz {
            for x in 0..sx {
                lg.height_map[z * sx + x] = buf.column_height(x, z) as i32;
                let mut level = MAX_LIGHT;
                for y in (0..sy).rev() {
                    if level == 0 {
                        break;
                    }
                    level = level.saturating_sub(buf.get_local(x, y, z).light_opacity());
                    let i = lg.idx(x, y, z);
                    lg.skylight[i] = level;
                    if level > 1 {
                        queue.push_back((x, y, z, level));
                    }
                }
            }
        }

        while let Some((x, y, z, level)) = queue.pop_front() {
            for (dx, dy, dz) in FACES {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                let nz = z as i32 + dz;
                if nx < 0 || ny < 0 || nz < 0 || nx >= sx as i32 || ny >= sy as i32 || nz >= sz as i32 {
                    continue;
                }
                let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                let cost = step_cost(buf.get_local(nx, ny, nz));
                if level <= cost {
                    continue;
                }
                let next = level - cost;
                let ni = lg.idx(nx, ny, nz);
                if lg.skylight[ni] < next {
                    lg.skylight[ni] = next;
                    queue.push_back((nx, ny, nz, next));
                }
            }
        }
        lg
    }

    #[inline]
    pub fn skylight_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.skylight[self.idx(x, y, z)]
    }

    #[inline]
    pub fn height_at(&self, x: usize, z: usize) -> i32 {
        self.height_map[z * self.sx + x]
    }

    pub fn skylight(&self) -> &[u8] {
        &self.skylight
    }

    pub fn height_map(&self) -> &[i32] {
        &self.height_map
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.sx, self.sy, self.sz)
    }

    /// Rebuilds a grid from stored planes; `None` if the lengths do not match.
    pub fn from_parts(
        sx: usize,
        sy: usize,
        sz: usize,
        skylight: Vec<u8>,
        height_map: Vec<i32>,
    ) -> Option<Self> {
        if skylight.len() != sx * sy * sz || height_map.len() != sx * sz {
            return None;
        }
        Some(Self {
            sx,
            sy,
            sz,
            skylight,
            height_map,
        })
    }
}

#[inline]
fn step_cost(m: Material) -> u8 {
    m.light_opacity().max(1)
}
