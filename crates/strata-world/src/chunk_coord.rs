use serde::{Deserialize, Serialize};

/// Horizontal chunk index. Chunks span the full world height, so only x/z matter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk holding world column `(x, z)` for chunks `size` blocks wide.
    #[inline]
    pub fn containing(x: i32, z: i32, size: usize) -> Self {
        let s = size as i32;
        Self {
            cx: x.div_euclid(s),
            cz: z.div_euclid(s),
        }
    }

    /// World-space origin (min x, min z) of this chunk.
    #[inline]
    pub fn origin(self, size: usize) -> (i32, i32) {
        let s = size as i32;
        (self.cx * s, self.cz * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containing_rounds_toward_negative_infinity() {
        assert_eq!(ChunkCoord::containing(0, 0, 16), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::containing(15, 16, 16), ChunkCoord::new(0, 1));
        assert_eq!(ChunkCoord::containing(-1, -16, 16), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::containing(-17, 3, 16), ChunkCoord::new(-2, 0));
    }

    #[test]
    fn origin_contains_itself() {
        let c = ChunkCoord::new(-3, 7);
        let (x0, z0) = c.origin(16);
        assert_eq!(ChunkCoord::containing(x0, z0, 16), c);
        assert_eq!(ChunkCoord::containing(x0 + 15, z0 + 15, 16), c);
        assert_eq!(ChunkCoord::containing(x0 + 16, z0, 16), ChunkCoord::new(c.cx + 1, c.cz));
    }
}
