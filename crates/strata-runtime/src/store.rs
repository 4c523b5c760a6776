use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use strata_blocks::Material;
use strata_chunk::ChunkBuf;
use strata_io::{LevelData, StoreError, WorldDir, read_chunk, write_chunk, write_level};
use strata_lighting::LightGrid;
use strata_world::{ChunkCoord, Segment};

/// Receives "chunk changed" notifications from column writes.
pub trait ChangeSink {
    fn notify(&mut self, coord: ChunkCoord);
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub resident: usize,
    pub unsaved: usize,
    pub created: u64,
    pub reloaded: u64,
    pub relit: u64,
    pub chunks_written: u64,
    pub saves: u64,
}

struct StoredChunk {
    buf: ChunkBuf,
    light: Option<LightGrid>,
}

/// Chunked block store backed by a world directory.
///
/// Chunks are created on first write. With `evict_after_save`, `save` drops
/// every chunk from memory and later writes reload it from disk.
pub struct ChunkStore {
    dir: WorldDir,
    chunk_size: usize,
    height: usize,
    evict_after_save: bool,
    level: LevelData,
    resident: HashMap<ChunkCoord, StoredChunk>,
    unsaved: HashSet<ChunkCoord>,
    stats: StoreStats,
}

impl ChunkStore {
    pub fn new(
        dir: WorldDir,
        name: &str,
        chunk_size: usize,
        height: usize,
        evict_after_save: bool,
    ) -> Self {
        Self {
            dir,
            chunk_size,
            height,
            evict_after_save,
            level: LevelData::flat(name, chunk_size, height),
            resident: HashMap::new(),
            unsaved: HashSet::new(),
            stats: StoreStats::default(),
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dir(&self) -> &WorldDir {
        &self.dir
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            resident: self.resident.len(),
            unsaved: self.unsaved.len(),
            ..self.stats
        }
    }

    pub fn set_spawn(&mut self, x: i32, y: i32, z: i32) {
        self.level.spawn_x = x;
        self.level.spawn_y = y;
        self.level.spawn_z = z;
    }

    /// Writes `segments` into column `(x, z)` and tells `sink` which chunk changed.
    pub fn write_column(
        &mut self,
        x: i32,
        z: i32,
        segments: &[Segment],
        sink: &mut dyn ChangeSink,
    ) -> Result<(), StoreError> {
        let coord = self.fill(x, z, segments)?;
        sink.notify(coord);
        Ok(())
    }

    /// Writes a column and relights its chunk straight away.
    pub fn write_column_now(&mut self, x: i32, z: i32, segments: &[Segment]) -> Result<(), StoreError> {
        let coord = self.fill(x, z, segments)?;
        self.relight(coord);
        Ok(())
    }

    fn fill(&mut self, x: i32, z: i32, segments: &[Segment]) -> Result<ChunkCoord, StoreError> {
        let coord = ChunkCoord::containing(x, z, self.chunk_size);
        let (x0, z0) = coord.origin(self.chunk_size);
        let chunk = self.chunk_entry(coord)?;
        chunk.buf.fill_column((x - x0) as usize, (z - z0) as usize, segments);
        chunk.light = None;
        self.unsaved.insert(coord);
        Ok(coord)
    }

    fn chunk_entry(&mut self, coord: ChunkCoord) -> Result<&mut StoredChunk, StoreError> {
        match self.resident.entry(coord) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let path = self.dir.chunk_path(coord);
                let chunk = if path.exists() {
                    let (buf, light) = read_chunk(&path)?;
                    self.stats.reloaded += 1;
                    StoredChunk { buf, light }
                } else {
                    self.stats.created += 1;
                    StoredChunk {
                        buf: ChunkBuf::new(coord, self.chunk_size, self.height),
                        light: None,
                    }
                };
                Ok(v.insert(chunk))
            }
        }
    }

    /// Recomputes skylight for one resident chunk. Returns false if it is not loaded.
    pub fn relight(&mut self, coord: ChunkCoord) -> bool {
        let Some(chunk) = self.resident.get_mut(&coord) else {
            log::warn!("relight requested for unloaded chunk ({}, {})", coord.cx, coord.cz);
            return false;
        };
        chunk.light = Some(LightGrid::compute(&chunk.buf));
        self.unsaved.insert(coord);
        self.stats.relit += 1;
        true
    }

    /// Writes every changed chunk and the level metadata.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let mut pending: Vec<ChunkCoord> = self.unsaved.iter().copied().collect();
        pending.sort_unstable();
        for coord in pending {
            if let Some(chunk) = self.resident.get(&coord) {
                write_chunk(&self.dir.chunk_path(coord), &chunk.buf, chunk.light.as_ref())?;
                self.stats.chunks_written += 1;
            }
            self.unsaved.remove(&coord);
        }
        write_level(&self.dir, &self.level)?;
        self.stats.saves += 1;
        if self.evict_after_save {
            self.resident.clear();
        }
        Ok(())
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.resident.get(&coord).map(|c| &c.buf)
    }

    pub fn light(&self, coord: ChunkCoord) -> Option<&LightGrid> {
        self.resident.get(&coord).and_then(|c| c.light.as_ref())
    }

    /// Block at a world position, if its chunk is loaded.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Material> {
        let coord = ChunkCoord::containing(x, z, self.chunk_size);
        self.chunk(coord)?.get_world(x, y, z)
    }
}
