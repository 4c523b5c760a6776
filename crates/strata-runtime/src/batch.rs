use hashbrown::HashSet;
use strata_io::StoreError;
use strata_world::{ChunkCoord, Segment};

use crate::store::{ChangeSink, ChunkStore};

/// Distinct chunks touched since the last flush.
#[derive(Default, Debug, Clone)]
pub struct DirtySet {
    chunks: HashSet<ChunkCoord>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    /// Empties the set, returning its chunks in coordinate order.
    pub fn drain_sorted(&mut self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = self.chunks.drain().collect();
        out.sort_unstable();
        out
    }
}

impl ChangeSink for DirtySet {
    #[inline]
    fn notify(&mut self, coord: ChunkCoord) {
        self.chunks.insert(coord);
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub columns: u64,
    pub chunks_relit: usize,
}

/// Write scope that defers relighting until it ends.
///
/// Column writes only record their chunk. Every recorded chunk is relit
/// exactly once when the scope is finished or dropped, including on early
/// return or unwinding.
pub struct BatchScope<'s> {
    store: &'s mut ChunkStore,
    dirty: DirtySet,
    columns: u64,
    flushed: bool,
}

impl<'s> BatchScope<'s> {
    pub fn new(store: &'s mut ChunkStore) -> Self {
        Self {
            store,
            dirty: DirtySet::new(),
            columns: 0,
            flushed: false,
        }
    }

    pub fn write_column(&mut self, x: i32, z: i32, segments: &[Segment]) -> Result<(), StoreError> {
        self.store.write_column(x, z, segments, &mut self.dirty)?;
        self.columns += 1;
        Ok(())
    }

    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    pub fn store(&self) -> &ChunkStore {
        self.store
    }

    /// Relights the batch's chunks and ends the scope.
    pub fn finish(mut self) -> BatchReport {
        let chunks_relit = self.flush();
        BatchReport {
            columns: self.columns,
            chunks_relit,
        }
    }

    fn flush(&mut self) -> usize {
        if self.flushed {
            return 0;
        }
        self.flushed = true;
        let chunks = self.dirty.drain_sorted();
        for &coord in &chunks {
            self.store.relight(coord);
        }
        chunks.len()
    }
}

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        let n = self.flush();
        if n > 0 {
            log::debug!("batch scope dropped early; relit {} chunk(s)", n);
        }
    }
}

impl ChunkStore {
    pub fn begin_batch(&mut self) -> BatchScope<'_> {
        BatchScope::new(self)
    }
}
