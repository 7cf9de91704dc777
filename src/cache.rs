use log::{debug, warn};
use mica_proto::{Chunk, ChunkVec2};
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep every chunk until it is decoded again.
    #[default]
    Unbounded,

    /// Keep at most `capacity` chunks, dropping the least recently used one.
    /// Both decodes and lookups count as a use.
    Bounded { capacity: NonZeroUsize },
}

/// Latest decoded chunk per chunk coordinate.
///
/// Entries are shared as `Arc<Chunk>`, so replacing one never disturbs a
/// handle a caller already holds.
#[derive(Debug, Default)]
pub struct ChunkCache {
    policy: CachePolicy,
    // X-Z -> Column
    chunks: HashMap<ChunkVec2, Arc<Chunk>>,
    // least recently used first
    order: VecDeque<ChunkVec2>,
}

impl ChunkCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            chunks: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Stores `chunk` at its own coordinates, replacing whatever was there.
    pub fn insert(&mut self, chunk: Chunk) -> Arc<Chunk> {
        let pos = chunk.position();
        let chunk = Arc::new(chunk);

        if self.chunks.insert(pos, chunk.clone()).is_some() {
            debug!("Replacing cached chunk ({}, {})", pos.x, pos.z);
        }
        self.touch(pos);

        if let CachePolicy::Bounded { capacity } = self.policy {
            while self.chunks.len() > capacity.get() {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.chunks.remove(&oldest);
                warn!(
                    "Chunk cache is full ({} entries), evicted ({}, {})",
                    capacity, oldest.x, oldest.z
                );
            }
        }

        chunk
    }

    /// Looks up the chunk at `(x, z)`. Under [`CachePolicy::Bounded`] a hit
    /// marks the entry as most recently used.
    pub fn get(&mut self, x: i32, z: i32) -> Option<Arc<Chunk>> {
        let pos = ChunkVec2::new_local(x, z);
        let chunk = self.chunks.get(&pos).cloned()?;
        if matches!(self.policy, CachePolicy::Bounded { .. }) {
            self.touch(pos);
        }
        Some(chunk)
    }

    /// Looks up the chunk at `(x, z)` without touching recency.
    pub fn peek(&self, x: i32, z: i32) -> Option<Arc<Chunk>> {
        self.chunks.get(&ChunkVec2::new_local(x, z)).cloned()
    }

    fn touch(&mut self, pos: ChunkVec2) {
        if self.order.back() != Some(&pos) {
            self.order.retain(|cached| *cached != pos);
            self.order.push_back(pos);
        }
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        self.chunks.contains_key(&ChunkVec2::new_local(x, z))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Cached coordinates, least recently used first.
    pub fn positions(&self) -> impl Iterator<Item = ChunkVec2> + '_ {
        self.order.iter().copied()
    }
}
