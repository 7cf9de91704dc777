use crate::cache::{CachePolicy, ChunkCache};
use crate::error::Result;
use crate::mappings;
use crate::query;
use crate::settings::Settings;
use log::{debug, info};
use mica_proto::names::BlockNames;
use mica_proto::{Block, BlockStateEntry, BlockTable, Chunk, ChunkVec2, RuntimeId};
use std::sync::{Arc, RwLock};

/// One decoding session: its own block-name table and chunk cache.
///
/// Everything takes `&self`, so a `World` can sit behind an `Arc` and be fed
/// from several threads. Cache writes for the same coordinates are
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct World {
    names: RwLock<BlockTable>,
    cache: RwLock<ChunkCache>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            names: RwLock::new(BlockTable::new()),
            cache: RwLock::new(ChunkCache::new(policy)),
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self::with_policy(settings.cache.policy())
    }

    /// Merges a block-state list into the name table. Returns how many
    /// entries carried an id.
    pub fn set_block_mappings<I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = BlockStateEntry>,
    {
        let mut names = self.names.write()?;
        let applied = names.set_mappings(entries);
        info!(
            "Applied {applied} block mappings, table now holds {}",
            names.len()
        );
        Ok(applied)
    }

    pub fn load_block_mappings_json(&self, json: &str) -> Result<usize> {
        self.set_block_mappings(mappings::parse_block_states(json)?)
    }

    pub fn resolve(&self, id: RuntimeId) -> Result<String> {
        Ok(self.names.read()?.resolve(id))
    }

    pub fn block_table(&self) -> Result<BlockTable> {
        Ok(self.names.read()?.clone())
    }

    /// Decodes `payload` as the chunk at `(x, z)` and caches it.
    ///
    /// On failure nothing is cached and a previous chunk at `(x, z)` stays.
    pub fn decode_chunk(&self, payload: &[u8], x: i32, z: i32) -> Result<Arc<Chunk>> {
        let chunk = {
            let names = self.names.read()?;
            Chunk::decode(payload, x, z, &*names)?
        };

        debug!(
            "Decoded chunk ({x}, {z}): {} subchunks, {} blocks from {} bytes",
            chunk.sub_chunks.len(),
            chunk.block_count(),
            payload.len()
        );

        Ok(self.cache.write()?.insert(chunk))
    }

    /// Cached chunk at `(x, z)`. Counts as a use for a bounded cache.
    pub fn chunk(&self, x: i32, z: i32) -> Result<Option<Arc<Chunk>>> {
        Ok(self.cache.write()?.get(x, z))
    }

    pub fn cached_positions(&self) -> Result<Vec<ChunkVec2>> {
        Ok(self.cache.read()?.positions().collect())
    }

    /// Block at local `x`/`z` and absolute `y` in the cached chunk at
    /// `(chunk_x, chunk_z)`; `None` when that chunk was never decoded.
    pub fn block_at(
        &self,
        chunk_x: i32,
        chunk_z: i32,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<Option<Block>> {
        match self.chunk(chunk_x, chunk_z)? {
            Some(chunk) => query::block_at(&chunk, x, y, z).map(Some),
            None => Ok(None),
        }
    }
}
