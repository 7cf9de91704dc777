pub mod chunk;
pub mod coords;
pub mod names;
pub mod smp;

pub use chunk::{Chunk, ChunkHeader};
pub use coords::ChunkVec2;
pub use names::{BlockNames, BlockStateEntry, BlockTable, RuntimeId};
pub use smp::{Block, Layer, SubChunk, SubChunkHeader};
