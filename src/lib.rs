pub mod cache;
pub mod error;
pub mod mappings;
pub mod query;
pub mod report;
pub mod settings;
pub mod world;

pub use cache::{CachePolicy, ChunkCache};
pub use error::{Error, Result};
pub use query::block_at;
pub use settings::Settings;
pub use world::World;

pub use mica_codec::error::CodecError;
pub use mica_proto::{Block, BlockStateEntry, BlockTable, Chunk, ChunkVec2, Layer, SubChunk};
