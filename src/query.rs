use crate::error::{Error, Result};
use mica_proto::coords::{self, WIDTH, Z_SIZE};
use mica_proto::{Block, Chunk};

/// Looks up the block at local `x`/`z` and absolute altitude `y` in `chunk`.
///
/// Slots with nothing stored, including whole missing subchunks, come back as
/// a synthesized air block. Only `x` and `z` outside `0..16` are errors.
///
/// The returned block's `y` is always the local y inside its subchunk
/// (`index / 256`), for air too; it is never the absolute `y` passed in.
pub fn block_at(chunk: &Chunk, x: i32, y: i32, z: i32) -> Result<Block> {
    if !(0..WIDTH as i32).contains(&x) || !(0..Z_SIZE as i32).contains(&z) {
        return Err(Error::InvalidCoordinate { x, z });
    }

    let (slot, local_y) = coords::world_y_to_slot(y);
    let index = coords::local_to_index(local_y, x as u8, z as u8);

    let found = chunk
        .sub_chunk(slot)
        .and_then(|sub| sub.find_block(index))
        .cloned();

    Ok(found.unwrap_or_else(|| Block::air(index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_proto::{Layer, SubChunk};

    fn chunk_with(slot: u8, block: Block) -> Chunk {
        Chunk {
            x: 0,
            z: 0,
            storage_version: 8,
            sub_chunks: vec![SubChunk {
                y: slot,
                version: 1,
                layers: vec![Layer {
                    index: 0,
                    blocks: vec![block],
                }],
            }],
        }
    }

    #[test]
    fn finds_block_in_upper_subchunk() {
        let stone = Block::new(
            coords::local_to_index(3, 4, 5),
            1,
            "minecraft:stone".to_string(),
        );
        let chunk = chunk_with(2, stone.clone());

        assert_eq!(block_at(&chunk, 4, 35, 5).unwrap(), stone);
        assert!(block_at(&chunk, 4, 3, 5).unwrap().is_air());
    }

    #[test]
    fn missing_subchunk_is_air() {
        let chunk = chunk_with(0, Block::new(0, 1, "minecraft:stone".to_string()));

        let air = block_at(&chunk, 0, 16, 0).unwrap();
        assert!(air.is_air());
        assert_eq!(air.name, "air");
        assert_eq!(air.index, 0);

        assert!(block_at(&chunk, 0, -1, 0).unwrap().is_air());
    }

    #[test]
    fn air_reports_local_y() {
        let chunk = chunk_with(0, Block::new(0, 1, "minecraft:stone".to_string()));

        let air = block_at(&chunk, 3, 35, 4).unwrap();
        assert!(air.is_air());
        assert_eq!(air.index, coords::local_to_index(3, 3, 4));
        assert_eq!((air.x, air.y, air.z), (3, 3, 4));
    }

    #[test]
    fn out_of_range_columns_fail() {
        let chunk = chunk_with(0, Block::new(0, 1, "minecraft:stone".to_string()));

        for (x, z) in [(16, 0), (0, -1), (-1, 15), (15, 16)] {
            assert!(matches!(
                block_at(&chunk, x, 0, z),
                Err(Error::InvalidCoordinate { .. })
            ));
        }
        assert!(block_at(&chunk, 15, 0, 15).is_ok());
    }

    #[test]
    fn first_matching_subchunk_wins() {
        let mut chunk = chunk_with(0, Block::new(7, 1, "minecraft:stone".to_string()));
        chunk.sub_chunks.push(SubChunk {
            y: 0,
            version: 1,
            layers: vec![Layer {
                index: 0,
                blocks: vec![Block::new(7, 2, "minecraft:dirt".to_string())],
            }],
        });

        assert_eq!(block_at(&chunk, 7, 0, 0).unwrap().runtime_id, 1);
    }
}
