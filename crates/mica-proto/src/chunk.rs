use crate::coords::{ChunkVec2, LocalPos};
use crate::names::BlockNames;
use crate::smp::SubChunk;
use log::debug;
use mica_codec::coding::{Decoder, Encoder};
use mica_codec::cursor::{ByteCursor, HEADER_LEN};
use mica_codec::error::{CodecError, Result};
use mica_macros::{CodecDecode, CodecEncode};
use serde::Serialize;
use std::io::{Cursor, Write};

#[derive(Clone, Debug, PartialEq, Eq, CodecDecode, CodecEncode)]
pub struct ChunkHeader {
    pub sub_chunk_count: i8,
    pub storage_version: i8,
}

/**
 * A chunk is a column of subchunks at chunk-grid coordinates `(x, z)`.
 * Subchunks keep the order they were sent in.
 */
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub x: i32,
    pub z: i32,
    /// Carried as sent; nothing branches on it.
    pub storage_version: i8,
    pub sub_chunks: Vec<SubChunk>,
}

impl Chunk {
    /// Decodes a full chunk payload.
    ///
    /// Fatal errors come back wrapped in [`CodecError::AtChunk`] with `(x, z)`.
    /// Subchunks declared past the end of the payload are dropped silently.
    pub fn decode<N: BlockNames + ?Sized>(
        payload: &[u8],
        x: i32,
        z: i32,
        names: &N,
    ) -> Result<Self> {
        Self::decode_columns(payload, x, z, names).map_err(|e| e.at_chunk(x, z))
    }

    fn decode_columns<N: BlockNames + ?Sized>(
        payload: &[u8],
        x: i32,
        z: i32,
        names: &N,
    ) -> Result<Self> {
        if payload.len() < HEADER_LEN {
            return Err(CodecError::too_short());
        }

        let mut reader = Cursor::new(payload);
        let header = ChunkHeader::decode(&mut reader)?;

        let mut sub_chunks = Vec::new();
        for y in 0..header.sub_chunk_count.max(0) as u8 {
            if !reader.has_header() {
                debug!(
                    "Chunk ({x}, {z}) declared {} subchunks, payload ended after {y}",
                    header.sub_chunk_count
                );
                break;
            }

            sub_chunks.push(SubChunk::decode(&mut reader, y, names)?);
        }

        if reader.remaining() > 0 {
            debug!(
                "Chunk ({x}, {z}): {} trailing bytes left unread",
                reader.remaining()
            );
        }

        Ok(Self {
            x,
            z,
            storage_version: header.storage_version,
            sub_chunks,
        })
    }

    pub fn position(&self) -> ChunkVec2 {
        ChunkVec2::new_local(self.x, self.z)
    }

    /// First subchunk sitting at `slot`.
    pub fn sub_chunk(&self, slot: i32) -> Option<&SubChunk> {
        self.sub_chunks
            .iter()
            .find(|sub| i32::from(sub.y) == slot)
    }

    pub fn block_count(&self) -> usize {
        self.sub_chunks.iter().map(SubChunk::block_count).sum()
    }

    // Returns the world coordinates of a block in the chunk column
    pub fn block_world_coordinates(&self, slot: i32, local: LocalPos) -> (i32, i32, i32) {
        let (start_x, start_z) = self.position().as_global();

        (
            start_x + local.x as i32,
            slot * 16 + local.y as i32,
            start_z + local.z as i32,
        )
    }

    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        self.encode(&mut payload)?;
        Ok(payload)
    }
}

impl Encoder for Chunk {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let header = ChunkHeader {
            sub_chunk_count: i8::try_from(self.sub_chunks.len()).map_err(|_| {
                CodecError::InvalidPayload {
                    reason: format!("{} subchunks do not fit the header", self.sub_chunks.len()),
                }
            })?,
            storage_version: self.storage_version,
        };

        let mut written = header.encode(writer)?;
        for sub in &self.sub_chunks {
            written += sub.encode(writer)?;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::SUBCHUNK_VOLUME;
    use crate::names::BlockTable;
    use crate::smp::{Block, Layer};

    fn single_block_payload() -> Vec<u8> {
        let mut data = vec![0x01, 0x08, 0x01, 0x01];
        let mut layer = vec![0u8; SUBCHUNK_VOLUME];
        layer[5] = 0x02;
        data.extend(layer);
        data
    }

    #[test]
    fn empty_chunk_header_only() {
        let chunk = Chunk::decode(&[0x00, 0x08], 2, 3, &BlockTable::new()).unwrap();
        assert_eq!(chunk.x, 2);
        assert_eq!(chunk.z, 3);
        assert_eq!(chunk.storage_version, 8);
        assert!(chunk.sub_chunks.is_empty());
    }

    #[test]
    fn short_payload_is_invalid() {
        for payload in [&[][..], &[0x01][..]] {
            let err = Chunk::decode(payload, 7, -2, &BlockTable::new()).unwrap_err();
            assert_eq!(err.chunk(), Some((7, -2)));
            assert!(matches!(err.root(), CodecError::InvalidPayload { reason } if reason == "too short"));
        }
    }

    #[test]
    fn decodes_single_block() {
        let payload = single_block_payload();
        let chunk = Chunk::decode(&payload, 0, 0, &BlockTable::new()).unwrap();

        assert_eq!(chunk.sub_chunks.len(), 1);
        let sub = &chunk.sub_chunks[0];
        assert_eq!(sub.version, 1);
        assert_eq!(sub.layers.len(), 1);
        assert_eq!(
            sub.layers[0].blocks,
            vec![Block {
                index: 5,
                runtime_id: 2,
                name: "unknown_block_2".to_string(),
                x: 5,
                y: 0,
                z: 0,
            }]
        );
    }

    #[test]
    fn excess_subchunk_count_keeps_parsed_ones() {
        let mut payload = single_block_payload();
        payload[0] = 5;

        let chunk = Chunk::decode(&payload, 1, 1, &BlockTable::new()).unwrap();
        assert_eq!(chunk.sub_chunks.len(), 1);
        assert_eq!(chunk.block_count(), 1);
    }

    #[test]
    fn trailing_single_byte_does_not_start_a_subchunk() {
        let mut payload = single_block_payload();
        payload[0] = 2;
        payload.push(0x01);

        let chunk = Chunk::decode(&payload, 0, 0, &BlockTable::new()).unwrap();
        assert_eq!(chunk.sub_chunks.len(), 1);
    }

    #[test]
    fn subchunk_slots_are_positional() {
        let mut payload = vec![0x03, 0x09];
        // three subchunks without layers
        payload.extend([0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);

        let chunk = Chunk::decode(&payload, 0, 0, &BlockTable::new()).unwrap();
        let slots: Vec<_> = chunk.sub_chunks.iter().map(|sub| sub.y).collect();
        let versions: Vec<_> = chunk.sub_chunks.iter().map(|sub| sub.version).collect();
        assert_eq!(slots, [0, 1, 2]);
        assert_eq!(versions, [1, 2, 3]);
        assert_eq!(chunk.sub_chunk(2).map(|sub| sub.version), Some(3));
        assert!(chunk.sub_chunk(3).is_none());
        assert!(chunk.sub_chunk(-1).is_none());
    }

    #[test]
    fn payload_from_chunk_decodes_back() {
        let mut table = BlockTable::new();
        table.insert(4, "minecraft:sand");

        let chunk = Chunk {
            x: -4,
            z: 9,
            storage_version: 8,
            sub_chunks: vec![
                SubChunk {
                    y: 0,
                    version: 1,
                    layers: vec![],
                },
                SubChunk {
                    y: 1,
                    version: 1,
                    layers: vec![Layer {
                        index: 0,
                        blocks: vec![
                            Block::new(0, 4, "minecraft:sand".to_string()),
                            Block::new(4000, 4, "minecraft:sand".to_string()),
                        ],
                    }],
                },
            ],
        };

        let payload = chunk.to_payload().unwrap();
        assert_eq!(payload.len(), 2 + 2 + 2 + SUBCHUNK_VOLUME);
        assert_eq!(Chunk::decode(&payload, -4, 9, &table).unwrap(), chunk);
    }

    #[test]
    fn world_coordinates_offset_by_chunk() {
        let chunk = Chunk {
            x: -1,
            z: 2,
            storage_version: 0,
            sub_chunks: vec![],
        };
        let local = LocalPos { x: 3, y: 4, z: 5 };
        assert_eq!(chunk.block_world_coordinates(2, local), (-13, 36, 37));
    }
}
