// Subchunks of the byte-per-block payload: one header, then one dense
// 4096 byte pass per layer. Air (id 0) is never stored.

use crate::coords::{self, LocalPos, SUBCHUNK_VOLUME};
use crate::names::{BlockNames, RuntimeId, AIR_ID, AIR_NAME};
use log::{trace, warn};
use mica_codec::coding::{Decoder, Encoder};
use mica_codec::cursor::ByteCursor;
use mica_codec::error::{CodecError, Result};
use mica_macros::{CodecDecode, CodecEncode};
use serde::Serialize;
use std::io::{Cursor, Write};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub index: u16,
    pub runtime_id: RuntimeId,
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Block {
    pub fn new(index: u16, runtime_id: RuntimeId, name: String) -> Self {
        let LocalPos { x, y, z } = coords::index_to_local(index);
        Self {
            index,
            runtime_id,
            name,
            x,
            y,
            z,
        }
    }

    /// The implicit block for an empty slot.
    pub fn air(index: u16) -> Self {
        Self::new(index, AIR_ID, AIR_NAME.to_string())
    }

    pub fn is_air(&self) -> bool {
        self.runtime_id == AIR_ID
    }

    pub fn local(&self) -> LocalPos {
        LocalPos {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub index: u8,
    // ascending by `Block::index`
    pub blocks: Vec<Block>,
}

impl Layer {
    pub fn find(&self, index: u16) -> Option<&Block> {
        self.blocks
            .binary_search_by_key(&index, |block| block.index)
            .ok()
            .map(|at| &self.blocks[at])
    }

    /// Reads up to one full pass of block ids. Running out of bytes ends the
    /// pass early instead of failing. Returns `None` when the pass held only air.
    fn decode<N: BlockNames + ?Sized>(
        reader: &mut Cursor<&[u8]>,
        index: u8,
        names: &N,
    ) -> Option<Self> {
        let mut blocks = Vec::new();

        for slot in 0..SUBCHUNK_VOLUME as u16 {
            let Some(id) = reader.next_u8() else {
                warn!(
                    "Layer {index} truncated after {slot} of {SUBCHUNK_VOLUME} slots, keeping {} blocks.",
                    blocks.len()
                );
                break;
            };

            if id != 0 {
                let id = RuntimeId::from(id);
                blocks.push(Block::new(slot, id, names.resolve(id)));
            }
        }

        trace!("Layer {index}: {} non-air blocks", blocks.len());

        if blocks.is_empty() {
            None
        } else {
            Some(Self { index, blocks })
        }
    }

    fn encode_dense<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let mut dense = vec![0u8; SUBCHUNK_VOLUME];
        for block in &self.blocks {
            let id = u8::try_from(block.runtime_id)
                .map_err(|_| CodecError::IdTooWide(block.runtime_id))?;
            dense[block.index as usize] = id;
        }
        writer.write_all(&dense)?;
        Ok(dense.len())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, CodecDecode, CodecEncode)]
pub struct SubChunkHeader {
    pub version: i8,
    pub layer_count: i8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubChunk {
    /// Position among the decoded subchunks of the chunk, not an altitude.
    pub y: u8,
    pub version: i8,
    pub layers: Vec<Layer>,
}

impl SubChunk {
    /// Decodes one subchunk at the cursor, leaving the cursor after the last
    /// byte consumed.
    ///
    /// A missing header is a hard [`CodecError::BufferOverflow`]; a short
    /// layer is kept as far as it was read.
    pub fn decode<N: BlockNames + ?Sized>(
        reader: &mut Cursor<&[u8]>,
        y: u8,
        names: &N,
    ) -> Result<Self> {
        reader.ensure_header()?;
        let header = SubChunkHeader::decode(reader)?;

        let mut layers = Vec::new();
        for index in 0..header.layer_count.max(0) as u8 {
            if !reader.has_header() {
                trace!(
                    "Subchunk {y}: stopping at layer {index}/{}, {} bytes left",
                    header.layer_count,
                    reader.remaining()
                );
                break;
            }

            if let Some(layer) = Layer::decode(reader, index, names) {
                layers.push(layer);
            }
        }

        Ok(Self {
            y,
            version: header.version,
            layers,
        })
    }

    /// First block stored at `index`, searching layers in declaration order.
    pub fn find_block(&self, index: u16) -> Option<&Block> {
        self.layers.iter().find_map(|layer| layer.find(index))
    }

    pub fn block_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.blocks.len()).sum()
    }
}

impl Encoder for SubChunk {
    /// Writes the subchunk densely. Layers dropped for being empty come back
    /// as all-air passes so layer indices survive a decode.
    fn encode<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let layer_count = self
            .layers
            .iter()
            .map(|layer| layer.index as usize + 1)
            .max()
            .unwrap_or(0);

        let header = SubChunkHeader {
            version: self.version,
            layer_count: i8::try_from(layer_count).map_err(|_| CodecError::InvalidPayload {
                reason: format!("{layer_count} layers do not fit the header"),
            })?,
        };

        let mut written = header.encode(writer)?;
        for index in 0..layer_count {
            match self.layers.iter().find(|layer| layer.index as usize == index) {
                Some(layer) => written += layer.encode_dense(writer)?,
                None => {
                    writer.write_all(&[0u8; SUBCHUNK_VOLUME])?;
                    written += SUBCHUNK_VOLUME;
                }
            }
        }

        Ok(written)
    }
}
