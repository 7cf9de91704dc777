use mica_proto::{BlockTable, Chunk};
use std::fmt::{self, Write};

/// Human readable dump of a decoded chunk. With `list_blocks` every stored
/// block is printed as well.
pub fn describe_chunk(chunk: &Chunk, list_blocks: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "Chunk ({}, {}) storage version {}: {} subchunks, {} blocks",
        chunk.x,
        chunk.z,
        chunk.storage_version,
        chunk.sub_chunks.len(),
        chunk.block_count()
    )?;

    for sub in &chunk.sub_chunks {
        writeln!(
            out,
            "  SubChunk {} (version {}): {} layers",
            sub.y,
            sub.version,
            sub.layers.len()
        )?;

        for layer in &sub.layers {
            writeln!(out, "    Layer {}: {} blocks", layer.index, layer.blocks.len())?;

            if list_blocks {
                for block in &layer.blocks {
                    let (wx, wy, wz) =
                        chunk.block_world_coordinates(i32::from(sub.y), block.local());
                    writeln!(
                        out,
                        "      [{:4}] {} (#{}) local ({}, {}, {}) world ({wx}, {wy}, {wz})",
                        block.index, block.name, block.runtime_id, block.x, block.y, block.z
                    )?;
                }
            }
        }
    }

    Ok(out)
}

pub fn describe_table(table: &BlockTable) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Block table: {} entries", table.len())?;
    for (id, name) in table.sorted() {
        writeln!(out, "  {id:>5} => {name}")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_proto::{Block, Layer, SubChunk};

    #[test]
    fn chunk_report_lists_structure() {
        let chunk = Chunk {
            x: 1,
            z: 0,
            storage_version: 8,
            sub_chunks: vec![SubChunk {
                y: 0,
                version: 1,
                layers: vec![Layer {
                    index: 0,
                    blocks: vec![Block::new(5, 2, "minecraft:stone".to_string())],
                }],
            }],
        };

        let brief = describe_chunk(&chunk, false).unwrap();
        assert!(brief.starts_with("Chunk (1, 0) storage version 8: 1 subchunks, 1 blocks"));
        assert!(brief.contains("SubChunk 0 (version 1): 1 layers"));
        assert!(!brief.contains("minecraft:stone"));

        let full = describe_chunk(&chunk, true).unwrap();
        assert!(full.contains("minecraft:stone (#2) local (5, 0, 0) world (21, 0, 0)"));
    }

    #[test]
    fn table_report_is_sorted() {
        let mut table = BlockTable::new();
        table.insert(10, "minecraft:water");
        table.insert(2, "minecraft:stone");

        let report = describe_table(&table).unwrap();
        let stone = report.find("minecraft:stone").unwrap();
        let water = report.find("minecraft:water").unwrap();
        assert!(report.starts_with("Block table: 2 entries"));
        assert!(stone < water);
    }
}
