// Block-state lists as delivered by the session layer, e.g.
// [{"name": "minecraft:stone", "runtimeId": 1}, ...]

use crate::error::Result;
use mica_proto::{BlockStateEntry, RuntimeId};
use serde_json::Value;

/// Parses a JSON array of block states.
///
/// Rows without a string `name` are dropped. A `runtimeId` that is missing or
/// not a non-negative integer leaves the entry without an id. Only a document
/// that is not an array is an error.
pub fn parse_block_states(json: &str) -> Result<Vec<BlockStateEntry>> {
    let rows: Vec<Value> = serde_json::from_str(json)?;

    let entries = rows
        .iter()
        .filter_map(|row| {
            let name = row.get("name")?.as_str()?;
            let runtime_id = row
                .get("runtimeId")
                .and_then(Value::as_u64)
                .and_then(|id| RuntimeId::try_from(id).ok());
            Some(BlockStateEntry::new(name, runtime_id))
        })
        .collect();

    Ok(entries)
}

#[test]
fn parses_and_tolerates_malformed_rows() {
    let entries = parse_block_states(
        r#"[
            {"name": "minecraft:stone", "runtimeId": 2},
            {"name": "minecraft:dirt"},
            {"name": "minecraft:glass", "runtimeId": -4},
            {"name": "minecraft:sand", "runtimeId": "9"},
            {"runtimeId": 7},
            {"name": "minecraft:water", "runtimeId": 9, "extra": true}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        entries,
        vec![
            BlockStateEntry::new("minecraft:stone", Some(2)),
            BlockStateEntry::new("minecraft:dirt", None),
            BlockStateEntry::new("minecraft:glass", None),
            BlockStateEntry::new("minecraft:sand", None),
            BlockStateEntry::new("minecraft:water", Some(9)),
        ]
    );
}

#[test]
fn non_array_is_an_error() {
    assert!(parse_block_states(r#"{"name": "minecraft:stone"}"#).is_err());
}
