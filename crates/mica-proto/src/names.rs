use std::collections::HashMap;

/// Session-scoped numeric block id as handed out by the server.
pub type RuntimeId = u32;

pub const AIR_ID: RuntimeId = 0;
pub const AIR_NAME: &str = "air";

/// Resolves runtime ids to names during decoding.
pub trait BlockNames {
    fn resolve(&self, id: RuntimeId) -> String;
}

pub fn placeholder_name(id: RuntimeId) -> String {
    format!("unknown_block_{id}")
}

/// One row of the block-state list sent at session start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStateEntry {
    pub name: String,
    pub runtime_id: Option<RuntimeId>,
}

impl BlockStateEntry {
    pub fn new(name: impl Into<String>, runtime_id: Option<RuntimeId>) -> Self {
        Self {
            name: name.into(),
            runtime_id,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BlockTable {
    names: HashMap<RuntimeId, String>,
}

impl BlockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a block-state list on top of the current table.
    /// Entries without an id are skipped; returns how many were applied.
    pub fn set_mappings<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = BlockStateEntry>,
    {
        let mut applied = 0;
        for entry in entries {
            if let Some(id) = entry.runtime_id {
                self.names.insert(id, entry.name);
                applied += 1;
            }
        }
        applied
    }

    pub fn insert(&mut self, id: RuntimeId, name: impl Into<String>) -> Option<String> {
        self.names.insert(id, name.into())
    }

    pub fn get(&self, id: RuntimeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries ordered by runtime id.
    pub fn sorted(&self) -> Vec<(RuntimeId, &str)> {
        let mut entries: Vec<_> = self
            .names
            .iter()
            .map(|(id, name)| (*id, name.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

impl BlockNames for BlockTable {
    fn resolve(&self, id: RuntimeId) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => placeholder_name(id),
        }
    }
}

#[test]
fn unknown_ids_get_placeholder() {
    let table = BlockTable::new();
    assert_eq!(table.resolve(2), "unknown_block_2");
    assert_eq!(table.resolve(300), "unknown_block_300");
}

#[test]
fn mappings_overwrite_and_skip_missing_ids() {
    let mut table = BlockTable::new();
    let applied = table.set_mappings([
        BlockStateEntry::new("minecraft:stone", Some(2)),
        BlockStateEntry::new("minecraft:dirt", None),
    ]);
    assert_eq!(applied, 1);
    assert_eq!(table.resolve(2), "minecraft:stone");
    assert_eq!(table.len(), 1);

    table.set_mappings([BlockStateEntry::new("minecraft:granite", Some(2))]);
    assert_eq!(table.resolve(2), "minecraft:granite");
    assert_eq!(table.resolve(3), "unknown_block_3");
}

#[test]
fn sorted_orders_by_id() {
    let mut table = BlockTable::new();
    table.insert(9, "minecraft:water");
    table.insert(1, "minecraft:stone");
    assert_eq!(
        table.sorted(),
        vec![(1, "minecraft:stone"), (9, "minecraft:water")]
    );
}
