use std::collections::HashMap;

use tracing::debug;

use crate::types::{DuplicateId, Verse};

/// Lookup from verse id to the verse's position in its collection.
///
/// Built once per collection. When two records share an id, the later one
/// wins and the overwrite is kept in `duplicates`.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    by_id: HashMap<String, usize>,
    duplicates: Vec<DuplicateId>,
}

impl IdIndex {
    /// Returns the position of the verse with the given id.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids that appeared more than once, in the order the overwrites happened.
    pub fn duplicates(&self) -> &[DuplicateId] {
        &self.duplicates
    }
}

/// Builds an id index over `verses`.
///
/// Duplicate ids resolve last-write-wins; each overwrite is recorded in
/// `IdIndex::duplicates` and logged at debug level.
pub fn index_by_id(verses: &[Verse]) -> IdIndex {
    let mut by_id: HashMap<String, usize> = HashMap::with_capacity(verses.len());
    let mut duplicates = Vec::new();

    for (position, verse) in verses.iter().enumerate() {
        if let Some(replaced) = by_id.insert(verse.id.clone(), position) {
            debug!(
                id = %verse.id,
                replaced,
                kept = position,
                "duplicate verse id; later record wins"
            );
            duplicates.push(DuplicateId {
                id: verse.id.clone(),
                replaced,
                kept: position,
            });
        }
    }

    IdIndex { by_id, duplicates }
}
