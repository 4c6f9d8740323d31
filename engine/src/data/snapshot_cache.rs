// Explicit snapshot cache, keyed by source identity and version.
// Replaces ambient per-process memoization: the owner decides when a
// source is stale and invalidates it.
use crate::error::EngineError;
use shared::models::SnapshotTables;
use std::collections::HashMap;
use std::sync::Arc;

/// Identity of one snapshot version. Bumping `version` is how a caller
/// expresses "the sheet changed, reload it".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub source_id: String,
    pub version: u64,
}

impl SourceKey {
    pub fn new(source_id: impl Into<String>, version: u64) -> Self {
        SourceKey {
            source_id: source_id.into(),
            version,
        }
    }
}

#[derive(Default)]
pub struct SnapshotCache {
    entries: HashMap<SourceKey, Arc<SnapshotTables>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SourceKey) -> Option<Arc<SnapshotTables>> {
        self.entries.get(key).cloned()
    }

    /// Returns the cached tables for `key`, invoking `load` on a miss.
    /// Load failures are not cached; the next call retries.
    pub fn get_or_load<F>(&mut self, key: &SourceKey, load: F) -> Result<Arc<SnapshotTables>, EngineError>
    where
        F: FnOnce() -> Result<SnapshotTables, EngineError>,
    {
        if let Some(tables) = self.entries.get(key) {
            tracing::debug!(source_id = %key.source_id, version = key.version, "snapshot cache hit");
            return Ok(tables.clone());
        }
        tracing::debug!(source_id = %key.source_id, version = key.version, "snapshot cache miss, loading");
        let tables = Arc::new(load()?);
        self.entries.insert(key.clone(), tables.clone());
        Ok(tables)
    }

    /// Drops every cached version of one source. Returns how many entries
    /// were removed.
    pub fn invalidate(&mut self, source_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.source_id != source_id);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
