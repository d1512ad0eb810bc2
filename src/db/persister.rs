use super::db_mapper::TableSchema;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A stored entity: field name to value.
pub type Record = BTreeMap<String, Value>;

/// Trait for persisting entity records keyed by id.
#[async_trait]
pub trait Persister: Send + Sync {
    async fn load(&self, table: &TableSchema, id: &str) -> Result<Option<Record>>;

    /// Inserts the record, replacing any record already stored under `id`.
    async fn save(&mut self, table: &TableSchema, id: &str, record: &Record) -> Result<()>;
}

/// Keeps every table in memory. Used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryPersister {
    pub tables: BTreeMap<String, HashMap<String, Record>>,
}

impl MemoryPersister {
    pub fn new() -> Self {
        MemoryPersister {
            tables: BTreeMap::new(),
        }
    }

    pub fn record_count(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }
}

#[async_trait]
impl Persister for MemoryPersister {
    async fn load(&self, table: &TableSchema, id: &str) -> Result<Option<Record>> {
        Ok(self
            .tables
            .get(&table.name)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn save(&mut self, table: &TableSchema, id: &str, record: &Record) -> Result<()> {
        debug!("saving {} {}", table.name, id);
        self.tables
            .entry(table.name.clone())
            .or_insert_with(HashMap::new)
            .insert(id.to_string(), record.clone());
        Ok(())
    }
}
