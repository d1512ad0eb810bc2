use super::event::LogEvent;
use super::indexer::{HandlerContext, Indexer};
use log::debug;
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistryKey(String);

impl RegistryKey {
    pub fn new(key: &str) -> Self {
        RegistryKey(key.to_string())
    }

    /// Key for `event` emitted by contracts of `data_source`.
    pub fn for_event(data_source: &str, event: &str) -> Self {
        RegistryKey(format!("{}.{}", data_source, event))
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for RegistryKey {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

pub trait Register {
    fn register(&mut self, indexer: Box<dyn Indexer>, registry_key: Option<&str>);
}

#[derive(Default)]
pub struct IndexerRegistry {
    /// Maps string key values to ids of indexers
    handlers: HashMap<RegistryKey, Vec<usize>>,
    indexers: Vec<Box<dyn Indexer>>,
}

impl IndexerRegistry {
    pub fn new() -> Self {
        IndexerRegistry {
            handlers: HashMap::default(),
            indexers: vec![],
        }
    }

    /// Hands the event to every indexer registered for its key.
    pub async fn index_event(
        &self,
        ctx: &mut HandlerContext<'_>,
        event: &LogEvent,
    ) -> anyhow::Result<()> {
        let key = event.registry_key();
        match self.indexers_for_key(&key) {
            Some(handlers) => {
                for handler_id in handlers {
                    if let Some(indexer) = self.indexers.get(*handler_id) {
                        debug!("{} indexing {}", indexer.id(), key);
                        indexer.index(ctx, event).await?;
                    }
                }
            }
            None => debug!("no indexer for {}", key),
        }
        Ok(())
    }

    pub fn register_for_key(&mut self, registry_key: &str, indexer_id: usize) {
        self.handlers
            .entry(RegistryKey::new(registry_key))
            .or_insert_with(Vec::new)
            .push(indexer_id);
    }

    pub fn indexers_for_key(&self, registry_key: &str) -> Option<&Vec<usize>> {
        self.handlers.get(&RegistryKey::new(registry_key))
    }

    pub fn get_indexer(&self, id: usize) -> Option<&dyn Indexer> {
        self.indexers.get(id).map(|indexer| indexer.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &RegistryKey> {
        self.handlers.keys()
    }
}

impl Register for IndexerRegistry {
    fn register(&mut self, indexer: Box<dyn Indexer>, registry_key: Option<&str>) {
        let id = self.indexers.len();
        if let Some(registry_key) = registry_key {
            self.register_for_key(registry_key, id);
        }
        let keys: Vec<RegistryKey> = indexer.registry_keys().cloned().collect();
        for registry_key in keys {
            debug!("registering {}", &registry_key);
            self.register_for_key(&registry_key, id);
        }
        self.indexers.push(indexer);
    }
}
