use super::event::LogEvent;
use super::indexer_registry::RegistryKey;
use super::templates::DataSourceTemplates;
use crate::chain::ChainReader;
use crate::store::EntityStore;
use async_trait::async_trait;
use std::slice::Iter;

/// Everything a handler may touch while indexing one event.
pub struct HandlerContext<'a> {
    pub store: &'a mut EntityStore,
    pub chain: &'a dyn ChainReader,
    pub templates: &'a mut DataSourceTemplates,
}

#[async_trait]
pub trait Indexer: Send + Sync {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> anyhow::Result<()>;
    fn id(&self) -> String;
    fn registry_keys(&self) -> Iter<RegistryKey>;
}
