use super::event::LogEvent;
use super::indexer::{HandlerContext, Indexer};
use super::indexer_registry::{IndexerRegistry, Register};
use super::templates::DataSourceTemplates;
use crate::chain::ChainReader;
use crate::store::EntityStore;
use log::debug;

/// A registry of indexers together with the store and templates they write to.
pub struct Subgraph {
    pub name: String,
    pub registry: IndexerRegistry,
    pub store: EntityStore,
    pub templates: DataSourceTemplates,
}

impl Subgraph {
    pub fn new(name: &str, store: EntityStore) -> Self {
        Subgraph {
            name: name.to_string(),
            registry: IndexerRegistry::new(),
            store,
            templates: DataSourceTemplates::new(),
        }
    }

    pub fn with_indexer(mut self, indexer: Box<dyn Indexer>) -> Self {
        self.registry.register(indexer, None);
        self
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.templates.declare(template);
        self
    }

    /// Indexes one event. Events of a template data source are dropped unless
    /// the emitting address has been created as an instance of it.
    pub async fn handle_event(
        &mut self,
        chain: &dyn ChainReader,
        event: &LogEvent,
    ) -> anyhow::Result<()> {
        if !self.templates.accepts(&event.data_source, &event.address) {
            debug!(
                "{}: {} from {} is not a known {} instance",
                self.name, event.name, event.address, event.data_source
            );
            return Ok(());
        }
        let mut ctx = HandlerContext {
            store: &mut self.store,
            chain,
            templates: &mut self.templates,
        };
        self.registry.index_event(&mut ctx, event).await
    }
}
