pub mod event;
pub mod indexer;
pub mod indexer_registry;
pub mod subgraph;
pub mod templates;

pub use event::{BlockInfo, LogEvent, TransactionInfo};
pub use indexer::{HandlerContext, Indexer};
pub use indexer_registry::{IndexerRegistry, Register, RegistryKey};
pub use subgraph::Subgraph;
pub use templates::DataSourceTemplates;
