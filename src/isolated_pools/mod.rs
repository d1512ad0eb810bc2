//! Isolated lending pools: the pool registry and each pool's comptroller.

pub mod entities;
pub mod events;
pub mod operations;
pub mod pool;
pub mod pool_registry;
#[cfg(test)]
pub(crate) mod test_util;

use crate::db::{Persister, TableSchema};
use crate::indexing::Subgraph;
use crate::store::{Entity, EntityStore};
use entities::*;

pub const NAMESPACE: &str = "isolated-pools";

pub const POOL_REGISTRY_DATA_SOURCE: &str = "PoolRegistry";
/// Instantiated for every registered pool comptroller.
pub const POOL_TEMPLATE: &str = "Pool";

pub fn subgraph(persister: Box<dyn Persister>) -> Subgraph {
    Subgraph::new(NAMESPACE, EntityStore::new(NAMESPACE, persister))
        .with_template(POOL_TEMPLATE)
        .with_indexer(Box::new(pool_registry::PoolRegistryIndexer::default()))
        .with_indexer(Box::new(pool::PoolIndexer::default()))
}

pub fn tables() -> Vec<TableSchema> {
    vec![
        Pool::table_schema(NAMESPACE),
        Market::table_schema(NAMESPACE),
        Account::table_schema(NAMESPACE),
        AccountVToken::table_schema(NAMESPACE),
        PoolAction::table_schema(NAMESPACE),
        MarketAction::table_schema(NAMESPACE),
    ]
}
