//! Venus governance: GovernorBravo proposals and votes, XVS balances and
//! delegation.

pub mod entities;
pub mod events;
pub mod governor;
pub mod operations;
#[cfg(test)]
pub(crate) mod test_util;
pub mod token;

use crate::db::{Persister, TableSchema};
use crate::indexing::Subgraph;
use crate::store::{Entity, EntityStore};
use entities::*;

pub const NAMESPACE: &str = "venus-governance";

pub const GOVERNOR_DATA_SOURCE: &str = "GovernorBravo";
pub const XVS_DATA_SOURCE: &str = "XVS";

pub const GOVERNANCE_ID: &str = "GOVERNANCE";
pub const XVS_DECIMALS: u32 = 18;

pub fn subgraph(persister: Box<dyn Persister>) -> Subgraph {
    Subgraph::new(NAMESPACE, EntityStore::new(NAMESPACE, persister))
        .with_indexer(Box::new(governor::GovernorIndexer::default()))
        .with_indexer(Box::new(token::XvsIndexer::default()))
}

pub fn tables() -> Vec<TableSchema> {
    vec![
        Governance::table_schema(NAMESPACE),
        Delegate::table_schema(NAMESPACE),
        TokenHolder::table_schema(NAMESPACE),
        Proposal::table_schema(NAMESPACE),
        Vote::table_schema(NAMESPACE),
    ]
}
