//! The core lending protocol: the Comptroller and its vToken markets.

pub mod comptroller;
pub mod entities;
pub mod events;
pub mod operations;
#[cfg(test)]
pub(crate) mod test_util;
pub mod vtoken;

use crate::db::{Persister, TableSchema};
use crate::indexing::Subgraph;
use crate::store::{Entity, EntityStore};
use entities::*;

pub const NAMESPACE: &str = "venus";

pub const COMPTROLLER_DATA_SOURCE: &str = "Comptroller";
pub const VTOKEN_TEMPLATE: &str = "VToken";
pub const VTOKEN_UPDATED_EVENTS_TEMPLATE: &str = "VTokenUpdatedEvents";

pub const COMPTROLLER_ID: &str = "1";

/// Stored in place of a market value whose view call reverted.
pub const NOT_AVAILABLE_BIG_INT: i64 = -1;

/// Oracle prices are scaled by `10^(36 - underlyingDecimals)`.
pub const ORACLE_PRICE_DECIMALS: u32 = 36;

/// Borrow balances at or below this many wei are treated as closed positions.
pub const DUST_THRESHOLD: i64 = 10;

pub const NATIVE_NAME: &str = "Binance Coin";
pub const NATIVE_SYMBOL: &str = "BNB";
pub const NATIVE_DECIMALS: u32 = 18;

pub fn subgraph(persister: Box<dyn Persister>) -> Subgraph {
    Subgraph::new(NAMESPACE, EntityStore::new(NAMESPACE, persister))
        .with_template(VTOKEN_TEMPLATE)
        .with_template(VTOKEN_UPDATED_EVENTS_TEMPLATE)
        .with_indexer(Box::new(comptroller::ComptrollerIndexer::default()))
        .with_indexer(Box::new(vtoken::VTokenIndexer::default()))
        .with_indexer(Box::new(vtoken::VTokenUpdatedEventsIndexer::default()))
}

pub fn tables() -> Vec<TableSchema> {
    vec![
        Comptroller::table_schema(NAMESPACE),
        Market::table_schema(NAMESPACE),
        Account::table_schema(NAMESPACE),
        AccountVToken::table_schema(NAMESPACE),
        AccountVTokenTransaction::table_schema(NAMESPACE),
        MintEvent::table_schema(NAMESPACE),
        MintBehalfEvent::table_schema(NAMESPACE),
        RedeemEvent::table_schema(NAMESPACE),
        BorrowEvent::table_schema(NAMESPACE),
        RepayEvent::table_schema(NAMESPACE),
        LiquidationEvent::table_schema(NAMESPACE),
        TransferEvent::table_schema(NAMESPACE),
    ]
}
