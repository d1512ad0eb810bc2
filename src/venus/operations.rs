use super::entities::*;
use super::{
    COMPTROLLER_ID, NATIVE_DECIMALS, NATIVE_NAME, NATIVE_SYMBOL, NOT_AVAILABLE_BIG_INT,
    ORACLE_PRICE_DECIMALS,
};
use crate::chain::MarketSnapshot;
use crate::indexing::{HandlerContext, LogEvent};
use crate::store::EntityStore;
use crate::util::ids::{account_vtoken_id, account_vtoken_transaction_id};
use crate::util::{Address, BigDecimal, BigInt};
use anyhow::{Context, Result};
use log::{debug, warn};

pub async fn get_or_create_comptroller(store: &mut EntityStore) -> Result<Comptroller> {
    if let Some(comptroller) = store.load::<Comptroller>(COMPTROLLER_ID).await? {
        return Ok(comptroller);
    }
    Ok(Comptroller {
        id: COMPTROLLER_ID.to_string(),
        price_oracle: None,
        close_factor_mantissa: BigInt::zero(),
        liquidation_incentive_mantissa: BigInt::zero(),
        max_assets: BigInt::zero(),
    })
}

/// Creates and saves a market for `vtoken` from its on-chain metadata.
pub async fn create_market(ctx: &mut HandlerContext<'_>, vtoken: &Address) -> Result<Market> {
    let metadata = ctx
        .chain
        .vtoken_metadata(vtoken)
        .await
        .with_context(|| format!("creating market {}", vtoken))?;

    let (underlying_address, underlying_name, underlying_symbol, underlying_decimals) =
        match metadata.underlying {
            Some(token) => (token.address, token.name, token.symbol, token.decimals),
            None => (
                Address::zero(),
                NATIVE_NAME.to_string(),
                NATIVE_SYMBOL.to_string(),
                NATIVE_DECIMALS,
            ),
        };

    let mut market = Market {
        id: vtoken.to_string(),
        name: metadata.name,
        symbol: metadata.symbol,
        v_token_decimals: metadata.decimals,
        underlying_address,
        underlying_name,
        underlying_symbol,
        underlying_decimals,
        underlying_price_mantissa: BigInt::zero(),
        underlying_price_usd: BigDecimal::zero(),
        interest_rate_model_address: metadata.interest_rate_model,
        reserve_factor: metadata.reserve_factor_mantissa,
        collateral_factor_mantissa: BigInt::zero(),
        exchange_rate_mantissa: BigInt::zero(),
        borrow_index_mantissa: BigInt::zero(),
        reserves_mantissa: BigInt::zero(),
        total_borrows_mantissa: BigInt::zero(),
        total_supply_mantissa: BigInt::zero(),
        cash_mantissa: BigInt::zero(),
        borrow_rate_mantissa: BigInt::zero(),
        supply_rate_mantissa: BigInt::zero(),
        accrual_block_number: 0,
        block_timestamp: 0,
        supplier_count: BigInt::zero(),
        borrower_count: BigInt::zero(),
        borrower_count_adjusted: BigInt::zero(),
        total_xvs_distributed_mantissa: BigInt::zero(),
    };
    update_underlying_price(ctx, &mut market, vtoken).await?;
    ctx.store.save(&market).await?;
    Ok(market)
}

/// Loads the market, creating it if needed, and brings its rates up to date
/// with the block of `event`.
pub async fn get_or_create_market(
    ctx: &mut HandlerContext<'_>,
    vtoken: &Address,
    event: &LogEvent,
) -> Result<Market> {
    let mut market = match ctx.store.load::<Market>(vtoken.as_str()).await? {
        Some(market) => market,
        None => create_market(ctx, vtoken).await?,
    };
    if market.accrual_block_number != event.block.number {
        update_market(ctx, &mut market, vtoken, event).await?;
        ctx.store.save(&market).await?;
    }
    Ok(market)
}

/// The value of a view call, or the not-available marker when it reverted.
pub fn value_or_not_available(value: Option<BigInt>) -> BigInt {
    value.unwrap_or_else(|| BigInt::from(NOT_AVAILABLE_BIG_INT))
}

/// Oracle price mantissa of one whole underlying token, in USD.
pub fn underlying_price_usd(price_mantissa: &BigInt, underlying_decimals: u32) -> BigDecimal {
    let scale = ORACLE_PRICE_DECIMALS.saturating_sub(underlying_decimals);
    BigDecimal::from_mantissa(price_mantissa, scale)
}

async fn update_market(
    ctx: &mut HandlerContext<'_>,
    market: &mut Market,
    vtoken: &Address,
    event: &LogEvent,
) -> Result<()> {
    let snapshot = match ctx.chain.market_snapshot(vtoken).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("market {} state not available: {:#}", vtoken, e);
            MarketSnapshot::default()
        }
    };
    // Without an accrual block, stamp the event's so the block is not read again.
    market.accrual_block_number = snapshot.accrual_block_number.unwrap_or(event.block.number);
    market.block_timestamp = event.block.timestamp;
    market.exchange_rate_mantissa = value_or_not_available(snapshot.exchange_rate_mantissa);
    market.borrow_index_mantissa = value_or_not_available(snapshot.borrow_index_mantissa);
    market.reserves_mantissa = value_or_not_available(snapshot.reserves_mantissa);
    market.total_borrows_mantissa = value_or_not_available(snapshot.total_borrows_mantissa);
    market.total_supply_mantissa = value_or_not_available(snapshot.total_supply_mantissa);
    market.cash_mantissa = value_or_not_available(snapshot.cash_mantissa);
    market.borrow_rate_mantissa = value_or_not_available(snapshot.borrow_rate_mantissa);
    market.supply_rate_mantissa = value_or_not_available(snapshot.supply_rate_mantissa);
    update_underlying_price(ctx, market, vtoken).await
}

/// Reads the oracle price once the comptroller has an oracle. A reverted
/// price call keeps the last known price.
async fn update_underlying_price(
    ctx: &mut HandlerContext<'_>,
    market: &mut Market,
    vtoken: &Address,
) -> Result<()> {
    let comptroller = get_or_create_comptroller(ctx.store).await?;
    let oracle = match comptroller.price_oracle {
        Some(oracle) => oracle,
        None => return Ok(()),
    };
    match ctx.chain.underlying_price(&oracle, vtoken).await {
        Ok(price) => {
            market.underlying_price_usd = underlying_price_usd(&price, market.underlying_decimals);
            market.underlying_price_mantissa = price;
        }
        Err(e) => warn!("no underlying price for {}: {:#}", vtoken, e),
    }
    Ok(())
}

/// Loads the account, creating and saving it on first sight.
pub async fn get_or_create_account(store: &mut EntityStore, id: &Address) -> Result<Account> {
    if let Some(account) = store.load::<Account>(id.as_str()).await? {
        return Ok(account);
    }
    debug!("new account {}", id);
    let account = Account {
        id: id.to_string(),
        count_liquidated: 0,
        count_liquidator: 0,
        has_borrowed: false,
    };
    store.save(&account).await?;
    Ok(account)
}

/// The account's position in `market_id`, stamped with the block of `event`.
/// Callers save it after applying their changes.
pub async fn get_or_create_account_vtoken(
    store: &mut EntityStore,
    market_id: &str,
    symbol: &str,
    account_id: &str,
    event: &LogEvent,
) -> Result<AccountVToken> {
    let id = account_vtoken_id(market_id, account_id);
    let mut account_vtoken = match store.load::<AccountVToken>(&id).await? {
        Some(account_vtoken) => account_vtoken,
        None => AccountVToken {
            id,
            market: market_id.to_string(),
            account: account_id.to_string(),
            symbol: symbol.to_string(),
            entered_market: false,
            accrual_block_number: 0,
            v_token_balance_mantissa: BigInt::zero(),
            total_underlying_supplied_mantissa: BigInt::zero(),
            total_underlying_redeemed_mantissa: BigInt::zero(),
            account_borrow_index_mantissa: BigInt::zero(),
            total_underlying_borrowed_mantissa: BigInt::zero(),
            total_underlying_repaid_mantissa: BigInt::zero(),
            stored_borrow_balance_mantissa: BigInt::zero(),
        },
    };
    account_vtoken.accrual_block_number = event.block.number;
    Ok(account_vtoken)
}

pub async fn get_or_create_account_vtoken_transaction(
    store: &mut EntityStore,
    account_vtoken_id: &str,
    event: &LogEvent,
) -> Result<AccountVTokenTransaction> {
    let id = account_vtoken_transaction_id(account_vtoken_id, event);
    if let Some(transaction) = store.load::<AccountVTokenTransaction>(&id).await? {
        return Ok(transaction);
    }
    let transaction = AccountVTokenTransaction {
        id,
        account: account_vtoken_id.to_string(),
        tx_hash: event.transaction.hash.clone(),
        timestamp: event.block.timestamp,
        block: event.block.number,
        log_index: event.log_index,
    };
    store.save(&transaction).await?;
    Ok(transaction)
}
