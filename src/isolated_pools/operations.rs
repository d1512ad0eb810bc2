use super::entities::{Account, AccountVToken, Market, Pool};
use crate::chain::PoolData;
use crate::indexing::{HandlerContext, LogEvent};
use crate::store::EntityStore;
use crate::util::ids::account_vtoken_id;
use crate::util::{Address, BigInt};
use anyhow::{Context, Result};

pub async fn create_pool(
    store: &mut EntityStore,
    comptroller: &Address,
    data: PoolData,
) -> Result<Pool> {
    let pool = Pool {
        id: comptroller.to_string(),
        name: data.name,
        creator: data.creator,
        block_posted: data.block_posted,
        timestamp_posted: data.timestamp_posted,
        price_oracle: None,
        close_factor_mantissa: BigInt::zero(),
        liquidation_incentive_mantissa: BigInt::zero(),
        min_liquidatable_collateral_mantissa: BigInt::zero(),
        pause_guardian: None,
    };
    store.save(&pool).await?;
    Ok(pool)
}

/// Creates and saves the market of `vtoken` in the pool `comptroller`.
pub async fn create_market(
    ctx: &mut HandlerContext<'_>,
    comptroller: &Address,
    vtoken: &Address,
) -> Result<Market> {
    let metadata = ctx
        .chain
        .vtoken_metadata(vtoken)
        .await
        .with_context(|| format!("creating market {} of pool {}", vtoken, comptroller))?;
    let underlying = metadata
        .underlying
        .with_context(|| format!("market {} has no underlying token", vtoken))?;
    let market = Market {
        id: vtoken.to_string(),
        pool: comptroller.to_string(),
        name: metadata.name,
        symbol: metadata.symbol,
        v_token_decimals: metadata.decimals,
        underlying_address: underlying.address,
        underlying_name: underlying.name,
        underlying_symbol: underlying.symbol,
        underlying_decimals: underlying.decimals,
        collateral_factor_mantissa: BigInt::zero(),
        borrow_cap_mantissa: None,
        min_liquidatable_amount_mantissa: BigInt::zero(),
        reserve_factor_mantissa: metadata.reserve_factor_mantissa,
        interest_rate_model_address: metadata.interest_rate_model,
    };
    ctx.store.save(&market).await?;
    Ok(market)
}

pub async fn get_or_create_account(store: &mut EntityStore, id: &Address) -> Result<Account> {
    if let Some(account) = store.load::<Account>(id.as_str()).await? {
        return Ok(account);
    }
    let account = Account { id: id.to_string() };
    store.save(&account).await?;
    Ok(account)
}

pub async fn get_or_create_account_vtoken(
    store: &mut EntityStore,
    market_id: &str,
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
            entered_market: false,
            accrual_block_number: 0,
        },
    };
    account_vtoken.accrual_block_number = event.block.number;
    Ok(account_vtoken)
}
