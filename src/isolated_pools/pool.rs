use super::entities::{Market, MarketAction, Pool, PoolAction};
use super::events::*;
use super::operations::{create_market, get_or_create_account, get_or_create_account_vtoken};
use super::POOL_TEMPLATE;
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use crate::util::ids::action_id;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::slice::Iter;

const POOL_EVENTS: &[&str] = &[
    "MarketListed",
    "MarketEntered",
    "MarketExited",
    "NewCloseFactor",
    "NewCollateralFactor",
    "NewLiquidationIncentive",
    "NewPriceOracle",
    "NewPauseGuardian",
    "ActionPaused",
    "MarketActionPaused",
    "NewBorrowCap",
    "NewMinLiquidatableAmount",
    "NewMinLiquidatableCollateral",
];

/// Events of a pool's comptroller.
pub struct PoolIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for PoolIndexer {
    fn default() -> Self {
        PoolIndexer {
            registry_keys: POOL_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(POOL_TEMPLATE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for PoolIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "MarketListed" => handle_market_listed(ctx, event).await,
            "MarketEntered" => handle_market_membership(ctx, event, true).await,
            "MarketExited" => handle_market_membership(ctx, event, false).await,
            "NewCloseFactor" => handle_new_close_factor(ctx, event).await,
            "NewCollateralFactor" => handle_new_collateral_factor(ctx, event).await,
            "NewLiquidationIncentive" => handle_new_liquidation_incentive(ctx, event).await,
            "NewPriceOracle" => handle_new_price_oracle(ctx, event).await,
            "NewPauseGuardian" => handle_new_pause_guardian(ctx, event).await,
            "ActionPaused" | "MarketActionPaused" => handle_action_paused(ctx, event).await,
            "NewBorrowCap" => handle_new_borrow_cap(ctx, event).await,
            "NewMinLiquidatableAmount" => handle_new_min_liquidatable_amount(ctx, event).await,
            "NewMinLiquidatableCollateral" => {
                handle_new_min_liquidatable_collateral(ctx, event).await
            }
            other => {
                debug!("pool: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        POOL_TEMPLATE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

/// The pool whose comptroller emitted `event`.
async fn load_pool(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<Option<Pool>> {
    let pool = ctx.store.load::<Pool>(event.address.as_str()).await?;
    if pool.is_none() {
        debug!("{}: pool {} not found", event.name, event.address);
    }
    Ok(pool)
}

async fn load_market(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    vtoken: &crate::util::Address,
) -> Result<Option<Market>> {
    let market = ctx.store.load::<Market>(vtoken.as_str()).await?;
    if market.is_none() {
        debug!("{}: market {} not found", event.name, vtoken);
    }
    Ok(market)
}

pub async fn handle_market_listed(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: MarketListed = event.decode()?;
    create_market(ctx, &event.address, &params.v_token).await?;
    Ok(())
}

pub async fn handle_market_membership(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    entered: bool,
) -> Result<()> {
    let params: MarketMembership = event.decode()?;
    let account = get_or_create_account(ctx.store, &params.account).await?;
    let mut account_vtoken =
        get_or_create_account_vtoken(ctx.store, params.v_token.as_str(), &account.id, event)
            .await?;
    account_vtoken.entered_market = entered;
    ctx.store.save(&account_vtoken).await
}

pub async fn handle_new_close_factor(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewCloseFactor = event.decode()?;
    if let Some(mut pool) = load_pool(ctx, event).await? {
        pool.close_factor_mantissa = params.new_close_factor_mantissa;
        ctx.store.save(&pool).await?;
    }
    Ok(())
}

pub async fn handle_new_collateral_factor(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewCollateralFactor = event.decode()?;
    if let Some(mut market) = load_market(ctx, event, &params.v_token).await? {
        market.collateral_factor_mantissa = params.new_collateral_factor_mantissa;
        ctx.store.save(&market).await?;
    }
    Ok(())
}

pub async fn handle_new_liquidation_incentive(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewLiquidationIncentive = event.decode()?;
    if let Some(mut pool) = load_pool(ctx, event).await? {
        pool.liquidation_incentive_mantissa = params.new_liquidation_incentive_mantissa;
        ctx.store.save(&pool).await?;
    }
    Ok(())
}

pub async fn handle_new_price_oracle(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewPriceOracle = event.decode()?;
    if let Some(mut pool) = load_pool(ctx, event).await? {
        pool.price_oracle = Some(params.new_price_oracle);
        ctx.store.save(&pool).await?;
    }
    Ok(())
}

pub async fn handle_new_pause_guardian(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewPauseGuardian = event.decode()?;
    if let Some(mut pool) = load_pool(ctx, event).await? {
        pool.pause_guardian = Some(params.new_pause_guardian);
        ctx.store.save(&pool).await?;
    }
    Ok(())
}

/// Records the pause state of an action, pool wide or for one market.
pub async fn handle_action_paused(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    match event.decode::<ActionPaused>()? {
        ActionPaused::Market {
            v_token,
            action,
            pause_state,
        } => {
            let action = action.to_string();
            let record = MarketAction {
                id: action_id(v_token.as_str(), &action),
                v_token: v_token.to_string(),
                action,
                pause_state,
            };
            ctx.store.save(&record).await
        }
        ActionPaused::Pool {
            action,
            pause_state,
        } => {
            let action = action.to_string();
            let record = PoolAction {
                id: action_id(event.address.as_str(), &action),
                pool: event.address.to_string(),
                action,
                pause_state,
            };
            ctx.store.save(&record).await
        }
    }
}

pub async fn handle_new_borrow_cap(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewBorrowCap = event.decode()?;
    if let Some(mut market) = load_market(ctx, event, &params.v_token).await? {
        market.borrow_cap_mantissa = Some(params.new_borrow_cap);
        ctx.store.save(&market).await?;
    }
    Ok(())
}

pub async fn handle_new_min_liquidatable_amount(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewMinLiquidatableAmount = event.decode()?;
    if let Some(mut market) = load_market(ctx, event, &params.v_token).await? {
        market.min_liquidatable_amount_mantissa = params.new_min_liquidatable_amount;
        ctx.store.save(&market).await?;
    }
    Ok(())
}

pub async fn handle_new_min_liquidatable_collateral(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewMinLiquidatableCollateral = event.decode()?;
    if let Some(mut pool) = load_pool(ctx, event).await? {
        pool.min_liquidatable_collateral_mantissa = params.new_min_liquidatable_collateral;
        ctx.store.save(&pool).await?;
    }
    Ok(())
}
