use super::entities::{Account, Market};
use super::events::*;
use super::operations::{
    create_market, get_or_create_account, get_or_create_account_vtoken,
    get_or_create_account_vtoken_transaction, get_or_create_comptroller,
};
use super::{COMPTROLLER_DATA_SOURCE, VTOKEN_TEMPLATE, VTOKEN_UPDATED_EVENTS_TEMPLATE};
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::slice::Iter;

const COMPTROLLER_EVENTS: &[&str] = &[
    "MarketListed",
    "MarketEntered",
    "MarketExited",
    "NewCloseFactor",
    "NewCollateralFactor",
    "NewLiquidationIncentive",
    "NewMaxAssets",
    "NewPriceOracle",
    "DistributedSupplierVenus",
    "DistributedBorrowerVenus",
];

pub struct ComptrollerIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for ComptrollerIndexer {
    fn default() -> Self {
        ComptrollerIndexer {
            registry_keys: COMPTROLLER_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(COMPTROLLER_DATA_SOURCE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for ComptrollerIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "MarketListed" => handle_market_listed(ctx, event).await,
            "MarketEntered" => handle_market_membership(ctx, event, true).await,
            "MarketExited" => handle_market_membership(ctx, event, false).await,
            "NewCloseFactor" => handle_new_close_factor(ctx, event).await,
            "NewCollateralFactor" => handle_new_collateral_factor(ctx, event).await,
            "NewLiquidationIncentive" => handle_new_liquidation_incentive(ctx, event).await,
            "NewMaxAssets" => handle_new_max_assets(ctx, event).await,
            "NewPriceOracle" => handle_new_price_oracle(ctx, event).await,
            "DistributedSupplierVenus" | "DistributedBorrowerVenus" => {
                handle_xvs_distributed(ctx, event).await
            }
            other => {
                debug!("comptroller: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        COMPTROLLER_DATA_SOURCE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

/// Starts indexing the listed vToken and creates its market.
pub async fn handle_market_listed(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: MarketListed = event.decode()?;
    ctx.templates.create(VTOKEN_TEMPLATE, &params.v_token);
    ctx.templates.create(VTOKEN_UPDATED_EVENTS_TEMPLATE, &params.v_token);
    let market = create_market(ctx, &params.v_token).await?;
    info!("listed market {} ({})", market.id, market.symbol);
    Ok(())
}

pub async fn handle_market_membership(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    entered: bool,
) -> Result<()> {
    let params: MarketMembership = event.decode()?;
    let market = match ctx.store.load::<Market>(params.v_token.as_str()).await? {
        Some(market) => market,
        None => {
            debug!("{}: market {} not found, skipping", event.name, params.v_token);
            return Ok(());
        }
    };
    let account: Account = get_or_create_account(ctx.store, &params.account).await?;

    let mut account_vtoken =
        get_or_create_account_vtoken(ctx.store, &market.id, &market.symbol, &account.id, event)
            .await?;
    account_vtoken.entered_market = entered;
    ctx.store.save(&account_vtoken).await?;
    get_or_create_account_vtoken_transaction(ctx.store, &account_vtoken.id, event).await?;
    Ok(())
}

pub async fn handle_new_close_factor(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewCloseFactor = event.decode()?;
    let mut comptroller = get_or_create_comptroller(ctx.store).await?;
    comptroller.close_factor_mantissa = params.new_close_factor_mantissa;
    ctx.store.save(&comptroller).await
}

pub async fn handle_new_collateral_factor(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewCollateralFactor = event.decode()?;
    if let Some(mut market) = ctx.store.load::<Market>(params.v_token.as_str()).await? {
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
    let mut comptroller = get_or_create_comptroller(ctx.store).await?;
    comptroller.liquidation_incentive_mantissa = params.new_liquidation_incentive_mantissa;
    ctx.store.save(&comptroller).await
}

pub async fn handle_new_max_assets(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewMaxAssets = event.decode()?;
    let mut comptroller = get_or_create_comptroller(ctx.store).await?;
    comptroller.max_assets = params.new_max_assets;
    ctx.store.save(&comptroller).await
}

pub async fn handle_new_price_oracle(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: NewPriceOracle = event.decode()?;
    let mut comptroller = get_or_create_comptroller(ctx.store).await?;
    comptroller.price_oracle = Some(params.new_price_oracle);
    ctx.store.save(&comptroller).await
}

pub async fn handle_xvs_distributed(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: XvsDistributed = event.decode()?;
    let mut market = match ctx.store.load::<Market>(params.v_token.as_str()).await? {
        Some(market) => market,
        None => create_market(ctx, &params.v_token).await?,
    };
    market.total_xvs_distributed_mantissa += &params.venus_delta;
    ctx.store.save(&market).await
}
