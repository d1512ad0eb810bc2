use super::entities::*;
use super::events::*;
use super::operations::{
    get_or_create_account, get_or_create_account_vtoken,
    get_or_create_account_vtoken_transaction, get_or_create_market,
};
use super::{DUST_THRESHOLD, VTOKEN_TEMPLATE, VTOKEN_UPDATED_EVENTS_TEMPLATE};
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use crate::util::ids::event_id;
use crate::util::{exponent_to_big_int, Address, BigInt};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::slice::Iter;

const VTOKEN_EVENTS: &[&str] = &[
    "Mint",
    "MintBehalf",
    "Redeem",
    "Borrow",
    "RepayBorrow",
    "LiquidateBorrow",
    "Transfer",
    "AccrueInterest",
    "NewReserveFactor",
    "NewMarketInterestRateModel",
];

const VTOKEN_UPDATED_EVENTS: &[&str] = &["Mint", "MintBehalf", "Redeem"];

/// Events of the original vToken ABI. Mint and redeem carry no account
/// balance, so it is read from the contract.
pub struct VTokenIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for VTokenIndexer {
    fn default() -> Self {
        VTokenIndexer {
            registry_keys: VTOKEN_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(VTOKEN_TEMPLATE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for VTokenIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "Mint" => handle_mint_v1(ctx, event).await,
            "MintBehalf" => handle_mint_behalf_v1(ctx, event).await,
            "Redeem" => handle_redeem_v1(ctx, event).await,
            "Borrow" => handle_borrow(ctx, event).await,
            "RepayBorrow" => handle_repay_borrow(ctx, event).await,
            "LiquidateBorrow" => handle_liquidate_borrow(ctx, event).await,
            "Transfer" => handle_transfer(ctx, event).await,
            "AccrueInterest" => handle_accrue_interest(ctx, event).await,
            "NewReserveFactor" => handle_new_reserve_factor(ctx, event).await,
            "NewMarketInterestRateModel" => handle_new_market_interest_rate_model(ctx, event).await,
            other => {
                debug!("vToken: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        VTOKEN_TEMPLATE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

/// Mint and redeem events of upgraded vTokens, which report the account's
/// vToken balance after the operation.
pub struct VTokenUpdatedEventsIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for VTokenUpdatedEventsIndexer {
    fn default() -> Self {
        VTokenUpdatedEventsIndexer {
            registry_keys: VTOKEN_UPDATED_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(VTOKEN_UPDATED_EVENTS_TEMPLATE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for VTokenUpdatedEventsIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "Mint" => handle_mint(ctx, event).await,
            "MintBehalf" => handle_mint_behalf(ctx, event).await,
            "Redeem" => handle_redeem(ctx, event).await,
            other => {
                debug!("vToken updated events: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        VTOKEN_UPDATED_EVENTS_TEMPLATE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

async fn add_supplier(ctx: &mut HandlerContext<'_>, mut market: Market) -> Result<()> {
    market.supplier_count += 1;
    ctx.store.save(&market).await
}

async fn remove_supplier(ctx: &mut HandlerContext<'_>, mut market: Market) -> Result<()> {
    market.supplier_count -= 1;
    ctx.store.save(&market).await
}

async fn save_mint_event(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    minter: &Address,
    mint_tokens: &BigInt,
    mint_amount: &BigInt,
) -> Result<()> {
    let record = MintEvent {
        id: event_id(event),
        amount_mantissa: mint_tokens.clone(),
        to: minter.clone(),
        from: event.address.clone(),
        block_number: event.block.number,
        block_time: event.block.timestamp,
        v_token_address: event.address.clone(),
        underlying_amount_mantissa: mint_amount.clone(),
    };
    ctx.store.save(&record).await
}

async fn save_mint_behalf_event(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    payer: &Address,
    receiver: &Address,
    mint_tokens: &BigInt,
    mint_amount: &BigInt,
) -> Result<()> {
    let record = MintBehalfEvent {
        id: event_id(event),
        payer: payer.clone(),
        receiver: receiver.clone(),
        amount_mantissa: mint_tokens.clone(),
        block_number: event.block.number,
        block_time: event.block.timestamp,
        v_token_address: event.address.clone(),
        underlying_amount_mantissa: mint_amount.clone(),
    };
    ctx.store.save(&record).await
}

async fn save_redeem_event(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
    redeemer: &Address,
    redeem_tokens: &BigInt,
    redeem_amount: &BigInt,
) -> Result<()> {
    let record = RedeemEvent {
        id: event_id(event),
        amount_mantissa: redeem_tokens.clone(),
        to: event.address.clone(),
        from: redeemer.clone(),
        block_number: event.block.number,
        block_time: event.block.timestamp,
        v_token_address: event.address.clone(),
        underlying_amount_mantissa: redeem_amount.clone(),
    };
    ctx.store.save(&record).await
}

/// `mintTokens == accountBalance` means the minter held no vTokens before.
pub async fn handle_mint(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: Mint = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    if params.mint_tokens == params.total_supply {
        add_supplier(ctx, market).await?;
    }
    save_mint_event(ctx, event, &params.minter, &params.mint_tokens, &params.mint_amount).await
}

pub async fn handle_mint_v1(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: MintV1 = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    let balance = ctx.chain.balance_of(&event.address, &params.minter).await?;
    if params.mint_tokens == balance {
        add_supplier(ctx, market).await?;
    }
    save_mint_event(ctx, event, &params.minter, &params.mint_tokens, &params.mint_amount).await
}

pub async fn handle_mint_behalf(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: MintBehalf = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    if params.mint_tokens == params.total_supply {
        add_supplier(ctx, market).await?;
    }
    save_mint_behalf_event(
        ctx,
        event,
        &params.payer,
        &params.receiver,
        &params.mint_tokens,
        &params.mint_amount,
    )
    .await
}

pub async fn handle_mint_behalf_v1(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: MintBehalfV1 = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    let balance = ctx.chain.balance_of(&event.address, &params.receiver).await?;
    if params.mint_tokens == balance {
        add_supplier(ctx, market).await?;
    }
    save_mint_behalf_event(
        ctx,
        event,
        &params.payer,
        &params.receiver,
        &params.mint_tokens,
        &params.mint_amount,
    )
    .await
}

/// A redeemer left with no vTokens stops counting as a supplier.
pub async fn handle_redeem(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: Redeem = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    if params.total_supply.is_zero() {
        remove_supplier(ctx, market).await?;
    }
    save_redeem_event(ctx, event, &params.redeemer, &params.redeem_tokens, &params.redeem_amount)
        .await
}

pub async fn handle_redeem_v1(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: RedeemV1 = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;
    let balance = ctx.chain.balance_of(&event.address, &params.redeemer).await?;
    if balance.is_zero() {
        remove_supplier(ctx, market).await?;
    }
    save_redeem_event(ctx, event, &params.redeemer, &params.redeem_tokens, &params.redeem_amount)
        .await
}

pub async fn handle_borrow(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: Borrow = event.decode()?;
    let mut market = get_or_create_market(ctx, &event.address, event).await?;
    if params.account_borrows == params.borrow_amount {
        market.borrower_count += 1;
        market.borrower_count_adjusted += 1;
        ctx.store.save(&market).await?;
    }

    let mut account = get_or_create_account(ctx.store, &params.borrower).await?;
    account.has_borrowed = true;
    ctx.store.save(&account).await?;

    let mut position =
        get_or_create_account_vtoken(ctx.store, &market.id, &market.symbol, &account.id, event)
            .await?;
    position.stored_borrow_balance_mantissa = params.account_borrows.clone();
    position.account_borrow_index_mantissa = market.borrow_index_mantissa.clone();
    position.total_underlying_borrowed_mantissa += &params.borrow_amount;
    ctx.store.save(&position).await?;
    get_or_create_account_vtoken_transaction(ctx.store, &position.id, event).await?;

    let record = BorrowEvent {
        id: event_id(event),
        amount_mantissa: params.borrow_amount,
        account_borrows_mantissa: params.account_borrows,
        borrower: params.borrower,
        block_number: event.block.number,
        block_time: event.block.timestamp,
        underlying_address: market.underlying_address,
    };
    ctx.store.save(&record).await
}

/// Repaying to zero removes a borrower; leaving only dust removes it from the
/// adjusted count.
pub async fn handle_repay_borrow(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: RepayBorrow = event.decode()?;
    let mut market = get_or_create_market(ctx, &event.address, event).await?;
    if params.account_borrows.is_zero() {
        market.borrower_count -= 1;
        market.borrower_count_adjusted -= 1;
        ctx.store.save(&market).await?;
    } else if params.account_borrows <= BigInt::from(DUST_THRESHOLD) {
        market.borrower_count_adjusted -= 1;
        ctx.store.save(&market).await?;
    }

    let account = get_or_create_account(ctx.store, &params.borrower).await?;
    let mut position =
        get_or_create_account_vtoken(ctx.store, &market.id, &market.symbol, &account.id, event)
            .await?;
    position.stored_borrow_balance_mantissa = params.account_borrows.clone();
    position.account_borrow_index_mantissa = market.borrow_index_mantissa.clone();
    position.total_underlying_repaid_mantissa += &params.repay_amount;
    ctx.store.save(&position).await?;
    get_or_create_account_vtoken_transaction(ctx.store, &position.id, event).await?;

    let record = RepayEvent {
        id: event_id(event),
        amount_mantissa: params.repay_amount,
        account_borrows_mantissa: params.account_borrows,
        borrower: params.borrower,
        payer: params.payer,
        block_number: event.block.number,
        block_time: event.block.timestamp,
        underlying_address: market.underlying_address,
    };
    ctx.store.save(&record).await
}

/// Only the liquidation counters change here. The repayment and the seized
/// collateral arrive as their own `RepayBorrow` and `Transfer` events.
pub async fn handle_liquidate_borrow(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: LiquidateBorrow = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;

    let mut liquidator = get_or_create_account(ctx.store, &params.liquidator).await?;
    liquidator.count_liquidator += 1;
    ctx.store.save(&liquidator).await?;

    // Loaded after the liquidator is saved, the two may be the same account.
    let mut borrower = get_or_create_account(ctx.store, &params.borrower).await?;
    borrower.count_liquidated += 1;
    ctx.store.save(&borrower).await?;

    let record = LiquidationEvent {
        id: event_id(event),
        amount_mantissa: params.seize_tokens,
        to: params.liquidator,
        from: params.borrower,
        block_number: event.block.number,
        block_time: event.block.timestamp,
        v_token_collateral: params.v_token_collateral,
        underlying_repay_address: market.underlying_address,
        underlying_repay_amount_mantissa: params.repay_amount,
    };
    ctx.store.save(&record).await
}

/// Moves vToken balances between accounts. Transfers from the market are
/// mints and transfers to it are redeems; the market side is not tracked.
pub async fn handle_transfer(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: Transfer = event.decode()?;
    let market = get_or_create_market(ctx, &event.address, event).await?;

    // A reverted exchange rate read leaves the underlying amount unknown.
    let amount_underlying = if market.exchange_rate_mantissa.is_positive() {
        (&market.exchange_rate_mantissa * &params.amount)
            .checked_div(&exponent_to_big_int(18))
            .ok_or_else(|| anyhow!("zero exchange rate scale"))?
    } else {
        warn!("market {} has no exchange rate, transfer counted as zero underlying", market.id);
        BigInt::zero()
    };

    if params.from != market.id {
        let account = get_or_create_account(ctx.store, &params.from).await?;
        let mut position =
            get_or_create_account_vtoken(ctx.store, &market.id, &market.symbol, &account.id, event)
                .await?;
        position.v_token_balance_mantissa -= &params.amount;
        position.total_underlying_redeemed_mantissa += &amount_underlying;
        ctx.store.save(&position).await?;
        get_or_create_account_vtoken_transaction(ctx.store, &position.id, event).await?;
    }

    if params.to != market.id {
        let account = get_or_create_account(ctx.store, &params.to).await?;
        let mut position =
            get_or_create_account_vtoken(ctx.store, &market.id, &market.symbol, &account.id, event)
                .await?;
        position.v_token_balance_mantissa += &params.amount;
        position.total_underlying_supplied_mantissa += &amount_underlying;
        ctx.store.save(&position).await?;
        get_or_create_account_vtoken_transaction(ctx.store, &position.id, event).await?;
    }

    let record = TransferEvent {
        id: event_id(event),
        amount_mantissa: params.amount,
        to: params.to,
        from: params.from,
        block_number: event.block.number,
        block_time: event.block.timestamp,
        v_token_address: event.address.clone(),
    };
    ctx.store.save(&record).await
}

pub async fn handle_accrue_interest(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    get_or_create_market(ctx, &event.address, event).await?;
    Ok(())
}

pub async fn handle_new_reserve_factor(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewReserveFactor = event.decode()?;
    let mut market = get_or_create_market(ctx, &event.address, event).await?;
    market.reserve_factor = params.new_reserve_factor_mantissa;
    ctx.store.save(&market).await
}

pub async fn handle_new_market_interest_rate_model(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: NewMarketInterestRateModel = event.decode()?;
    let mut market = get_or_create_market(ctx, &event.address, event).await?;
    market.interest_rate_model_address = params.new_interest_rate_model;
    ctx.store.save(&market).await
}
