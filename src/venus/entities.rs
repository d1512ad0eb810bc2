use crate::entity;
use crate::util::{Address, BigDecimal, BigInt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comptroller {
    pub id: String,
    pub price_oracle: Option<Address>,
    pub close_factor_mantissa: BigInt,
    pub liquidation_incentive_mantissa: BigInt,
    pub max_assets: BigInt,
}

/// A vToken market, keyed by the vToken address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub v_token_decimals: u32,
    pub underlying_address: Address,
    pub underlying_name: String,
    pub underlying_symbol: String,
    pub underlying_decimals: u32,
    pub underlying_price_mantissa: BigInt,
    #[serde(rename = "underlyingPriceUSD")]
    pub underlying_price_usd: BigDecimal,
    pub interest_rate_model_address: Address,
    pub reserve_factor: BigInt,
    pub collateral_factor_mantissa: BigInt,
    pub exchange_rate_mantissa: BigInt,
    pub borrow_index_mantissa: BigInt,
    pub reserves_mantissa: BigInt,
    pub total_borrows_mantissa: BigInt,
    pub total_supply_mantissa: BigInt,
    pub cash_mantissa: BigInt,
    pub borrow_rate_mantissa: BigInt,
    pub supply_rate_mantissa: BigInt,
    pub accrual_block_number: u64,
    pub block_timestamp: u64,
    pub supplier_count: BigInt,
    pub borrower_count: BigInt,
    /// Borrowers with more than dust left on their position.
    pub borrower_count_adjusted: BigInt,
    pub total_xvs_distributed_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub count_liquidated: u32,
    pub count_liquidator: u32,
    pub has_borrowed: bool,
}

/// An account's position in one market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountVToken {
    pub id: String,
    pub market: String,
    pub account: String,
    pub symbol: String,
    pub entered_market: bool,
    pub accrual_block_number: u64,
    pub v_token_balance_mantissa: BigInt,
    pub total_underlying_supplied_mantissa: BigInt,
    pub total_underlying_redeemed_mantissa: BigInt,
    pub account_borrow_index_mantissa: BigInt,
    pub total_underlying_borrowed_mantissa: BigInt,
    pub total_underlying_repaid_mantissa: BigInt,
    pub stored_borrow_balance_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountVTokenTransaction {
    pub id: String,
    pub account: String,
    pub tx_hash: String,
    pub timestamp: u64,
    pub block: u64,
    pub log_index: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintEvent {
    pub id: String,
    pub amount_mantissa: BigInt,
    pub to: Address,
    pub from: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub v_token_address: Address,
    pub underlying_amount_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintBehalfEvent {
    pub id: String,
    pub payer: Address,
    pub receiver: Address,
    pub amount_mantissa: BigInt,
    pub block_number: u64,
    pub block_time: u64,
    pub v_token_address: Address,
    pub underlying_amount_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemEvent {
    pub id: String,
    pub amount_mantissa: BigInt,
    pub to: Address,
    pub from: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub v_token_address: Address,
    pub underlying_amount_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowEvent {
    pub id: String,
    pub amount_mantissa: BigInt,
    pub account_borrows_mantissa: BigInt,
    pub borrower: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub underlying_address: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepayEvent {
    pub id: String,
    pub amount_mantissa: BigInt,
    pub account_borrows_mantissa: BigInt,
    pub borrower: Address,
    pub payer: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub underlying_address: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiquidationEvent {
    pub id: String,
    /// vTokens seized from the borrower.
    pub amount_mantissa: BigInt,
    pub to: Address,
    pub from: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub v_token_collateral: Address,
    pub underlying_repay_address: Address,
    pub underlying_repay_amount_mantissa: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub id: String,
    pub amount_mantissa: BigInt,
    pub to: Address,
    pub from: Address,
    pub block_number: u64,
    pub block_time: u64,
    pub v_token_address: Address,
}

entity!(Comptroller, "Comptroller");
entity!(Market, "Market");
entity!(Account, "Account");
entity!(AccountVToken, "AccountVToken");
entity!(AccountVTokenTransaction, "AccountVTokenTransaction");
entity!(MintEvent, "MintEvent");
entity!(MintBehalfEvent, "MintBehalfEvent");
entity!(RedeemEvent, "RedeemEvent");
entity!(BorrowEvent, "BorrowEvent");
entity!(RepayEvent, "RepayEvent");
entity!(LiquidationEvent, "LiquidationEvent");
entity!(TransferEvent, "TransferEvent");
