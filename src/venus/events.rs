//! Parameters of the Comptroller and vToken events, as named in the contract ABIs.

use crate::util::{Address, BigInt};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListed {
    #[serde(alias = "cToken")]
    pub v_token: Address,
}

/// `MarketEntered` and `MarketExited`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMembership {
    #[serde(alias = "cToken")]
    pub v_token: Address,
    pub account: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCloseFactor {
    pub new_close_factor_mantissa: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollateralFactor {
    #[serde(alias = "cToken")]
    pub v_token: Address,
    pub new_collateral_factor_mantissa: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLiquidationIncentive {
    pub new_liquidation_incentive_mantissa: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaxAssets {
    pub new_max_assets: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceOracle {
    pub new_price_oracle: Address,
}

/// `DistributedSupplierVenus` and `DistributedBorrowerVenus`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XvsDistributed {
    #[serde(alias = "cToken")]
    pub v_token: Address,
    pub venus_delta: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mint {
    pub minter: Address,
    pub mint_amount: BigInt,
    pub mint_tokens: BigInt,
    /// The minter's vToken balance after the mint.
    #[serde(alias = "accountBalance")]
    pub total_supply: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintV1 {
    pub minter: Address,
    pub mint_amount: BigInt,
    pub mint_tokens: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintBehalf {
    pub payer: Address,
    pub receiver: Address,
    pub mint_amount: BigInt,
    pub mint_tokens: BigInt,
    #[serde(alias = "accountBalance")]
    pub total_supply: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintBehalfV1 {
    pub payer: Address,
    pub receiver: Address,
    pub mint_amount: BigInt,
    pub mint_tokens: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redeem {
    pub redeemer: Address,
    pub redeem_amount: BigInt,
    pub redeem_tokens: BigInt,
    /// The redeemer's vToken balance after the redeem.
    #[serde(alias = "accountBalance")]
    pub total_supply: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemV1 {
    pub redeemer: Address,
    pub redeem_amount: BigInt,
    pub redeem_tokens: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub borrower: Address,
    pub borrow_amount: BigInt,
    pub account_borrows: BigInt,
    pub total_borrows: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepayBorrow {
    pub payer: Address,
    pub borrower: Address,
    pub repay_amount: BigInt,
    pub account_borrows: BigInt,
    pub total_borrows: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidateBorrow {
    pub liquidator: Address,
    pub borrower: Address,
    pub repay_amount: BigInt,
    #[serde(alias = "cTokenCollateral")]
    pub v_token_collateral: Address,
    pub seize_tokens: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReserveFactor {
    pub new_reserve_factor_mantissa: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketInterestRateModel {
    pub new_interest_rate_model: Address,
}
