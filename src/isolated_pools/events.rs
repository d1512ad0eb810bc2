use crate::chain::PoolData;
use crate::util::{Address, BigInt};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRegistered {
    pub comptroller: Address,
    pub pool: PoolData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolNameSet {
    pub index: BigInt,
    #[serde(alias = "newName")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListed {
    #[serde(alias = "cToken")]
    pub v_token: Address,
}

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
pub struct NewPriceOracle {
    pub new_price_oracle: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPauseGuardian {
    pub new_pause_guardian: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBorrowCap {
    #[serde(alias = "cToken")]
    pub v_token: Address,
    pub new_borrow_cap: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMinLiquidatableAmount {
    #[serde(alias = "cToken")]
    pub v_token: Address,
    pub new_min_liquidatable_amount: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMinLiquidatableCollateral {
    pub new_min_liquidatable_collateral: BigInt,
}

/// A comptroller action, either by name or by its position in the
/// `Action` enum of the contract. Codes may arrive as numbers or as decimal
/// strings.
#[derive(Debug, PartialEq)]
pub enum Action {
    Code(u8),
    Name(String),
}

struct ActionVisitor;

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an action code or name")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Action, E> {
        u8::try_from(value)
            .map(Action::Code)
            .map_err(|_| E::custom(format!("action code {} is out of range", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Action, E> {
        u8::try_from(value)
            .map(Action::Code)
            .map_err(|_| E::custom(format!("action code {} is out of range", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Action, E> {
        match value.trim().parse::<u8>() {
            Ok(code) => Ok(Action::Code(code)),
            Err(_) => Ok(Action::Name(value.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ActionVisitor)
    }
}

const ACTION_NAMES: &[&str] = &[
    "MINT",
    "REDEEM",
    "BORROW",
    "REPAY",
    "SEIZE",
    "LIQUIDATE",
    "TRANSFER",
    "ENTER_MARKET",
    "EXIT_MARKET",
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Name(name) => write!(f, "{}", name),
            Action::Code(code) => match ACTION_NAMES.get(*code as usize) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{}", code),
            },
        }
    }
}

/// `ActionPaused` is overloaded: the market variant names the vToken.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ActionPaused {
    #[serde(rename_all = "camelCase")]
    Market {
        #[serde(alias = "cToken")]
        v_token: Address,
        action: Action,
        pause_state: bool,
    },
    #[serde(rename_all = "camelCase")]
    Pool { action: Action, pause_state: bool },
}
