use crate::entity;
use crate::util::{Address, BigDecimal, BigInt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Protocol-wide governance totals, stored under a single id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Governance {
    pub id: String,
    pub proposals: BigInt,
    pub total_token_holders: BigInt,
    pub current_token_holders: BigInt,
    pub current_delegates: BigInt,
    pub total_delegates: BigInt,
    pub delegated_votes_raw: BigInt,
    pub delegated_votes: BigDecimal,
    pub proposals_queued: BigInt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub id: String,
    pub delegated_votes_raw: BigInt,
    pub delegated_votes: BigDecimal,
    pub token_holders_represented_amount: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolder {
    pub id: String,
    pub delegate: Option<String>,
    pub token_balance_raw: BigInt,
    pub token_balance: BigDecimal,
    pub total_tokens_held_raw: BigInt,
    pub total_tokens_held: BigDecimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Pending,
    Active,
    Cancelled,
    Queued,
    Executed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub proposer: String,
    pub targets: Vec<Address>,
    pub values: Vec<BigInt>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<String>,
    pub start_block: BigInt,
    pub end_block: BigInt,
    pub description: String,
    pub status: ProposalStatus,
    pub execution_eta: Option<BigInt>,
    pub for_votes: BigInt,
    pub against_votes: BigInt,
    pub abstain_votes: BigInt,
    pub created_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

impl VoteSupport {
    /// GovernorBravo's `support` argument: 0 against, 1 for, 2 abstain.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(VoteSupport::Against),
            1 => Some(VoteSupport::For),
            2 => Some(VoteSupport::Abstain),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub proposal: String,
    pub voter: String,
    pub votes: BigInt,
    pub support: VoteSupport,
    pub reason: Option<String>,
}

entity!(Governance, "Governance");
entity!(Delegate, "Delegate");
entity!(TokenHolder, "TokenHolder");
entity!(Proposal, "Proposal");
entity!(Vote, "Vote");
