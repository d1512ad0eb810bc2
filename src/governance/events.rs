use crate::util::de::small_int;
use crate::util::{Address, BigInt};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalCreated {
    pub id: BigInt,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<BigInt>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<String>,
    pub start_block: BigInt,
    pub end_block: BigInt,
    pub description: String,
}

/// `ProposalCanceled` and `ProposalExecuted`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalId {
    pub id: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalQueued {
    pub id: BigInt,
    pub eta: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCast {
    pub voter: Address,
    pub proposal_id: BigInt,
    #[serde(deserialize_with = "small_int")]
    pub support: u8,
    pub votes: BigInt,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateChanged {
    pub delegator: Address,
    pub from_delegate: Address,
    pub to_delegate: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateVotesChanged {
    pub delegate: Address,
    pub previous_balance: BigInt,
    pub new_balance: BigInt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: BigInt,
}
