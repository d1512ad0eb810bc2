use super::entities::{Proposal, ProposalStatus, Vote, VoteSupport};
use super::events::*;
use super::operations::{get_governance_entity, get_or_create_delegate, get_proposal};
use super::GOVERNOR_DATA_SOURCE;
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use crate::util::ids::vote_id;
use crate::util::BigInt;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::slice::Iter;

const GOVERNOR_EVENTS: &[&str] = &[
    "ProposalCreated",
    "ProposalCanceled",
    "ProposalQueued",
    "ProposalExecuted",
    "VoteCast",
];

pub struct GovernorIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for GovernorIndexer {
    fn default() -> Self {
        GovernorIndexer {
            registry_keys: GOVERNOR_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(GOVERNOR_DATA_SOURCE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for GovernorIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "ProposalCreated" => handle_proposal_created(ctx, event).await,
            "ProposalCanceled" => handle_proposal_canceled(ctx, event).await,
            "ProposalQueued" => handle_proposal_queued(ctx, event).await,
            "ProposalExecuted" => handle_proposal_executed(ctx, event).await,
            "VoteCast" => handle_vote_cast(ctx, event).await,
            other => {
                debug!("governor: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        GOVERNOR_DATA_SOURCE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

pub async fn handle_proposal_created(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: ProposalCreated = event.decode()?;
    let proposer = get_or_create_delegate(ctx.store, &params.proposer).await?;

    let status = if BigInt::from(event.block.number) >= params.start_block {
        ProposalStatus::Active
    } else {
        ProposalStatus::Pending
    };
    let proposal = Proposal {
        id: params.id.to_string(),
        proposer: proposer.id,
        targets: params.targets,
        values: params.values,
        signatures: params.signatures,
        calldatas: params.calldatas,
        start_block: params.start_block,
        end_block: params.end_block,
        description: params.description,
        status,
        execution_eta: None,
        for_votes: BigInt::zero(),
        against_votes: BigInt::zero(),
        abstain_votes: BigInt::zero(),
        created_at: event.block.timestamp,
    };
    ctx.store.save(&proposal).await?;
    info!("proposal {} created ({:?})", proposal.id, proposal.status);

    let mut governance = get_governance_entity(ctx.store).await?;
    governance.proposals += 1;
    ctx.store.save(&governance).await
}

pub async fn handle_proposal_canceled(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: ProposalId = event.decode()?;
    let mut proposal = get_proposal(ctx.store, &params.id.to_string()).await?;
    proposal.status = ProposalStatus::Cancelled;
    ctx.store.save(&proposal).await
}

pub async fn handle_proposal_queued(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: ProposalQueued = event.decode()?;
    let mut proposal = get_proposal(ctx.store, &params.id.to_string()).await?;
    proposal.status = ProposalStatus::Queued;
    proposal.execution_eta = Some(params.eta);
    ctx.store.save(&proposal).await?;

    let mut governance = get_governance_entity(ctx.store).await?;
    governance.proposals_queued += 1;
    ctx.store.save(&governance).await
}

pub async fn handle_proposal_executed(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: ProposalId = event.decode()?;
    let mut proposal = get_proposal(ctx.store, &params.id.to_string()).await?;
    proposal.status = ProposalStatus::Executed;
    proposal.execution_eta = None;
    ctx.store.save(&proposal).await?;

    let mut governance = get_governance_entity(ctx.store).await?;
    governance.proposals_queued -= 1;
    ctx.store.save(&governance).await
}

pub async fn handle_vote_cast(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: VoteCast = event.decode()?;
    let support = VoteSupport::from_code(params.support)
        .ok_or_else(|| anyhow!("unknown vote support {}", params.support))?;
    let proposal_id = params.proposal_id.to_string();
    let mut proposal = get_proposal(ctx.store, &proposal_id).await?;
    let voter = get_or_create_delegate(ctx.store, &params.voter).await?;

    let vote = Vote {
        id: vote_id(&voter.id, &proposal_id),
        proposal: proposal_id,
        voter: voter.id,
        votes: params.votes,
        support,
        reason: params.reason,
    };
    ctx.store.save(&vote).await?;

    match support {
        VoteSupport::For => proposal.for_votes += &vote.votes,
        VoteSupport::Against => proposal.against_votes += &vote.votes,
        VoteSupport::Abstain => proposal.abstain_votes += &vote.votes,
    }
    if proposal.status == ProposalStatus::Pending {
        proposal.status = ProposalStatus::Active;
    }
    ctx.store.save(&proposal).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::entities::Governance;
    use crate::governance::test_util::*;
    use crate::governance::GOVERNANCE_ID;
    use serde_json::json;

    fn proposal_created(id: u64, start_block: u64) -> LogEvent {
        governor_event(
            "ProposalCreated",
            json!({
                "id": id.to_string(),
                "proposer": USER_1,
                "targets": [TARGET],
                "values": ["0"],
                "signatures": ["_setPendingAdmin(address)"],
                "calldatas": ["0x00"],
                "startBlock": start_block.to_string(),
                "endBlock": (start_block + 100).to_string(),
                "description": "Set pending admin"
            }),
        )
    }

    fn vote_cast(voter: &str, support: u8, votes: &str) -> LogEvent {
        governor_event(
            "VoteCast",
            json!({
                "voter": voter,
                "proposalId": "1",
                "support": support,
                "votes": votes,
                "reason": "because"
            }),
        )
    }

    #[tokio::test]
    async fn test_proposal_lifecycle() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        subgraph.handle_event(&chain, &proposal_created(1, 10)).await?;

        let proposal = subgraph.store.load::<Proposal>("1").await?.unwrap();
        assert_eq!(ProposalStatus::Pending, proposal.status);
        assert_eq!(USER_1, proposal.proposer);
        assert_eq!(vec![address(TARGET)], proposal.targets);

        subgraph
            .handle_event(
                &chain,
                &governor_event("ProposalQueued", json!({ "id": "1", "eta": "1700000000" })),
            )
            .await?;
        let proposal = subgraph.store.load::<Proposal>("1").await?.unwrap();
        assert_eq!(ProposalStatus::Queued, proposal.status);
        assert_eq!(Some(BigInt::from(1700000000u64)), proposal.execution_eta);
        let governance = subgraph.store.load::<Governance>(GOVERNANCE_ID).await?.unwrap();
        assert_eq!(BigInt::one(), governance.proposals);
        assert_eq!(BigInt::one(), governance.proposals_queued);

        subgraph
            .handle_event(&chain, &governor_event("ProposalExecuted", json!({ "id": "1" })))
            .await?;
        let proposal = subgraph.store.load::<Proposal>("1").await?.unwrap();
        assert_eq!(ProposalStatus::Executed, proposal.status);
        let governance = subgraph.store.load::<Governance>(GOVERNANCE_ID).await?.unwrap();
        assert_eq!(BigInt::zero(), governance.proposals_queued);
        Ok(())
    }

    #[tokio::test]
    async fn test_proposal_active_from_start_block() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        subgraph.handle_event(&chain, &proposal_created(2, 1)).await?;
        let proposal = subgraph.store.load::<Proposal>("2").await?.unwrap();
        assert_eq!(ProposalStatus::Active, proposal.status);

        subgraph
            .handle_event(&chain, &governor_event("ProposalCanceled", json!({ "id": "2" })))
            .await?;
        let proposal = subgraph.store.load::<Proposal>("2").await?.unwrap();
        assert_eq!(ProposalStatus::Cancelled, proposal.status);
        Ok(())
    }

    #[tokio::test]
    async fn test_votes_are_tallied() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        subgraph.handle_event(&chain, &proposal_created(1, 10)).await?;
        subgraph.handle_event(&chain, &vote_cast(USER_1, 1, "300")).await?;
        subgraph.handle_event(&chain, &vote_cast(USER_2, 0, "200")).await?;
        subgraph.handle_event(&chain, &vote_cast(USER_3, 2, "100")).await?;

        let proposal = subgraph.store.load::<Proposal>("1").await?.unwrap();
        assert_eq!(ProposalStatus::Active, proposal.status);
        assert_eq!(BigInt::from(300), proposal.for_votes);
        assert_eq!(BigInt::from(200), proposal.against_votes);
        assert_eq!(BigInt::from(100), proposal.abstain_votes);

        let vote = subgraph
            .store
            .load::<Vote>(&format!("{}-1", USER_2))
            .await?
            .unwrap();
        assert_eq!(VoteSupport::Against, vote.support);
        assert_eq!(Some("because".to_string()), vote.reason);
        Ok(())
    }

    #[tokio::test]
    async fn test_vote_support_as_string() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        subgraph.handle_event(&chain, &proposal_created(1, 10)).await?;
        let event = governor_event(
            "VoteCast",
            json!({ "voter": USER_1, "proposalId": "1", "support": "1", "votes": "300" }),
        );
        subgraph.handle_event(&chain, &event).await?;

        let vote = subgraph
            .store
            .load::<Vote>(&format!("{}-1", USER_1))
            .await?
            .unwrap();
        assert_eq!(VoteSupport::For, vote.support);
        assert_eq!(None, vote.reason);
        let proposal = subgraph.store.load::<Proposal>("1").await?.unwrap();
        assert_eq!(BigInt::from(300), proposal.for_votes);
        Ok(())
    }

    #[tokio::test]
    async fn test_vote_on_unknown_proposal_fails() {
        let (mut subgraph, chain) = setup();
        let result = subgraph.handle_event(&chain, &vote_cast(USER_1, 1, "1")).await;
        assert!(result.is_err());
    }
}
