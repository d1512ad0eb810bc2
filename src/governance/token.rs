use super::events::*;
use super::operations::{
    get_delegate, get_governance_entity, get_or_create_delegate, get_or_create_token_holder,
    to_decimal,
};
use super::XVS_DATA_SOURCE;
use crate::indexing::{HandlerContext, Indexer, LogEvent, RegistryKey};
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::slice::Iter;

const XVS_EVENTS: &[&str] = &["DelegateChanged", "DelegateVotesChanged", "Transfer"];

/// Delegation and balances of the XVS governance token.
pub struct XvsIndexer {
    registry_keys: Vec<RegistryKey>,
}

impl Default for XvsIndexer {
    fn default() -> Self {
        XvsIndexer {
            registry_keys: XVS_EVENTS
                .iter()
                .map(|name| RegistryKey::for_event(XVS_DATA_SOURCE, name))
                .collect(),
        }
    }
}

#[async_trait]
impl Indexer for XvsIndexer {
    async fn index(&self, ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
        match event.name.as_str() {
            "DelegateChanged" => handle_delegate_changed(ctx, event).await,
            "DelegateVotesChanged" => handle_delegate_votes_changed(ctx, event).await,
            "Transfer" => handle_transfer(ctx, event).await,
            other => {
                debug!("xvs: ignoring {}", other);
                Ok(())
            }
        }
    }

    fn id(&self) -> String {
        XVS_DATA_SOURCE.to_string()
    }

    fn registry_keys(&self) -> Iter<RegistryKey> {
        self.registry_keys.iter()
    }
}

/// Moves a token holder from one delegate to another. The zero address is
/// "no delegate" and is never recorded as one.
pub async fn handle_delegate_changed(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: DelegateChanged = event.decode()?;
    let mut holder = get_or_create_token_holder(ctx.store, &params.delegator).await?;

    if !params.from_delegate.is_zero() {
        let mut previous = get_delegate(ctx.store, params.from_delegate.as_str()).await?;
        previous.token_holders_represented_amount -= 1;
        ctx.store.save(&previous).await?;
    }

    if params.to_delegate.is_zero() {
        holder.delegate = None;
    } else {
        let mut next = get_or_create_delegate(ctx.store, &params.to_delegate).await?;
        next.token_holders_represented_amount += 1;
        ctx.store.save(&next).await?;
        holder.delegate = Some(next.id);
    }
    ctx.store.save(&holder).await
}

pub async fn handle_delegate_votes_changed(
    ctx: &mut HandlerContext<'_>,
    event: &LogEvent,
) -> Result<()> {
    let params: DelegateVotesChanged = event.decode()?;
    let mut delegate = get_or_create_delegate(ctx.store, &params.delegate).await?;
    let votes_difference = &params.new_balance - &params.previous_balance;
    delegate.delegated_votes_raw = params.new_balance.clone();
    delegate.delegated_votes = to_decimal(&params.new_balance);
    ctx.store.save(&delegate).await?;

    let mut governance = get_governance_entity(ctx.store).await?;
    if params.previous_balance.is_zero() && !params.new_balance.is_zero() {
        governance.current_delegates += 1;
    }
    if params.new_balance.is_zero() && !params.previous_balance.is_zero() {
        governance.current_delegates -= 1;
    }
    governance.delegated_votes_raw += &votes_difference;
    governance.delegated_votes = to_decimal(&governance.delegated_votes_raw);
    ctx.store.save(&governance).await
}

/// Balances of both sides of a transfer. Mints and burns involve the zero
/// address, which is not a holder.
pub async fn handle_transfer(ctx: &mut HandlerContext<'_>, event: &LogEvent) -> Result<()> {
    let params: Transfer = event.decode()?;

    if !params.from.is_zero() {
        let mut from = get_or_create_token_holder(ctx.store, &params.from).await?;
        let had_balance = !from.token_balance_raw.is_zero();
        from.token_balance_raw -= &params.amount;
        from.token_balance = to_decimal(&from.token_balance_raw);
        ctx.store.save(&from).await?;

        if had_balance && from.token_balance_raw.is_zero() {
            let mut governance = get_governance_entity(ctx.store).await?;
            governance.current_token_holders -= 1;
            ctx.store.save(&governance).await?;
        }
    }

    if !params.to.is_zero() {
        let mut to = get_or_create_token_holder(ctx.store, &params.to).await?;
        let had_balance = !to.token_balance_raw.is_zero();
        to.token_balance_raw += &params.amount;
        to.token_balance = to_decimal(&to.token_balance_raw);
        to.total_tokens_held_raw += &params.amount;
        to.total_tokens_held = to_decimal(&to.total_tokens_held_raw);
        ctx.store.save(&to).await?;

        if !had_balance && !to.token_balance_raw.is_zero() {
            let mut governance = get_governance_entity(ctx.store).await?;
            governance.current_token_holders += 1;
            ctx.store.save(&governance).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::entities::{Delegate, Governance, TokenHolder};
    use crate::governance::test_util::*;
    use crate::governance::GOVERNANCE_ID;
    use crate::util::{Address, BigInt};
    use serde_json::json;

    fn transfer(from: &str, to: &str, amount: &str) -> LogEvent {
        xvs_event("Transfer", json!({ "from": from, "to": to, "amount": amount }))
    }

    fn votes_changed(delegate: &str, previous: &str, new: &str) -> LogEvent {
        xvs_event(
            "DelegateVotesChanged",
            json!({ "delegate": delegate, "previousBalance": previous, "newBalance": new }),
        )
    }

    fn delegate_changed(delegator: &str, from: &str, to: &str) -> LogEvent {
        xvs_event(
            "DelegateChanged",
            json!({ "delegator": delegator, "fromDelegate": from, "toDelegate": to }),
        )
    }

    async fn governance(subgraph: &mut crate::indexing::Subgraph) -> anyhow::Result<Governance> {
        Ok(subgraph.store.load::<Governance>(GOVERNANCE_ID).await?.unwrap())
    }

    #[tokio::test]
    async fn test_transfers_track_holders() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        let zero = Address::zero().to_string();
        subgraph
            .handle_event(&chain, &transfer(&zero, USER_1, "2000000000000000000"))
            .await?;
        subgraph
            .handle_event(&chain, &transfer(USER_1, USER_2, "500000000000000000"))
            .await?;

        let holder = subgraph.store.load::<TokenHolder>(USER_1).await?.unwrap();
        assert_eq!("1.5", holder.token_balance.to_string());
        assert_eq!("2", holder.total_tokens_held.to_string());
        assert!(subgraph.store.load::<TokenHolder>(&zero).await?.is_none());

        let totals = governance(&mut subgraph).await?;
        assert_eq!(BigInt::from(2), totals.total_token_holders);
        assert_eq!(BigInt::from(2), totals.current_token_holders);

        subgraph
            .handle_event(&chain, &transfer(USER_2, USER_1, "500000000000000000"))
            .await?;
        let totals = governance(&mut subgraph).await?;
        assert_eq!(BigInt::from(2), totals.total_token_holders);
        assert_eq!(BigInt::from(1), totals.current_token_holders);
        Ok(())
    }

    #[tokio::test]
    async fn test_burn_drops_holder() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        let zero = Address::zero().to_string();
        subgraph
            .handle_event(&chain, &transfer(&zero, USER_1, "2000000000000000000"))
            .await?;
        assert_eq!(BigInt::one(), governance(&mut subgraph).await?.current_token_holders);

        subgraph
            .handle_event(&chain, &transfer(USER_1, &zero, "2000000000000000000"))
            .await?;
        let totals = governance(&mut subgraph).await?;
        assert_eq!(BigInt::zero(), totals.current_token_holders);
        assert_eq!(BigInt::one(), totals.total_token_holders);

        let holder = subgraph.store.load::<TokenHolder>(USER_1).await?.unwrap();
        assert!(holder.token_balance_raw.is_zero());
        assert!(subgraph.store.load::<TokenHolder>(&zero).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delegate_votes() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        subgraph
            .handle_event(&chain, &votes_changed(USER_1, "0", "3000000000000000000"))
            .await?;
        subgraph
            .handle_event(&chain, &votes_changed(USER_2, "0", "1000000000000000000"))
            .await?;

        let delegate = subgraph.store.load::<Delegate>(USER_1).await?.unwrap();
        assert_eq!("3", delegate.delegated_votes.to_string());
        let totals = governance(&mut subgraph).await?;
        assert_eq!(BigInt::from(2), totals.current_delegates);
        assert_eq!(BigInt::from(2), totals.total_delegates);
        assert_eq!("4", totals.delegated_votes.to_string());

        subgraph
            .handle_event(&chain, &votes_changed(USER_2, "1000000000000000000", "0"))
            .await?;
        let totals = governance(&mut subgraph).await?;
        assert_eq!(BigInt::from(1), totals.current_delegates);
        assert_eq!(BigInt::from(2), totals.total_delegates);
        assert_eq!("3", totals.delegated_votes.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_delegate_changed() -> anyhow::Result<()> {
        let (mut subgraph, chain) = setup();
        let zero = Address::zero().to_string();
        subgraph
            .handle_event(&chain, &delegate_changed(USER_3, &zero, USER_1))
            .await?;
        subgraph
            .handle_event(&chain, &delegate_changed(USER_3, USER_1, USER_2))
            .await?;

        let holder = subgraph.store.load::<TokenHolder>(USER_3).await?.unwrap();
        assert_eq!(Some(USER_2.to_string()), holder.delegate);
        let previous = subgraph.store.load::<Delegate>(USER_1).await?.unwrap();
        assert_eq!(0, previous.token_holders_represented_amount);
        let next = subgraph.store.load::<Delegate>(USER_2).await?.unwrap();
        assert_eq!(1, next.token_holders_represented_amount);
        assert!(subgraph.store.load::<Delegate>(&zero).await?.is_none());

        subgraph
            .handle_event(&chain, &delegate_changed(USER_3, USER_2, &zero))
            .await?;
        let holder = subgraph.store.load::<TokenHolder>(USER_3).await?.unwrap();
        assert_eq!(None, holder.delegate);
        Ok(())
    }
}
