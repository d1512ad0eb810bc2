use super::entities::{Delegate, Governance, Proposal, TokenHolder};
use super::{GOVERNANCE_ID, XVS_DECIMALS};
use crate::store::EntityStore;
use crate::util::{Address, BigDecimal, BigInt};
use anyhow::{anyhow, Result};
use log::debug;

/// The governance totals. Created with zeroed counters on first use and left
/// for the caller to save.
pub async fn get_governance_entity(store: &mut EntityStore) -> Result<Governance> {
    if let Some(governance) = store.load::<Governance>(GOVERNANCE_ID).await? {
        return Ok(governance);
    }
    Ok(Governance {
        id: GOVERNANCE_ID.to_string(),
        proposals: BigInt::zero(),
        total_token_holders: BigInt::zero(),
        current_token_holders: BigInt::zero(),
        current_delegates: BigInt::zero(),
        total_delegates: BigInt::zero(),
        delegated_votes_raw: BigInt::zero(),
        delegated_votes: BigDecimal::zero(),
        proposals_queued: BigInt::zero(),
    })
}

pub async fn get_proposal(store: &mut EntityStore, id: &str) -> Result<Proposal> {
    store
        .load::<Proposal>(id)
        .await?
        .ok_or_else(|| anyhow!("Proposal {} not found", id))
}

pub async fn get_delegate(store: &mut EntityStore, id: &str) -> Result<Delegate> {
    store
        .load::<Delegate>(id)
        .await?
        .ok_or_else(|| anyhow!("Delegate {} not found", id))
}

/// Loads the delegate, creating it on first sight. A new non-zero delegate
/// counts towards `totalDelegates`.
pub async fn get_or_create_delegate(store: &mut EntityStore, id: &Address) -> Result<Delegate> {
    if let Some(delegate) = store.load::<Delegate>(id.as_str()).await? {
        return Ok(delegate);
    }
    debug!("new delegate {}", id);
    let delegate = Delegate {
        id: id.to_string(),
        delegated_votes_raw: BigInt::zero(),
        delegated_votes: BigDecimal::zero(),
        token_holders_represented_amount: 0,
    };
    store.save(&delegate).await?;
    if !id.is_zero() {
        let mut governance = get_governance_entity(store).await?;
        governance.total_delegates += 1;
        store.save(&governance).await?;
    }
    Ok(delegate)
}

/// Loads the token holder, creating it on first sight. A new non-zero holder
/// counts towards `totalTokenHolders`.
pub async fn get_or_create_token_holder(
    store: &mut EntityStore,
    id: &Address,
) -> Result<TokenHolder> {
    if let Some(holder) = store.load::<TokenHolder>(id.as_str()).await? {
        return Ok(holder);
    }
    let holder = TokenHolder {
        id: id.to_string(),
        delegate: None,
        token_balance_raw: BigInt::zero(),
        token_balance: BigDecimal::zero(),
        total_tokens_held_raw: BigInt::zero(),
        total_tokens_held: BigDecimal::zero(),
    };
    store.save(&holder).await?;
    if !id.is_zero() {
        let mut governance = get_governance_entity(store).await?;
        governance.total_token_holders += 1;
        store.save(&governance).await?;
    }
    Ok(holder)
}

/// Raw XVS amount as a token amount.
pub fn to_decimal(raw: &BigInt) -> BigDecimal {
    BigDecimal::from_mantissa(raw, XVS_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPersister;
    use crate::governance::NAMESPACE;

    fn store() -> EntityStore {
        EntityStore::new(NAMESPACE, Box::new(MemoryPersister::new()))
    }

    #[tokio::test]
    async fn test_missing_proposal_is_an_error() {
        let mut store = store();
        let error = get_proposal(&mut store, "7").await.unwrap_err();
        assert_eq!("Proposal 7 not found", error.to_string());
        let error = get_delegate(&mut store, "0x01").await.unwrap_err();
        assert_eq!("Delegate 0x01 not found", error.to_string());
    }

    #[tokio::test]
    async fn test_created_delegates_are_counted() -> anyhow::Result<()> {
        let mut store = store();
        let delegate: Address = "0x0000000000000000000000000000000000000101".parse()?;
        get_or_create_delegate(&mut store, &delegate).await?;
        get_or_create_delegate(&mut store, &delegate).await?;
        get_or_create_delegate(&mut store, &Address::zero()).await?;

        let governance = get_governance_entity(&mut store).await?;
        assert_eq!(BigInt::one(), governance.total_delegates);
        assert!(get_delegate(&mut store, delegate.as_str()).await.is_ok());
        Ok(())
    }

    #[test]
    fn test_to_decimal() -> anyhow::Result<()> {
        let raw: BigInt = "1500000000000000000".parse()?;
        assert_eq!("1.5", to_decimal(&raw).to_string());
        Ok(())
    }
}
