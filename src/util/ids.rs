use crate::indexing::event::LogEvent;

pub fn account_vtoken_id(market_id: &str, account_id: &str) -> String {
    format!("{}-{}", market_id, account_id)
}

pub fn account_vtoken_transaction_id(account_vtoken_id: &str, event: &LogEvent) -> String {
    format!(
        "{}-{}-{}",
        account_vtoken_id, event.transaction.hash, event.log_index
    )
}

/// Id of a record describing a single log: `<txHash>-<logIndex>`.
pub fn event_id(event: &LogEvent) -> String {
    format!("{}-{}", event.transaction.hash, event.log_index)
}

pub fn vote_id(voter: &str, proposal_id: &str) -> String {
    format!("{}-{}", voter, proposal_id)
}

pub fn action_id(target: &str, action: &str) -> String {
    format!("{}-{}", target, action)
}
