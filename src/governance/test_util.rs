use super::{subgraph, GOVERNOR_DATA_SOURCE, XVS_DATA_SOURCE};
use crate::chain::StaticChain;
use crate::db::MemoryPersister;
use crate::indexing::{LogEvent, Subgraph};
use crate::util::Address;
use serde_json::Value;

pub const GOVERNOR: &str = "0x2d56dc077072b53571b8252008c60e945108c75a";
pub const XVS: &str = "0xcf6bb5389c92bdda8a3747ddb454cb7a64626c63";
pub const TARGET: &str = "0x0000000000000000000000000000000000000e0e";
pub const USER_1: &str = "0x0000000000000000000000000000000000000101";
pub const USER_2: &str = "0x0000000000000000000000000000000000000202";
pub const USER_3: &str = "0x0000000000000000000000000000000000000303";

pub fn address(raw: &str) -> Address {
    raw.parse().unwrap()
}

pub fn setup() -> (Subgraph, StaticChain) {
    (subgraph(Box::new(MemoryPersister::new())), StaticChain::new())
}

pub fn governor_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(GOVERNOR_DATA_SOURCE, name, &address(GOVERNOR), params)
}

pub fn xvs_event(name: &str, params: Value) -> LogEvent {
    LogEvent::mock(XVS_DATA_SOURCE, name, &address(XVS), params)
}
