pub mod chain;
pub mod config;
pub mod db;
pub mod governance;
pub mod indexing;
pub mod isolated_pools;
pub mod replay;
pub mod store;
pub mod subgraphs;
pub mod util;
pub mod venus;
