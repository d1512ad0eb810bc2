pub mod db_builder;
pub mod db_mapper;
pub mod db_persister;
#[cfg(test)]
pub mod db_test;
pub mod db_util;
pub mod persister;

pub use db_builder::DatabaseBuilder;
pub use db_mapper::{ColumnSchema, Datatype, TableSchema};
pub use db_persister::DatabasePersister;
pub use persister::{MemoryPersister, Persister, Record};
