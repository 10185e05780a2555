//! Database access: connection setup, entity declarations, the query builder
//! adapter, the transaction coordinator and the repository implementation.

mod connections;
pub mod entity;
mod postgres_base;
mod postgres_repo;
mod query;
pub mod transaction;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresRepository;
pub use transaction::{RollbackFailed, TransactionHandle, TransactionSource, begin_tx, finish_tx};
