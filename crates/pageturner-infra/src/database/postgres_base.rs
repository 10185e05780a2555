use sea_orm::{DatabaseTransaction, DbConn};

use pageturner_core::DomainResult;

use super::transaction::begin_tx;

/// PostgreSQL-backed implementation of every repository port.
///
/// Holds only the pooled connection handed in by the caller; it keeps no
/// other state, so one instance can be shared across request handlers.
pub struct PostgresRepository {
    pub(crate) db: DbConn,
}

impl PostgresRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Give the connection back, e.g. to inspect a mock's statement log.
    pub fn into_connection(self) -> DbConn {
        self.db
    }

    pub(crate) async fn begin_tx(&self) -> DomainResult<DatabaseTransaction> {
        begin_tx(&self.db).await
    }
}
