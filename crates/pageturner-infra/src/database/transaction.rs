//! Transaction coordinator.
//!
//! A unit of work opens a transaction with [`begin_tx`], runs its statements
//! against the handle, and always leaves through [`finish_tx`], which commits
//! on success and rolls back on failure. `commit`/`rollback` consume the
//! handle, so a finished transaction cannot be touched again. A handle that
//! is dropped unfinished (early return, panic unwind) is rolled back by the
//! driver.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use thiserror::Error;

use pageturner_core::error::BoxError;
use pageturner_core::{DomainError, DomainResult, ErrorCode};

/// An open transaction that can be finished exactly once.
#[async_trait]
pub trait TransactionHandle: Send + Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn commit(self) -> Result<(), Self::Error>;

    async fn rollback(self) -> Result<(), Self::Error>;
}

#[async_trait]
impl TransactionHandle for DatabaseTransaction {
    type Error = DbErr;

    async fn commit(self) -> Result<(), DbErr> {
        DatabaseTransaction::commit(self).await
    }

    async fn rollback(self) -> Result<(), DbErr> {
        DatabaseTransaction::rollback(self).await
    }
}

/// Something a transaction can be opened on.
#[async_trait]
pub trait TransactionSource: Sync {
    type Tx: TransactionHandle;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn begin(&self) -> Result<Self::Tx, Self::Error>;
}

#[async_trait]
impl TransactionSource for DatabaseConnection {
    type Tx = DatabaseTransaction;
    type Error = DbErr;

    async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        TransactionTrait::begin(self).await
    }
}

/// The unit of work failed and so did the rollback.
#[derive(Debug, Error)]
#[error("{cause}; rollback failed: {rollback}")]
pub struct RollbackFailed {
    cause: DomainError,
    rollback: BoxError,
}

impl RollbackFailed {
    /// The failure that triggered the rollback.
    pub fn cause(&self) -> &DomainError {
        &self.cause
    }
}

/// Open a transaction; failure to obtain one is a remote failure.
pub async fn begin_tx<S>(source: &S) -> DomainResult<S::Tx>
where
    S: TransactionSource,
{
    source
        .begin()
        .await
        .map_err(|e| DomainError::new(ErrorCode::RemoteProcess, e))
}

/// Commit when `outcome` is `Ok`, roll back when it is `Err`.
///
/// A successful rollback returns the original error untouched. A failed
/// rollback returns a RemoteProcess error whose message carries both causes.
/// A failed commit is a RemoteProcess error.
pub async fn finish_tx<T, Tx>(outcome: DomainResult<T>, tx: Tx) -> DomainResult<T>
where
    Tx: TransactionHandle,
{
    match outcome {
        Err(cause) => match tx.rollback().await {
            Ok(()) => {
                tracing::debug!(error = %cause, "Transaction rolled back");
                Err(cause)
            }
            Err(rollback) => {
                tracing::error!(error = %cause, rollback_error = %rollback, "Rollback failed");
                Err(DomainError::new(
                    ErrorCode::RemoteProcess,
                    RollbackFailed {
                        cause,
                        rollback: Box::new(rollback),
                    },
                ))
            }
        },
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DomainError::new(ErrorCode::RemoteProcess, e))?;
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug, Default)]
    struct FakeTx {
        fail_commit: bool,
        fail_rollback: bool,
        finished: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FakeTx {
        fn finished(&self) -> Vec<&'static str> {
            self.finished.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TransactionHandle for FakeTx {
        type Error = io::Error;

        async fn commit(self) -> Result<(), io::Error> {
            self.finished.lock().unwrap().push("commit");
            if self.fail_commit {
                return Err(io::Error::other("commit refused"));
            }
            Ok(())
        }

        async fn rollback(self) -> Result<(), io::Error> {
            self.finished.lock().unwrap().push("rollback");
            if self.fail_rollback {
                return Err(io::Error::other("connection lost"));
            }
            Ok(())
        }
    }

    struct FakeSource {
        refuse: bool,
    }

    #[async_trait]
    impl TransactionSource for FakeSource {
        type Tx = FakeTx;
        type Error = io::Error;

        async fn begin(&self) -> Result<FakeTx, io::Error> {
            if self.refuse {
                return Err(io::Error::other("too many connections"));
            }
            Ok(FakeTx::default())
        }
    }

    fn unit_of_work_failure() -> DomainError {
        DomainError::new(ErrorCode::ParameterInvalid, "copy already borrowed")
            .with_msg("book copy is not available")
    }

    #[tokio::test]
    async fn begin_hands_out_a_transaction() {
        let tx = begin_tx(&FakeSource { refuse: false }).await.unwrap();
        assert!(tx.finished().is_empty());
    }

    #[tokio::test]
    async fn begin_failure_is_remote() {
        let err = begin_tx(&FakeSource { refuse: true }).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::RemoteProcess);
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.to_string(), "too many connections");
    }

    #[tokio::test]
    async fn success_commits() {
        let tx = FakeTx::default();
        let value = finish_tx(Ok(7), tx.clone()).await.unwrap();

        assert_eq!(value, 7);
        assert_eq!(tx.finished(), vec!["commit"]);
    }

    #[tokio::test]
    async fn commit_failure_is_remote() {
        let tx = FakeTx {
            fail_commit: true,
            ..FakeTx::default()
        };
        let err = finish_tx(Ok(()), tx.clone()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::RemoteProcess);
        assert_eq!(err.to_string(), "commit refused");
        assert_eq!(tx.finished(), vec!["commit"]);
    }

    #[tokio::test]
    async fn failure_rolls_back_and_keeps_original_error() {
        let tx = FakeTx::default();
        let err = finish_tx::<(), _>(Err(unit_of_work_failure()), tx.clone())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ParameterInvalid);
        assert_eq!(err.client_msg(), "book copy is not available");
        assert_eq!(tx.finished(), vec!["rollback"]);
    }

    #[tokio::test]
    async fn rollback_failure_aggregates_both_causes() {
        let tx = FakeTx {
            fail_rollback: true,
            ..FakeTx::default()
        };
        let err = finish_tx::<(), _>(Err(unit_of_work_failure()), tx.clone())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::RemoteProcess);
        assert_eq!(err.http_status(), 502);
        let message = err.to_string();
        assert!(message.contains("copy already borrowed"), "{message}");
        assert!(message.contains("connection lost"), "{message}");

        let aggregated = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<RollbackFailed>())
            .unwrap();
        assert_eq!(aggregated.cause().code(), ErrorCode::ParameterInvalid);
        assert_eq!(tx.finished(), vec!["rollback"]);
    }
}
