use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, ErrorCode};

/// One loan of a [`BookCopy`](super::BookCopy) to a [`User`](super::User).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowedBook {
    pub id: i64,
    pub user_id: i64,
    pub copy_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// `None` until the copy comes back.
    pub return_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BorrowedBook {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && now > self.due_date
    }
}

/// Request to lend a copy. The borrow date is the time the store records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBorrow {
    pub user_id: i64,
    pub copy_id: i64,
    pub due_date: DateTime<Utc>,
}

impl NewBorrow {
    pub fn new(user_id: i64, copy_id: i64, due_date: DateTime<Utc>) -> Self {
        Self {
            user_id,
            copy_id,
            due_date,
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.due_date <= now {
            return Err(DomainError::from(ErrorCode::ParameterInvalid)
                .with_msg("due date must be in the future"));
        }
        Ok(())
    }
}
