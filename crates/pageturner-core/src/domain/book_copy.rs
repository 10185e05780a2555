use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Detail, DomainError, ErrorCode};

/// Where a physical copy currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    InLibrary,
    Borrowed,
    Lost,
}

impl BookStatus {
    /// Stored representation.
    pub const fn as_i16(self) -> i16 {
        match self {
            BookStatus::InLibrary => 0,
            BookStatus::Borrowed => 1,
            BookStatus::Lost => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BookStatus::InLibrary => "in_library",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Lost => "lost",
        }
    }
}

impl TryFrom<i16> for BookStatus {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BookStatus::InLibrary),
            1 => Ok(BookStatus::Borrowed),
            2 => Ok(BookStatus::Lost),
            other => Err(DomainError::new(
                ErrorCode::InternalProcess,
                format!("unknown book status {other}"),
            )
            .with_detail(Detail::from_iter([(
                "status".to_owned(),
                serde_json::Value::from(other),
            )]))),
        }
    }
}

/// A physical copy of a [`Book`](super::Book).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: i64,
    pub book_id: i64,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new copy always enters the library shelved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookCopy {
    pub book_id: i64,
    pub status: BookStatus,
}

impl NewBookCopy {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
            status: BookStatus::InLibrary,
        }
    }
}
