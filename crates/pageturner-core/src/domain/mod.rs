//! Domain entities - the core business objects.
//!
//! Entities are plain values. Relationships are carried as foreign-key ids and
//! resolved through explicit repository calls.

mod book;
mod book_copy;
mod borrowed_book;
mod user;

pub use book::{Book, NewBook};
pub use book_copy::{BookCopy, BookStatus, NewBookCopy};
pub use borrowed_book::{BorrowedBook, NewBorrow};
pub use user::{NewUser, User};

use crate::error::{Detail, DomainError, DomainResult, ErrorCode};

/// Reject a blank required text field.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::from(ErrorCode::ParameterInvalid)
            .with_msg(format!("{field} must not be empty"))
            .with_detail(Detail::from_iter([(
                "field".to_owned(),
                serde_json::Value::from(field),
            )])));
    }
    Ok(())
}
