//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use pageturner_core::domain::{Book, BookCopy, BorrowedBook, User};
use serde::{Deserialize, Serialize};

/// Request to register a library user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub uid: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub uid: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to add a title to the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(default)]
    pub isbn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCopyResponse {
    pub id: i64,
    pub book_id: i64,
    /// One of `in_library`, `borrowed`, `lost`.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to lend a copy to a user until `due_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowBookRequest {
    pub user_id: i64,
    pub copy_id: i64,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowedBookResponse {
    pub id: i64,
    pub user_id: i64,
    pub copy_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub overdue: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            uid: user.uid,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            published_year: book.published_year,
            isbn: book.isbn,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

impl From<BookCopy> for BookCopyResponse {
    fn from(copy: BookCopy) -> Self {
        Self {
            id: copy.id,
            book_id: copy.book_id,
            status: copy.status.as_str().to_owned(),
            created_at: copy.created_at,
            updated_at: copy.updated_at,
        }
    }
}

impl From<BorrowedBook> for BorrowedBookResponse {
    fn from(loan: BorrowedBook) -> Self {
        Self {
            overdue: loan.is_overdue(Utc::now()),
            id: loan.id,
            user_id: loan.user_id,
            copy_id: loan.copy_id,
            borrow_date: loan.borrow_date,
            due_date: loan.due_date,
            return_date: loan.return_date,
        }
    }
}
