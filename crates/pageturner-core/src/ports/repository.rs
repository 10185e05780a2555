use async_trait::async_trait;

use crate::domain::{Book, BookCopy, BorrowedBook, NewBook, NewBookCopy, NewBorrow, NewUser, User};
use crate::error::DomainResult;

/// User persistence. Users are never updated or deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; the store assigns id and timestamps.
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: i64) -> DomainResult<User>;

    async fn get_user_by_email(&self, email: &str) -> DomainResult<User>;

    /// All users, most recently created first.
    async fn get_all_users(&self) -> DomainResult<Vec<User>>;
}

/// Book catalogue persistence.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create_book(&self, book: NewBook) -> DomainResult<Book>;

    async fn get_book_by_id(&self, id: i64) -> DomainResult<Book>;

    /// All books, most recently created first.
    async fn get_all_books(&self) -> DomainResult<Vec<Book>>;
}

/// Physical copy persistence.
#[async_trait]
pub trait BookCopyRepository: Send + Sync {
    async fn create_book_copy(&self, copy: NewBookCopy) -> DomainResult<BookCopy>;

    async fn get_book_copy_by_id(&self, id: i64) -> DomainResult<BookCopy>;

    async fn get_copies_by_book_id(&self, book_id: i64) -> DomainResult<Vec<BookCopy>>;
}

/// Loan persistence. Borrowing and returning move the copy status in the
/// same transaction as the loan row.
#[async_trait]
pub trait BorrowRepository: Send + Sync {
    async fn get_borrowed_book_by_id(&self, id: i64) -> DomainResult<BorrowedBook>;

    async fn get_borrowed_books_by_user_id(&self, user_id: i64) -> DomainResult<Vec<BorrowedBook>>;

    /// Lend a copy that is currently in the library.
    async fn borrow_book_copy(&self, borrow: NewBorrow) -> DomainResult<BorrowedBook>;

    /// Close an open loan and shelve the copy again.
    async fn return_book_copy(&self, borrow_id: i64) -> DomainResult<BorrowedBook>;
}

/// Everything the HTTP layer needs from the store.
pub trait LibraryRepository:
    UserRepository + BookRepository + BookCopyRepository + BorrowRepository
{
}

impl<T> LibraryRepository for T where
    T: UserRepository + BookRepository + BookCopyRepository + BorrowRepository
{
}
