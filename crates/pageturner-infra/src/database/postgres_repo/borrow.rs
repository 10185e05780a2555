use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LockType, Query};
use sea_orm::{DatabaseTransaction, Iterable};

use pageturner_core::domain::{BookCopy, BookStatus, BorrowedBook, NewBorrow};
use pageturner_core::error::{Detail, InvalidHttpStatus};
use pageturner_core::ports::BorrowRepository;
use pageturner_core::{DomainError, DomainResult, ErrorCode};

use crate::database::entity::book_copy::{self, Entity as BookCopyEntity};
use crate::database::entity::borrowed_book::{self, Entity as BorrowedBookEntity};
use crate::database::entity::user::{self, Entity as UserEntity};
use crate::database::postgres_base::PostgresRepository;
use crate::database::query::{
    exec, get_one, insert_returning, missing_returning, newest_first, not_found, select_many,
    select_one_where, select_where, update_where,
};
use crate::database::transaction::finish_tx;

#[async_trait]
impl BorrowRepository for PostgresRepository {
    async fn get_borrowed_book_by_id(&self, id: i64) -> DomainResult<BorrowedBook> {
        let stmt = select_one_where::<BorrowedBookEntity>(borrowed_book::Column::Id, id);
        let row: Option<borrowed_book::Model> = get_one(&self.db, &stmt).await?;

        row.map(Into::into)
            .ok_or_else(|| not_found("borrow record", "id", id))
    }

    async fn get_borrowed_books_by_user_id(&self, user_id: i64) -> DomainResult<Vec<BorrowedBook>> {
        let mut stmt = select_where::<BorrowedBookEntity>(borrowed_book::Column::UserId, user_id);
        newest_first(
            &mut stmt,
            borrowed_book::Column::CreatedAt,
            borrowed_book::Column::Id,
        );

        let rows: Vec<borrowed_book::Model> = select_many(&self.db, &stmt).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn borrow_book_copy(&self, borrow: NewBorrow) -> DomainResult<BorrowedBook> {
        tracing::debug!(
            user_id = borrow.user_id,
            copy_id = borrow.copy_id,
            "Borrowing book copy"
        );

        let tx = self.begin_tx().await?;
        let outcome = lend_copy(&tx, &borrow).await;
        finish_tx(outcome, tx).await
    }

    async fn return_book_copy(&self, borrow_id: i64) -> DomainResult<BorrowedBook> {
        tracing::debug!(borrow_id, "Returning book copy");

        let tx = self.begin_tx().await?;
        let outcome = shelve_copy(&tx, borrow_id).await;
        finish_tx(outcome, tx).await
    }
}

/// Lock the copy, check it is on the shelf and the borrower exists, record
/// the loan and mark the copy borrowed.
async fn lend_copy(tx: &DatabaseTransaction, borrow: &NewBorrow) -> DomainResult<BorrowedBook> {
    let copy = lock_copy(tx, borrow.copy_id).await?;
    if copy.status != BookStatus::InLibrary {
        return Err(conflict(
            format!("book copy {} is {}", copy.id, copy.status.as_str()),
            "book copy is not available",
            Detail::from_iter([
                ("copy_id".to_owned(), copy.id.into()),
                ("status".to_owned(), copy.status.as_str().into()),
            ]),
        ));
    }

    let user_stmt = select_one_where::<UserEntity>(user::Column::Id, borrow.user_id);
    let borrower: Option<user::Model> = get_one(tx, &user_stmt).await?;
    if borrower.is_none() {
        return Err(not_found("user", "id", borrow.user_id));
    }

    let insert = insert_returning(borrow)?;
    let loan: borrowed_book::Model = get_one(tx, &insert)
        .await?
        .ok_or_else(|| missing_returning("borrowed_books"))?;

    set_copy_status(tx, copy.id, BookStatus::Borrowed).await?;
    Ok(loan.into())
}

/// Lock the loan, close it and put the copy back in the library.
async fn shelve_copy(tx: &DatabaseTransaction, borrow_id: i64) -> DomainResult<BorrowedBook> {
    let mut stmt = select_one_where::<BorrowedBookEntity>(borrowed_book::Column::Id, borrow_id);
    stmt.lock(LockType::Update);

    let loan: BorrowedBook = get_one::<borrowed_book::Model, _, _>(tx, &stmt)
        .await?
        .ok_or_else(|| not_found("borrow record", "id", borrow_id))?
        .into();
    if !loan.is_open() {
        return Err(conflict(
            format!("borrow record {borrow_id} is already closed"),
            "book copy has already been returned",
            Detail::from_iter([("borrow_id".to_owned(), borrow_id.into())]),
        ));
    }

    let mut close = update_where::<BorrowedBookEntity>(
        vec![(
            borrowed_book::Column::ReturnDate,
            Expr::current_timestamp().into(),
        )],
        borrowed_book::Column::UpdatedAt,
        borrowed_book::Column::Id,
        borrow_id,
    );
    close.returning(Query::returning().columns(borrowed_book::Column::iter()));
    let closed: borrowed_book::Model = get_one(tx, &close)
        .await?
        .ok_or_else(|| missing_returning("borrowed_books"))?;

    set_copy_status(tx, loan.copy_id, BookStatus::InLibrary).await?;
    Ok(closed.into())
}

async fn lock_copy(tx: &DatabaseTransaction, copy_id: i64) -> DomainResult<BookCopy> {
    let mut stmt = select_one_where::<BookCopyEntity>(book_copy::Column::Id, copy_id);
    stmt.lock(LockType::Update);

    get_one::<book_copy::Model, _, _>(tx, &stmt)
        .await?
        .ok_or_else(|| not_found("book copy", "id", copy_id))?
        .try_into()
}

async fn set_copy_status(
    tx: &DatabaseTransaction,
    copy_id: i64,
    status: BookStatus,
) -> DomainResult<()> {
    let stmt = update_where::<BookCopyEntity>(
        vec![(book_copy::Column::Status, status.as_i16().into())],
        book_copy::Column::UpdatedAt,
        book_copy::Column::Id,
        copy_id,
    );
    match exec(tx, &stmt).await? {
        0 => Err(not_found("book copy", "id", copy_id)),
        _ => Ok(()),
    }
}

/// The request is well formed but the current state forbids it.
fn conflict(cause: String, msg: &str, detail: Detail) -> DomainError {
    DomainError::new(ErrorCode::ParameterInvalid, cause)
        .with_msg(msg)
        .with_detail(detail)
        .with_status(409)
        .unwrap_or_else(InvalidHttpStatus::into_error)
}
