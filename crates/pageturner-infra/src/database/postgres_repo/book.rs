use async_trait::async_trait;

use pageturner_core::DomainResult;
use pageturner_core::domain::{Book, NewBook};
use pageturner_core::ports::BookRepository;

use crate::database::entity::book::{self, Entity as BookEntity};
use crate::database::postgres_base::PostgresRepository;
use crate::database::query::{
    get_one, insert_returning, missing_returning, newest_first, not_found, select_all,
    select_many, select_one_where,
};

#[async_trait]
impl BookRepository for PostgresRepository {
    async fn create_book(&self, new_book: NewBook) -> DomainResult<Book> {
        tracing::debug!(title = %new_book.title, isbn = %new_book.isbn, "Creating book");

        let stmt = insert_returning(&new_book)?;
        let row: book::Model = get_one(&self.db, &stmt)
            .await?
            .ok_or_else(|| missing_returning("books"))?;

        Ok(row.into())
    }

    async fn get_book_by_id(&self, id: i64) -> DomainResult<Book> {
        tracing::debug!(book_id = id, "Finding book by id");

        let stmt = select_one_where::<BookEntity>(book::Column::Id, id);
        let row: Option<book::Model> = get_one(&self.db, &stmt).await?;

        row.map(Into::into)
            .ok_or_else(|| not_found("book", "id", id))
    }

    async fn get_all_books(&self) -> DomainResult<Vec<Book>> {
        let mut stmt = select_all::<BookEntity>();
        newest_first(&mut stmt, book::Column::CreatedAt, book::Column::Id);

        let rows: Vec<book::Model> = select_many(&self.db, &stmt).await?;
        tracing::debug!(count = rows.len(), "Listed books");
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
