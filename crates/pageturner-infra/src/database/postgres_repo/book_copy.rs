use async_trait::async_trait;

use pageturner_core::DomainResult;
use pageturner_core::domain::{BookCopy, NewBookCopy};
use pageturner_core::ports::BookCopyRepository;

use crate::database::entity::book_copy::{self, Entity as BookCopyEntity};
use crate::database::postgres_base::PostgresRepository;
use crate::database::query::{
    get_one, insert_returning, missing_returning, newest_first, not_found, select_many,
    select_one_where, select_where,
};

#[async_trait]
impl BookCopyRepository for PostgresRepository {
    async fn create_book_copy(&self, new_copy: NewBookCopy) -> DomainResult<BookCopy> {
        tracing::debug!(book_id = new_copy.book_id, "Adding book copy");

        let stmt = insert_returning(&new_copy)?;
        let row: book_copy::Model = get_one(&self.db, &stmt)
            .await?
            .ok_or_else(|| missing_returning("book_copies"))?;

        row.try_into()
    }

    async fn get_book_copy_by_id(&self, id: i64) -> DomainResult<BookCopy> {
        tracing::debug!(copy_id = id, "Finding book copy by id");

        let stmt = select_one_where::<BookCopyEntity>(book_copy::Column::Id, id);
        let row: Option<book_copy::Model> = get_one(&self.db, &stmt).await?;

        row.ok_or_else(|| not_found("book copy", "id", id))?
            .try_into()
    }

    async fn get_copies_by_book_id(&self, book_id: i64) -> DomainResult<Vec<BookCopy>> {
        let mut stmt = select_where::<BookCopyEntity>(book_copy::Column::BookId, book_id);
        newest_first(&mut stmt, book_copy::Column::CreatedAt, book_copy::Column::Id);

        let rows: Vec<book_copy::Model> = select_many(&self.db, &stmt).await?;
        tracing::debug!(book_id, count = rows.len(), "Listed book copies");
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
