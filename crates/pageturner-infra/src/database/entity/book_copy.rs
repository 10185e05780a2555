//! Book copy entity for SeaORM. Status is stored as a small integer.

use sea_orm::Value;
use sea_orm::entity::prelude::*;

use pageturner_core::DomainError;
use pageturner_core::domain::{BookCopy, BookStatus, NewBookCopy};

use crate::database::query::InsertRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "book_copies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub book_id: i64,
    pub status: i16,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_delete = "Restrict"
    )]
    Book,
}

impl ActiveModelBehavior for ActiveModel {}

/// Fails when the stored status is not one we know.
impl TryFrom<Model> for BookCopy {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            book_id: model.book_id,
            status: BookStatus::try_from(model.status)?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl InsertRecord for NewBookCopy {
    type Entity = Entity;

    fn insert_values(&self) -> Vec<(Column, Value)> {
        let NewBookCopy { book_id, status } = self;
        vec![
            (Column::BookId, (*book_id).into()),
            (Column::Status, status.as_i16().into()),
        ]
    }
}
