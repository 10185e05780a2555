//! Borrowed book entity for SeaORM.

use sea_orm::Value;
use sea_orm::entity::prelude::*;

use pageturner_core::domain::{BorrowedBook, NewBorrow};

use crate::database::query::InsertRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "borrowed_books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub copy_id: i64,
    pub borrow_date: DateTimeWithTimeZone,
    pub due_date: DateTimeWithTimeZone,
    pub return_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::book_copy::Entity",
        from = "Column::CopyId",
        to = "super::book_copy::Column::Id"
    )]
    BookCopy,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BorrowedBook {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            copy_id: model.copy_id,
            borrow_date: model.borrow_date.into(),
            due_date: model.due_date.into(),
            return_date: model.return_date.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// `borrow_date` is left to the store default (the insert time).
impl InsertRecord for NewBorrow {
    type Entity = Entity;

    fn insert_values(&self) -> Vec<(Column, Value)> {
        let NewBorrow {
            user_id,
            copy_id,
            due_date,
        } = self;
        vec![
            (Column::UserId, (*user_id).into()),
            (Column::CopyId, (*copy_id).into()),
            (Column::DueDate, (*due_date).into()),
        ]
    }
}
