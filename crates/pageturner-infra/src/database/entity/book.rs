//! Book entity for SeaORM.

use sea_orm::Value;
use sea_orm::entity::prelude::*;

use pageturner_core::domain::{Book, NewBook};

use crate::database::query::InsertRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            published_year: model.published_year,
            isbn: model.isbn,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl InsertRecord for NewBook {
    type Entity = Entity;

    fn insert_values(&self) -> Vec<(Column, Value)> {
        let NewBook {
            title,
            author,
            published_year,
            isbn,
        } = self;
        vec![
            (Column::Title, title.as_str().into()),
            (Column::Author, author.as_str().into()),
            (Column::PublishedYear, (*published_year).into()),
            (Column::Isbn, isbn.as_str().into()),
        ]
    }
}
