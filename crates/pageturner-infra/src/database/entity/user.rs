//! User entity for SeaORM.

use sea_orm::Value;
use sea_orm::entity::prelude::*;

use pageturner_core::domain::{NewUser, User};

use crate::database::query::InsertRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uid: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid,
            email: model.email,
            name: model.name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl InsertRecord for NewUser {
    type Entity = Entity;

    fn insert_values(&self) -> Vec<(Column, Value)> {
        let NewUser { uid, email, name } = self;
        vec![
            (Column::Uid, uid.as_str().into()),
            (Column::Email, email.as_str().into()),
            (Column::Name, name.as_str().into()),
        ]
    }
}
