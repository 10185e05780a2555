use async_trait::async_trait;

use pageturner_core::DomainResult;
use pageturner_core::domain::{NewUser, User};
use pageturner_core::ports::UserRepository;

use super::mask_email;
use crate::database::entity::user::{self, Entity as UserEntity};
use crate::database::postgres_base::PostgresRepository;
use crate::database::query::{
    get_one, insert_returning, missing_returning, newest_first, not_found, select_all,
    select_many, select_one_where,
};

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        tracing::debug!(
            uid = %new_user.uid,
            user_email = %mask_email(&new_user.email),
            "Creating user"
        );

        let stmt = insert_returning(&new_user)?;
        let row: user::Model = get_one(&self.db, &stmt)
            .await?
            .ok_or_else(|| missing_returning("users"))?;

        Ok(row.into())
    }

    async fn get_user_by_id(&self, id: i64) -> DomainResult<User> {
        tracing::debug!(user_id = id, "Finding user by id");

        let stmt = select_one_where::<UserEntity>(user::Column::Id, id);
        let row: Option<user::Model> = get_one(&self.db, &stmt).await?;

        row.map(Into::into)
            .ok_or_else(|| not_found("user", "id", id))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<User> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let stmt = select_one_where::<UserEntity>(user::Column::Email, email);
        let row: Option<user::Model> = get_one(&self.db, &stmt).await?;

        row.map(Into::into)
            .ok_or_else(|| not_found("user", "email", email))
    }

    async fn get_all_users(&self) -> DomainResult<Vec<User>> {
        let mut stmt = select_all::<UserEntity>();
        newest_first(&mut stmt, user::Column::CreatedAt, user::Column::Id);

        let rows: Vec<user::Model> = select_many(&self.db, &stmt).await?;
        tracing::debug!(count = rows.len(), "Listed users");

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
