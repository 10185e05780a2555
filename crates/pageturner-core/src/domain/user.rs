use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_non_empty;
use crate::error::{Detail, DomainError, DomainResult, ErrorCode};

/// User entity - a library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// External unique identifier.
    pub uid: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when registering a user. Identity and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub uid: String,
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn new(uid: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Check the invariants that do not need the store: uid, email and name
    /// are present and the email looks like one.
    pub fn validate(&self) -> DomainResult<()> {
        require_non_empty("uid", &self.uid)?;
        require_non_empty("email", &self.email)?;
        require_non_empty("name", &self.name)?;

        if !self.email.contains('@') {
            return Err(DomainError::from(ErrorCode::ParameterInvalid)
                .with_msg("email address is invalid")
                .with_detail(Detail::from_iter([(
                    "field".to_owned(),
                    serde_json::Value::from("email"),
                )])));
        }
        Ok(())
    }
}
