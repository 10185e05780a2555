use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_non_empty;
use crate::error::DomainResult;

/// Book entity - a title in the catalogue. Physical items are [`BookCopy`]s.
///
/// [`BookCopy`]: super::BookCopy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    /// Format is not checked here.
    pub isbn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        published_year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year,
            isbn: isbn.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_empty("title", &self.title)?;
        require_non_empty("author", &self.author)
    }
}
