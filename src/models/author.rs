//! Author model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{reject_nul, Entity, EntityKind, PgQuery, RecordFields};

/// Author fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct AuthorFields {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    #[schema(example = "Austen")]
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "reject_nul")
    )]
    pub nationality: Option<String>,
}

/// Author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub author_id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: AuthorFields,
    pub created_at: DateTime<Utc>,
}

impl RecordFields for AuthorFields {
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "birth_date", "nationality"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(self.birth_date)
            .bind(&self.nationality)
    }
}

impl Entity for Author {
    type Fields = AuthorFields;

    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> i32 {
        self.author_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn fields(&self) -> &AuthorFields {
        &self.fields
    }

    fn from_parts(id: i32, created_at: DateTime<Utc>, fields: AuthorFields) -> Self {
        Self {
            author_id: id,
            fields,
            created_at,
        }
    }
}
