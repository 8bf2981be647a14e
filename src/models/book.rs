//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{reject_nul, Entity, EntityKind, PgQuery, RecordFields, Reference};

/// Book fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct BookFields {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    #[schema(example = "Emma")]
    pub title: String,
    /// Identifier of an existing author
    pub author_id: i32,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    pub isbn: String,
    pub published_year: Option<i32>,
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "reject_nul")
    )]
    pub genre: Option<String>,
    /// Copies on the shelf
    #[serde(default)]
    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub quantity_available: i32,
}

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub book_id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: BookFields,
    pub created_at: DateTime<Utc>,
}

impl RecordFields for BookFields {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "author_id",
        "isbn",
        "published_year",
        "genre",
        "quantity_available",
    ];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.title)
            .bind(self.author_id)
            .bind(&self.isbn)
            .bind(self.published_year)
            .bind(&self.genre)
            .bind(self.quantity_available)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference {
            field: "author_id",
            kind: EntityKind::Author,
            id: self.author_id,
        }]
    }
}

impl Entity for Book {
    type Fields = BookFields;

    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> i32 {
        self.book_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn fields(&self) -> &BookFields {
        &self.fields
    }

    fn from_parts(id: i32, created_at: DateTime<Utc>, fields: BookFields) -> Self {
        Self {
            book_id: id,
            fields,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_defaults_to_zero() {
        let fields: BookFields =
            serde_json::from_value(json!({"title": "Emma", "author_id": 1, "isbn": "123"})).unwrap();
        assert_eq!(fields.quantity_available, 0);
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let result = serde_json::from_value::<BookFields>(json!({"author_id": 1, "isbn": "123"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let fields: BookFields = serde_json::from_value(json!({
            "title": "Emma",
            "author_id": 1,
            "isbn": "123",
            "quantity_available": -1
        }))
        .unwrap();
        let errors = fields.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity_available"));
    }

    #[test]
    fn test_references_author() {
        let fields: BookFields =
            serde_json::from_value(json!({"title": "Emma", "author_id": 7, "isbn": "123"})).unwrap();
        assert_eq!(
            fields.references(),
            vec![Reference {
                field: "author_id",
                kind: EntityKind::Author,
                id: 7
            }]
        );
    }
}
