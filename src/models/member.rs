//! Library member model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{reject_nul, Entity, EntityKind, PgQuery, RecordFields};

/// Member fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct MemberFields {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "reject_nul")
    )]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "reject_nul")
    )]
    #[schema(example = "reader@example.org")]
    pub email: String,
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "reject_nul")
    )]
    pub phone_number: Option<String>,
    pub membership_date: NaiveDate,
}

/// Member record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub member_id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: MemberFields,
    pub created_at: DateTime<Utc>,
}

impl RecordFields for MemberFields {
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone_number",
        "membership_date",
    ];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(&self.email)
            .bind(&self.phone_number)
            .bind(self.membership_date)
    }
}

impl Entity for Member {
    type Fields = MemberFields;

    const KIND: EntityKind = EntityKind::Member;

    fn id(&self) -> i32 {
        self.member_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn fields(&self) -> &MemberFields {
        &self.fields
    }

    fn from_parts(id: i32, created_at: DateTime<Utc>, fields: MemberFields) -> Self {
        Self {
            member_id: id,
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
    fn test_membership_date_required() {
        let result = serde_json::from_value::<MemberFields>(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.org"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let fields: MemberFields = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "not-an-address",
            "membership_date": "2024-01-15"
        }))
        .unwrap();
        let errors = fields.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_valid_member() {
        let fields: MemberFields = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.org",
            "phone_number": "555-0100",
            "membership_date": "2024-01-15"
        }))
        .unwrap();
        assert!(fields.validate().is_ok());
        assert!(fields.references().is_empty());
    }
}
