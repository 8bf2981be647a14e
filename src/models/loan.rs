//! Loan model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{Entity, EntityKind, PgQuery, RecordFields, Reference};

/// Loan fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[validate(schema(function = "validate_loan_dates"))]
pub struct LoanFields {
    /// Identifier of an existing book
    pub book_id: i32,
    /// Identifier of an existing member
    pub member_id: i32,
    pub loan_date: NaiveDate,
    /// Must not be earlier than `loan_date`
    pub due_date: NaiveDate,
    /// Absent while the loan is open
    pub return_date: Option<NaiveDate>,
}

fn validate_loan_dates(loan: &LoanFields) -> Result<(), ValidationError> {
    if loan.due_date < loan.loan_date {
        let mut err = ValidationError::new("due_date_before_loan_date");
        err.message = Some("due_date must not be earlier than loan_date".into());
        return Err(err);
    }
    if loan.return_date.is_some_and(|returned| returned < loan.loan_date) {
        let mut err = ValidationError::new("return_date_before_loan_date");
        err.message = Some("return_date must not be earlier than loan_date".into());
        return Err(err);
    }
    Ok(())
}

/// Loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub loan_id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: LoanFields,
    pub created_at: DateTime<Utc>,
}

impl RecordFields for LoanFields {
    const COLUMNS: &'static [&'static str] =
        &["book_id", "member_id", "loan_date", "due_date", "return_date"];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.book_id)
            .bind(self.member_id)
            .bind(self.loan_date)
            .bind(self.due_date)
            .bind(self.return_date)
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference {
                field: "book_id",
                kind: EntityKind::Book,
                id: self.book_id,
            },
            Reference {
                field: "member_id",
                kind: EntityKind::Member,
                id: self.member_id,
            },
        ]
    }
}

impl Entity for Loan {
    type Fields = LoanFields;

    const KIND: EntityKind = EntityKind::Loan;

    fn id(&self) -> i32 {
        self.loan_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn fields(&self) -> &LoanFields {
        &self.fields
    }

    fn from_parts(id: i32, created_at: DateTime<Utc>, fields: LoanFields) -> Self {
        Self {
            loan_id: id,
            fields,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(loan_date: NaiveDate, due_date: NaiveDate, return_date: Option<NaiveDate>) -> LoanFields {
        LoanFields {
            book_id: 1,
            member_id: 1,
            loan_date,
            due_date,
            return_date,
        }
    }

    #[test]
    fn test_due_date_may_equal_loan_date() {
        assert!(loan(date(2024, 3, 1), date(2024, 3, 1), None).validate().is_ok());
    }

    #[test]
    fn test_due_date_before_loan_date() {
        let errors = loan(date(2024, 3, 10), date(2024, 3, 1), None)
            .validate()
            .unwrap_err();
        let AppError::Validation(message) = AppError::from(errors) else {
            panic!("expected a validation error");
        };
        assert_eq!(message, "due_date must not be earlier than loan_date");
    }

    #[test]
    fn test_return_date_before_loan_date() {
        let result = loan(date(2024, 3, 10), date(2024, 3, 24), Some(date(2024, 3, 9))).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_references_book_and_member() {
        let kinds: Vec<EntityKind> = loan(date(2024, 3, 1), date(2024, 3, 15), None)
            .references()
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![EntityKind::Book, EntityKind::Member]);
    }
}
