//! Data models for the library records
//!
//! Every entity is split into a `*Fields` type (what a client sends on create
//! and update) and a record type (identifier, flattened fields, creation
//! timestamp) as held by the store.

pub mod author;
pub mod book;
pub mod loan;
pub mod member;

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::Query,
    FromRow, Postgres,
};
use validator::{Validate, ValidationError};

pub use author::{Author, AuthorFields};
pub use book::{Book, BookFields};
pub use loan::{Loan, LoanFields};
pub use member::{Member, MemberFields};

/// Statement type the field binders write into
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// The four record types managed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Book,
    Member,
    Loan,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Book => "Book",
            EntityKind::Member => "Member",
            EntityKind::Loan => "Loan",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Author => "authors",
            EntityKind::Book => "books",
            EntityKind::Member => "members",
            EntityKind::Loan => "loans",
        }
    }

    pub fn id_column(self) -> &'static str {
        match self {
            EntityKind::Author => "author_id",
            EntityKind::Book => "book_id",
            EntityKind::Member => "member_id",
            EntityKind::Loan => "loan_id",
        }
    }
}

/// A field holding another entity's identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub kind: EntityKind,
    pub id: i32,
}

/// Client-supplied field set of an entity
pub trait RecordFields: Validate + Clone + Debug + Send + Sync + 'static {
    /// Writable columns, in the order `bind` attaches them
    const COLUMNS: &'static [&'static str];

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    /// Identifiers of other entities this field set points at
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

/// A stored record: store-assigned identifier and timestamp around its fields
pub trait Entity:
    Clone + Debug + Serialize + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    type Fields: RecordFields;

    const KIND: EntityKind;

    fn id(&self) -> i32;

    fn created_at(&self) -> DateTime<Utc>;

    fn fields(&self) -> &Self::Fields;

    fn from_parts(id: i32, created_at: DateTime<Utc>, fields: Self::Fields) -> Self;
}

/// Text columns cannot hold NUL, so such input is refused before it reaches a store
pub(crate) fn reject_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        let mut err = ValidationError::new("nul_character");
        err.message = Some("must not contain NUL characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tables() {
        for kind in [EntityKind::Author, EntityKind::Book, EntityKind::Member, EntityKind::Loan] {
            assert!(kind.id_column().starts_with(&kind.label().to_lowercase()));
            assert!(kind.table().starts_with(&kind.label().to_lowercase()));
        }
    }

    #[test]
    fn test_columns_exclude_store_assigned() {
        let all = [
            AuthorFields::COLUMNS,
            BookFields::COLUMNS,
            MemberFields::COLUMNS,
            LoanFields::COLUMNS,
        ];
        for columns in all {
            assert!(!columns.contains(&"created_at"));
        }
        assert!(!AuthorFields::COLUMNS.contains(&"author_id"));
        assert!(!MemberFields::COLUMNS.contains(&"member_id"));
        assert!(BookFields::COLUMNS.contains(&"author_id"));
        assert!(!BookFields::COLUMNS.contains(&"book_id"));
        assert!(!LoanFields::COLUMNS.contains(&"loan_id"));
    }
}
