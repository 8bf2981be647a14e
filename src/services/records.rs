//! CRUD service shared by every entity type

use std::marker::PhantomData;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Entity, RecordFields},
    repository::{RecordStore, Repository, StoreFor},
};

pub struct RecordService<E> {
    repository: Repository,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> RecordService<E>
where
    E: Entity,
    Repository: StoreFor<E>,
{
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    fn store(&self) -> &dyn RecordStore<E> {
        self.repository.store()
    }

    fn not_found(id: i32) -> AppError {
        AppError::NotFound(format!("{} {} not found", E::KIND.label(), id))
    }

    /// Field rules first, then every referenced record must exist
    async fn check(&self, fields: &E::Fields) -> AppResult<()> {
        fields.validate()?;

        let mut missing = Vec::new();
        for reference in fields.references() {
            if !self.repository.exists(reference.kind, reference.id).await? {
                missing.push(format!(
                    "{}: {} {} does not exist",
                    reference.field,
                    reference.kind.label(),
                    reference.id
                ));
            }
        }
        if !missing.is_empty() {
            tracing::debug!("Rejected {} with dangling references: {:?}", E::KIND.label(), missing);
            return Err(AppError::Validation(missing.join("; ")));
        }
        Ok(())
    }

    /// List all records
    pub async fn list(&self) -> AppResult<Vec<E>> {
        self.store().fetch_all().await
    }

    /// Get a record by ID
    pub async fn get(&self, id: i32) -> AppResult<E> {
        self.store()
            .fetch(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Create a record and return it as stored
    pub async fn create(&self, fields: &E::Fields) -> AppResult<E> {
        self.check(fields).await?;
        let id = self.store().insert(fields).await?;
        tracing::info!(table = E::KIND.table(), id, "record created");
        self.get(id).await
    }

    /// Replace every field of an existing record
    pub async fn update(&self, id: i32, fields: &E::Fields) -> AppResult<E> {
        self.check(fields).await?;
        if self.store().update(id, fields).await? == 0 {
            return Err(Self::not_found(id));
        }
        tracing::info!(table = E::KIND.table(), id, "record updated");
        self.get(id).await
    }

    /// Delete a record permanently
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.store().delete(id).await? == 0 {
            return Err(Self::not_found(id));
        }
        tracing::info!(table = E::KIND.table(), id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{
        Author, AuthorFields, Book, BookFields, Loan, LoanFields, Member, MemberFields,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn austen() -> AuthorFields {
        AuthorFields {
            first_name: "Jane".to_string(),
            last_name: "Austen".to_string(),
            birth_date: None,
            nationality: None,
        }
    }

    fn emma(author_id: i32) -> BookFields {
        BookFields {
            title: "Emma".to_string(),
            author_id,
            isbn: "123".to_string(),
            published_year: Some(1815),
            genre: None,
            quantity_available: 2,
        }
    }

    fn reader() -> MemberFields {
        MemberFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone_number: None,
            membership_date: date(2024, 1, 15),
        }
    }

    fn loan(book_id: i32, member_id: i32) -> LoanFields {
        LoanFields {
            book_id,
            member_id,
            loan_date: date(2024, 3, 1),
            due_date: date(2024, 3, 15),
            return_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let authors = RecordService::<Author>::new(Repository::in_memory());

        let created = authors.create(&austen()).await.unwrap();
        assert_eq!(created.author_id, 1);
        assert_eq!(created.fields, austen());

        let fetched = authors.get(created.author_id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let repository = Repository::in_memory();
        let authors = RecordService::<Author>::new(repository.clone());
        let members = RecordService::<Member>::new(repository);

        let created = members.create(&reader()).await.unwrap();
        let mut changed = reader();
        changed.phone_number = Some("555-0100".to_string());

        let updated = members.update(created.member_id, &changed).await.unwrap();
        assert_eq!(updated.member_id, created.member_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.fields, changed);
        assert_eq!(members.get(created.member_id).await.unwrap(), updated);

        // other tables are untouched
        assert!(authors.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_final() {
        let authors = RecordService::<Author>::new(Repository::in_memory());
        let created = authors.create(&austen()).await.unwrap();

        authors.delete(created.author_id).await.unwrap();
        assert!(matches!(
            authors.get(created.author_id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(authors.list().await.unwrap().is_empty());
        assert!(matches!(
            authors.delete(created.author_id).await,
            Err(AppError::NotFound(_))
        ));

        let next = authors.create(&austen()).await.unwrap();
        assert_ne!(next.author_id, created.author_id);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let books = RecordService::<Book>::new(Repository::in_memory());
        assert!(matches!(books.get(999999).await, Err(AppError::NotFound(_))));
        assert!(matches!(books.delete(999999).await, Err(AppError::NotFound(_))));

        let authors = RecordService::<Author>::new(Repository::in_memory());
        assert!(matches!(
            authors.update(999999, &austen()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_runs_before_existence() {
        let books = RecordService::<Book>::new(Repository::in_memory());
        let mut invalid = emma(1);
        invalid.quantity_available = -1;

        let result = books.update(999999, &invalid).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_fields_store_nothing() {
        let repository = Repository::in_memory();
        let authors = RecordService::<Author>::new(repository.clone());
        let books = RecordService::<Book>::new(repository.clone());
        let members = RecordService::<Member>::new(repository.clone());
        let loans = RecordService::<Loan>::new(repository);

        let author = authors.create(&austen()).await.unwrap();
        let mut negative = emma(author.author_id);
        negative.quantity_available = -1;
        let Err(AppError::Validation(message)) = books.create(&negative).await else {
            panic!("expected a validation error");
        };
        assert!(message.contains("quantity_available"));
        assert!(books.list().await.unwrap().is_empty());

        let book = books.create(&emma(author.author_id)).await.unwrap();
        let member = members.create(&reader()).await.unwrap();
        let mut backwards = loan(book.book_id, member.member_id);
        backwards.due_date = date(2024, 2, 1);
        assert!(matches!(
            loans.create(&backwards).await,
            Err(AppError::Validation(_))
        ));
        assert!(loans.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_references_rejected() {
        let repository = Repository::in_memory();
        let books = RecordService::<Book>::new(repository.clone());
        let loans = RecordService::<Loan>::new(repository);

        let Err(AppError::Validation(message)) = books.create(&emma(42)).await else {
            panic!("expected a validation error");
        };
        assert_eq!(message, "author_id: Author 42 does not exist");

        let Err(AppError::Validation(message)) = loans.create(&loan(1, 2)).await else {
            panic!("expected a validation error");
        };
        assert_eq!(
            message,
            "book_id: Book 1 does not exist; member_id: Member 2 does not exist"
        );
        assert!(books.list().await.unwrap().is_empty());
        assert!(loans.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_referenced_author_leaves_books() {
        let repository = Repository::in_memory();
        let authors = RecordService::<Author>::new(repository.clone());
        let books = RecordService::<Book>::new(repository);

        let author = authors.create(&austen()).await.unwrap();
        let book = books.create(&emma(author.author_id)).await.unwrap();

        authors.delete(author.author_id).await.unwrap();
        assert_eq!(books.list().await.unwrap(), vec![book.clone()]);

        // the dangling author_id can no longer be written
        assert!(matches!(
            books.update(book.book_id, &emma(author.author_id)).await,
            Err(AppError::Validation(_))
        ));
    }

    struct UnreachableStore;

    #[async_trait]
    impl RecordStore<Author> for UnreachableStore {
        async fn insert(&self, _fields: &AuthorFields) -> AppResult<i32> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn fetch(&self, _id: i32) -> AppResult<Option<Author>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn fetch_all(&self) -> AppResult<Vec<Author>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn update(&self, _id: i32, _fields: &AuthorFields) -> AppResult<u64> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn delete(&self, _id: i32) -> AppResult<u64> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_not_downgraded() {
        let mut repository = Repository::in_memory();
        repository.authors = Arc::new(UnreachableStore);
        let authors = RecordService::<Author>::new(repository.clone());
        let books = RecordService::<Book>::new(repository);

        assert!(matches!(authors.list().await, Err(AppError::Database(_))));
        assert!(matches!(authors.get(1).await, Err(AppError::Database(_))));
        assert!(matches!(authors.delete(1).await, Err(AppError::Database(_))));
        assert!(matches!(
            authors.create(&austen()).await,
            Err(AppError::Database(_))
        ));
        assert!(matches!(
            authors.update(1, &austen()).await,
            Err(AppError::Database(_))
        ));
        // reference lookups go through the same store
        assert!(matches!(
            books.create(&emma(1)).await,
            Err(AppError::Database(_))
        ));
    }
}
