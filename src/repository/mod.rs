//! Repository layer: keyed record storage per entity type

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, Entity, EntityKind, Loan, Member},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Durable storage for one entity type.
///
/// Write operations report the number of rows they touched; deciding what a
/// zero means is left to the caller.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    /// Insert a new record and return the identifier the store assigned
    async fn insert(&self, fields: &E::Fields) -> AppResult<i32>;

    async fn fetch(&self, id: i32) -> AppResult<Option<E>>;

    /// All records, ordered by identifier
    async fn fetch_all(&self) -> AppResult<Vec<E>>;

    async fn update(&self, id: i32, fields: &E::Fields) -> AppResult<u64>;

    async fn delete(&self, id: i32) -> AppResult<u64>;

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.fetch(id).await?.is_some())
    }
}

/// Main repository struct holding one store per entity type
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub authors: Arc<dyn RecordStore<Author>>,
    pub books: Arc<dyn RecordStore<Book>>,
    pub members: Arc<dyn RecordStore<Member>>,
    pub loans: Arc<dyn RecordStore<Loan>>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(PgStore::<Author>::new(pool.clone())),
            books: Arc::new(PgStore::<Book>::new(pool.clone())),
            members: Arc::new(PgStore::<Member>::new(pool.clone())),
            loans: Arc::new(PgStore::<Loan>::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        Self {
            pool: None,
            authors: Arc::new(MemoryStore::<Author>::new()),
            books: Arc::new(MemoryStore::<Book>::new()),
            members: Arc::new(MemoryStore::<Member>::new()),
            loans: Arc::new(MemoryStore::<Loan>::new()),
        }
    }

    /// Whether a record of the given kind exists
    pub async fn exists(&self, kind: EntityKind, id: i32) -> AppResult<bool> {
        match kind {
            EntityKind::Author => self.authors.exists(id).await,
            EntityKind::Book => self.books.exists(id).await,
            EntityKind::Member => self.members.exists(id).await,
            EntityKind::Loan => self.loans.exists(id).await,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

/// Access to the store of one entity type
pub trait StoreFor<E: Entity> {
    fn store(&self) -> &dyn RecordStore<E>;
}

impl StoreFor<Author> for Repository {
    fn store(&self) -> &dyn RecordStore<Author> {
        self.authors.as_ref()
    }
}

impl StoreFor<Book> for Repository {
    fn store(&self) -> &dyn RecordStore<Book> {
        self.books.as_ref()
    }
}

impl StoreFor<Member> for Repository {
    fn store(&self) -> &dyn RecordStore<Member> {
        self.members.as_ref()
    }
}

impl StoreFor<Loan> for Repository {
    fn store(&self) -> &dyn RecordStore<Loan> {
        self.loans.as_ref()
    }
}
