//! Business logic services

pub mod records;

use crate::{
    error::AppResult,
    models::{Author, Book, Loan, Member},
    repository::Repository,
};

pub use records::RecordService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub authors: RecordService<Author>,
    pub books: RecordService<Book>,
    pub members: RecordService<Member>,
    pub loans: RecordService<Loan>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: RecordService::new(repository.clone()),
            books: RecordService::new(repository.clone()),
            members: RecordService::new(repository.clone()),
            loans: RecordService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the record store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
