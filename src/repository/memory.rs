//! In-memory record store for tests and local development

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::RecordStore;
use crate::{
    error::{AppError, AppResult},
    models::Entity,
};

struct Table<E> {
    last_id: i32,
    rows: BTreeMap<i32, E>,
}

/// Process-local store for one entity type.
///
/// Identifiers increase monotonically and are never handed out twice, even
/// after the record holding them is deleted.
pub struct MemoryStore<E> {
    table: Arc<RwLock<Table<E>>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                last_id: 0,
                rows: BTreeMap::new(),
            })),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Table<E>>> {
        self.table
            .read()
            .map_err(|e| AppError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Table<E>>> {
        self.table
            .write()
            .map_err(|e| AppError::Internal(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for MemoryStore<E> {
    async fn insert(&self, fields: &E::Fields) -> AppResult<i32> {
        let mut table = self.write()?;
        let id = table.last_id.checked_add(1).ok_or_else(|| {
            AppError::Internal(format!("{} identifiers exhausted", E::KIND.label()))
        })?;
        table.last_id = id;
        table
            .rows
            .insert(id, E::from_parts(id, Utc::now(), fields.clone()));
        Ok(id)
    }

    async fn fetch(&self, id: i32) -> AppResult<Option<E>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn fetch_all(&self) -> AppResult<Vec<E>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn update(&self, id: i32, fields: &E::Fields) -> AppResult<u64> {
        let mut table = self.write()?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = E::from_parts(id, row.created_at(), fields.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        Ok(self.write()?.rows.remove(&id).map_or(0, |_| 1))
    }
}
