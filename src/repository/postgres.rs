//! PostgreSQL record store

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use super::RecordStore;
use crate::{
    error::AppResult,
    models::{Entity, RecordFields},
};

/// Table-backed store for one entity type.
///
/// Every statement checks a connection out of the pool and hands it back once
/// the statement completes, including on error. Nothing is held between calls.
pub struct PgStore<E> {
    pool: Pool<Postgres>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgStore<E> {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

fn columns<E: Entity>() -> &'static [&'static str] {
    <E::Fields as RecordFields>::COLUMNS
}

fn insert_sql<E: Entity>() -> String {
    let columns = columns::<E>();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        E::KIND.table(),
        columns.join(", "),
        placeholders.join(", "),
        E::KIND.id_column()
    )
}

fn update_sql<E: Entity>() -> String {
    let columns = columns::<E>();
    let sets: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        E::KIND.table(),
        sets.join(", "),
        E::KIND.id_column(),
        columns.len() + 1
    )
}

#[async_trait]
impl<E: Entity> RecordStore<E> for PgStore<E> {
    async fn insert(&self, fields: &E::Fields) -> AppResult<i32> {
        let sql = insert_sql::<E>();
        let row = fields.bind(sqlx::query(&sql)).fetch_one(&self.pool).await?;
        Ok(row.try_get(0)?)
    }

    async fn fetch(&self, id: i32) -> AppResult<Option<E>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = $1",
            E::KIND.table(),
            E::KIND.id_column()
        );
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_all(&self) -> AppResult<Vec<E>> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            E::KIND.table(),
            E::KIND.id_column()
        );
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update(&self, id: i32, fields: &E::Fields) -> AppResult<u64> {
        let sql = update_sql::<E>();
        let result = fields
            .bind(sqlx::query(&sql))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            E::KIND.table(),
            E::KIND.id_column()
        );
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
            E::KIND.table(),
            E::KIND.id_column()
        );
        let found: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}
