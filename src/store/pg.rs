//! PostgreSQL-backed store. Identifiers are fixed; values are always bound parameters.

use super::PersonStore;
use crate::error::AppError;
use crate::migration::PERSON_TABLE;
use crate::model::{Person, PersonFields};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, name, email, bio, created_at, updated_at";

#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        PgPersonStore { pool }
    }
}

fn row_to_person(row: &PgRow) -> Result<Person, sqlx::Error> {
    Ok(Person {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        bio: row.try_get("bio")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn list(&self) -> Result<Vec<Person>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, PERSON_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let people = rows.iter().map(row_to_person).collect::<Result<Vec<_>, _>>()?;
        Ok(people)
    }

    async fn get(&self, pk: i64) -> Result<Option<Person>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, PERSON_TABLE);
        tracing::debug!(sql = %sql, pk, "query");
        let row = sqlx::query(&sql).bind(pk).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(row_to_person).transpose()?)
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email, bio) VALUES ($1, $2, $3) RETURNING {}",
            PERSON_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(&fields.bio)
            .fetch_one(&self.pool)
            .await?;
        Ok(row_to_person(&row)?)
    }

    async fn update(&self, pk: i64, fields: &PersonFields) -> Result<Option<Person>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, email = $2, bio = $3, updated_at = NOW() WHERE id = $4 RETURNING {}",
            PERSON_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, pk, "query");
        let row = sqlx::query(&sql)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(&fields.bio)
            .bind(pk)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_person).transpose()?)
    }

    async fn delete(&self, pk: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", PERSON_TABLE);
        tracing::debug!(sql = %sql, pk, "query");
        let result = sqlx::query(&sql).bind(pk).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
