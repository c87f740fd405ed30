//! Schema for the person table. Safe to run on every start.

use crate::error::AppError;
use sqlx::PgPool;

pub const PERSON_TABLE: &str = "person";

const CREATE_PERSON: &str = r#"
CREATE TABLE IF NOT EXISTS person (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    bio TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    tracing::debug!(sql = %CREATE_PERSON, "migration");
    sqlx::query(CREATE_PERSON).execute(pool).await?;
    tracing::info!(table = PERSON_TABLE, "schema ready");
    Ok(())
}
