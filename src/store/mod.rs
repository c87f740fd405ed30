//! Person persistence: a trait with PostgreSQL and in-memory backends.

mod database;
mod memory;
mod pg;

pub use database::ensure_database_exists;
pub use memory::MemoryPersonStore;
pub use pg::PgPersonStore;

use crate::error::AppError;
use crate::model::{Person, PersonFields};
use async_trait::async_trait;

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All records, ascending by id.
    async fn list(&self) -> Result<Vec<Person>, AppError>;

    async fn get(&self, pk: i64) -> Result<Option<Person>, AppError>;

    async fn create(&self, fields: &PersonFields) -> Result<Person, AppError>;

    /// Overwrite the editable columns of one record. `None` when `pk` names no record.
    async fn update(&self, pk: i64, fields: &PersonFields) -> Result<Option<Person>, AppError>;

    /// Returns false when `pk` names no record.
    async fn delete(&self, pk: i64) -> Result<bool, AppError>;

    /// Backend liveness for the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend name reported by `/ready`.
    fn backend(&self) -> &'static str;
}
