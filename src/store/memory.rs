//! In-process store, used when no database is configured and by tests.

use super::PersonStore;
use crate::error::AppError;
use crate::model::{Person, PersonFields};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryPersonStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Person>,
    last_id: i64,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn list(&self) -> Result<Vec<Person>, AppError> {
        Ok(self.read().rows.values().cloned().collect())
    }

    async fn get(&self, pk: i64) -> Result<Option<Person>, AppError> {
        Ok(self.read().rows.get(&pk).cloned())
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person, AppError> {
        let mut inner = self.write();
        // Ids are never reused, matching a database sequence.
        inner.last_id += 1;
        let now = Utc::now();
        let person = Person {
            id: inner.last_id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            bio: fields.bio.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update(&self, pk: i64, fields: &PersonFields) -> Result<Option<Person>, AppError> {
        let mut inner = self.write();
        let Some(person) = inner.rows.get_mut(&pk) else {
            return Ok(None);
        };
        person.name = fields.name.clone();
        person.email = fields.email.clone();
        person.bio = fields.bio.clone();
        person.updated_at = Utc::now();
        Ok(Some(person.clone()))
    }

    async fn delete(&self, pk: i64) -> Result<bool, AppError> {
        Ok(self.write().rows.remove(&pk).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
