//! The Person record and its editable field set.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fields accepted by the create form (every editable column).
pub const EDITABLE_FIELDS: &[&str] = &["name", "email", "bio"];

/// Fields accepted by the update form.
pub const UPDATE_FIELDS: &[&str] = &["name", "email", "bio"];

pub const NAME_MAX_LENGTH: usize = 100;
pub const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cleaned, validated values for the editable columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonFields {
    pub name: String,
    pub email: String,
    pub bio: String,
}

impl Person {
    pub fn fields(&self) -> PersonFields {
        PersonFields {
            name: self.name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
        }
    }

    /// Display label used on confirmation pages and in logs.
    pub fn label(&self) -> &str {
        &self.name
    }
}

impl PersonFields {
    /// Value of an editable column by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "bio" => Some(&self.bio),
            _ => None,
        }
    }
}
