//! HTTP handlers for the Person list, create, update and delete views.

pub mod person;
pub use person::*;
