//! Person CRUD: list, create, update and delete Person records over server-rendered HTML forms.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod render;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod urls;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Person, PersonFields, EDITABLE_FIELDS, UPDATE_FIELDS};
pub use routes::{app, common_routes, common_routes_with_ready, person_routes};
pub use service::{FormErrors, PersonForm};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryPersonStore, PersonStore, PgPersonStore};
pub use urls::{RouteName, Urls};
