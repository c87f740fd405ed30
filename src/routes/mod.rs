//! Router assembly.

mod common;
mod person;

pub use common::{common_routes, common_routes_with_ready};
pub use person::person_routes;

use crate::state::AppState;
use axum::Router;

/// The full application: health/readiness/version plus the Person views under the mount path.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(person_routes(state))
}
