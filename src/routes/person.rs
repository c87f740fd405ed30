//! Person routes. Patterns come from the named-route table so reversal and routing agree.

use crate::handlers::{create, create_form, delete, delete_confirm, list, update, update_form};
use crate::state::AppState;
use crate::urls::RouteName;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

const FORM_BODY_LIMIT: usize = 64 * 1024;

pub fn person_routes(state: AppState) -> Router {
    let base = state.urls.base().to_string();
    let path = |route: RouteName| format!("{}{}", base, route.pattern());
    Router::new()
        .route(&path(RouteName::Index), get(list))
        .route(&path(RouteName::PersonCreate), get(create_form).post(create))
        .route(&path(RouteName::PersonUpdate), get(update_form).post(update))
        .route(&path(RouteName::PersonDelete), get(delete_confirm).post(delete))
        .layer(RequestBodyLimitLayer::new(FORM_BODY_LIMIT))
        .with_state(state)
}
