//! Response helpers shared by the Person views.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// `302 Found` to `location`, as sent after a successful form submission.
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

pub fn page(html: String) -> Response {
    (StatusCode::OK, Html(html)).into_response()
}
