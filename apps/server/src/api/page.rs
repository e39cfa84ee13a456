//! The browser page. It only talks to the JSON API.

use axum::{http::header, response::Html, response::IntoResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

/// Serves the main page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Serves the page script.
pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], SCRIPT_JS)
}
