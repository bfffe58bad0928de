//! Landing page and browser client script.

use axum::http::header;
use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

/// `GET /` — serves the chat page.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /static/script.js`
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}
