//! Home page route handler.

use axum::response::Html;

/// Static landing page describing the API.
pub async fn home() -> Html<&'static str> {
    Html("<h1>Bakery GET-POST-PATCH-DELETE API</h1>")
}
