//! Static informational pages.

use axum::{extract::State, http::StatusCode, response::Html};
use minijinja::context;

use crate::state::SharedState;

pub async fn about(State(state): State<SharedState>) -> Html<String> {
    state.templates.render("about.html", context! {})
}

pub async fn how_to_use(State(state): State<SharedState>) -> Html<String> {
    state.templates.render("how_to_use.html", context! {})
}

/// Fallback for unmatched routes.
pub async fn not_found(State(state): State<SharedState>) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, state.templates.render("not_found.html", context! {}))
}
