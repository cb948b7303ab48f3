//! Home page: symptom selection form.

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::state::{AppState, SharedState};

pub async fn home(State(state): State<SharedState>) -> Html<String> {
    render_home(&state)
}

pub(crate) fn render_home(state: &AppState) -> Html<String> {
    state.templates.render(
        "home.html",
        context! {
            symptoms_by_letter => state.vocabulary.grouped_by_letter(),
            symptoms_count => state.vocabulary.len(),
            diseases_count => state.model.labels().len(),
            model_loaded => state.model.is_ready(),
            model_error => state.model.user_message(),
        },
    )
}
