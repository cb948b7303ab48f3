//! HTTP handlers for all web routes.
//!
//! Every predictable failure renders a normal page with a readable message
//! and status 200; nothing here returns a 500.

pub mod home;
pub mod predict;
pub mod disease;
pub mod knowledge_base;
pub mod pages;

use axum::response::Html;
use minijinja::context;
use tracing::error;

use crate::state::{AppState, SharedState};

pub const REQUEST_FAILED_MESSAGE: &str = "Не удалось обработать запрос";

/// Render the shared error page.
pub(crate) fn render_error(state: &AppState, message: &str) -> Html<String> {
    state.templates.render(
        "error.html",
        context! {
            error => message,
            model_error => state.model.user_message(),
        },
    )
}

/// Render a page on tokio's blocking pool.
///
/// Anything that locks the SQLite connection or runs the classifier goes
/// through here, never directly on a runtime worker. A panic inside
/// `render` yields the error page.
pub(crate) async fn render_blocking<F>(state: SharedState, render: F) -> Html<String>
where
    F: FnOnce(&AppState) -> Html<String> + Send + 'static,
{
    let task_state = state.clone();
    match tokio::task::spawn_blocking(move || render(&task_state)).await {
        Ok(html) => html,
        Err(e) => {
            error!("Page rendering task failed: {e}");
            render_error(&state, REQUEST_FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use medsense_db::Database;

    use crate::config::Config;
    use crate::state::ModelStatus;

    fn state() -> SharedState {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.initialize().unwrap();
        let model = ModelStatus::Unavailable { reason: "not loaded".to_string() };
        Arc::new(AppState::new(db, model, Config::default()).unwrap())
    }

    #[tokio::test]
    async fn test_render_blocking_leaves_runtime_thread() {
        let caller = std::thread::current().id();
        let Html(html) = render_blocking(state(), move |state| {
            assert_ne!(std::thread::current().id(), caller);
            render_error(state, "rendered on the blocking pool")
        })
        .await;
        assert!(html.contains("rendered on the blocking pool"));
    }

    #[tokio::test]
    async fn test_render_blocking_contains_panics() {
        let Html(html) = render_blocking(state(), |_| panic!("template state corrupted")).await;
        assert!(html.contains(REQUEST_FAILED_MESSAGE));
        assert!(!html.contains("template state corrupted"));
    }
}
