//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    home::home,
    predict::{predict_page, predict_submit},
    disease::{disease_detail, kb_disease_detail},
    knowledge_base::knowledge_base,
    pages::{about, how_to_use, not_found},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                              get(home))
        .route("/predict/",                      get(predict_page).post(predict_submit))
        .route("/disease/{name}/",               get(disease_detail))
        .route("/knowledge-base/",               get(knowledge_base))
        .route("/knowledge-base/disease/{name}/", get(kb_disease_detail))
        .route("/about/",                        get(about))
        .route("/how-to-use/",                   get(how_to_use))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
