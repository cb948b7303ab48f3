//! Disease detail pages, with "did you mean" suggestions for unknown names.

use axum::{
    extract::{Path, State},
    response::Html,
};
use medsense_predict::{resolve, suggest, Resolution};
use minijinja::context;
use tracing::{debug, warn};

use crate::handlers::{render_blocking, render_error};
use crate::state::{AppState, SharedState};

pub const LOOKUP_FAILED_MESSAGE: &str = "Не удалось загрузить информацию о заболевании";

pub const EMERGENCY_CONTACTS: [&str; 3] = [
    "112 - Единая служба спасения",
    "103 - Скорая помощь",
    "03 - Скорая помощь (старый номер)",
];

/// GET /disease/{name}/, reached from prediction results.
pub async fn disease_detail(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Html<String> {
    render_blocking(state, move |state| render_disease(state, &name, false)).await
}

/// GET /knowledge-base/disease/{name}/, reached from the knowledge base.
pub async fn kb_disease_detail(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Html<String> {
    render_blocking(state, move |state| render_disease(state, &name, true)).await
}

fn render_disease(state: &AppState, name: &str, is_from_knowledge_base: bool) -> Html<String> {
    let resolution = match resolve(&state.diseases, name) {
        Ok(r) => r,
        Err(e) => {
            warn!(disease = %name, "Disease lookup failed: {e}");
            return render_error(state, LOOKUP_FAILED_MESSAGE);
        }
    };

    match resolution {
        Resolution::Unknown(_) => {
            let model = &state.config.model;
            let suggestions = suggest(
                name,
                state.model.labels(),
                model.suggestion_cutoff,
                model.max_suggestions,
            );
            debug!(disease = %name, "Unknown disease, {} suggestions", suggestions.len());
            state.templates.render(
                "disease_not_found.html",
                context! {
                    searched_disease => name,
                    suggestions => suggestions,
                    is_from_knowledge_base => is_from_knowledge_base,
                    model_error => state.model.user_message(),
                },
            )
        }
        Resolution::Known(disease) => state.templates.render(
            "disease_detail.html",
            context! {
                disease_name => name,
                severity_display => disease.severity_display(),
                description => disease.description,
                treatment => disease.treatment,
                symptoms => disease.symptoms,
                severity => disease.severity,
                specialist => disease.specialist,
                category => disease.category,
                emergency_contacts => EMERGENCY_CONTACTS,
                is_from_knowledge_base => is_from_knowledge_base,
            },
        ),
    }
}
