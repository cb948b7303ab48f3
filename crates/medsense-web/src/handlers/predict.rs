//! Prediction endpoint: selected symptoms → ranked diseases.

use axum::{extract::State, response::Html};
use axum_extra::extract::{Form, FormRejection};
use medsense_predict::PredictError;
use minijinja::context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::handlers::home::render_home;
use crate::handlers::{render_blocking, render_error};
use crate::state::{AppState, SharedState};

pub const NO_SYMPTOMS_MESSAGE: &str = "Пожалуйста, выберите хотя бы один симптом";
pub const PREDICTION_FAILED_MESSAGE: &str = "Произошла ошибка при анализе симптомов";

/// Form body: the `symptoms` field repeated once per selected symptom.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// GET /predict/ shows the form again.
pub async fn predict_page(State(state): State<SharedState>) -> Html<String> {
    render_home(&state)
}

pub async fn predict_submit(
    State(state): State<SharedState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            debug!("Unreadable prediction form, treating as empty: {e}");
            PredictForm::default()
        }
    };

    render_blocking(state, move |state| render_prediction(state, &form.symptoms)).await
}

fn render_prediction(state: &AppState, symptoms: &[String]) -> Html<String> {
    let Some(predictor) = state.model.predictor() else {
        return render_home(state);
    };

    match predictor.predict(symptoms, &state.diseases) {
        Ok(prediction) => {
            info!(
                submitted = symptoms.len(),
                top = prediction.results.first().map(|r| r.disease.as_str()).unwrap_or("-"),
                "Prediction served"
            );
            let symptoms_count = prediction.symptoms_count();
            state.templates.render(
                "results.html",
                context! {
                    results => prediction.results,
                    symptoms_count => symptoms_count,
                    selected_symptoms => prediction.selected_symptoms,
                },
            )
        }
        Err(PredictError::NoSymptoms) => render_error(state, NO_SYMPTOMS_MESSAGE),
        Err(e) => {
            warn!("Prediction failed: {e}");
            render_error(state, PREDICTION_FAILED_MESSAGE)
        }
    }
}
