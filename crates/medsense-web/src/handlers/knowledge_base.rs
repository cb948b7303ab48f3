//! Knowledge base: every disease, indexed by first letter.

use std::collections::BTreeMap;

use axum::{extract::State, response::Html};
use medsense_common::Disease;
use minijinja::context;
use serde::Serialize;
use tracing::warn;

use crate::handlers::{render_blocking, render_error};
use crate::state::{AppState, SharedState};

pub const LIST_FAILED_MESSAGE: &str = "Не удалось загрузить базу знаний";

#[derive(Debug, Serialize)]
pub struct KnowledgeBaseEntry {
    pub name: String,
    pub severity_display: &'static str,
    pub info: Disease,
}

#[derive(Debug, Serialize)]
pub struct KnowledgeBaseLetter {
    pub letter: String,
    pub diseases: Vec<KnowledgeBaseEntry>,
}

pub async fn knowledge_base(State(state): State<SharedState>) -> Html<String> {
    render_blocking(state, render_knowledge_base).await
}

fn render_knowledge_base(state: &AppState) -> Html<String> {
    let diseases = match state.diseases.list_all() {
        Ok(d) => d,
        Err(e) => {
            warn!("Knowledge base listing failed: {e}");
            return render_error(state, LIST_FAILED_MESSAGE);
        }
    };

    let total = diseases.len();
    state.templates.render(
        "knowledge_base.html",
        context! {
            diseases_by_letter => group_by_initial(diseases),
            total_diseases => total,
        },
    )
}

/// Group diseases by uppercased first letter. Letters come out sorted and
/// each group keeps the input order.
pub fn group_by_initial(diseases: Vec<Disease>) -> Vec<KnowledgeBaseLetter> {
    let mut groups: BTreeMap<String, Vec<KnowledgeBaseEntry>> = BTreeMap::new();
    for disease in diseases {
        let letter = disease.initial().unwrap_or_default();
        groups.entry(letter).or_default().push(KnowledgeBaseEntry {
            name: disease.name.clone(),
            severity_display: disease.severity_display(),
            info: disease,
        });
    }

    groups
        .into_iter()
        .map(|(letter, diseases)| KnowledgeBaseLetter { letter, diseases })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disease(name: &str, severity: &str) -> Disease {
        Disease {
            name: name.to_string(),
            description: String::new(),
            treatment: String::new(),
            symptoms: vec![],
            severity: severity.to_string(),
            specialist: "Терапевт".to_string(),
            category: "Уточняется".to_string(),
        }
    }

    #[test]
    fn test_group_by_initial() {
        let groups = group_by_initial(vec![
            disease("Ангина", "medium"),
            disease("Астма", "variable"),
            disease("COVID-19", "high"),
            disease("грипп", "bogus"),
        ]);

        let letters: Vec<&str> = groups.iter().map(|g| g.letter.as_str()).collect();
        assert_eq!(letters, vec!["C", "А", "Г"]);

        let a = &groups[1];
        assert_eq!(a.diseases.len(), 2);
        assert_eq!(a.diseases[1].severity_display, "ЗАВИСИТ ОТ СТАДИИ");
        assert_eq!(groups[2].diseases[0].severity_display, "НЕОПРЕДЕЛЕНА");
    }
}
