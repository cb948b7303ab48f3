//! The ordered symptom vocabulary that fixes feature-vector positions.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Fixed ordered list of symptom names. Position i is feature i.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

/// Symptoms sharing an initial letter, for the selection form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterGroup {
    pub letter: String,
    pub items: Vec<String>,
}

impl Vocabulary {
    /// Build from names in feature order. A repeated name keeps its first position.
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self { names, index }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feature position of a symptom, matched exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Group symptoms by uppercased first letter for display.
    ///
    /// Letters outside `А..=Я` go to the `#` group. Groups come out sorted,
    /// and names are sorted within each group.
    pub fn grouped_by_letter(&self) -> Vec<LetterGroup> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for name in self.names.iter().filter(|n| !n.is_empty()) {
            let letter = match name.chars().next().and_then(|c| c.to_uppercase().next()) {
                Some(c) if ('А'..='Я').contains(&c) => c.to_string(),
                _ => "#".to_string(),
            };
            groups.entry(letter).or_default().push(name.clone());
        }

        groups
            .into_iter()
            .map(|(letter, mut items)| {
                items.sort();
                LetterGroup { letter, items }
            })
            .collect()
    }
}
