//! Fuzzy "did you mean" suggestions over the classifier's label set.
//!
//! Scoring is the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common block, recurse on the pieces either side of it, and score
//! `2·M / T` where `M` is the number of matched characters and `T` the
//! combined length. Comparison is per character and case-sensitive.

use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_SUGGESTION_CUTOFF: f64 = 0.3;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Queries at least this long stop indexing their most frequent characters.
const POPULAR_MIN_LEN: usize = 200;

/// Labels similar to `query`, best match first.
///
/// Labels scoring below `cutoff` are dropped. Equal scores are ordered by
/// label, descending. An empty label set yields no suggestions.
pub fn suggest(query: &str, labels: &[String], cutoff: f64, max: usize) -> Vec<String> {
    if max == 0 || labels.is_empty() {
        return Vec::new();
    }

    let matcher = GestaltMatcher::new(query);
    let mut scored: Vec<(f64, &String)> = labels
        .iter()
        .map(|label| (matcher.ratio(label), label))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.cmp(a.1))
    });
    scored.into_iter().take(max).map(|(_, label)| label.clone()).collect()
}

/// Query side of the comparison, indexed once and matched against many labels.
struct GestaltMatcher {
    query: Vec<char>,
    /// Positions of each character in `query`, ascending.
    positions: HashMap<char, Vec<usize>>,
}

impl GestaltMatcher {
    fn new(query: &str) -> Self {
        let query: Vec<char> = query.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in query.iter().enumerate() {
            positions.entry(c).or_default().push(j);
        }

        if query.len() >= POPULAR_MIN_LEN {
            let limit = query.len() / 100 + 1;
            positions.retain(|_, js| js.len() <= limit);
        }

        Self { query, positions }
    }

    fn ratio(&self, label: &str) -> f64 {
        let label: Vec<char> = label.chars().collect();
        let total = label.len() + self.query.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched(&label) as f64 / total as f64
    }

    /// Characters covered by the recursively found common blocks.
    fn matched(&self, label: &[char]) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, label.len(), 0, self.query.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_block(label, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        matched
    }

    /// Longest block shared by `label[alo..ahi]` and `query[blo..bhi]`,
    /// as `(label_start, query_start, len)`. Earliest in `label` wins ties,
    /// then earliest in `query`.
    fn longest_block(
        &self,
        label: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // Length of the block ending at query position j, for the previous row
        let mut run_at: HashMap<usize, usize> = HashMap::new();
        for (i, c) in label.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(js) = self.positions.get(c) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_at = next;
        }

        // Grow across characters dropped from the index
        while best_i > alo && best_j > blo && label[best_i - 1] == self.query[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && label[best_i + best_len] == self.query[best_j + best_len]
        {
            best_len += 1;
        }

        (best_i, best_j, best_len)
    }
}
