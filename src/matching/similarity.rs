// src/matching/similarity.rs

use std::collections::HashSet;

use strsim::levenshtein;

/// Normalize an ingredient name for comparison: lowercase, strip
/// non-alphanumeric characters except spaces, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity over normalized names: 1 - d / max_len,
/// 1.0 when both are empty.
fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = std::cmp::max(a.chars().count(), b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

/// Jaccard similarity of the word sets of two normalized names; 0.0 when
/// the union is empty. Also one of the components of the index's field
/// similarity.
pub(crate) fn word_set_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Dedicated name-similarity score in [0, 1] for reporting.
///
/// Serves a different purpose than the fuzzy-index score (reporting vs.
/// ranking), so it is computed independently: the maximum of edit-distance
/// similarity and word-set Jaccard over normalized names, with an exact
/// normalized match short-circuiting to 1.0.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize_name(a);
    let norm_b = normalize_name(b);

    if norm_a == norm_b {
        return 1.0;
    }

    let edit = edit_similarity(&norm_a, &norm_b);
    let words = word_set_similarity(&norm_a, &norm_b);
    edit.max(words)
}
