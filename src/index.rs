// src/index.rs

use std::collections::HashMap;

use log::{debug, trace};
use strsim::jaro_winkler;

use crate::config::{JARO_WINKLER_FLOOR, SEARCH_THRESHOLD};
use crate::matching::similarity::{normalize_name, word_set_similarity};
use crate::models::{CanonicalIngredient, IngredientAttributes, IngredientCatalog, IngredientKind};

// Relative field weights per ingredient kind. Name always dominates;
// secondary fields only surface an entry when the name alone would not.
const WEIGHT_NAME: f64 = 1.0;
const WEIGHT_DESCRIPTION: f64 = 0.3;
const WEIGHT_GRAIN_TYPE: f64 = 0.4;
const WEIGHT_HOP_ORIGIN: f64 = 0.2;
const WEIGHT_YEAST_MANUFACTURER: f64 = 0.8;
const WEIGHT_YEAST_CODE: f64 = 0.9;

// Substring containment scores well but below an exact hit, scaled a
// little by how much of the longer string is covered.
const CONTAINMENT_BASE: f64 = 0.7;
const CONTAINMENT_SPAN: f64 = 0.3;

/// One weighted, pre-normalized searchable field of a catalog entry.
#[derive(Debug, Clone)]
struct IndexedField {
    text: String,
    weight: f64,
}

/// A catalog entry with its searchable fields, ready for scoring.
#[derive(Debug, Clone)]
struct IndexedEntry {
    /// Position in the `KindIndex::items` list
    item: usize,
    fields: Vec<IndexedField>,
}

/// A fuzzy-search hit: a catalog entry plus its base similarity in [0, 1].
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub ingredient: &'a CanonicalIngredient,
    pub score: f64,
}

/// Per-kind fuzzy-search index over the catalog.
///
/// Entries keep their catalog order, which makes hit order (and therefore
/// tie-breaking downstream) deterministic.
#[derive(Debug, Clone)]
pub struct KindIndex {
    kind: IngredientKind,
    items: Vec<CanonicalIngredient>,
    entries: Vec<IndexedEntry>,
}

impl KindIndex {
    fn build(kind: IngredientKind, items: Vec<CanonicalIngredient>) -> Self {
        let mut entries = Vec::with_capacity(items.len());

        for (idx, ingredient) in items.iter().enumerate() {
            let mut fields = vec![IndexedField {
                text: normalize_name(&ingredient.name),
                weight: WEIGHT_NAME,
            }];

            if let Some(description) = &ingredient.description {
                fields.push(IndexedField {
                    text: normalize_name(description),
                    weight: WEIGHT_DESCRIPTION,
                });
            }

            match &ingredient.attributes {
                IngredientAttributes::Grain {
                    grain_type: Some(grain_type),
                    ..
                } => {
                    fields.push(IndexedField {
                        text: normalize_name(grain_type),
                        weight: WEIGHT_GRAIN_TYPE,
                    });
                }
                IngredientAttributes::Hop { .. } => {
                    if let Some(origin) = &ingredient.origin {
                        fields.push(IndexedField {
                            text: normalize_name(origin),
                            weight: WEIGHT_HOP_ORIGIN,
                        });
                    }
                }
                IngredientAttributes::Yeast {
                    manufacturer, code, ..
                } => {
                    if let Some(manufacturer) = manufacturer {
                        fields.push(IndexedField {
                            text: normalize_name(manufacturer),
                            weight: WEIGHT_YEAST_MANUFACTURER,
                        });
                    }
                    if let Some(code) = code {
                        fields.push(IndexedField {
                            text: normalize_name(code),
                            weight: WEIGHT_YEAST_CODE,
                        });
                    }
                }
                _ => {}
            }

            // Drop fields that normalized to nothing
            fields.retain(|f| !f.text.is_empty());
            entries.push(IndexedEntry { item: idx, fields });
        }

        Self {
            kind,
            items,
            entries,
        }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fuzzy search over this kind's entries. An entry surfaces when any
    /// of its fields' raw similarity exceeds `threshold`; the field weight
    /// scales the ranking score only, so a strong hit on a low-weight
    /// field (description, hop origin) still lists the entry. Hits are
    /// sorted descending by score; equal scores keep catalog order
    /// (stable sort).
    pub fn search(&self, query: &str, threshold: f64) -> Vec<SearchHit<'_>> {
        let normalized_query = normalize_name(query);
        if normalized_query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = Vec::new();
        for entry in &self.entries {
            let mut best = 0.0_f64;
            for field in &entry.fields {
                let similarity = field_similarity(&normalized_query, &field.text);
                if similarity <= threshold {
                    continue;
                }
                let score = field.weight * similarity;
                if score > best {
                    best = score;
                }
            }

            if best > 0.0 {
                hits.push(SearchHit {
                    ingredient: &self.items[entry.item],
                    score: best.min(1.0),
                });
            }
        }

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        trace!(
            "Index search for '{}' over {} {} entries produced {} hits",
            query,
            self.items.len(),
            self.kind,
            hits.len()
        );
        hits
    }
}

/// Similarity of a normalized query against one normalized field text.
///
/// The maximum of: Jaro-Winkler (counted only above a floor, since it is
/// lenient on short unrelated strings), normalized edit distance, word-set
/// overlap, and a substring-containment score. All components live in
/// [0, 1].
fn field_similarity(query: &str, text: &str) -> f64 {
    if query == text {
        return 1.0;
    }

    let mut best = 0.0_f64;

    let jw = jaro_winkler(query, text);
    if jw >= JARO_WINKLER_FLOOR {
        best = best.max(jw);
    }

    let max_len = std::cmp::max(query.chars().count(), text.chars().count());
    if max_len > 0 {
        let edit = 1.0 - (strsim::levenshtein(query, text) as f64 / max_len as f64);
        best = best.max(edit);
    }

    best = best.max(word_set_similarity(query, text));

    if query.contains(text) || text.contains(query) {
        let shorter = std::cmp::min(query.chars().count(), text.chars().count());
        let ratio = shorter as f64 / max_len as f64;
        best = best.max(CONTAINMENT_BASE + CONTAINMENT_SPAN * ratio);
    }

    best
}

/// The per-kind indices for one catalog snapshot.
///
/// Build once per catalog; a changed catalog requires a fresh build.
/// Kinds with no catalog entries get no index, which routes their imports
/// straight to the requires-new path.
#[derive(Debug, Clone)]
pub struct IndexSet {
    indices: HashMap<IngredientKind, KindIndex>,
}

impl IndexSet {
    /// Build one fuzzy index per non-empty catalog bucket.
    pub fn build(catalog: &IngredientCatalog) -> Self {
        let mut indices = HashMap::new();

        for kind in IngredientKind::ALL {
            let bucket = catalog.bucket(kind);
            if bucket.is_empty() {
                continue;
            }
            indices.insert(kind, KindIndex::build(kind, bucket.to_vec()));
            debug!("Built {} similarity index with {} entries", kind, bucket.len());
        }

        debug!(
            "Similarity index set ready: {} kinds, {} total entries",
            indices.len(),
            catalog.len()
        );
        Self { indices }
    }

    /// The index for a kind, if that kind had any catalog entries.
    pub fn index_for(&self, kind: IngredientKind) -> Option<&KindIndex> {
        self.indices.get(&kind)
    }
}

// Convenience wrapper used by tests and simple callers.
impl KindIndex {
    pub fn search_default(&self, query: &str) -> Vec<SearchHit<'_>> {
        self.search(query, SEARCH_THRESHOLD)
    }
}
