// src/cache.rs

use std::collections::HashMap;

use log::trace;

use crate::models::{ImportedIngredient, IngredientAttributes, IngredientKind, MatchResult};

/// Deterministic signature of an imported ingredient's match-relevant
/// fields: (kind, name, alpha_acid, color, grain_type).
///
/// Structured key rather than a delimiter-joined string, so delimiter
/// characters inside names cannot collide. Numeric components are stored
/// as their display rendering to keep Eq/Hash total over float inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchSignature {
    kind: IngredientKind,
    name: String,
    alpha_acid: Option<String>,
    color: Option<String>,
    grain_type: Option<String>,
}

impl MatchSignature {
    pub fn of(imported: &ImportedIngredient) -> Self {
        let mut signature = Self {
            kind: imported.kind(),
            name: imported.name.clone(),
            alpha_acid: None,
            color: None,
            grain_type: None,
        };

        match &imported.attributes {
            IngredientAttributes::Grain {
                color, grain_type, ..
            } => {
                signature.color = color.map(|c| c.to_string());
                signature.grain_type = grain_type.clone();
            }
            IngredientAttributes::Hop { alpha_acid } => {
                signature.alpha_acid = alpha_acid.map(|a| a.to_string());
            }
            _ => {}
        }

        signature
    }
}

/// Session-scoped memoization of match results.
///
/// At-most-once computation per distinct signature; entries are never
/// revalidated against the catalog, so the owner must clear the cache if
/// it rebuilds the index from a changed catalog. No expiry.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<MatchSignature, MatchResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, signature: &MatchSignature) -> Option<&MatchResult> {
        let hit = self.entries.get(signature);
        trace!(
            "Match cache {} for '{}'",
            if hit.is_some() { "hit" } else { "miss" },
            signature.name
        );
        hit
    }

    pub fn insert(&mut self, signature: MatchSignature, result: MatchResult) {
        self.entries.insert(signature, result);
    }

    /// Drop all cached results.
    pub fn clear(&mut self) {
        self.entries = HashMap::new();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(name: &str, alpha_acid: Option<f64>) -> ImportedIngredient {
        ImportedIngredient {
            name: name.to_string(),
            description: None,
            attributes: IngredientAttributes::Hop { alpha_acid },
        }
    }

    #[test]
    fn identical_imports_share_a_signature() {
        assert_eq!(
            MatchSignature::of(&hop("Cascade", Some(5.5))),
            MatchSignature::of(&hop("Cascade", Some(5.5)))
        );
    }

    #[test]
    fn signature_distinguishes_relevant_fields() {
        let base = MatchSignature::of(&hop("Cascade", Some(5.5)));
        assert_ne!(base, MatchSignature::of(&hop("Cascade", Some(5.6))));
        assert_ne!(base, MatchSignature::of(&hop("Cascade", None)));
        assert_ne!(base, MatchSignature::of(&hop("Centennial", Some(5.5))));

        // Same name, different kind
        let grain = ImportedIngredient {
            name: "Cascade".to_string(),
            description: None,
            attributes: IngredientAttributes::empty(IngredientKind::Grain),
        };
        assert_ne!(base, MatchSignature::of(&grain));
    }

    #[test]
    fn description_is_not_part_of_the_signature() {
        let mut with_description = hop("Cascade", Some(5.5));
        with_description.description = Some("floral, citrus".to_string());
        assert_eq!(
            MatchSignature::of(&with_description),
            MatchSignature::of(&hop("Cascade", Some(5.5)))
        );
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = ResultCache::new();
        let imported = hop("Cascade", Some(5.5));
        let result = MatchResult {
            imported: imported.clone(),
            matches: Vec::new(),
            best_match: None,
            confidence: 0.0,
            requires_new_ingredient: true,
            suggested_ingredient: None,
        };

        cache.insert(MatchSignature::of(&imported), result);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&MatchSignature::of(&imported)).is_some());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&MatchSignature::of(&imported)).is_none());
    }
}
