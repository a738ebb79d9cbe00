// src/matching/mod.rs

pub mod scoring;
pub mod similarity;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::cache::{MatchSignature, ResultCache};
use crate::config::{MatchConfig, SIGNIFICANT_DIFFERENCE_PENALTY};
use crate::error::MatchingError;
use crate::index::IndexSet;
use crate::models::{
    EnhancedMatch, ImportedIngredient, IngredientCatalog, MatchResult, SuggestedIngredient,
};

/// The matching engine for one session.
///
/// Owns the fuzzy indices built from one catalog snapshot plus the
/// session's result cache. Construct one instance per catalog snapshot;
/// a changed catalog needs a fresh matcher (or at minimum `clear_cache`
/// after a rebuild).
#[derive(Debug)]
pub struct IngredientMatcher {
    config: MatchConfig,
    indices: IndexSet,
    cache: ResultCache,
}

impl IngredientMatcher {
    /// Build a matcher over a catalog snapshot with default thresholds.
    pub fn new(catalog: &IngredientCatalog) -> Self {
        Self::with_config(catalog, MatchConfig::default())
    }

    /// Build a matcher with caller-supplied thresholds.
    pub fn with_config(catalog: &IngredientCatalog, config: MatchConfig) -> Self {
        info!(
            "Building ingredient matcher over catalog with {} entries",
            catalog.len()
        );
        Self {
            config,
            indices: IndexSet::build(catalog),
            cache: ResultCache::new(),
        }
    }

    /// Match a batch of imported ingredients, sequentially. Output order
    /// mirrors input order. Total over its input: failures degrade to
    /// requires-new, the batch never aborts.
    pub fn match_ingredients(&mut self, imported: &[ImportedIngredient]) -> Vec<MatchResult> {
        info!("Matching {} imported ingredients...", imported.len());

        let results: Vec<MatchResult> = imported
            .iter()
            .map(|ingredient| self.match_single_ingredient(ingredient))
            .collect();

        let matched = results.iter().filter(|r| r.best_match.is_some()).count();
        info!(
            "Matched {} of {} imported ingredients ({} require new entries)",
            matched,
            results.len(),
            results.len() - matched
        );
        results
    }

    /// Match one imported ingredient, consulting the session cache first.
    pub fn match_single_ingredient(&mut self, imported: &ImportedIngredient) -> MatchResult {
        let signature = MatchSignature::of(imported);
        if let Some(cached) = self.cache.get(&signature) {
            return cached.clone();
        }

        let result = match self.compute_match(imported) {
            Ok(result) => result,
            Err(e) => {
                // Degrade to manual resolution rather than failing the batch.
                warn!(
                    "Matching failed for imported ingredient '{}': {:#}. Falling back to new-ingredient suggestion.",
                    imported.name, e
                );
                self.requires_new_result(imported, Vec::new())
            }
        };

        self.cache.insert(signature, result.clone());
        result
    }

    /// Drop all cached results. Required if the caller rebuilt this
    /// matcher's catalog out from under it.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of distinct imported-ingredient signatures computed so far.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Full scoring pipeline for one import: fuzzy search, kind-specific
    /// re-ranking, then the accept/requires-new decision.
    fn compute_match(&self, imported: &ImportedIngredient) -> Result<MatchResult> {
        let candidates = match self.find_candidates(imported) {
            Ok(candidates) => candidates,
            Err(MatchingError::IndexUnavailable { kind }) => {
                // Unrecognized or empty kind bucket: zero candidates.
                debug!(
                    "No {} index for imported ingredient '{}'; suggesting a new entry",
                    kind, imported.name
                );
                Vec::new()
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("candidate search failed for '{}'", imported.name)
                })
            }
        };

        Ok(self.decide(imported, candidates))
    }

    /// Query the kind's fuzzy index and re-rank the raw hits with
    /// kind-specific heuristics. Returns up to `max_matches` candidates,
    /// sorted descending by enhanced score (stable over the fuzzy-hit
    /// order for ties).
    fn find_candidates(
        &self,
        imported: &ImportedIngredient,
    ) -> std::result::Result<Vec<EnhancedMatch>, MatchingError> {
        let kind = imported.kind();
        if similarity::normalize_name(&imported.name).is_empty() {
            return Err(MatchingError::UnusableName {
                name: imported.name.clone(),
            });
        }
        let index = self
            .indices
            .index_for(kind)
            .ok_or(MatchingError::IndexUnavailable { kind })?;

        let hits = index.search(&imported.name, self.config.search_threshold);
        debug!(
            "Fuzzy search for '{}' returned {} raw {} hits",
            imported.name,
            hits.len(),
            kind
        );

        let mut candidates: Vec<EnhancedMatch> = Vec::with_capacity(hits.len());
        for hit in hits {
            let base_score = hit.score;
            let attribute_score =
                scoring::score_attributes(&imported.attributes, &hit.ingredient.attributes);

            let mut enhanced = base_score + attribute_score.bonus;
            if attribute_score.conflict {
                enhanced *= SIGNIFICANT_DIFFERENCE_PENALTY;
            }
            let enhanced = enhanced.clamp(0.0, 1.0);

            // Reported independently of the ranking score.
            let name_match = similarity::name_similarity(&imported.name, &hit.ingredient.name);

            let mut reasons = Vec::with_capacity(attribute_score.reasons.len() + 1);
            if let Some(reason) = scoring::name_reason(name_match) {
                reasons.push(reason.to_string());
            }
            reasons.extend(attribute_score.reasons);

            candidates.push(EnhancedMatch {
                ingredient: hit.ingredient.clone(),
                confidence: enhanced,
                reasons,
                name_match,
            });
        }

        // Stable sort keeps the fuzzy-hit order for equal scores.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(self.config.max_matches);

        Ok(candidates)
    }

    /// Decision policy: accept the top candidate above the threshold, or
    /// synthesize a draft for a new catalog entry. Pure over the
    /// candidate list.
    fn decide(&self, imported: &ImportedIngredient, candidates: Vec<EnhancedMatch>) -> MatchResult {
        let accept = candidates
            .first()
            .filter(|top| top.confidence > self.config.accept_threshold)
            .cloned();

        match accept {
            Some(best) => {
                debug!(
                    "Accepted '{}' -> '{}' (id {}) with confidence {:.3}",
                    imported.name, best.ingredient.name, best.ingredient.id, best.confidence
                );
                MatchResult {
                    imported: imported.clone(),
                    confidence: best.confidence,
                    best_match: Some(best),
                    matches: candidates,
                    requires_new_ingredient: false,
                    suggested_ingredient: None,
                }
            }
            None => self.requires_new_result(imported, candidates),
        }
    }

    /// The requires-new outcome, with the draft record populated from the
    /// import.
    fn requires_new_result(
        &self,
        imported: &ImportedIngredient,
        candidates: Vec<EnhancedMatch>,
    ) -> MatchResult {
        debug!(
            "No candidate above {:.2} for '{}'; suggesting a new {} entry",
            self.config.accept_threshold,
            imported.name,
            imported.kind()
        );
        MatchResult {
            imported: imported.clone(),
            matches: candidates,
            best_match: None,
            confidence: 0.0,
            requires_new_ingredient: true,
            suggested_ingredient: Some(suggest_ingredient(imported)),
        }
    }
}

/// Synthesize the draft record for an unmatched import: name, kind, a
/// generated description, and whatever kind-relevant attributes the
/// import carried.
fn suggest_ingredient(imported: &ImportedIngredient) -> SuggestedIngredient {
    SuggestedIngredient {
        name: imported.name.clone(),
        description: format!("Imported ingredient: {}", imported.name),
        attributes: imported.attributes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientAttributes, IngredientId, IngredientKind};

    fn catalog_hop(id: &str, name: &str, alpha_acid: Option<f64>) -> crate::models::CanonicalIngredient {
        crate::models::CanonicalIngredient {
            id: IngredientId(id.to_string()),
            name: name.to_string(),
            description: None,
            origin: None,
            attributes: IngredientAttributes::Hop { alpha_acid },
        }
    }

    fn imported_hop(name: &str, alpha_acid: Option<f64>) -> ImportedIngredient {
        ImportedIngredient {
            name: name.to_string(),
            description: None,
            attributes: IngredientAttributes::Hop { alpha_acid },
        }
    }

    fn hop_catalog() -> IngredientCatalog {
        IngredientCatalog {
            hop: vec![
                catalog_hop("h1", "Cascade", Some(5.7)),
                catalog_hop("h2", "Centennial", Some(10.0)),
                catalog_hop("h3", "Citra", Some(12.0)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn exact_hop_match_is_accepted_with_alpha_bonus() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let result = matcher.match_single_ingredient(&imported_hop("Cascade", Some(5.5)));

        let best = result.best_match.as_ref().expect("expected a best match");
        assert_eq!(best.ingredient.id.0, "h1");
        assert!(!result.requires_new_ingredient);
        assert!(result.suggested_ingredient.is_none());
        assert_eq!(result.confidence, best.confidence);
        assert!(best.confidence > 0.7);
        assert_eq!(best.name_match, 1.0);
        assert!(best.reasons.contains(&"Very similar name".to_string()));
        assert!(best.reasons.contains(&"Very similar alpha acid".to_string()));
    }

    #[test]
    fn matches_are_sorted_and_capped() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let result = matcher.match_single_ingredient(&imported_hop("Cascade", Some(5.5)));

        assert!(result.matches.len() <= 5);
        for pair in result.matches.windows(2) {
            assert!(
                pair[0].confidence >= pair[1].confidence,
                "matches must be sorted non-increasing by confidence"
            );
        }
        for m in &result.matches {
            assert!((0.0..=1.0).contains(&m.confidence));
        }
    }

    #[test]
    fn unknown_ingredient_requires_new_entry() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let result = matcher.match_single_ingredient(&imported_hop("Nelson Sauvin", Some(12.5)));

        assert!(result.requires_new_ingredient);
        assert!(result.best_match.is_none());
        assert_eq!(result.confidence, 0.0);

        let suggested = result.suggested_ingredient.expect("expected a draft record");
        assert_eq!(suggested.name, "Nelson Sauvin");
        assert_eq!(suggested.description, "Imported ingredient: Nelson Sauvin");
        assert_eq!(
            suggested.attributes,
            IngredientAttributes::Hop {
                alpha_acid: Some(12.5)
            }
        );
    }

    #[test]
    fn missing_kind_bucket_routes_to_new_ingredient() {
        // Catalog has hops only; a grain import has no index to search.
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let imported = ImportedIngredient {
            name: "Pilsner Malt".to_string(),
            description: None,
            attributes: IngredientAttributes::Grain {
                color: Some(2.0),
                potential: None,
                grain_type: None,
            },
        };

        let result = matcher.match_single_ingredient(&imported);
        assert!(result.requires_new_ingredient);
        assert!(result.matches.is_empty());
        assert_eq!(
            result.suggested_ingredient.as_ref().map(|s| s.name.as_str()),
            Some("Pilsner Malt")
        );
    }

    #[test]
    fn repeat_lookups_hit_the_cache() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let imported = imported_hop("Cascade", Some(5.5));

        let first = matcher.match_single_ingredient(&imported);
        assert_eq!(matcher.cache_len(), 1);

        let second = matcher.match_single_ingredient(&imported);
        assert_eq!(matcher.cache_len(), 1, "second lookup must not recompute");
        assert_eq!(first, second);

        matcher.clear_cache();
        assert_eq!(matcher.cache_len(), 0);
        let third = matcher.match_single_ingredient(&imported);
        assert_eq!(matcher.cache_len(), 1);
        assert_eq!(first, third, "same catalog, same outcome after clear");
    }

    #[test]
    fn batch_output_mirrors_input_order() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let imports = vec![
            imported_hop("Citra", Some(12.0)),
            imported_hop("Totally Unknown Hop", None),
            imported_hop("Cascade", Some(5.5)),
        ];

        let results = matcher.match_ingredients(&imports);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].imported.name, "Citra");
        assert_eq!(results[1].imported.name, "Totally Unknown Hop");
        assert_eq!(results[2].imported.name, "Cascade");
        assert!(results[0].best_match.is_some());
        assert!(results[1].requires_new_ingredient);
    }

    #[test]
    fn empty_batch_yields_empty_results() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        assert!(matcher.match_ingredients(&[]).is_empty());
    }

    #[test]
    fn conflict_penalty_can_reject_a_name_twin() {
        // Same name but a wildly different alpha acid: the 30% penalty
        // drops the exact-name hit below the accept threshold.
        let catalog = IngredientCatalog {
            hop: vec![catalog_hop("h9", "Cascade", Some(16.0))],
            ..Default::default()
        };
        let mut matcher = IngredientMatcher::new(&catalog);

        let result = matcher.match_single_ingredient(&imported_hop("Cascade", Some(4.0)));
        assert!(
            result.requires_new_ingredient,
            "12-point alpha gap should not auto-match, confidence {:?}",
            result.matches.first().map(|m| m.confidence)
        );
        // The candidate still surfaces for manual review.
        assert_eq!(result.matches[0].ingredient.id.0, "h9");
        assert!((result.matches[0].confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn punctuation_only_name_degrades_to_new_ingredient() {
        let mut matcher = IngredientMatcher::new(&hop_catalog());
        let result = matcher.match_single_ingredient(&imported_hop("***", None));

        assert!(result.requires_new_ingredient);
        assert!(result.matches.is_empty());
        assert_eq!(
            result.suggested_ingredient.as_ref().map(|s| s.name.as_str()),
            Some("***")
        );
    }

    #[test]
    fn kind_display_used_in_errors() {
        let err = MatchingError::IndexUnavailable {
            kind: IngredientKind::Grain,
        };
        assert_eq!(
            err.to_string(),
            "no similarity index available for ingredient kind `grain`"
        );
    }
}
