// src/results.rs

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD};
use crate::models::{IngredientKind, MatchResult};

/// Per-kind slice of the batch outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub total: usize,
    pub matched: usize,
    pub require_new: usize,
}

/// Batch outcome broken down by ingredient kind. Kinds absent from the
/// batch stay zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindBreakdowns {
    pub grain: KindBreakdown,
    pub hop: KindBreakdown,
    pub yeast: KindBreakdown,
    pub other: KindBreakdown,
}

impl KindBreakdowns {
    pub fn for_kind(&self, kind: IngredientKind) -> &KindBreakdown {
        match kind {
            IngredientKind::Grain => &self.grain,
            IngredientKind::Hop => &self.hop,
            IngredientKind::Yeast => &self.yeast,
            IngredientKind::Other => &self.other,
        }
    }

    fn for_kind_mut(&mut self, kind: IngredientKind) -> &mut KindBreakdown {
        match kind {
            IngredientKind::Grain => &mut self.grain,
            IngredientKind::Hop => &mut self.hop,
            IngredientKind::Yeast => &mut self.yeast,
            IngredientKind::Other => &mut self.other,
        }
    }
}

/// Aggregate statistics over one batch of match results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingSummary {
    pub total_ingredients: usize,

    /// Results with an accepted best match
    pub matched: usize,

    /// Results routed to manual resolution / new-ingredient creation
    pub require_new: usize,

    /// Matched results with confidence >= 0.8
    pub high_confidence: usize,

    /// Matched results with confidence in [0.6, 0.8)
    pub medium_confidence: usize,

    /// Matched results with confidence < 0.6
    pub low_confidence: usize,

    /// Average confidence over matched results only; 0.0 when none matched
    pub average_confidence: f64,

    pub by_kind: KindBreakdowns,
}

/// Reduce a batch of match results into a summary. Pure and total: any
/// input yields a well-formed summary, empty batches yield all zeros.
pub fn summarize_matches(results: &[MatchResult]) -> MatchingSummary {
    let mut summary = MatchingSummary {
        total_ingredients: results.len(),
        ..Default::default()
    };

    let mut confidence_sum = 0.0;

    for result in results {
        let breakdown = summary.by_kind.for_kind_mut(result.imported.kind());
        breakdown.total += 1;

        if result.best_match.is_some() {
            summary.matched += 1;
            breakdown.matched += 1;
            confidence_sum += result.confidence;

            if result.confidence >= HIGH_CONFIDENCE_THRESHOLD {
                summary.high_confidence += 1;
            } else if result.confidence >= MEDIUM_CONFIDENCE_THRESHOLD {
                summary.medium_confidence += 1;
            } else {
                summary.low_confidence += 1;
            }
        } else {
            summary.require_new += 1;
            breakdown.require_new += 1;
        }
    }

    if summary.matched > 0 {
        summary.average_confidence = confidence_sum / summary.matched as f64;
    }

    summary
}

/// Render the batch summary through the logger, one line per section.
pub fn log_summary(summary: &MatchingSummary) {
    info!("===== Ingredient Matching Summary =====");
    info!("Total imported ingredients: {}", summary.total_ingredients);
    info!(
        "Matched: {} | Require new: {}",
        summary.matched, summary.require_new
    );
    info!(
        "Confidence buckets - high: {}, medium: {}, low: {}",
        summary.high_confidence, summary.medium_confidence, summary.low_confidence
    );
    info!(
        "Average confidence over matched: {:.3}",
        summary.average_confidence
    );
    for kind in IngredientKind::ALL {
        let breakdown = summary.by_kind.for_kind(kind);
        if breakdown.total == 0 {
            continue;
        }
        info!(
            "  {}: {} total, {} matched, {} require new",
            kind, breakdown.total, breakdown.matched, breakdown.require_new
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CanonicalIngredient, EnhancedMatch, ImportedIngredient, IngredientAttributes, IngredientId,
    };

    fn matched_result(name: &str, kind: IngredientKind, confidence: f64) -> MatchResult {
        let imported = ImportedIngredient {
            name: name.to_string(),
            description: None,
            attributes: IngredientAttributes::empty(kind),
        };
        let best = EnhancedMatch {
            ingredient: CanonicalIngredient {
                id: IngredientId(format!("id-{name}")),
                name: name.to_string(),
                description: None,
                origin: None,
                attributes: IngredientAttributes::empty(kind),
            },
            confidence,
            reasons: vec!["Very similar name".to_string()],
            name_match: 1.0,
        };
        MatchResult {
            imported,
            matches: vec![best.clone()],
            best_match: Some(best),
            confidence,
            requires_new_ingredient: false,
            suggested_ingredient: None,
        }
    }

    fn unmatched_result(name: &str, kind: IngredientKind) -> MatchResult {
        let imported = ImportedIngredient {
            name: name.to_string(),
            description: None,
            attributes: IngredientAttributes::empty(kind),
        };
        MatchResult {
            imported: imported.clone(),
            matches: Vec::new(),
            best_match: None,
            confidence: 0.0,
            requires_new_ingredient: true,
            suggested_ingredient: Some(crate::models::SuggestedIngredient {
                name: imported.name.clone(),
                description: format!("Imported ingredient: {}", imported.name),
                attributes: imported.attributes,
            }),
        }
    }

    #[test]
    fn empty_batch_summarizes_to_zero() {
        let summary = summarize_matches(&[]);
        assert_eq!(summary, MatchingSummary::default());
        assert_eq!(summary.average_confidence, 0.0);
    }

    #[test]
    fn counts_add_up() {
        let results = vec![
            matched_result("Cascade", IngredientKind::Hop, 0.95),
            matched_result("Pilsner Malt", IngredientKind::Grain, 0.75),
            unmatched_result("Mystery Spice", IngredientKind::Other),
            unmatched_result("Unknown Yeast", IngredientKind::Yeast),
        ];
        let summary = summarize_matches(&results);

        assert_eq!(summary.total_ingredients, 4);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.require_new, 2);
        assert_eq!(summary.matched + summary.require_new, summary.total_ingredients);
        assert!((summary.average_confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn confidence_buckets_split_at_their_thresholds() {
        let results = vec![
            matched_result("a", IngredientKind::Hop, 0.80), // high (inclusive)
            matched_result("b", IngredientKind::Hop, 0.95), // high
            matched_result("c", IngredientKind::Hop, 0.79), // medium
            matched_result("d", IngredientKind::Hop, 0.60), // medium (inclusive)
            matched_result("e", IngredientKind::Hop, 0.59), // low
        ];
        let summary = summarize_matches(&results);

        assert_eq!(summary.high_confidence, 2);
        assert_eq!(summary.medium_confidence, 2);
        assert_eq!(summary.low_confidence, 1);
    }

    #[test]
    fn per_kind_breakdown_is_tracked() {
        let results = vec![
            matched_result("Cascade", IngredientKind::Hop, 0.9),
            unmatched_result("Experimental Hop", IngredientKind::Hop),
            matched_result("Munich Malt", IngredientKind::Grain, 0.8),
        ];
        let summary = summarize_matches(&results);

        assert_eq!(summary.by_kind.hop.total, 2);
        assert_eq!(summary.by_kind.hop.matched, 1);
        assert_eq!(summary.by_kind.hop.require_new, 1);
        assert_eq!(summary.by_kind.grain.total, 1);
        assert_eq!(summary.by_kind.grain.matched, 1);
        assert_eq!(summary.by_kind.yeast, KindBreakdown::default());
        assert_eq!(summary.by_kind.other, KindBreakdown::default());
    }
}
