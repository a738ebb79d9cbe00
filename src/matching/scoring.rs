// src/matching/scoring.rs

use crate::config::{
    GRAIN_COLOR_CLOSE_BONUS, GRAIN_COLOR_CLOSE_DELTA, GRAIN_COLOR_CONFLICT_DELTA,
    GRAIN_COLOR_NEAR_BONUS, GRAIN_COLOR_NEAR_DELTA, GRAIN_POTENTIAL_BONUS, GRAIN_POTENTIAL_DELTA,
    GRAIN_TYPE_MATCH_BONUS, HOP_ALPHA_CLOSE_BONUS, HOP_ALPHA_CLOSE_DELTA,
    HOP_ALPHA_CONFLICT_DELTA, HOP_ALPHA_NEAR_BONUS, HOP_ALPHA_NEAR_DELTA,
    SIMILAR_NAME_THRESHOLD, VERY_SIMILAR_NAME_THRESHOLD, YEAST_ATTENUATION_CLOSE_BONUS,
    YEAST_ATTENUATION_CLOSE_DELTA, YEAST_ATTENUATION_CONFLICT_DELTA, YEAST_ATTENUATION_NEAR_BONUS,
    YEAST_ATTENUATION_NEAR_DELTA, YEAST_CODE_BONUS, YEAST_MANUFACTURER_BONUS,
};
use crate::models::IngredientAttributes;

/// Outcome of comparing an imported ingredient's attributes against one
/// catalog candidate: an additive bonus, whether a significant conflict
/// was detected, and the human-readable reasons collected on the way.
#[derive(Debug, Default)]
pub(crate) struct AttributeScore {
    pub bonus: f64,
    pub conflict: bool,
    pub reasons: Vec<String>,
}

/// Reason tags for the name-similarity tier, if any.
pub(crate) fn name_reason(name_match: f64) -> Option<&'static str> {
    if name_match > VERY_SIMILAR_NAME_THRESHOLD {
        Some("Very similar name")
    } else if name_match > SIMILAR_NAME_THRESHOLD {
        Some("Similar name")
    } else {
        None
    }
}

/// Kind-specific attribute comparison.
///
/// Missing fields on either side are simply skipped: no bonus awarded and
/// no conflict flagged, so a sparse catalog entry can never hard-fail a
/// candidate. Mismatched kinds (which the per-kind index rules out) score
/// as no evidence either way.
pub(crate) fn score_attributes(
    imported: &IngredientAttributes,
    existing: &IngredientAttributes,
) -> AttributeScore {
    match (imported, existing) {
        (
            IngredientAttributes::Grain {
                color: imported_color,
                potential: imported_potential,
                grain_type: imported_grain_type,
            },
            IngredientAttributes::Grain {
                color: existing_color,
                potential: existing_potential,
                grain_type: existing_grain_type,
            },
        ) => {
            let mut score = AttributeScore::default();

            if let (Some(imported_type), Some(existing_type)) =
                (imported_grain_type, existing_grain_type)
            {
                if imported_type == existing_type {
                    score.bonus += GRAIN_TYPE_MATCH_BONUS;
                    score.reasons.push("Same grain type".to_string());
                } else {
                    score.conflict = true;
                }
            }

            if let (Some(imported_color), Some(existing_color)) = (imported_color, existing_color) {
                let gap = (imported_color - existing_color).abs();
                if gap <= GRAIN_COLOR_CLOSE_DELTA {
                    score.bonus += GRAIN_COLOR_CLOSE_BONUS;
                    score.reasons.push("Similar color".to_string());
                } else if gap <= GRAIN_COLOR_NEAR_DELTA {
                    score.bonus += GRAIN_COLOR_NEAR_BONUS;
                }
                if gap > GRAIN_COLOR_CONFLICT_DELTA {
                    score.conflict = true;
                }
            }

            if let (Some(imported_potential), Some(existing_potential)) =
                (imported_potential, existing_potential)
            {
                if (imported_potential - existing_potential).abs() <= GRAIN_POTENTIAL_DELTA {
                    score.bonus += GRAIN_POTENTIAL_BONUS;
                    score.reasons.push("Similar potential".to_string());
                }
            }

            score
        }

        (
            IngredientAttributes::Hop {
                alpha_acid: imported_alpha,
            },
            IngredientAttributes::Hop {
                alpha_acid: existing_alpha,
            },
        ) => {
            let mut score = AttributeScore::default();

            if let (Some(imported_alpha), Some(existing_alpha)) = (imported_alpha, existing_alpha) {
                let gap = (imported_alpha - existing_alpha).abs();
                if gap <= HOP_ALPHA_CLOSE_DELTA {
                    score.bonus += HOP_ALPHA_CLOSE_BONUS;
                    score.reasons.push("Very similar alpha acid".to_string());
                } else if gap <= HOP_ALPHA_NEAR_DELTA {
                    score.bonus += HOP_ALPHA_NEAR_BONUS;
                    score.reasons.push("Similar alpha acid".to_string());
                }
                if gap > HOP_ALPHA_CONFLICT_DELTA {
                    score.conflict = true;
                }
            }

            score
        }

        (
            IngredientAttributes::Yeast {
                attenuation: imported_attenuation,
                manufacturer: imported_manufacturer,
                code: imported_code,
            },
            IngredientAttributes::Yeast {
                attenuation: existing_attenuation,
                manufacturer: existing_manufacturer,
                code: existing_code,
            },
        ) => {
            let mut score = AttributeScore::default();

            if let (Some(imported_manufacturer), Some(existing_manufacturer)) =
                (imported_manufacturer, existing_manufacturer)
            {
                if imported_manufacturer.eq_ignore_ascii_case(existing_manufacturer) {
                    score.bonus += YEAST_MANUFACTURER_BONUS;
                    score.reasons.push("Same manufacturer".to_string());
                }
            }

            if let (Some(imported_code), Some(existing_code)) = (imported_code, existing_code) {
                if imported_code.eq_ignore_ascii_case(existing_code) {
                    score.bonus += YEAST_CODE_BONUS;
                    score.reasons.push("Same product code".to_string());
                }
            }

            if let (Some(imported_attenuation), Some(existing_attenuation)) =
                (imported_attenuation, existing_attenuation)
            {
                let gap = (imported_attenuation - existing_attenuation).abs();
                if gap <= YEAST_ATTENUATION_CLOSE_DELTA {
                    score.bonus += YEAST_ATTENUATION_CLOSE_BONUS;
                    score.reasons.push("Similar attenuation".to_string());
                } else if gap <= YEAST_ATTENUATION_NEAR_DELTA {
                    score.bonus += YEAST_ATTENUATION_NEAR_BONUS;
                }
                if gap > YEAST_ATTENUATION_CONFLICT_DELTA {
                    score.conflict = true;
                }
            }

            score
        }

        // "Other" carries no attributes; the base fuzzy score stands alone.
        (IngredientAttributes::Other, IngredientAttributes::Other) => AttributeScore::default(),

        // Kind mismatch: no evidence either way.
        _ => AttributeScore::default(),
    }
}
