// src/config.rs

use serde::{Deserialize, Serialize};

// The bonus/penalty/threshold constants below are empirically chosen;
// changing them changes observable matching behavior, so they are kept
// as named values rather than re-derived.

/// Minimum enhanced score for a candidate to be accepted as the match
pub const MATCH_THRESHOLD_ACCEPT: f64 = 0.7;

/// Minimum base fuzzy-index similarity for a catalog entry to surface at all
pub const SEARCH_THRESHOLD: f64 = 0.3;

/// Candidates kept per imported ingredient after re-ranking
pub const MAX_MATCHES_PER_INGREDIENT: usize = 5;

/// Multiplier applied when a significant attribute conflict is detected
pub const SIGNIFICANT_DIFFERENCE_PENALTY: f64 = 0.7; // 30% penalty

// Jaro-Winkler is lenient on short unrelated strings, so it only counts
// toward the index score above this floor.
pub const JARO_WINKLER_FLOOR: f64 = 0.9;

// Name-similarity tiers used for the human-readable reasons
pub const VERY_SIMILAR_NAME_THRESHOLD: f64 = 0.8;
pub const SIMILAR_NAME_THRESHOLD: f64 = 0.6;

// Grain heuristics
pub const GRAIN_TYPE_MATCH_BONUS: f64 = 0.20;
pub const GRAIN_COLOR_CLOSE_DELTA: f64 = 5.0; // degrees Lovibond
pub const GRAIN_COLOR_CLOSE_BONUS: f64 = 0.15;
pub const GRAIN_COLOR_NEAR_DELTA: f64 = 15.0;
pub const GRAIN_COLOR_NEAR_BONUS: f64 = 0.05;
pub const GRAIN_POTENTIAL_DELTA: f64 = 0.003;
pub const GRAIN_POTENTIAL_BONUS: f64 = 0.10;
pub const GRAIN_COLOR_CONFLICT_DELTA: f64 = 30.0;

// Hop heuristics
pub const HOP_ALPHA_CLOSE_DELTA: f64 = 1.0; // alpha acid percentage points
pub const HOP_ALPHA_CLOSE_BONUS: f64 = 0.20;
pub const HOP_ALPHA_NEAR_DELTA: f64 = 3.0;
pub const HOP_ALPHA_NEAR_BONUS: f64 = 0.10;
pub const HOP_ALPHA_CONFLICT_DELTA: f64 = 8.0;

// Yeast heuristics
pub const YEAST_MANUFACTURER_BONUS: f64 = 0.30;
pub const YEAST_CODE_BONUS: f64 = 0.40;
pub const YEAST_ATTENUATION_CLOSE_DELTA: f64 = 5.0; // attenuation points
pub const YEAST_ATTENUATION_CLOSE_BONUS: f64 = 0.15;
pub const YEAST_ATTENUATION_NEAR_DELTA: f64 = 15.0;
pub const YEAST_ATTENUATION_NEAR_BONUS: f64 = 0.05;
pub const YEAST_ATTENUATION_CONFLICT_DELTA: f64 = 25.0;

// Confidence buckets for the batch summary
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Caller-overridable knobs for one matching session.
///
/// Defaults mirror the constants above; override only with a stated
/// reason, since these directly change which imports auto-match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum enhanced score to accept a candidate as the match
    pub accept_threshold: f64,

    /// Minimum base similarity for the fuzzy index to surface an entry
    pub search_threshold: f64,

    /// Candidates kept per imported ingredient
    pub max_matches: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            accept_threshold: MATCH_THRESHOLD_ACCEPT,
            search_threshold: SEARCH_THRESHOLD,
            max_matches: MAX_MATCHES_PER_INGREDIENT,
        }
    }
}
