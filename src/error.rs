// src/error.rs

use thiserror::Error;

use crate::models::IngredientKind;

/// Failure taxonomy for the matching pipeline.
///
/// Every variant is recovered inside the engine: imports hit by one of
/// these degrade to "requires new ingredient" and the batch continues, so
/// nothing here escapes `match_ingredients` to the caller.
#[derive(Debug, Error)]
pub enum MatchingError {
    /// No similarity index exists for the imported ingredient's kind
    /// (the catalog had no entries of that kind).
    #[error("no similarity index available for ingredient kind `{kind}`")]
    IndexUnavailable { kind: IngredientKind },

    /// The imported name normalized to an empty string, so there is
    /// nothing to compare against the catalog.
    #[error("imported ingredient name `{name}` has no comparable content")]
    UnusableName { name: String },
}
