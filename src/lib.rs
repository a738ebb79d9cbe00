// src/lib.rs

//! Ingredient matching and scoring engine for homebrew recipe imports.
//!
//! Given imported (free-text) ingredient records and a curated catalog
//! partitioned by kind, produces for each import a ranked list of
//! plausible canonical matches with confidence scores, or a decision
//! that a new catalog entry is needed, plus batch-level summary stats.
//!
//! The engine is a pure in-process library: no persistence, no I/O.
//! Construct an [`IngredientMatcher`] per catalog snapshot and feed it
//! imports; results are memoized per imported-ingredient signature for
//! the life of the matcher.

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod matching;
pub mod models;
pub mod results;

// Re-export common types for easier access
pub use cache::{MatchSignature, ResultCache};
pub use config::MatchConfig;
pub use error::MatchingError;
pub use index::{IndexSet, KindIndex, SearchHit};
pub use matching::IngredientMatcher;
pub use models::{
    CanonicalIngredient, EnhancedMatch, ImportedIngredient, IngredientAttributes,
    IngredientCatalog, IngredientId, IngredientKind, MatchResult, SuggestedIngredient,
};
pub use results::{log_summary, summarize_matches, KindBreakdown, KindBreakdowns, MatchingSummary};
