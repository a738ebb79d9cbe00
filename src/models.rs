// src/models.rs

use std::fmt;

use serde::{Deserialize, Serialize};

//------------------------------------------------------------------------------
// IDENTIFIER TYPES
//------------------------------------------------------------------------------
// Using newtype pattern for type safety to prevent mixing up plain strings
// with canonical ingredient identifiers.

/// Strongly typed identifier for canonical catalog ingredients
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub String);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//------------------------------------------------------------------------------
// INGREDIENT KINDS
//------------------------------------------------------------------------------

/// Enum for supported ingredient kinds
///
/// The discriminant that partitions the catalog and selects the
/// kind-specific scoring heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// Malts and other fermentable grains
    Grain,

    /// Hops
    Hop,

    /// Yeast strains
    Yeast,

    /// Everything else (spices, finings, water agents, ...)
    Other,
}

impl IngredientKind {
    /// All kinds, in the order used for per-kind reporting.
    pub const ALL: [IngredientKind; 4] = [
        IngredientKind::Grain,
        IngredientKind::Hop,
        IngredientKind::Yeast,
        IngredientKind::Other,
    ];

    /// Converts the enum to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grain => "grain",
            Self::Hop => "hop",
            Self::Yeast => "yeast",
            Self::Other => "other",
        }
    }

    /// Creates the enum from a string representation. Unrecognized kind
    /// strings yield `None`; callers route those to the no-index path
    /// rather than failing.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grain" => Some(Self::Grain),
            "hop" => Some(Self::Hop),
            "yeast" => Some(Self::Yeast),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------------------------------------------------------------------------
// KIND-SPECIFIC ATTRIBUTES
//------------------------------------------------------------------------------

/// Union type for the kind-specific attributes of an ingredient.
///
/// Strongly typed replacement for duck-typed per-kind extras: scoring
/// pattern-matches exhaustively instead of probing optional fields.
/// Missing values mean "unknown" and never award a bonus or a penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IngredientAttributes {
    /// Grain attributes
    Grain {
        /// Color in degrees Lovibond
        color: Option<f64>,
        /// Potential gravity contribution (e.g. 1.037)
        potential: Option<f64>,
        /// Grain classification (base malt, crystal, roasted, ...)
        grain_type: Option<String>,
    },

    /// Hop attributes
    Hop {
        /// Alpha acid percentage
        alpha_acid: Option<f64>,
    },

    /// Yeast attributes
    Yeast {
        /// Apparent attenuation percentage
        attenuation: Option<f64>,
        /// Producing lab (e.g. "Fermentis", "Wyeast")
        manufacturer: Option<String>,
        /// Product code (e.g. "US-05", "WLP001")
        code: Option<String>,
    },

    /// No kind-specific attributes
    Other,
}

impl IngredientAttributes {
    /// The kind this attribute set belongs to.
    pub fn kind(&self) -> IngredientKind {
        match self {
            Self::Grain { .. } => IngredientKind::Grain,
            Self::Hop { .. } => IngredientKind::Hop,
            Self::Yeast { .. } => IngredientKind::Yeast,
            Self::Other => IngredientKind::Other,
        }
    }

    /// Empty attribute set for a kind.
    pub fn empty(kind: IngredientKind) -> Self {
        match kind {
            IngredientKind::Grain => Self::Grain {
                color: None,
                potential: None,
                grain_type: None,
            },
            IngredientKind::Hop => Self::Hop { alpha_acid: None },
            IngredientKind::Yeast => Self::Yeast {
                attenuation: None,
                manufacturer: None,
                code: None,
            },
            IngredientKind::Other => Self::Other,
        }
    }
}

//------------------------------------------------------------------------------
// CORE DOMAIN MODELS
//------------------------------------------------------------------------------

/// A raw, unreconciled ingredient entry from an external recipe description.
///
/// Produced by an import/parsing step outside this crate; immutable input
/// to the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedIngredient {
    /// Free-text name as it appeared in the imported recipe
    pub name: String,

    /// Free-text description, if the import carried one
    pub description: Option<String>,

    /// Kind discriminant plus kind-specific fields
    #[serde(flatten)]
    pub attributes: IngredientAttributes,
}

impl ImportedIngredient {
    pub fn kind(&self) -> IngredientKind {
        self.attributes.kind()
    }
}

/// A curated catalog entry with a stable identifier, the reconciliation
/// target. Read-only to the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIngredient {
    /// Stable catalog identifier
    pub id: IngredientId,

    /// Canonical display name
    pub name: String,

    /// Catalog description
    pub description: Option<String>,

    /// Country or region of origin (indexed for hops)
    pub origin: Option<String>,

    /// Kind discriminant plus kind-specific fields
    #[serde(flatten)]
    pub attributes: IngredientAttributes,
}

impl CanonicalIngredient {
    pub fn kind(&self) -> IngredientKind {
        self.attributes.kind()
    }
}

/// The curated ingredient catalog, partitioned by kind.
///
/// Supplied fresh per matching session; the engine never mutates it.
/// Collection order within a bucket is the deterministic tie-break order
/// for equal-confidence candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientCatalog {
    #[serde(default)]
    pub grain: Vec<CanonicalIngredient>,
    #[serde(default)]
    pub hop: Vec<CanonicalIngredient>,
    #[serde(default)]
    pub yeast: Vec<CanonicalIngredient>,
    #[serde(default)]
    pub other: Vec<CanonicalIngredient>,
}

impl IngredientCatalog {
    /// The catalog bucket for a kind (empty slice if the provider had none).
    pub fn bucket(&self, kind: IngredientKind) -> &[CanonicalIngredient] {
        match kind {
            IngredientKind::Grain => &self.grain,
            IngredientKind::Hop => &self.hop,
            IngredientKind::Yeast => &self.yeast,
            IngredientKind::Other => &self.other,
        }
    }

    /// Total entries across all buckets.
    pub fn len(&self) -> usize {
        self.grain.len() + self.hop.len() + self.yeast.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//------------------------------------------------------------------------------
// MATCH RESULT TYPES
//------------------------------------------------------------------------------

/// One scored candidate for an imported ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedMatch {
    /// The candidate catalog entry
    pub ingredient: CanonicalIngredient,

    /// Final confidence in [0, 1] after kind-specific bonuses and penalties
    pub confidence: f64,

    /// Human-readable match justifications, insertion-ordered
    pub reasons: Vec<String>,

    /// Name similarity in [0, 1], computed independently of the fuzzy
    /// index score (reporting, not ranking)
    pub name_match: f64,
}

/// Draft record for an ingredient the catalog does not cover.
///
/// Carries the imported name, a generated description and whatever
/// kind-relevant attributes the import supplied; the review UI confirms
/// creation outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedIngredient {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub attributes: IngredientAttributes,
}

/// The final reconciliation outcome for one imported ingredient.
///
/// Immutable once computed; cached per imported-ingredient signature
/// within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The imported ingredient this result is for
    pub imported: ImportedIngredient,

    /// Candidates sorted descending by confidence, ties in fuzzy-search
    /// order, capped at the configured maximum (5 by default)
    pub matches: Vec<EnhancedMatch>,

    /// Set iff the top candidate cleared the accept threshold
    pub best_match: Option<EnhancedMatch>,

    /// Confidence of the accepted match, or 0.0 when none was accepted
    pub confidence: f64,

    /// True when no candidate cleared the accept threshold
    pub requires_new_ingredient: bool,

    /// Draft record, populated iff `requires_new_ingredient`
    pub suggested_ingredient: Option<SuggestedIngredient>,
}
