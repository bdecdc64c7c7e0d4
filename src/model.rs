use serde::{Deserialize, Serialize};

/// Page metadata returned by the metadata resolver.
///
/// Transient: consumed by the assembler (and, through it, the extractor)
/// within a single import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedMetadata {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// Hostname of the recipe page with a leading "www." stripped
    pub source: String,
    /// Best-effort text content of the page; may be empty
    pub raw_content: String,
}

/// Ingredients and instructions extracted from page content.
///
/// Both arrays are always present on success; instructions are implicitly
/// numbered by position, so order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// The assembled recipe record, shaped for the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    pub title: String,
    pub image_url: Option<String>,
    pub description: String,
    pub source: String,
    pub url: String,
    /// Empty when extraction was skipped or degraded
    pub ingredients: Vec<String>,
    /// Empty when extraction was skipped or degraded
    pub instructions: Vec<String>,
}

/// Why an import completed with basic information only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// The page had no text content, so extraction was skipped
    NoContent,
    /// The extraction service is rate- or quota-limited
    QuotaExceeded,
    /// The extraction service response failed shape validation
    InvalidResponse,
    /// The extraction service call failed outright
    ServiceFailure,
    /// Extraction succeeded but came back without a usable recipe
    EmptyExtraction,
}

/// Disposition of a completed import.
///
/// Extraction problems degrade the outcome instead of failing the import;
/// callers branch on this to pick user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Ingredients and instructions were both extracted
    Full,
    /// Saved with basic information only
    Partial { reason: DegradedReason },
}

impl ImportOutcome {
    pub fn is_full(&self) -> bool {
        matches!(self, ImportOutcome::Full)
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, ImportOutcome::Partial { .. })
    }
}

/// A normalized recipe together with its import outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRecipe {
    pub recipe: NormalizedRecipe,
    pub outcome: ImportOutcome,
}
