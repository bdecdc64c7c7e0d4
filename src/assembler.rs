use log::{info, warn};

use crate::error::ImportError;
use crate::extractor::ExtractRecipe;
use crate::model::{
    DegradedReason, ImportOutcome, ImportedRecipe, NormalizedRecipe, ScrapedMetadata,
};
use crate::resolver::MetadataResolver;

/// Combines resolver and extractor output into one normalized recipe.
///
/// Extraction failures never block saving a recipe: extractor-stage errors
/// degrade the outcome to `Partial` instead of failing the import. Only
/// resolver failures and a missing title are fatal.
pub struct RecipeAssembler {
    resolver: MetadataResolver,
    extractor: Box<dyn ExtractRecipe>,
}

impl RecipeAssembler {
    pub fn new(resolver: MetadataResolver, extractor: Box<dyn ExtractRecipe>) -> Self {
        Self {
            resolver,
            extractor,
        }
    }

    /// Import a recipe from a URL.
    ///
    /// Fails with `Fetch`/`NoContent` when the page cannot be resolved and
    /// with `TitleMissing` when no title could be extracted; every other
    /// problem produces a partial result.
    pub async fn assemble(&self, url: &str) -> Result<ImportedRecipe, ImportError> {
        let metadata = self.resolver.resolve(url).await?;
        self.assemble_from_metadata(url, metadata).await
    }

    /// Assemble a recipe from already-resolved page metadata
    pub async fn assemble_from_metadata(
        &self,
        url: &str,
        metadata: ScrapedMetadata,
    ) -> Result<ImportedRecipe, ImportError> {
        let title = metadata.title.ok_or(ImportError::TitleMissing)?;

        let (ingredients, instructions, outcome) = if metadata.raw_content.trim().is_empty() {
            warn!("No content available for {}; saving basic information only", url);
            (
                Vec::new(),
                Vec::new(),
                ImportOutcome::Partial {
                    reason: DegradedReason::NoContent,
                },
            )
        } else {
            match self.extractor.extract(url, &metadata.raw_content).await {
                Ok(result) => {
                    let outcome =
                        if result.ingredients.is_empty() || result.instructions.is_empty() {
                            warn!("Extraction for {} came back without a usable recipe", url);
                            ImportOutcome::Partial {
                                reason: DegradedReason::EmptyExtraction,
                            }
                        } else {
                            info!(
                                "Extracted {} ingredients and {} instructions from {}",
                                result.ingredients.len(),
                                result.instructions.len(),
                                url
                            );
                            ImportOutcome::Full
                        };
                    (result.ingredients, result.instructions, outcome)
                }
                Err(err) => {
                    let reason = match &err {
                        ImportError::QuotaExceeded => DegradedReason::QuotaExceeded,
                        ImportError::InvalidResponse(_) => DegradedReason::InvalidResponse,
                        _ => DegradedReason::ServiceFailure,
                    };
                    warn!(
                        "Extraction failed for {}: {}; saving basic information only",
                        url, err
                    );
                    (Vec::new(), Vec::new(), ImportOutcome::Partial { reason })
                }
            }
        };

        let description = metadata
            .description
            .unwrap_or_else(|| format!("Recipe from {}", metadata.source));

        Ok(ImportedRecipe {
            recipe: NormalizedRecipe {
                title,
                image_url: metadata.image_url,
                description,
                source: metadata.source,
                url: url.to_string(),
                ingredients,
                instructions,
            },
            outcome,
        })
    }
}
