//! Fetch, extract and normalize recipes from arbitrary web pages.
//!
//! The import pipeline runs three stages in sequence:
//!
//! 1. [`MetadataResolver`] turns a URL into page metadata (title,
//!    description, hero image, raw text content) via a metadata-fetch
//!    service.
//! 2. An [`ExtractRecipe`] implementation turns the raw content into
//!    structured ingredient and instruction lists via an LLM-backed
//!    extraction service.
//! 3. [`RecipeAssembler`] reconciles both into a [`NormalizedRecipe`] with a
//!    full/partial [`ImportOutcome`], absorbing extraction failures as
//!    degraded success.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), recipe_clipper::ImportError> {
//! let imported = recipe_clipper::import_recipe("https://example.com/recipe").await?;
//! println!("{} ({:?})", imported.recipe.title, imported.outcome);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod resolver;

use std::time::Duration;

pub use assembler::RecipeAssembler;
pub use builder::{RecipeClipper, RecipeClipperBuilder};
pub use config::ClipperConfig;
pub use error::ImportError;
pub use extractor::{ExtractRecipe, OpenAiExtractor};
pub use model::{
    DegradedReason, ExtractionResult, ImportOutcome, ImportedRecipe, NormalizedRecipe,
    ScrapedMetadata,
};
pub use resolver::{derive_source, MetadataResolver};

/// Import a recipe using configuration from config.toml and the environment
pub async fn import_recipe(url: &str) -> Result<ImportedRecipe, ImportError> {
    let config = ClipperConfig::load()?;
    import_recipe_with_config(url, &config).await
}

/// Import a recipe with explicit configuration
pub async fn import_recipe_with_config(
    url: &str,
    config: &ClipperConfig,
) -> Result<ImportedRecipe, ImportError> {
    let timeout = Duration::from_secs(config.timeout);

    let resolver = MetadataResolver::with_endpoint(config.metadata.endpoint.clone(), Some(timeout));
    let extractor = OpenAiExtractor::new(&config.extractor, Some(timeout))?;

    RecipeAssembler::new(resolver, Box::new(extractor))
        .assemble(url)
        .await
}
