use std::time::Duration;

use crate::{import_recipe_with_config, ClipperConfig, ImportError, ImportedRecipe};

/// Builder for configuring and executing a recipe import
///
/// Settings given here take precedence over loaded configuration.
#[derive(Debug, Default)]
pub struct RecipeClipperBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    metadata_endpoint: Option<String>,
    extractor_base_url: Option<String>,
}

impl RecipeClipperBuilder {
    /// Set the recipe URL to import
    ///
    /// # Example
    /// ```
    /// use recipe_clipper::RecipeClipper;
    ///
    /// let builder = RecipeClipper::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests to both services
    ///
    /// # Example
    /// ```
    /// use recipe_clipper::RecipeClipper;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClipper::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the extraction service
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model used by the extraction service
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the import at a different metadata service endpoint
    pub fn metadata_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.metadata_endpoint = Some(endpoint.into());
        self
    }

    #[doc(hidden)]
    pub fn extractor_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.extractor_base_url = Some(base_url.into());
        self
    }

    /// Execute the import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No URL was specified
    /// - The page cannot be fetched or has no content
    /// - No title could be extracted
    ///
    /// Extraction-stage failures do not error; they yield a partial result.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_clipper::RecipeClipper;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let imported = RecipeClipper::builder()
    ///     .url("https://example.com/recipe")
    ///     .import()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn import(self) -> Result<ImportedRecipe, ImportError> {
        let url = self.url.ok_or_else(|| {
            ImportError::Config(config::ConfigError::Message(
                "no URL specified; use .url()".to_string(),
            ))
        })?;

        let mut config = ClipperConfig::load()?;
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs();
        }
        if let Some(key) = self.api_key {
            config.extractor.api_key = Some(key);
        }
        if let Some(model) = self.model {
            config.extractor.model = model;
        }
        if let Some(endpoint) = self.metadata_endpoint {
            config.metadata.endpoint = endpoint;
        }
        if let Some(base_url) = self.extractor_base_url {
            config.extractor.base_url = Some(base_url);
        }

        import_recipe_with_config(&url, &config).await
    }
}

/// Main entry point for the builder API
pub struct RecipeClipper;

impl RecipeClipper {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_clipper::RecipeClipper;
    ///
    /// let builder = RecipeClipper::builder();
    /// ```
    pub fn builder() -> RecipeClipperBuilder {
        RecipeClipperBuilder::default()
    }
}
