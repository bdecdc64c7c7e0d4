use thiserror::Error;

/// Errors that can occur while importing a recipe from a URL
#[derive(Error, Debug)]
pub enum ImportError {
    /// The page metadata could not be fetched (network failure, non-2xx
    /// response from the metadata service, or a malformed response body)
    #[error("Failed to fetch recipe: {0}")]
    Fetch(String),

    /// The metadata service answered but returned neither page content nor
    /// a description, so there is nothing to extract from
    #[error("No recipe content found at {0}")]
    NoContent(String),

    /// No title could be extracted from the page
    #[error("Could not extract recipe title")]
    TitleMissing,

    /// The extraction service responded with something other than the
    /// expected ingredients/instructions object
    #[error("Invalid response from extraction service: {0}")]
    InvalidResponse(String),

    /// The extraction service is rate- or quota-limited; retry later
    #[error("Extraction service is temporarily unavailable due to API limits")]
    QuotaExceeded,

    /// Any other extraction service failure (network, timeout, 5xx)
    #[error("Extraction service error: {0}")]
    ExtractionService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ImportError {
    /// Whether this error aborts the whole import.
    ///
    /// Resolver-stage errors and a missing title are fatal; extraction-stage
    /// errors are absorbed by the assembler into a partial result.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::Fetch(_)
                | ImportError::NoContent(_)
                | ImportError::TitleMissing
                | ImportError::Config(_)
        )
    }
}
