use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main clipper configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ClipperConfig {
    /// Metadata-fetch service configuration
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Structured-extraction service configuration
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Request timeout in seconds, applied to both service clients
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            metadata: MetadataConfig::default(),
            extractor: ExtractorConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for the metadata-fetch service
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    /// Base URL of the metadata service endpoint
    #[serde(default = "default_metadata_endpoint")]
    pub endpoint: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: default_metadata_endpoint(),
        }
    }
}

/// Configuration for the extraction service
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractorConfig {
    /// API key for authentication (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for extraction (low keeps the output close to the page)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ExtractorConfig {
    /// Resolve the API key from config or the OPENAI_API_KEY environment
    /// variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

// Default value functions
fn default_metadata_endpoint() -> String {
    "https://api.microlink.io".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

impl ClipperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CLIPPER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CLIPPER__EXTRACTOR__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: CLIPPER__EXTRACTOR__MODEL
            .add_source(
                Environment::with_prefix("CLIPPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
