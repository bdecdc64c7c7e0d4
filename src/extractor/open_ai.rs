use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::config::ExtractorConfig;
use crate::error::ImportError;
use crate::extractor::{parse_extraction, ExtractRecipe, EXTRACTION_PROMPT};
use crate::model::ExtractionResult;

pub struct OpenAiExtractor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiExtractor {
    /// Create a new extractor from configuration
    pub fn new(config: &ExtractorConfig, timeout: Option<Duration>) -> Result<Self, ImportError> {
        // Try config first, then fall back to environment variable
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ImportError::Config(config::ConfigError::Message(
                "extractor API key not found in config or environment".to_string(),
            ))
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()
            .expect("Failed to create HTTP client");

        Ok(OpenAiExtractor {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAiExtractor {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.2,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl ExtractRecipe for OpenAiExtractor {
    async fn extract(&self, url: &str, content: &str) -> Result<ExtractionResult, ImportError> {
        if content.trim().is_empty() {
            return Err(ImportError::InvalidResponse(
                "no content to extract from".to_string(),
            ));
        }

        debug!(
            "Extracting recipe structure for {} ({} bytes of content)",
            url,
            content.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": EXTRACTION_PROMPT},
                    {"role": "user", "content": content}
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await
            .map_err(|e| ImportError::ExtractionService(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImportError::ExtractionService(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_service_error(status, &body));
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|e| {
            ImportError::ExtractionService(format!("malformed completion response: {}", e))
        })?;
        debug!("{:?}", envelope);

        let payload = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ImportError::ExtractionService(
                    "completion response carried no message content".to_string(),
                )
            })?;

        parse_extraction(payload)
    }
}

/// Classify a non-success extraction service response.
///
/// Quota detection relies on the service's error code and message text, so
/// it lives in this one function. Anything unrecognized stays a generic
/// service error.
fn classify_service_error(status: StatusCode, body: &str) -> ImportError {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let error = &value["error"];

        let code_matches = [error["type"].as_str(), error["code"].as_str()]
            .into_iter()
            .flatten()
            .any(|v| v == "insufficient_quota");
        let message_matches = error["message"]
            .as_str()
            .is_some_and(|m| m.contains("exceeded your current quota"));

        if code_matches || message_matches {
            return ImportError::QuotaExceeded;
        }
    }

    ImportError::ExtractionService(format!("service returned {}: {}", status, body))
}
