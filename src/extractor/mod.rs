mod open_ai;

pub use open_ai::OpenAiExtractor;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ImportError;
use crate::model::ExtractionResult;

/// System instruction sent with every extraction request.
///
/// The service must answer with a single JSON object carrying exactly the
/// keys `ingredients` and `instructions`, each an array of strings in source
/// order.
pub const EXTRACTION_PROMPT: &str = "Extract recipe ingredients and instructions. \
     Return JSON with arrays \"ingredients\" and \"instructions\".";

/// Turns raw page content into structured ingredient/instruction lists.
///
/// Implementations make a single attempt; callers must not pass empty
/// content (the assembler skips extraction entirely in that case).
#[async_trait]
pub trait ExtractRecipe: Send + Sync {
    async fn extract(&self, url: &str, content: &str) -> Result<ExtractionResult, ImportError>;
}

/// Parse and validate the extraction service's payload.
///
/// Strict and fail-closed: both keys must be present and both values must be
/// arrays of strings. Nothing is coerced or partially recovered from a
/// malformed payload.
pub fn parse_extraction(payload: &str) -> Result<ExtractionResult, ImportError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ImportError::InvalidResponse(format!("payload is not valid JSON: {}", e)))?;

    let ingredients = string_array(&value, "ingredients")?;
    let instructions = string_array(&value, "instructions")?;

    Ok(ExtractionResult {
        ingredients,
        instructions,
    })
}

fn string_array(value: &Value, key: &str) -> Result<Vec<String>, ImportError> {
    let items = value
        .get(key)
        .ok_or_else(|| ImportError::InvalidResponse(format!("missing \"{}\" key", key)))?
        .as_array()
        .ok_or_else(|| ImportError::InvalidResponse(format!("\"{}\" is not an array", key)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(String::from).ok_or_else(|| {
                ImportError::InvalidResponse(format!("\"{}\" contains a non-string entry", key))
            })
        })
        .collect()
}
