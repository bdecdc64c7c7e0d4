use std::time::Duration;

use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ImportError;
use crate::model::ScrapedMetadata;

const DEFAULT_ENDPOINT: &str = "https://api.microlink.io";

/// Resolves a recipe URL to page metadata via the metadata-fetch service.
///
/// One attempt per call; retrying is a whole-import decision left to the
/// caller.
pub struct MetadataResolver {
    client: Client,
    endpoint: String,
}

/// Response envelope returned by the metadata service
#[derive(Debug, Deserialize)]
struct MetadataEnvelope {
    data: Option<MetadataPayload>,
}

#[derive(Debug, Deserialize, Default)]
struct MetadataPayload {
    title: Option<String>,
    description: Option<String>,
    image: Option<MediaRef>,
    logo: Option<MediaRef>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaRef {
    url: Option<String>,
}

impl MetadataResolver {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout)
    }

    /// Point the resolver at a different metadata service endpoint
    /// (self-hosted deployments, tests)
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeClipper/0.3)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch page metadata for a recipe URL.
    ///
    /// Fails with `ImportError::Fetch` when the URL is invalid or the
    /// service cannot be reached, and with `ImportError::NoContent` when the
    /// page yields neither content nor a description to extract from.
    pub async fn resolve(&self, url: &str) -> Result<ScrapedMetadata, ImportError> {
        let source = derive_source(url)?;

        debug!("Resolving metadata for {}", url);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url), ("data.content", "true")])
            .send()
            .await
            .map_err(|e| ImportError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImportError::Fetch(format!(
                "metadata service returned {}",
                response.status()
            )));
        }

        let envelope: MetadataEnvelope = response
            .json()
            .await
            .map_err(|e| ImportError::Fetch(e.to_string()))?;

        let payload = envelope
            .data
            .ok_or_else(|| ImportError::Fetch("metadata service returned no data".to_string()))?;

        let title = non_empty(payload.title).map(|t| decode_entities(&t));
        let description = non_empty(payload.description).map(|d| decode_entities(&d));

        // Fall back to the description when the service could not capture
        // the full page content
        let raw_content = match non_empty(payload.content) {
            Some(content) => content,
            None => description
                .clone()
                .ok_or_else(|| ImportError::NoContent(url.to_string()))?,
        };

        let image_url = payload
            .image
            .and_then(|m| non_empty(m.url))
            .or_else(|| payload.logo.and_then(|m| non_empty(m.url)));

        Ok(ScrapedMetadata {
            title,
            image_url,
            description,
            source,
            raw_content,
        })
    }
}

/// Derive the recipe source from its URL: the hostname with a leading
/// "www." stripped.
pub fn derive_source(url: &str) -> Result<String, ImportError> {
    let parsed =
        Url::parse(url).map_err(|e| ImportError::Fetch(format!("invalid URL {}: {}", url, e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| ImportError::Fetch(format!("URL has no host: {}", url)))?;

    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn decode_entities(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_source_strips_www() {
        assert_eq!(
            derive_source("https://www.example.com/recipe/1").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_derive_source_without_www() {
        assert_eq!(derive_source("https://example.com/x").unwrap(), "example.com");
    }

    #[test]
    fn test_derive_source_keeps_subdomains() {
        assert_eq!(
            derive_source("https://cooking.example/pasta").unwrap(),
            "cooking.example"
        );
        assert_eq!(
            derive_source("https://recipes.bbc.co.uk/pie").unwrap(),
            "recipes.bbc.co.uk"
        );
    }

    #[test]
    fn test_derive_source_invalid_url() {
        let result = derive_source("not a url");
        assert!(matches!(result, Err(ImportError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("url".into(), "https://www.example.com/cake".into()),
                mockito::Matcher::UrlEncoded("data.content".into(), "true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "status": "success",
                    "data": {
                        "title": "Chocolate Cake &amp; Frosting",
                        "description": "A rich chocolate cake",
                        "image": {"url": "https://example.com/cake.jpg"},
                        "content": "Mix flour and cocoa. Bake."
                    }
                }"#,
            )
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let metadata = resolver
            .resolve("https://www.example.com/cake")
            .await
            .unwrap();

        assert_eq!(metadata.title.as_deref(), Some("Chocolate Cake & Frosting"));
        assert_eq!(metadata.description.as_deref(), Some("A rich chocolate cake"));
        assert_eq!(
            metadata.image_url.as_deref(),
            Some("https://example.com/cake.jpg")
        );
        assert_eq!(metadata.source, "example.com");
        assert_eq!(metadata.raw_content, "Mix flour and cocoa. Bake.");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_logo() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "data": {
                        "title": "Stew",
                        "logo": {"url": "https://example.com/logo.png"},
                        "content": "Simmer everything."
                    }
                }"#,
            )
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let metadata = resolver.resolve("https://example.com/stew").await.unwrap();

        assert_eq!(
            metadata.image_url.as_deref(),
            Some("https://example.com/logo.png")
        );
        assert!(metadata.description.is_none());
    }

    #[tokio::test]
    async fn test_resolve_uses_description_when_content_missing() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"title": "Soup", "description": "A hearty soup"}}"#)
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let metadata = resolver.resolve("https://example.com/soup").await.unwrap();

        assert_eq!(metadata.raw_content, "A hearty soup");
    }

    #[tokio::test]
    async fn test_resolve_no_content_at_all() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"title": "Mystery", "content": "", "description": "  "}}"#)
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let result = resolver.resolve("https://example.com/mystery").await;

        assert!(matches!(result, Err(ImportError::NoContent(_))));
    }

    #[tokio::test]
    async fn test_resolve_service_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let result = resolver.resolve("https://example.com/x").await;

        assert!(matches!(result, Err(ImportError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_resolve_missing_data_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "fail"}"#)
            .create_async()
            .await;

        let resolver = MetadataResolver::with_endpoint(server.url(), None);
        let result = resolver.resolve("https://example.com/x").await;

        assert!(matches!(result, Err(ImportError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_resolve_invalid_url_skips_network() {
        // No server: an invalid URL must fail before any request is made
        let resolver = MetadataResolver::with_endpoint("http://127.0.0.1:1", None);
        let result = resolver.resolve("definitely not a url").await;

        assert!(matches!(result, Err(ImportError::Fetch(_))));
    }
}
