// SPDX-License-Identifier: GPL-3.0-only

//! Gemini `generateContent` client

use super::Captioner;
use crate::config::Config;
use crate::constants::caption::{API_KEY_VARS, PROMPT};
use crate::errors::CaptionError;
use crate::photo::ImagePayload;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Maximum number of response body bytes kept in an error
const ERROR_BODY_LIMIT: usize = 256;

/// Captioner backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiCaptioner {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiCaptioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCaptioner")
            .field("url", &self.url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiCaptioner {
    /// Build a client for `{endpoint}/models/{model}:generateContent`
    ///
    /// A missing key is not an error here; every request then fails with
    /// [`CaptionError::MissingCredential`] and the caller falls back.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CaptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CaptionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: generate_content_url(endpoint, model),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Build from user configuration, reading the key from the environment
    pub fn from_config(config: &Config) -> Result<Self, CaptionError> {
        Self::new(
            &config.caption_endpoint,
            &config.caption_model,
            api_key_from_env(),
            config.caption_timeout(),
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Captioner for GeminiCaptioner {
    fn caption(&self, image: ImagePayload) -> BoxFuture<'static, Result<String, CaptionError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        let api_key = self.api_key.clone();

        async move {
            let api_key = api_key.ok_or(CaptionError::MissingCredential)?;
            let body = GenerateContentRequest::for_image(&image);

            debug!(url = %url, bytes = image.len(), "Requesting caption");
            let response = client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let bytes = response.bytes().await?;
            if !status.is_success() {
                let body = String::from_utf8_lossy(&bytes);
                return Err(CaptionError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(ERROR_BODY_LIMIT).collect(),
                });
            }

            parse_response(&bytes)
        }
        .boxed()
    }
}

/// First non-empty credential among the known environment variables
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    InlineData(InlineData),
    Text(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentRequest {
    fn for_image(image: &ImagePayload) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData(InlineData {
                        mime_type: image.mime_type().to_string(),
                        data: STANDARD.encode(image.bytes()),
                    }),
                    Part::Text(PROMPT.to_string()),
                ],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenated text of the first candidate (may be empty)
fn parse_response(body: &[u8]) -> Result<String, CaptionError> {
    let response: GenerateContentResponse =
        serde_json::from_slice(body).map_err(|e| CaptionError::Malformed(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_endpoint_and_model() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/", "gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let image = ImagePayload::jpeg(vec![0xFF, 0xD8, 0xFF]);
        let body = serde_json::to_value(GenerateContentRequest::for_image(&image)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/" } },
                        { "text": PROMPT }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_parse_joins_parts_of_first_candidate() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Sunday " }, { "text": "vibes" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        let text = parse_response(body.to_string().as_bytes()).unwrap();
        assert_eq!(text, "Sunday vibes");
    }

    #[test]
    fn test_parse_without_candidates_is_empty() {
        assert_eq!(parse_response(b"{}").unwrap(), "");
        let blocked = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        assert_eq!(parse_response(blocked.to_string().as_bytes()).unwrap(), "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_response(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, CaptionError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let captioner = GeminiCaptioner::new(
            "http://127.0.0.1:9",
            "gemini-2.5-flash",
            Some("   ".into()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(!captioner.has_credential());

        let err = captioner
            .caption(ImagePayload::jpeg(vec![1, 2, 3]))
            .await
            .unwrap_err();
        assert_eq!(err, CaptionError::MissingCredential);
    }
}
