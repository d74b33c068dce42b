//! Gemini gateway: `generateContent` calls to the analysis and image models.
//!
//! API key comes from `GatewayConfig` (sourced from `GEMINI_API_KEY`); the
//! reqwest client is built once with the configured timeout and shared by
//! both calls. Transient upstream failures (transport, 429, 5xx) are retried
//! with exponential backoff up to the configured attempt count.

use crate::config::GatewayConfig;
use crate::error::{RenderError, RenderResult};
use crate::gateway::ModelGateway;
use crate::image::{FloorplanImage, RenderedImage};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const RENDER_ASPECT_RATIO: &str = "16:9";
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Gateway to the Gemini `generateContent` REST API.
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    analysis_model: String,
    image_model: String,
    retry_attempts: u32,
}

impl GeminiGateway {
    /// Build the gateway from validated configuration. The credential was
    /// already checked by `GatewayConfig::from_env`, so this cannot fail on
    /// a missing key; only an unusable HTTP client is an error here.
    pub fn new(config: &GatewayConfig) -> RenderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RenderError::Configuration(format!("HTTP client build failed: {e}")))?;
        Ok(GeminiGateway {
            client,
            api_key: config.api_key.clone(),
            analysis_model: config.analysis_model.clone(),
            image_model: config.image_model.clone(),
            retry_attempts: config.retry_attempts,
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> RenderResult<GenerateContentResponse> {
        let url = format!("{GEMINI_API_BASE}/models/{model}:generateContent");
        let mut attempt: u32 = 0;
        loop {
            match self.generate_content_once(&url, body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < self.retry_attempts => {
                    let delay = RETRY_BASE_DELAY * 2u32.saturating_pow(attempt);
                    tracing::warn!(
                        model,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient upstream failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn generate_content_once(
        &self,
        url: &str,
        body: &GenerateContentRequest,
    ) -> RenderResult<GenerateContentResponse> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            RenderError::Upstream {
                status: None,
                message: format!("response parse failed: {e}"),
            }
        })?;
        Ok(parsed)
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn analyze(&self, prompt: &str, image: &FloorplanImage) -> RenderResult<String> {
        let body = GenerateContentRequest::new(prompt, image, None);
        let response = self.generate_content(&self.analysis_model, &body).await?;
        candidate_text(response).ok_or_else(|| RenderError::Upstream {
            status: None,
            message: "analysis model returned no text".into(),
        })
    }

    async fn render(&self, prompt: &str, image: &FloorplanImage) -> RenderResult<RenderedImage> {
        let config = GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
            image_config: Some(ImageConfig {
                aspect_ratio: RENDER_ASPECT_RATIO.to_string(),
            }),
        };
        let body = GenerateContentRequest::new(prompt, image, Some(config));
        let response = self.generate_content(&self.image_model, &body).await?;

        let inline = first_image(response).ok_or(RenderError::NoImageProduced)?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| RenderError::Upstream {
                status: None,
                message: format!("image payload decode failed: {e}"),
            })?;
        Ok(RenderedImage {
            data,
            mime_type: inline.mime_type,
        })
    }
}

/// Text output of the first candidate with content: all non-empty text parts
/// concatenated in order. Long analyses arrive split across several parts, so
/// taking just one would truncate the result.
fn candidate_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .take(1)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First inline image part across candidates, if any.
fn first_image(response: GenerateContentResponse) -> Option<InlineData> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.inline_data)
}

// Wire types for the generateContent endpoint (camelCase JSON).

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// One content entry: the prompt text followed by the inline floorplan.
    fn new(prompt: &str, image: &FloorplanImage, config: Option<GenerationConfig>) -> Self {
        let parts = vec![
            RequestPart::Text {
                text: prompt.to_string(),
            },
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(image.as_bytes()),
                },
            },
        ];
        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: config,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_image() -> FloorplanImage {
        FloorplanImage::from_bytes(crate::image::png_fixture()).unwrap()
    }

    #[test]
    fn request_serializes_camel_case_with_image_config() {
        let config = GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
            image_config: Some(ImageConfig {
                aspect_ratio: RENDER_ASPECT_RATIO.to_string(),
            }),
        };
        let body = GenerateContentRequest::new("render this", &png_image(), Some(config));
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("generationConfig").is_some());
        assert!(json.get("generation_config").is_none());
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE"])
        );
        assert_eq!(
            json["generationConfig"]["imageConfig"]["aspectRatio"],
            "16:9"
        );
    }

    #[test]
    fn request_carries_prompt_then_inline_floorplan() {
        let body = GenerateContentRequest::new("analyze this", &png_image(), None);
        let json = serde_json::to_value(&body).unwrap();

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "analyze this");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn candidate_text_skips_whitespace_only_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "   "},
                        {"text": "Two bedrooms, not open concept."}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            candidate_text(response).as_deref(),
            Some("Two bedrooms, not open concept.")
        );
    }

    #[test]
    fn candidate_text_concatenates_split_analysis_parts() {
        // Long analyses come back split across several text parts in one
        // candidate; every part must survive.
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "ROOM LIST: living room 220 sqft."},
                        {"text": " WALL LAYOUT: kitchen walled off; NOT open concept."}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            candidate_text(response).as_deref(),
            Some("ROOM LIST: living room 220 sqft. WALL LAYOUT: kitchen walled off; NOT open concept.")
        );
    }

    #[test]
    fn first_image_finds_inline_data() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here is your render"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let inline = first_image(response).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "iVBORw0KGgo=");
    }

    #[test]
    fn responses_without_image_parts_yield_none() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "I cannot render that."}]}
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(first_image(response).is_none());

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(candidate_text(empty).is_none());
    }
}
