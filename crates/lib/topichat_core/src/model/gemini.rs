//! Gemini `generateContent` client.
//!
//! Calls `POST {base}/v1beta/models/{model}:generateContent` with the API key
//! in the `x-goog-api-key` header. A 2xx response without candidate text is
//! reported as a failure that still carries the prompt feedback, so the
//! invoker can recover a block reason from it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{GenerationConfig, ModelConfig, SafetySetting};
use super::{GenerationFailure, GenerationResult, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro-exp-03-25";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any text parts.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    fn block_reason(&self) -> Option<String> {
        self.prompt_feedback.as_ref()?.block_reason.clone()
    }
}

/// HTTP client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<GenerationResult, GenerationFailure> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: &config.generation_config,
            safety_settings: &config.safety_settings,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationFailure::new(format!("Gemini request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerationFailure::new(format!(
                "Gemini generateContent failed: {status} {body}"
            )));
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerationFailure::new(format!("Gemini response parse error: {e}")))?;

        let block_reason = data.block_reason();
        match data.text() {
            Some(text) => Ok(GenerationResult { text, block_reason }),
            None => {
                let finish_reason = data
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("none");
                debug!(
                    model = %self.model,
                    finish_reason,
                    block_reason = ?block_reason,
                    "Gemini returned no candidate text"
                );
                Err(GenerationFailure::new(format!(
                    "Gemini response contained no text (finish reason: {finish_reason})"
                ))
                .with_partial(GenerationResult {
                    text: String::new(),
                    block_reason,
                }))
            }
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).expect("parse response")
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new("k")
            .with_base_url("http://localhost:9999/")
            .with_model("gemini-1.5-flash");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn text_concatenates_first_candidate_parts() {
        let data = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "},{"text":"world"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(data.text().as_deref(), Some("Hello, world"));
        assert!(data.block_reason().is_none());
    }

    #[test]
    fn blocked_prompt_has_no_text() {
        let data = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(data.text().is_none());
        assert_eq!(data.block_reason().as_deref(), Some("SAFETY"));
    }

    #[test]
    fn candidate_without_parts_has_no_text() {
        let data = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(data.text().is_none());
    }

    #[test]
    fn request_serializes_in_wire_format() {
        let config = ModelConfig::default();
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: "hi" }],
            }],
            generation_config: &config.generation_config,
            safety_settings: &config.safety_settings,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(value["safetySettings"].as_array().map(Vec::len), Some(4));
    }
}
