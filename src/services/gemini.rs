//! Google Gemini implementation of [`TripPlanGenerator`].
//!
//! Calls `models/{model}:generateContent` with a single user turn built by
//! [`build_prompt`] and returns the concatenated text parts of the first
//! candidate.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::trip_planner::{build_prompt, GeneratorError, TripPlanGenerator, TripPlanParams};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

pub struct GeminiTripPlanner {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTripPlanner {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn build_url(&self) -> String {
        format!("{API_BASE_URL}/models/{}:generateContent", self.model)
    }

    fn build_request(prompt: String) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    fn map_transport_error(err: reqwest::Error) -> GeneratorError {
        if err.is_timeout() {
            GeneratorError::Timeout
        } else {
            GeneratorError::Failed(format!("HTTP request failed: {err}"))
        }
    }

    fn api_error(status: u16, body: &str) -> GeneratorError {
        let message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_string(), |e| e.message);
        GeneratorError::Failed(format!("Gemini API error ({status}): {message}"))
    }

    fn extract_text(response: GeminiResponse) -> Result<String, GeneratorError> {
        if let Some(error) = response.error {
            return Err(GeneratorError::Failed(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        let content = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| GeneratorError::Failed("No content in Gemini response".to_string()))?;

        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        Ok(strip_code_fence(&text).to_string())
    }
}

/// Drops a surrounding ```html fence the model sometimes adds anyway.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            body.trim_end().strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    }
}

#[async_trait]
impl TripPlanGenerator for GeminiTripPlanner {
    async fn generate(&self, params: &TripPlanParams) -> Result<String, GeneratorError> {
        if !self.is_configured() {
            return Err(GeneratorError::Failed(
                "AI service is not configured".to_string(),
            ));
        }

        let request = Self::build_request(build_prompt(params));
        debug!("Sending itinerary request to Gemini model {}", self.model);

        let response = self
            .client
            .post(self.build_url())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::map_transport_error)?;

        if !status.is_success() {
            error!("Gemini API returned {}", status);
            return Err(Self::api_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            GeneratorError::Failed(format!("Failed to parse Gemini response: {e}"))
        })?;

        Self::extract_text(parsed)
    }
}
