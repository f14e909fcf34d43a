use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument};

use crate::narrative_generator::{GenerationFailure, NarrativeGenerator};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,

    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some(String::from("user")),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, its parts joined together.
    fn into_text(self) -> Result<String, GenerationFailure> {
        if let Some(reason) = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(GenerationFailure::Blocked(reason));
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(GenerationFailure::EmptyContent);
        };

        let text: String = candidate
            .content
            .unwrap_or_default()
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            debug!(
                "GeminiApi: candidate without text, finish reason {:?}",
                candidate.finish_reason
            );
            return Err(GenerationFailure::EmptyContent);
        }

        Ok(text)
    }
}

pub struct GeminiClientParams {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiClientParams {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiClientParams {
            api_key: api_key.into(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct GeminiClient {
    params: GeminiClientParams,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(params: GeminiClientParams) -> Result<Self, GenerationFailure> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;
        Ok(Self { params, client })
    }

    pub fn model(&self) -> &str {
        &self.params.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.params.base_url.trim_end_matches('/'),
            self.params.model
        )
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GenerationFailure> {
        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(GenerationFailure::Api { status, message })
        }
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiClient {
    #[instrument(skip_all, level = Level::DEBUG, fields(model = %self.params.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        let body = GenerateContentRequest::from_prompt(prompt);

        debug!("GeminiApi: Posting prompt of {} bytes", prompt.len());

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", &self.params.api_key)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await?.into_text()
    }
}
