use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::{PredictionError, PredictionResult};
use super::prompts::library;
use super::types::OracleSettings;

/// Capability to turn a prompt into raw oracle text
///
/// Implementations normalize every failure to `OracleCallFailed`.
#[async_trait]
pub trait PredictionOracle: Send + Sync {
    async fn predict(&self, prompt: &str) -> PredictionResult<String>;
}

/// Oracle availability, decided once at startup
#[derive(Clone)]
pub enum OracleClient {
    Configured(Arc<dyn PredictionOracle>),
    Unconfigured,
}

impl OracleClient {
    pub fn configured(oracle: impl PredictionOracle + 'static) -> Self {
        OracleClient::Configured(Arc::new(oracle))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, OracleClient::Configured(_))
    }

    /// Ask the oracle, failing fast with `OracleUnavailable` when unconfigured
    pub async fn predict(&self, prompt: &str) -> PredictionResult<String> {
        match self {
            OracleClient::Configured(oracle) => oracle.predict(prompt).await,
            OracleClient::Unconfigured => Err(PredictionError::OracleUnavailable),
        }
    }
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleClient::Configured(_) => write!(f, "OracleClient::Configured"),
            OracleClient::Unconfigured => write!(f, "OracleClient::Unconfigured"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completion oracle
///
/// Sends one `POST {base_url}/chat/completions` per prediction with a fixed
/// system instruction. No retries.
pub struct OpenAiOracle {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    system_prompt: String,
    settings: OracleSettings,
}

impl OpenAiOracle {
    pub fn new(
        api_key: String,
        base_url: &str,
        settings: OracleSettings,
        timeout: Duration,
    ) -> PredictionResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::OracleCallFailed(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            system_prompt: library::wait_time_prediction().system,
            settings,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionOracle for OpenAiOracle {
    async fn predict(&self, prompt: &str) -> PredictionResult<String> {
        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        tracing::debug!(model = %self.settings.model, "Requesting chat completion");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PredictionError::OracleCallFailed(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PredictionError::OracleCallFailed(format!(
                "API returned {}: {}",
                status, detail
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PredictionError::OracleCallFailed(format!("Invalid response body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| PredictionError::OracleCallFailed("Response contained no content".to_string()))
    }
}
