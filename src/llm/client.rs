//! Async LLM client for advisor calls
//!
//! A model-agnostic HTTP client. Supports a local Ollama `generate`
//! endpoint as well as Anthropic and OpenAI-compatible APIs. The advisor
//! only ever produces commentary; nothing it returns mutates game state.

use crate::core::error::{PoliticsError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Ollama,
    Anthropic,
    OpenAI,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    api_format: ApiFormat,
    timeout: Duration,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Client for a local Ollama server
    pub fn ollama(api_url: String, model: String) -> Self {
        Self::new(None, api_url, model)
    }

    /// Bound every request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else if url.contains("/api/generate") {
            ApiFormat::Ollama
        } else {
            // DeepSeek, OpenAI, and other compatible APIs use OpenAI format
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// `OLLAMA_URL` takes priority (model from `OLLAMA_MODEL`, default
    /// mistral). Otherwise `LLM_API_KEY` is required, with optional
    /// `LLM_API_URL` (defaults to the Anthropic API) and `LLM_MODEL`.
    pub fn from_env() -> Result<Self> {
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            let model =
                std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.into());
            return Ok(Self::ollama(url, model));
        }

        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| PoliticsError::AdvisorError("neither OLLAMA_URL nor LLM_API_KEY set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(Some(api_key), api_url, model))
    }

    pub fn api_format(&self) -> ApiFormat {
        self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a completion request and return the raw text
    ///
    /// `json_mode` asks servers that support it to constrain output to JSON.
    pub async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String> {
        let call = async {
            match self.api_format {
                ApiFormat::Ollama => self.complete_ollama(system, user, json_mode).await,
                ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
                ApiFormat::OpenAI => self.complete_openai(system, user).await,
            }
        };
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                PoliticsError::AdvisorError(format!("timed out after {} ms", self.timeout.as_millis()))
            })?
    }

    fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    async fn complete_ollama(&self, system: &str, user: &str, json_mode: bool) -> Result<String> {
        let prompt = if system.is_empty() {
            user.to_string()
        } else {
            format!("{}\n\n{}", system, user)
        };
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            format: json_mode.then(|| "json".to_string()),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PoliticsError::AdvisorError(format!("API error: {}", error_text)));
        }

        let completion: OllamaResponse = response
            .json()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        Ok(completion.response)
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 512,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", self.key())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PoliticsError::AdvisorError(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| PoliticsError::AdvisorError("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: 512,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.key()))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PoliticsError::AdvisorError(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| PoliticsError::AdvisorError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| PoliticsError::AdvisorError("Empty response".into()))
    }
}

// Ollama generate format
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format (DeepSeek, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
