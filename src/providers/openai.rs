use async_trait::async_trait;
use log::{debug, error};
use reqwest::{multipart, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, Transcriber};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_TRANSCRIPTION_TIMEOUT_SECS: u64 = 300;

/// OpenAI client for chat completions and audio transcription
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL, defaults to the public API
    endpoint: String,
    /// Model used by `test_connection`
    probe_model: String,
    /// Whisper model name
    transcription_model: String,
}

impl std::fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("probe_model", &self.probe_model)
            .field("transcription_model", &self.transcription_model)
            .finish_non_exhaustive()
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model to use
    pub model: String,

    /// The messages for the conversation
    pub messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Nucleus sampling mass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,

    /// Per-request timeout, not sent to the API
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            temperature: Some(0.7),
            max_tokens: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            timeout: None,
        }
    }
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sampling settings used for legal drafting
    pub fn drafting_penalties(mut self) -> Self {
        self.top_p = Some(0.9);
        self.frequency_penalty = Some(0.3);
        self.presence_penalty = Some(0.1);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Content of the last user message
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// One completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Usage,
}

impl ChatResponse {
    /// Response with a single assistant message
    pub fn from_text(model: impl Into<String>, text: impl Into<String>, usage: Usage) -> Self {
        Self {
            model: model.into(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: text.into(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage,
        }
    }
}

fn map_send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() || e.is_connect() {
        ProviderError::ConnectionError(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}

async fn map_status_error(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error!("OpenAI API error ({}): {}", status, message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TRANSCRIPTION_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            probe_model: "gpt-4o".to_string(),
            transcription_model: "whisper-1".to_string(),
        }
    }

    pub fn with_transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    pub fn with_probe_model(mut self, model: impl Into<String>) -> Self {
        self.probe_model = model.into();
        self
    }

    fn url(&self, path: &str) -> String {
        let base = if self.endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/{}", base, path)
    }

    /// Complete a chat request
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let mut builder = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("Sending chat completion to model {}", request.model);
        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(map_status_error(response).await);
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Send an audio file to Whisper, forcing English plain-text output
    pub async fn transcribe_file(&self, audio_path: &Path) -> Result<String, ProviderError> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read audio file: {}", e)))?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("language", "en")
            .text("response_format", "text");

        let response = self
            .client
            .post(self.url("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(map_status_error(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.chat(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = ChatRequest::new(self.probe_model.clone())
            .max_tokens(5)
            .add_message(ChatMessage::user("Hello"));
        self.chat(request).await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transcriber for OpenAI {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError> {
        self.transcribe_file(audio_path).await
    }
}
