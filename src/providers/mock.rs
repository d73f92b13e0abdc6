/*!
 * Mock provider for tests and offline runs.
 *
 * - `MockProvider::working()` - answers every request with scripted text
 * - `MockProvider::intermittent(n)` - fails every nth request
 * - `MockProvider::failing()` - always fails with an API error
 * - `MockProvider::empty()` - answers with empty text
 *
 * The same value doubles as a [`Transcriber`] that returns the scripted text.
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::openai::{ChatRequest, ChatResponse, Usage};
use crate::providers::{Provider, Transcriber};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on every Nth request
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty message
    Empty,
    /// Sleeps before answering (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Scripted stand-in for the OpenAI client
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Shared between clones
    request_count: Arc<AtomicUsize>,
    /// Fixed reply; the prompt is echoed back when unset
    reply: Option<String>,
    /// Optional generator, takes precedence over `reply`
    custom_response: Option<fn(&ChatRequest) -> String>,
    usage: Usage,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            reply: None,
            custom_response: None,
            usage: Usage {
                prompt_tokens: 1000,
                completion_tokens: 500,
                total_tokens: 1500,
            },
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Always answer with this text
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ChatRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Token counts reported with each answer
    pub fn with_usage(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.usage = Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        };
        self
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn scripted_text(&self, request: &ChatRequest) -> String {
        if let Some(generator) = self.custom_response {
            return generator(request);
        }
        self.reply
            .clone()
            .unwrap_or_else(|| request.prompt().to_string())
    }

    fn simulated_failure(count: usize) -> ProviderError {
        ProviderError::ApiError {
            message: format!("Simulated provider failure (request #{})", count + 1),
            status_code: 500,
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            reply: self.reply.clone(),
            custom_response: self.custom_response,
            usage: self.usage,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(ChatResponse::from_text(
                request.model.clone(),
                self.scripted_text(&request),
                self.usage,
            )),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(Self::simulated_failure(count))
                } else {
                    Ok(ChatResponse::from_text(
                        request.model.clone(),
                        self.scripted_text(&request),
                        self.usage,
                    ))
                }
            }

            MockBehavior::Failing => Err(Self::simulated_failure(count)),

            MockBehavior::Empty => Ok(ChatResponse::from_text(
                request.model.clone(),
                String::new(),
                Usage::default(),
            )),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(ChatResponse::from_text(
                    request.model.clone(),
                    self.scripted_text(&request),
                    self.usage,
                ))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
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
impl Transcriber for MockProvider {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => Err(Self::simulated_failure(count)),
            MockBehavior::Empty => Ok(String::new()),
            _ => Ok(self
                .reply
                .clone()
                .unwrap_or_else(|| format!("Transcript of {}", audio_path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::openai::ChatMessage;

    fn request(text: &str) -> ChatRequest {
        ChatRequest::new("gpt-4o").add_message(ChatMessage::user(text))
    }

    #[tokio::test]
    async fn test_workingProvider_shouldEchoPrompt() {
        let provider = MockProvider::working();
        let response = provider.complete(request("Hello world")).await.unwrap();
        assert_eq!(MockProvider::extract_text(&response), "Hello world");
        assert_eq!(response.usage.total_tokens, 1500);
    }

    #[tokio::test]
    async fn test_workingProvider_withReply_shouldReturnReply() {
        let provider = MockProvider::working()
            .with_reply("Scripted")
            .with_usage(10, 5);
        let response = provider.complete(request("ignored")).await.unwrap();
        assert_eq!(MockProvider::extract_text(&response), "Scripted");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[tokio::test]
    async fn test_failingProvider_shouldReturnError() {
        let provider = MockProvider::failing();
        assert!(provider.complete(request("Hello")).await.is_err());
        assert!(provider.test_connection().await.is_err());
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn test_intermittentProvider_shouldFailPeriodically() {
        let provider = MockProvider::intermittent(3);

        assert!(provider.complete(request("a")).await.is_ok());
        assert!(provider.complete(request("b")).await.is_ok());
        assert!(provider.complete(request("c")).await.is_err());
        assert!(provider.complete(request("d")).await.is_ok());
    }

    #[tokio::test]
    async fn test_emptyProvider_shouldReturnEmptyText() {
        let provider = MockProvider::empty();
        let response = provider.complete(request("Hello")).await.unwrap();
        assert!(MockProvider::extract_text(&response).is_empty());
    }

    #[tokio::test]
    async fn test_customResponseGenerator_shouldBeUsed() {
        let provider = MockProvider::working()
            .with_custom_response(|req| format!("CUSTOM: {}", req.model));
        let response = provider.complete(request("Test")).await.unwrap();
        assert_eq!(MockProvider::extract_text(&response), "CUSTOM: gpt-4o");
    }

    #[tokio::test]
    async fn test_clonedProvider_shouldShareRequestCount() {
        let provider = MockProvider::intermittent(2);
        let cloned = provider.clone();

        assert!(provider.complete(request("a")).await.is_ok());
        assert!(cloned.complete(request("b")).await.is_err());
        assert_eq!(provider.request_count(), 2);
    }

    #[tokio::test]
    async fn test_transcribe_withReply_shouldReturnScriptedText() {
        let provider = MockProvider::working().with_reply("Officer: stop recording");
        let text = provider.transcribe(Path::new("/tmp/audio.mp3")).await.unwrap();
        assert_eq!(text, "Officer: stop recording");
    }
}
