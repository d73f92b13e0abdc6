/*!
 * Clients for the hosted AI services used while drafting.
 *
 * - OpenAI: chat completions for section enhancement and Whisper for
 *   transcripts
 * - Mock: scripted in-process provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;

/// Chat model used to rewrite complaint sections
///
/// The enhancement service is generic over this trait, so tests drive it with
/// [`mock::MockProvider`] instead of the network.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    type Request: Send + Sync;
    type Response: Send + Sync;

    /// Send one request and wait for the full answer
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Cheap round trip that proves the key and endpoint work
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Generated text of a response, empty when there is none
    fn extract_text(response: &Self::Response) -> String;
}

/// Speech-to-text over a local audio file
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Transcribe the file and return plain text
    async fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod openai;

pub use openai::{ChatMessage, ChatRequest, ChatResponse, OpenAI, Usage};
