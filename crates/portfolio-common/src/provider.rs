use async_trait::async_trait;

use crate::openai::{ChatCompletionRequest, ChatCompletionResponse, OpenAiClient, OpenAiClientError};

/// A chat-completions backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// `false` when the backend has no credential and must not be called.
    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiClientError>;
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.has_credentials()
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiClientError> {
        self.chat_completions(request).await
    }
}
