//! External service port traits (chat completion, persona generation).

use async_trait::async_trait;
use aiatc_domain::{ChatMessage, ControllerPersona, PersonaSeed};

use super::error::{LlmError, PersonaError};

// =============================================================================
// LLM Types
// =============================================================================

/// Chat completion request: the full ordered history for one airport.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temp: Option<f32>) -> Self {
        self.temperature = temp;
        self
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// The reply as an assistant message, ready to append to a context.
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::assistant(self.content)
    }
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Persona Generation
// =============================================================================

/// Generates a controller identity. Implementations must be deterministic in
/// the seed: the same airport and date give the same persona.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonaPort: Send + Sync {
    async fn generate(&self, seed: &PersonaSeed) -> Result<ControllerPersona, PersonaError>;
}
