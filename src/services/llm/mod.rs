//! Generative model abstraction
//!
//! Every AI-backed feature talks to the hosted model through [`GenerativeModel`],
//! so handlers and services can run against Gemini in production and against a
//! mock in tests. Callers decide how to degrade: quota failures get canned or
//! heuristic answers, everything else surfaces as an error.

pub mod gemini;

pub use gemini::GeminiClient;

/// Errors from a generative model call
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Model quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("Model API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

impl LlmError {
    /// Whether the failure is a quota / rate limit one
    pub fn is_quota(&self) -> bool {
        matches!(self, LlmError::QuotaExceeded(_))
    }
}

/// An uploaded image handed to a vision prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A hosted text + vision completion model
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Completes a text-only prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Completes a prompt about a single image
    async fn generate_with_image(&self, prompt: &str, image: &ImageInput)
        -> Result<String, LlmError>;

    /// Model name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quota() {
        assert!(LlmError::QuotaExceeded("429".to_string()).is_quota());
        assert!(!LlmError::Api("500".to_string()).is_quota());
        assert!(!LlmError::EmptyResponse.is_quota());
    }
}
