//! Generative-text provider trait and types.

use async_trait::async_trait;

use crate::error::LlmError;

/// Response to a single prompt.
///
/// Providers may answer successfully yet carry no text (blocked content,
/// empty candidates), hence the `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: Option<String>,
}

impl GenerationResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The text, if present and non-empty.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Trait for generative-text providers.
///
/// The contract is deliberately thin: one prompt in, optional text out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider identifier used in logs and errors.
    fn name(&self) -> &str;

    /// Get the model name.
    fn model_name(&self) -> &str;

    /// Send a single prompt and return the provider's answer.
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, LlmError>;
}
