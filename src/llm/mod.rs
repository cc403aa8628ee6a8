//! Generative-text integration for the chat assistant.
//!
//! A single backend is supported today: Google Gemini over its REST API.
//! Everything above this module depends only on [`LlmProvider`].

mod gemini;
mod provider;

pub use gemini::GeminiProvider;
pub use provider::{GenerationResponse, LlmProvider};

use std::sync::Arc;

use crate::config::GeminiConfig;
use crate::error::LlmError;

/// Create the configured provider, or `None` when no backend is configured.
pub fn create_llm_provider(
    config: Option<&GeminiConfig>,
) -> Result<Option<Arc<dyn LlmProvider>>, LlmError> {
    let Some(gemini) = config else {
        tracing::info!("No GEMINI_API_KEY configured; chat will use scripted replies");
        return Ok(None);
    };

    tracing::info!("Using Gemini API (model: {})", gemini.model);
    Ok(Some(Arc::new(GeminiProvider::new(gemini.clone())?)))
}
