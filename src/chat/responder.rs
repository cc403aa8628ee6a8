//! Chat responder: AI-backed replies with a scripted fallback.
//!
//! Availability is decided once, at startup, by probing the provider. A
//! responder that starts in fallback never calls the provider again. An
//! AI-backed responder whose call fails answers that one message from the
//! keyword table and stays AI-backed.

use std::sync::Arc;

use crate::chat::fallback::fallback_reply;
use crate::error::LlmError;
use crate::llm::{GenerationResponse, LlmProvider};

/// Message that short-circuits to [`TEST_CONFIRMATION`].
pub const TEST_COMMAND: &str = "test";
pub const TEST_CONFIRMATION: &str = "Gemini AI test successful";
/// Prompt sent by the startup probe.
pub const PROBE_PROMPT: &str = "Hello";

/// Whether chat replies come from the provider or the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAvailability {
    Available,
    Fallback,
}

impl AiAvailability {
    /// Send a trivial prompt; only a non-empty text answer counts as available.
    pub async fn probe(provider: &dyn LlmProvider) -> Self {
        match provider.generate(PROBE_PROMPT).await {
            Ok(resp) if resp.usable_text().is_some() => {
                tracing::info!(
                    provider = provider.name(),
                    model = provider.model_name(),
                    "AI provider probe succeeded"
                );
                Self::Available
            }
            Ok(_) => {
                tracing::warn!(
                    provider = provider.name(),
                    "AI provider probe returned no text; using scripted replies"
                );
                Self::Fallback
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "AI provider not available; using scripted replies"
                );
                Self::Fallback
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "ai",
            Self::Fallback => "fallback",
        }
    }
}

/// A provider call, classified before the reply is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamReply {
    Text(String),
    Failure(String),
}

impl From<Result<GenerationResponse, LlmError>> for UpstreamReply {
    fn from(result: Result<GenerationResponse, LlmError>) -> Self {
        match result {
            Ok(resp) => match resp.text {
                Some(text) if !text.is_empty() => Self::Text(text),
                _ => Self::Failure("Empty response from provider".to_string()),
            },
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// Build the instructional prompt around the user's raw message.
pub fn build_prompt(message: &str) -> String {
    format!(
        "You are an AI assistant for an Alumni Portal for Esprit University.\n\
         You help with alumni information, data analysis, and portal features.\n\
         The user's message is: {message}\n\
         \n\
         Provide a helpful, professional response. Keep responses concise but informative.\n\
         Focus on alumni data, Esprit university information, and portal functionality."
    )
}

fn is_test_command(message: &str) -> bool {
    message.to_lowercase() == TEST_COMMAND
}

pub struct ChatResponder {
    provider: Option<Arc<dyn LlmProvider>>,
    availability: AiAvailability,
}

impl ChatResponder {
    /// Construct with an already-decided availability.
    ///
    /// Without a provider the responder is always in fallback.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, availability: AiAvailability) -> Self {
        let availability = if provider.is_some() {
            availability
        } else {
            AiAvailability::Fallback
        };
        Self {
            provider,
            availability,
        }
    }

    /// Responder that never calls out.
    pub fn offline() -> Self {
        Self::new(None, AiAvailability::Fallback)
    }

    /// Probe `provider` once and fix the availability for the process lifetime.
    pub async fn initialize(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        let availability = match provider.as_deref() {
            Some(p) => AiAvailability::probe(p).await,
            None => AiAvailability::Fallback,
        };
        Self::new(provider, availability)
    }

    pub fn availability(&self) -> AiAvailability {
        self.availability
    }

    /// Produce a reply. Never fails: provider trouble becomes a scripted reply.
    pub async fn respond(&self, message: &str) -> String {
        if is_test_command(message) {
            return TEST_CONFIRMATION.to_string();
        }

        let provider = match (&self.provider, self.availability) {
            (Some(p), AiAvailability::Available) => p,
            _ => return fallback_reply(message).to_string(),
        };

        let upstream = UpstreamReply::from(provider.generate(&build_prompt(message)).await);
        match upstream {
            UpstreamReply::Text(text) => text,
            UpstreamReply::Failure(reason) => {
                tracing::warn!(
                    provider = provider.name(),
                    reason = %reason,
                    "Chat provider call failed; answering from keyword table"
                );
                fallback_reply(message).to_string()
            }
        }
    }
}
