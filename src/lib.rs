//! Esprit alumni portal.
//!
//! Generates alumni profiles from institutional emails, keeps them in an
//! in-memory store, ingests email lists in bulk and answers chat messages
//! through Gemini with a scripted fallback.

pub mod alumni;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod web;
