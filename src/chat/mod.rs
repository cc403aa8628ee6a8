//! Chat assistant for the portal.

pub mod fallback;
pub mod responder;

pub use fallback::fallback_reply;
pub use responder::{AiAvailability, ChatResponder, TEST_CONFIRMATION, UpstreamReply};
