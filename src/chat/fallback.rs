//! Scripted replies used whenever the AI provider is unavailable.

pub const GREETING_REPLY: &str =
    "Hello! I'm the Alumni Portal AI assistant. How can I help you today?";
pub const ALUMNI_REPLY: &str = "I can help you search for alumni information using their Esprit email addresses. Just enter an email like 'Ahmed.BenSalem@esprit.tn' in the search box!";
pub const ESPRIT_REPLY: &str = "Esprit is the university this alumni portal is designed for. All alumni emails follow the format: FirstName.LastName@esprit.tn";
pub const HELP_REPLY: &str = "I'm here to help with alumni information. You can search for alumni using their Esprit email addresses, or ask me about the portal features!";

/// Keyword groups in priority order; the first group with any keyword
/// contained in the lower-cased message wins.
const KEYWORD_TABLE: &[(&[&str], &str)] = &[
    (&["hello", "hi"], GREETING_REPLY),
    (&["alumni"], ALUMNI_REPLY),
    (&["esprit"], ESPRIT_REPLY),
];

/// Pick the scripted reply for `message`.
///
/// Matching is plain substring containment, so "this" counts as "hi".
pub fn fallback_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(HELP_REPLY)
}
