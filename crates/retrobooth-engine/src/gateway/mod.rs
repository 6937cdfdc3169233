use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::artifacts::VideoHandle;
use crate::error::GenerationError;
use crate::payload::ImagePayload;

mod dryrun;
mod gemini;

pub use dryrun::DryrunGateway;
pub use gemini::GeminiGateway;

/// One request/response exchange with the backend, replayed verbatim to continue a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    contents: Vec<Value>,
}

impl ConversationTurn {
    pub fn new(contents: Vec<Value>) -> Self {
        Self { contents }
    }

    pub fn contents(&self) -> &[Value] {
        &self.contents
    }
}

/// Secret used for video generation. Held in memory only; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct StartRequest {
    pub image: ImagePayload,
    pub style_id: String,
    pub directive: String,
}

#[derive(Debug, Clone)]
pub struct ContinueRequest {
    pub history: Vec<ConversationTurn>,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub source: ImagePayload,
    pub prompt: String,
    pub credential: Credential,
}

/// Result of a start or continue call: the new image and the full conversation so far.
#[derive(Debug, Clone)]
pub struct SessionStep {
    pub artifact: ImagePayload,
    pub history: Vec<ConversationTurn>,
}

/// The generative backend. Every call blocks until the backend answers or fails.
pub trait GenerationGateway: Send + Sync {
    fn name(&self) -> &str;
    fn start_session(&self, request: &StartRequest) -> Result<SessionStep, GenerationError>;
    fn continue_session(&self, request: &ContinueRequest) -> Result<SessionStep, GenerationError>;
    fn generate_video(&self, request: &VideoRequest) -> Result<VideoHandle, GenerationError>;
}

pub(crate) fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::{truncate_text, Credential};

    #[test]
    fn credential_rejects_blank_and_redacts_debug() {
        assert!(Credential::new("   ").is_none());
        let key = Credential::new("  sk-secret ").unwrap();
        assert_eq!(key.expose(), "sk-secret");
        assert_eq!(format!("{key:?}"), "Credential(<redacted>)");
    }

    #[test]
    fn truncate_text_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc…");
    }
}
