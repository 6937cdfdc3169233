/// Image could not be bounded and re-encoded. Callers recover by keeping the raw payload.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),
}

impl NormalizationError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

/// Input could not be turned into a source image at all. Never touches session phase.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not an image ({mime_type})")]
    NotAnImage { path: String, mime_type: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0}")]
    MissingApiKey(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no image returned: {0}")]
    NoImage(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("media error: {0}")]
    Media(String),
}

impl GenerationError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn no_image(msg: impl Into<String>) -> Self {
        Self::NoImage(msg.into())
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

/// A coordinator call that was rejected before any gateway call was made.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("{operation} is not allowed while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("no source image captured")]
    NoSourceImage,

    #[error("no conversation to continue")]
    NoHistory,

    #[error("remix is locked once a video exists for this result")]
    RemixLockedByVideo,

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a credential is required for video generation")]
    MissingCredential,
}

#[derive(thiserror::Error, Debug)]
#[error("failed to release {handle_id}: {message}")]
pub struct ReleaseError {
    pub handle_id: String,
    pub message: String,
}

impl ReleaseError {
    pub fn new(handle_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            handle_id: handle_id.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_prefixes_are_distinct() {
        assert!(NormalizationError::decode("x")
            .to_string()
            .starts_with("decode error:"));
        assert!(NormalizationError::encode("x")
            .to_string()
            .starts_with("encode error:"));
        assert_ne!(
            NormalizationError::decode("x"),
            NormalizationError::encode("x")
        );
    }

    #[test]
    fn generation_errors_render_user_message() {
        let rejected = GenerationError::Rejected {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(rejected.to_string(), "request rejected (429): quota");
        assert_eq!(
            GenerationError::MissingApiKey("GEMINI_API_KEY not set".to_string()).to_string(),
            "GEMINI_API_KEY not set"
        );
    }

    #[test]
    fn capture_error_keeps_io_source() {
        let err = CaptureError::Unreadable {
            path: "a.png".to_string(),
            source: std::io::Error::other("gone"),
        };
        assert!(err.to_string().contains("gone"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
