//! Session engine for the retro photo booth.
//!
//! [`SessionCoordinator`] owns the single booth session and talks to a
//! [`GenerationGateway`]. Source images are bounded by the [`normalize`] pipeline before
//! they enter a session, and generated video media is held in an [`ArtifactSlot`].

pub mod artifacts;
pub mod capture;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod payload;

pub use artifacts::{ArtifactSlot, TransientResource, VideoHandle};
pub use capture::{load_source_image, CapturedImage};
pub use config::EngineConfig;
pub use coordinator::{
    Applied, RemixTicket, SessionCoordinator, SessionPhase, StartTicket, VideoTicket,
};
pub use error::{CaptureError, GenerationError, NormalizationError, ReleaseError, SessionError};
pub use gateway::{
    ConversationTurn, Credential, DryrunGateway, GeminiGateway, GenerationGateway, SessionStep,
};
pub use normalize::{normalize_or_passthrough, NormalizeOptions, OutputFormat};
pub use payload::{ImagePayload, SourceImage};

/// Builds the gateway the booth talks to: offline when `dryrun`, otherwise Gemini.
pub fn build_gateway(config: &EngineConfig, dryrun: bool) -> Box<dyn GenerationGateway> {
    if dryrun {
        Box::new(DryrunGateway::new(config.media_dir.clone()))
    } else {
        Box::new(GeminiGateway::new(config))
    }
}

/// Process-scoped booth id stamped on every logged event.
pub fn new_booth_id() -> String {
    format!("booth-{}", uuid::Uuid::new_v4().simple())
}
