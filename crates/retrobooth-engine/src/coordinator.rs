use std::fmt;
use std::sync::Arc;

use retrobooth_contracts::events::{EventKind, EventStamp, EventWriter};
use retrobooth_contracts::styles::{StyleCatalog, StyleDescriptor};
use serde_json::{json, Value};

use crate::artifacts::{ArtifactSlot, TransientResource, VideoHandle};
use crate::error::{GenerationError, NormalizationError, SessionError};
use crate::gateway::{
    ContinueRequest, ConversationTurn, Credential, GenerationGateway, SessionStep, StartRequest,
    VideoRequest,
};
use crate::payload::{ImagePayload, SourceImage};

pub const GENERATION_FAILED_PREFIX: &str = "GENERATION FAILED: ";
pub const REMIX_FAILED_PREFIX: &str = "REMIX FAILED: ";
pub const VIDEO_FAILED_PREFIX: &str = "VIDEO FAILED: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Processing,
    Result,
    Error,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Result => "result",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a finished gateway call was applied to the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    /// The session moved on (reset, new capture, style switch) while the call was outstanding.
    Stale,
}

/// A start or switch call to hand to `GenerationGateway::start_session`.
#[derive(Debug, Clone)]
pub struct StartTicket {
    pub epoch: u64,
    pub request: StartRequest,
}

#[derive(Debug, Clone)]
pub struct RemixTicket {
    pub epoch: u64,
    pub request: ContinueRequest,
}

#[derive(Debug, Clone)]
pub struct VideoTicket {
    pub epoch: u64,
    pub request: VideoRequest,
}

/// The single booth session.
///
/// Every gateway-backed transition is split in two: `begin_*` validates the call and
/// returns a ticket stamped with the live epoch, `finish_*` applies the outcome only if
/// the epoch still matches. Capture, style switch and reset bump the epoch. Remix and
/// video do not, so both may be outstanding at once, each guarded by its own busy flag.
pub struct SessionCoordinator {
    catalog: Arc<StyleCatalog>,
    events: Option<EventWriter>,
    phase: SessionPhase,
    epoch: u64,
    style_id: String,
    source: Option<SourceImage>,
    artifact: Option<ImagePayload>,
    history: Vec<ConversationTurn>,
    video: ArtifactSlot<VideoHandle>,
    regenerating: bool,
    generating_video: bool,
    generation_error: Option<String>,
    remix_error: Option<String>,
    video_error: Option<String>,
    credential: Option<Credential>,
}

impl SessionCoordinator {
    pub fn new(catalog: Arc<StyleCatalog>) -> Self {
        let style_id = catalog.default_style().id.clone();
        Self {
            catalog,
            events: None,
            phase: SessionPhase::Idle,
            epoch: 0,
            style_id,
            source: None,
            artifact: None,
            history: Vec::new(),
            video: ArtifactSlot::new(),
            regenerating: false,
            generating_video: false,
            generation_error: None,
            remix_error: None,
            video_error: None,
            credential: None,
        }
    }

    pub fn with_events(mut self, events: EventWriter) -> Self {
        self.events = Some(events);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    pub fn style(&self) -> &StyleDescriptor {
        self.catalog.lookup(Some(&self.style_id))
    }

    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn artifact(&self) -> Option<&ImagePayload> {
        self.artifact.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn video(&self) -> Option<&VideoHandle> {
        self.video.current()
    }

    pub fn is_regenerating(&self) -> bool {
        self.regenerating
    }

    pub fn is_generating_video(&self) -> bool {
        self.generating_video
    }

    pub fn generation_error(&self) -> Option<&str> {
        self.generation_error.as_deref()
    }

    pub fn remix_error(&self) -> Option<&str> {
        self.remix_error.as_deref()
    }

    pub fn video_error(&self) -> Option<&str> {
        self.video_error.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Stores the video credential for the rest of the process. Survives `reset`.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Changes the preferred style while no result is on screen. Returns the resolved
    /// style. With a result, use `begin_switch_style` so history is restarted.
    pub fn select_style(&mut self, style_id: &str) -> Result<&StyleDescriptor, SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Error => {}
            SessionPhase::Processing => return Err(SessionError::Busy("generation")),
            SessionPhase::Result => {
                return Err(SessionError::WrongPhase {
                    operation: "select_style",
                    phase: self.phase.as_str(),
                })
            }
        }
        let (resolved, _) = self.resolve_style(Some(style_id));
        self.style_id = resolved;
        Ok(self.style())
    }

    pub fn record_normalization_fallback(&self, err: &NormalizationError) {
        let kind = match err {
            NormalizationError::Decode(_) => "decode",
            NormalizationError::Encode(_) => "encode",
        };
        self.emit(
            EventKind::NormalizationFallback,
            json!({ "kind": kind, "error": err.to_string() }),
        );
    }

    /// Starts a fresh session from `image`. From Result the previous session, including
    /// its video, is discarded. Uses the preferred style when `style_id` is `None`.
    /// Error is only left through `reset`.
    pub fn begin_capture(
        &mut self,
        image: SourceImage,
        style_id: Option<&str>,
    ) -> Result<StartTicket, SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Result => {}
            SessionPhase::Processing => return Err(SessionError::Busy("generation")),
            SessionPhase::Error => {
                return Err(SessionError::WrongPhase {
                    operation: "capture",
                    phase: self.phase.as_str(),
                })
            }
        }
        let requested = style_id.unwrap_or(self.style_id.as_str());
        let (style_id, directive) = self.resolve_style(Some(requested));

        self.bump_epoch();
        self.release_video("capture");
        self.clear_session();
        self.style_id = style_id.clone();
        self.source = Some(image.clone());
        self.emit(
            EventKind::SessionStarted,
            json!({
                "style_id": style_id,
                "mime_type": image.mime_type,
                "source_len": image.data.len(),
            }),
        );
        self.set_phase(SessionPhase::Processing);

        Ok(StartTicket {
            epoch: self.epoch,
            request: StartRequest {
                image,
                style_id,
                directive,
            },
        })
    }

    /// Restarts generation from the retained source image with another style.
    /// History is cleared here, before the gateway is called.
    pub fn begin_switch_style(&mut self, style_id: &str) -> Result<StartTicket, SessionError> {
        match self.phase {
            SessionPhase::Result => {}
            SessionPhase::Processing => return Err(SessionError::Busy("generation")),
            other => {
                return Err(SessionError::WrongPhase {
                    operation: "switch_style",
                    phase: other.as_str(),
                })
            }
        }
        let image = self.source.clone().ok_or(SessionError::NoSourceImage)?;
        let (resolved, directive) = self.resolve_style(Some(style_id));
        let previous = std::mem::replace(&mut self.style_id, resolved.clone());

        self.bump_epoch();
        self.release_video("style_switch");
        self.history.clear();
        self.artifact = None;
        self.generation_error = None;
        self.remix_error = None;
        self.video_error = None;
        self.emit(
            EventKind::StyleSwitched,
            json!({ "from": previous, "to": resolved }),
        );
        self.set_phase(SessionPhase::Processing);

        Ok(StartTicket {
            epoch: self.epoch,
            request: StartRequest {
                image,
                style_id: resolved,
                directive,
            },
        })
    }

    pub fn finish_start(
        &mut self,
        epoch: u64,
        outcome: Result<SessionStep, GenerationError>,
    ) -> Applied {
        if epoch != self.epoch || self.phase != SessionPhase::Processing {
            self.discard_stale("start", epoch);
            return Applied::Stale;
        }
        match outcome {
            Ok(step) => {
                self.artifact = Some(step.artifact);
                self.history = step.history;
                self.set_phase(SessionPhase::Result);
            }
            Err(err) => {
                self.artifact = None;
                self.history.clear();
                self.generation_error = Some(format!("{GENERATION_FAILED_PREFIX}{err}"));
                self.set_phase(SessionPhase::Error);
            }
        }
        Applied::Current
    }

    pub fn begin_remix(&mut self, prompt: &str) -> Result<RemixTicket, SessionError> {
        if self.phase != SessionPhase::Result {
            return Err(SessionError::WrongPhase {
                operation: "remix",
                phase: self.phase.as_str(),
            });
        }
        if self.regenerating {
            return Err(SessionError::Busy("remix"));
        }
        if !self.video.is_empty() {
            return Err(SessionError::RemixLockedByVideo);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if self.history.is_empty() {
            return Err(SessionError::NoHistory);
        }

        self.regenerating = true;
        self.remix_error = None;
        self.emit(
            EventKind::RemixStarted,
            json!({ "prompt": prompt, "history_len": self.history.len() }),
        );
        Ok(RemixTicket {
            epoch: self.epoch,
            request: ContinueRequest {
                history: self.history.clone(),
                prompt: prompt.to_string(),
            },
        })
    }

    /// Applies a remix result. A video that finished while the remix was outstanding no
    /// longer matches the new artifact and is released.
    pub fn finish_remix(
        &mut self,
        epoch: u64,
        outcome: Result<SessionStep, GenerationError>,
    ) -> Applied {
        if epoch != self.epoch || !self.regenerating || self.phase != SessionPhase::Result {
            self.discard_stale("remix", epoch);
            return Applied::Stale;
        }
        self.regenerating = false;
        match outcome {
            Ok(step) => {
                self.release_video("remix");
                self.artifact = Some(step.artifact);
                self.history = step.history;
                self.emit(
                    EventKind::RemixApplied,
                    json!({ "history_len": self.history.len() }),
                );
            }
            Err(err) => {
                let message = format!("{REMIX_FAILED_PREFIX}{err}");
                self.emit(EventKind::RemixFailed, json!({ "error": message }));
                self.remix_error = Some(message);
            }
        }
        Applied::Current
    }

    /// Starts a video from the current artifact. A credential passed here is kept for
    /// later calls; otherwise the stored one is used.
    pub fn begin_video(
        &mut self,
        prompt: &str,
        credential: Option<Credential>,
    ) -> Result<VideoTicket, SessionError> {
        if self.phase != SessionPhase::Result {
            return Err(SessionError::WrongPhase {
                operation: "request_video",
                phase: self.phase.as_str(),
            });
        }
        if self.generating_video {
            return Err(SessionError::Busy("video"));
        }
        let source = self.artifact.clone().ok_or(SessionError::WrongPhase {
            operation: "request_video",
            phase: self.phase.as_str(),
        })?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if let Some(credential) = credential {
            self.credential = Some(credential);
        }
        let credential = self
            .credential
            .clone()
            .ok_or(SessionError::MissingCredential)?;

        self.generating_video = true;
        self.video_error = None;
        self.emit(EventKind::VideoStarted, json!({ "prompt": prompt }));
        Ok(VideoTicket {
            epoch: self.epoch,
            request: VideoRequest {
                source,
                prompt: prompt.to_string(),
                credential,
            },
        })
    }

    /// Stores a finished video, releasing the previous one first. A stale video is
    /// released immediately so its media never outlives the call.
    pub fn finish_video(
        &mut self,
        epoch: u64,
        outcome: Result<VideoHandle, GenerationError>,
    ) -> Applied {
        if epoch != self.epoch || !self.generating_video || self.phase != SessionPhase::Result {
            if let Ok(handle) = outcome {
                self.release_detached(handle, "stale");
            }
            self.discard_stale("video", epoch);
            return Applied::Stale;
        }
        self.generating_video = false;
        match outcome {
            Ok(handle) => {
                let ready = json!({
                    "handle_id": handle.id(),
                    "path": handle.path().to_string_lossy(),
                    "mime_type": handle.mime_type(),
                    "byte_len": handle.byte_len(),
                });
                match self.video.replace(handle) {
                    Ok(Some(previous)) => self.emit(
                        EventKind::VideoReleased,
                        json!({ "handle_id": previous, "reason": "replaced" }),
                    ),
                    Ok(None) => {}
                    Err(err) => self.emit(
                        EventKind::VideoReleased,
                        json!({
                            "handle_id": err.handle_id,
                            "reason": "replaced",
                            "error": err.message,
                        }),
                    ),
                }
                self.emit(EventKind::VideoReady, ready);
            }
            Err(err) => {
                let message = format!("{VIDEO_FAILED_PREFIX}{err}");
                self.emit(EventKind::VideoFailed, json!({ "error": message }));
                self.video_error = Some(message);
            }
        }
        Applied::Current
    }

    /// Returns to Idle from any phase. Outstanding calls become stale. The preferred
    /// style and the credential are kept.
    pub fn reset(&mut self) {
        self.bump_epoch();
        self.release_video("reset");
        self.clear_session();
        self.emit(EventKind::SessionReset, json!({ "style_id": self.style_id }));
        self.set_phase(SessionPhase::Idle);
    }

    pub fn capture(
        &mut self,
        gateway: &dyn GenerationGateway,
        image: SourceImage,
        style_id: Option<&str>,
    ) -> Result<Applied, SessionError> {
        let ticket = self.begin_capture(image, style_id)?;
        let outcome = gateway.start_session(&ticket.request);
        Ok(self.finish_start(ticket.epoch, outcome))
    }

    pub fn switch_style(
        &mut self,
        gateway: &dyn GenerationGateway,
        style_id: &str,
    ) -> Result<Applied, SessionError> {
        let ticket = self.begin_switch_style(style_id)?;
        let outcome = gateway.start_session(&ticket.request);
        Ok(self.finish_start(ticket.epoch, outcome))
    }

    pub fn remix(
        &mut self,
        gateway: &dyn GenerationGateway,
        prompt: &str,
    ) -> Result<Applied, SessionError> {
        let ticket = self.begin_remix(prompt)?;
        let outcome = gateway.continue_session(&ticket.request);
        Ok(self.finish_remix(ticket.epoch, outcome))
    }

    pub fn request_video(
        &mut self,
        gateway: &dyn GenerationGateway,
        prompt: &str,
        credential: Option<Credential>,
    ) -> Result<Applied, SessionError> {
        let ticket = self.begin_video(prompt, credential)?;
        let outcome = gateway.generate_video(&ticket.request);
        Ok(self.finish_video(ticket.epoch, outcome))
    }

    fn resolve_style(&self, requested: Option<&str>) -> (String, String) {
        let style = self.catalog.lookup(requested);
        (style.id.clone(), style.directive.clone())
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
        self.regenerating = false;
        self.generating_video = false;
    }

    fn clear_session(&mut self) {
        self.source = None;
        self.artifact = None;
        self.history.clear();
        self.generation_error = None;
        self.remix_error = None;
        self.video_error = None;
    }

    fn set_phase(&mut self, next: SessionPhase) {
        if self.phase == next {
            return;
        }
        let previous = std::mem::replace(&mut self.phase, next);
        self.emit(
            EventKind::PhaseChanged,
            json!({ "from": previous.as_str(), "to": next.as_str() }),
        );
    }

    fn release_video(&mut self, reason: &str) {
        match self.video.release_all() {
            Ok(Some(handle_id)) => self.emit(
                EventKind::VideoReleased,
                json!({ "handle_id": handle_id, "reason": reason }),
            ),
            Ok(None) => {}
            Err(err) => self.emit(
                EventKind::VideoReleased,
                json!({
                    "handle_id": err.handle_id,
                    "reason": reason,
                    "error": err.message,
                }),
            ),
        }
    }

    fn release_detached(&self, handle: VideoHandle, reason: &str) {
        let handle_id = handle.id().to_string();
        let mut payload = json!({ "handle_id": handle_id, "reason": reason });
        if let Err(err) = handle.release() {
            payload["error"] = Value::String(err.message);
        }
        self.emit(EventKind::VideoReleased, payload);
    }

    fn discard_stale(&self, operation: &str, ticket_epoch: u64) {
        self.emit(
            EventKind::StaleResultDiscarded,
            json!({ "operation": operation, "ticket_epoch": ticket_epoch }),
        );
    }

    fn emit(&self, kind: EventKind, fields: Value) {
        let Some(events) = &self.events else {
            return;
        };
        let stamp = EventStamp {
            epoch: self.epoch,
            phase: self.phase.as_str(),
        };
        if let Err(err) = events.emit(kind, stamp, fields) {
            eprintln!("retrobooth: failed to write {kind} event: {err:#}");
        }
    }
}
