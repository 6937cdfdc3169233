use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;
use sha2::{Digest, Sha256};

use super::{
    ContinueRequest, ConversationTurn, GenerationGateway, SessionStep, StartRequest, VideoRequest,
};
use crate::artifacts::VideoHandle;
use crate::error::GenerationError;
use crate::payload::ImagePayload;

const DRYRUN_SIZE: u32 = 64;

/// Offline gateway producing solid-color images derived from the request.
///
/// Output is deterministic for a given request, which makes it suitable for tests and demos.
#[derive(Debug, Clone)]
pub struct DryrunGateway {
    media_dir: PathBuf,
}

impl DryrunGateway {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }

    fn render(&self, seed: &[&str]) -> Result<(ImagePayload, String), GenerationError> {
        let digest = digest_of(seed);
        let mut image = RgbImage::new(DRYRUN_SIZE, DRYRUN_SIZE);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([digest[0], digest[1], digest[2]]);
        }
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| GenerationError::media(format!("dryrun render failed: {err}")))?;
        Ok((
            ImagePayload::from_bytes(&bytes, "image/png"),
            hex::encode(&digest[..4]),
        ))
    }
}

impl GenerationGateway for DryrunGateway {
    fn name(&self) -> &str {
        "dryrun"
    }

    fn start_session(&self, request: &StartRequest) -> Result<SessionStep, GenerationError> {
        let source_digest = hex::encode(&digest_of(&[&request.image.data])[..8]);
        let (artifact, artifact_id) = self.render(&[&request.style_id, &source_digest])?;
        let turn = ConversationTurn::new(vec![
            json!({
                "role": "user",
                "parts": [
                    { "sourceDigest": source_digest, "mimeType": request.image.mime_type },
                    { "text": request.directive },
                ],
            }),
            json!({
                "role": "model",
                "parts": [{ "text": format!("dryrun artifact {artifact_id}") }],
            }),
        ]);
        Ok(SessionStep {
            artifact,
            history: vec![turn],
        })
    }

    fn continue_session(&self, request: &ContinueRequest) -> Result<SessionStep, GenerationError> {
        let depth = request.history.len().to_string();
        let (artifact, artifact_id) = self.render(&[&request.prompt, &depth])?;
        let mut history = request.history.clone();
        history.push(ConversationTurn::new(vec![
            json!({ "role": "user", "parts": [{ "text": request.prompt }] }),
            json!({
                "role": "model",
                "parts": [{ "text": format!("dryrun artifact {artifact_id}") }],
            }),
        ]));
        Ok(SessionStep { artifact, history })
    }

    fn generate_video(&self, request: &VideoRequest) -> Result<VideoHandle, GenerationError> {
        let digest = hex::encode(&digest_of(&[&request.source.data, &request.prompt])[..8]);
        let body = format!("RETROBOOTH-DRYRUN-VIDEO {digest}\n{}\n", request.prompt);
        VideoHandle::write_to_dir(&self.media_dir, body.as_bytes(), "video/mp4")
            .map_err(|err| GenerationError::media(format!("dryrun video write failed: {err}")))
    }
}

fn digest_of(parts: &[&str]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.finalize().to_vec()
}
