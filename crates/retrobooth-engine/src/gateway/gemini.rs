use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client as HttpClient, Response as HttpResponse};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Map, Value};

use super::{
    truncate_text, ContinueRequest, ConversationTurn, GenerationGateway, SessionStep,
    StartRequest, VideoRequest,
};
use crate::artifacts::VideoHandle;
use crate::config::EngineConfig;
use crate::error::GenerationError;
use crate::payload::ImagePayload;

const ERROR_BODY_MAX_CHARS: usize = 512;

/// Gateway backed by the Gemini REST API.
///
/// Image sessions use `generateContent` with the accumulated contents replayed on every
/// call. Video uses a long-running `predictLongRunning` operation that is polled until done
/// and then downloaded into the media directory. Failures are returned once; nothing is retried.
pub struct GeminiGateway {
    api_base: String,
    api_key: Option<String>,
    image_model: String,
    video_model: String,
    request_timeout: Duration,
    video_poll_interval: Duration,
    video_timeout: Duration,
    media_dir: PathBuf,
    http: HttpClient,
}

impl GeminiGateway {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            image_model: config.image_model.clone(),
            video_model: config.video_model.clone(),
            request_timeout: config.request_timeout,
            video_poll_interval: config.video_poll_interval,
            video_timeout: config.video_timeout,
            media_dir: config.media_dir.clone(),
            http: HttpClient::new(),
        }
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.api_key.as_deref().ok_or_else(|| {
            GenerationError::MissingApiKey("GEMINI_API_KEY or GOOGLE_API_KEY not set".to_string())
        })
    }

    fn model_endpoint(&self, model: &str, method: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{trimmed}")
        };
        format!("{}/{}:{}", self.api_base, model_path, method)
    }

    fn generate_image(&self, contents: Vec<Value>) -> Result<(ImagePayload, Value), GenerationError> {
        let api_key = self.api_key()?;
        let endpoint = self.model_endpoint(&self.image_model, "generateContent");
        let payload = json!({
            "contents": contents,
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
            },
        });
        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key)])
            .timeout(self.request_timeout)
            .json(&payload)
            .send()
            .map_err(|err| transport_error("Gemini image request", err))?;
        let response_payload = response_json_or_error(response)?;
        extract_model_image(&response_payload)
    }

    fn start_video_operation(&self, request: &VideoRequest) -> Result<String, GenerationError> {
        let endpoint = self.model_endpoint(&self.video_model, "predictLongRunning");
        let payload = json!({
            "instances": [{
                "prompt": request.prompt,
                "image": {
                    "bytesBase64Encoded": request.source.data,
                    "mimeType": request.source.mime_type,
                },
            }],
        });
        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", request.credential.expose())])
            .timeout(self.request_timeout)
            .json(&payload)
            .send()
            .map_err(|err| transport_error("Video request", err))?;
        let operation = response_json_or_error(response)?;
        operation
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GenerationError::invalid_response("video operation has no name"))
    }

    fn poll_video_operation(
        &self,
        name: &str,
        request: &VideoRequest,
    ) -> Result<Value, GenerationError> {
        let endpoint = format!("{}/{}", self.api_base, name.trim_start_matches('/'));
        let deadline = Instant::now() + self.video_timeout;
        loop {
            let response = self
                .http
                .get(&endpoint)
                .query(&[("key", request.credential.expose())])
                .timeout(self.request_timeout)
                .send()
                .map_err(|err| transport_error("Video status request", err))?;
            let operation = response_json_or_error(response)?;
            if operation.get("done").and_then(Value::as_bool).unwrap_or(false) {
                if let Some(error) = operation.get("error") {
                    let message = error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("video generation failed");
                    return Err(GenerationError::invalid_response(message.to_string()));
                }
                return Ok(operation);
            }
            if Instant::now() >= deadline {
                return Err(GenerationError::Timeout(format!(
                    "video not ready after {}s",
                    self.video_timeout.as_secs()
                )));
            }
            thread::sleep(self.video_poll_interval);
        }
    }

    fn download_video(
        &self,
        uri: &str,
        request: &VideoRequest,
    ) -> Result<VideoHandle, GenerationError> {
        let response = self
            .http
            .get(uri)
            .query(&[("key", request.credential.expose())])
            .timeout(self.request_timeout)
            .send()
            .map_err(|err| transport_error("Video download", err))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
                body: truncate_text(&body, ERROR_BODY_MAX_CHARS),
            });
        }
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
            .filter(|value| value.starts_with("video/"))
            .unwrap_or_else(|| "video/mp4".to_string());
        let bytes = response
            .bytes()
            .map_err(|err| transport_error("Video download body", err))?;
        if bytes.is_empty() {
            return Err(GenerationError::media("video download was empty"));
        }
        VideoHandle::write_to_dir(&self.media_dir, &bytes, &mime_type)
            .map_err(|err| GenerationError::media(format!("failed to store video: {err}")))
    }
}

impl GenerationGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    fn start_session(&self, request: &StartRequest) -> Result<SessionStep, GenerationError> {
        let user = json!({
            "role": "user",
            "parts": [
                {
                    "inlineData": {
                        "mimeType": request.image.mime_type,
                        "data": request.image.data,
                    }
                },
                { "text": request.directive },
            ],
        });
        let (artifact, model_content) = self.generate_image(vec![user.clone()])?;
        Ok(SessionStep {
            artifact,
            history: vec![ConversationTurn::new(vec![user, model_content])],
        })
    }

    fn continue_session(&self, request: &ContinueRequest) -> Result<SessionStep, GenerationError> {
        let user = json!({
            "role": "user",
            "parts": [{ "text": request.prompt }],
        });
        let mut contents: Vec<Value> = request
            .history
            .iter()
            .flat_map(|turn| turn.contents().iter().cloned())
            .collect();
        contents.push(user.clone());

        let (artifact, model_content) = self.generate_image(contents)?;
        let mut history = request.history.clone();
        history.push(ConversationTurn::new(vec![user, model_content]));
        Ok(SessionStep { artifact, history })
    }

    fn generate_video(&self, request: &VideoRequest) -> Result<VideoHandle, GenerationError> {
        let operation_name = self.start_video_operation(request)?;
        let operation = self.poll_video_operation(&operation_name, request)?;
        let uri = video_uri(&operation).ok_or_else(|| {
            GenerationError::invalid_response("finished video operation has no video uri")
        })?;
        self.download_video(&uri, request)
    }
}

fn transport_error(what: &str, err: reqwest::Error) -> GenerationError {
    let timed_out = err.is_timeout();
    let message = format!("{:#}", anyhow::Error::new(err).context(format!("{what} failed")));
    if timed_out {
        GenerationError::Timeout(message)
    } else {
        GenerationError::Transport(message)
    }
}

fn response_json_or_error(response: HttpResponse) -> Result<Value, GenerationError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| transport_error("Response body read", err))?;
    if !status.is_success() {
        return Err(GenerationError::Rejected {
            status: status.as_u16(),
            body: truncate_text(&body, ERROR_BODY_MAX_CHARS),
        });
    }
    serde_json::from_str(&body)
        .map_err(|err| GenerationError::invalid_response(format!("response is not JSON: {err}")))
}

/// Picks the first inline image out of the first candidate. The candidate content is
/// returned as-is so it can be replayed as the model side of the turn.
fn extract_model_image(response_payload: &Value) -> Result<(ImagePayload, Value), GenerationError> {
    let candidate = response_payload
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|rows| rows.first());
    let Some(content) = candidate.and_then(|row| row.get("content")).cloned() else {
        let reason = response_payload
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(Value::as_str)
            .map(|reason| format!("prompt blocked ({reason})"))
            .unwrap_or_else(|| "response has no candidates".to_string());
        return Err(GenerationError::no_image(reason));
    };

    let parts = content
        .get("parts")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut texts = Vec::new();
    for part in &parts {
        let inline = part
            .get("inlineData")
            .or_else(|| part.get("inline_data"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new);
        let data = inline.get("data").and_then(Value::as_str).unwrap_or_default();
        if !data.is_empty() {
            let mime_type = inline
                .get("mimeType")
                .or_else(|| inline.get("mime_type"))
                .and_then(Value::as_str)
                .unwrap_or("image/png");
            return Ok((ImagePayload::new(data, mime_type), content));
        }
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            texts.push(text.trim().to_string());
        }
    }

    let finish_reason = candidate
        .and_then(|row| row.get("finishReason"))
        .and_then(Value::as_str);
    let detail = match (texts.is_empty(), finish_reason) {
        (false, _) => truncate_text(&texts.join(" "), ERROR_BODY_MAX_CHARS),
        (true, Some(reason)) => format!("finish reason {reason}"),
        (true, None) => "model returned no image parts".to_string(),
    };
    Err(GenerationError::no_image(detail))
}

fn video_uri(operation: &Value) -> Option<String> {
    let response = operation.get("response")?;
    let samples = response
        .get("generateVideoResponse")
        .and_then(|value| value.get("generatedSamples"))
        .or_else(|| response.get("generatedVideos"))
        .and_then(Value::as_array)?;
    samples
        .iter()
        .filter_map(|sample| sample.get("video"))
        .filter_map(|video| video.get("uri").and_then(Value::as_str))
        .map(str::to_string)
        .next()
}
