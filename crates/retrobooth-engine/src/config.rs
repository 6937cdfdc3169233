use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::normalize::{NormalizeOptions, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.0-fast-generate-001";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub image_model: String,
    pub video_model: String,
    pub request_timeout: Duration,
    pub video_poll_interval: Duration,
    pub video_timeout: Duration,
    pub media_dir: PathBuf,
    pub normalize: NormalizeOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(non_empty_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let seconds = |key: &str, default: f64, min: f64, max: f64| -> Duration {
            let value = lookup(key)
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(default);
            Duration::from_secs_f64(value.clamp(min, max))
        };

        let max_dimension = lookup("RETROBOOTH_MAX_DIMENSION")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_DIMENSION);
        let quality = lookup("RETROBOOTH_JPEG_QUALITY")
            .and_then(|raw| raw.parse::<f32>().ok())
            .filter(|value| value.is_finite() && *value > 0.0)
            .map(|value| value.min(1.0))
            .unwrap_or(DEFAULT_QUALITY);

        Self {
            api_base: lookup("GEMINI_API_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: lookup("GEMINI_API_KEY").or_else(|| lookup("GOOGLE_API_KEY")),
            image_model: lookup("RETROBOOTH_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            video_model: lookup("RETROBOOTH_VIDEO_MODEL")
                .unwrap_or_else(|| DEFAULT_VIDEO_MODEL.to_string()),
            request_timeout: seconds("RETROBOOTH_REQUEST_TIMEOUT", 90.0, 15.0, 300.0),
            video_poll_interval: seconds("RETROBOOTH_VIDEO_POLL_INTERVAL", 10.0, 1.0, 60.0),
            video_timeout: seconds("RETROBOOTH_VIDEO_TIMEOUT", 600.0, 30.0, 1800.0),
            media_dir: lookup("RETROBOOTH_MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("retrobooth-media")),
            normalize: NormalizeOptions {
                max_dimension,
                quality,
                ..NormalizeOptions::default()
            },
        }
    }
}

pub fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{EngineConfig, DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL};

    fn config_from(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.api_key, None);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert_eq!(config.normalize.max_dimension, 1920);
        assert!(config.media_dir.ends_with("retrobooth-media"));
    }

    #[test]
    fn api_key_prefers_gemini_then_google() {
        assert_eq!(
            config_from(&[("GEMINI_API_KEY", "g"), ("GOOGLE_API_KEY", "o")]).api_key,
            Some("g".to_string())
        );
        assert_eq!(
            config_from(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "o")]).api_key,
            Some("o".to_string())
        );
    }

    #[test]
    fn numeric_settings_are_clamped_or_ignored() {
        let config = config_from(&[
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("RETROBOOTH_REQUEST_TIMEOUT", "5"),
            ("RETROBOOTH_VIDEO_POLL_INTERVAL", "nope"),
            ("RETROBOOTH_VIDEO_TIMEOUT", "99999"),
            ("RETROBOOTH_MAX_DIMENSION", "0"),
            ("RETROBOOTH_JPEG_QUALITY", "1.7"),
        ]);
        assert_eq!(config.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.video_poll_interval, Duration::from_secs(10));
        assert_eq!(config.video_timeout, Duration::from_secs(1800));
        assert_eq!(config.normalize.max_dimension, 1920);
        assert_eq!(config.normalize.quality, 1.0);
    }
}
