use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};

use crate::error::NormalizationError;
use crate::payload::ImagePayload;

pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
pub const DEFAULT_QUALITY: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn from_mime(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Some(Self::Jpeg),
            "image/png" | "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    pub max_dimension: u32,
    /// JPEG quality in (0, 1]. Ignored for PNG.
    pub quality: f32,
    pub output: OutputFormat,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
            output: OutputFormat::Jpeg,
        }
    }
}

impl NormalizeOptions {
    fn jpeg_quality(&self) -> u8 {
        let quality = if self.quality.is_finite() {
            self.quality
        } else {
            DEFAULT_QUALITY
        };
        ((quality.clamp(0.01, 1.0) * 100.0).round() as u8).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub payload: ImagePayload,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
}

impl NormalizedImage {
    pub fn was_resized(&self) -> bool {
        (self.width, self.height) != (self.source_width, self.source_height)
    }
}

/// Scales `(width, height)` so the longer side equals `max_dimension` when it exceeds it.
/// The shorter side is rounded to the nearest pixel and never drops below 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let bound = max_dimension.max(1);
    if width <= bound && height <= bound {
        return (width, height);
    }
    let scaled = |short: u32, long: u32| -> u32 {
        ((short as f64 / long as f64) * bound as f64).round().max(1.0) as u32
    };
    if width > height {
        (bound, scaled(height, width))
    } else {
        (scaled(width, height), bound)
    }
}

pub fn normalize_bytes(
    bytes: &[u8],
    options: &NormalizeOptions,
) -> Result<NormalizedImage, NormalizationError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|err| NormalizationError::decode(format!("failed to load image: {err}")))?;
    let (source_width, source_height) = decoded.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(NormalizationError::decode("image has no pixels"));
    }

    let (width, height) = target_dimensions(source_width, source_height, options.max_dimension);
    let resized = if (width, height) == (source_width, source_height) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Lanczos3)
    };

    let encoded = match options.output {
        OutputFormat::Jpeg => encode_jpeg(&resized, options.jpeg_quality())?,
        OutputFormat::Png => encode_png(&resized)?,
    };

    Ok(NormalizedImage {
        payload: ImagePayload::from_bytes(&encoded, options.output.mime_type()),
        width,
        height,
        source_width,
        source_height,
    })
}

pub fn normalize_payload(
    payload: &ImagePayload,
    options: &NormalizeOptions,
) -> Result<NormalizedImage, NormalizationError> {
    let bytes = payload
        .decode_bytes()
        .map_err(|err| NormalizationError::decode(format!("invalid base64 payload: {err}")))?;
    normalize_bytes(&bytes, options)
}

/// Normalizes `payload`, handing back the untouched input alongside the error on failure.
pub fn normalize_or_passthrough(
    payload: ImagePayload,
    options: &NormalizeOptions,
) -> (ImagePayload, Option<NormalizationError>) {
    match normalize_payload(&payload, options) {
        Ok(normalized) => (normalized.payload, None),
        Err(err) => (payload, Some(err)),
    }
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, NormalizationError> {
    let flattened = flatten_onto_white(image);
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder
        .encode_image(&flattened)
        .map_err(|err| NormalizationError::encode(format!("jpeg encode failed: {err}")))?;
    Ok(bytes)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, NormalizationError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.to_rgba8())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| NormalizationError::encode(format!("png encode failed: {err}")))?;
    Ok(bytes)
}

// JPEG has no alpha channel; transparent regions become white.
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = u16::from(pixel[3]);
        let blend = |channel: u8| -> u8 {
            (((u16::from(channel) * alpha) + (255 * (255 - alpha))) / 255) as u8
        };
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    flattened
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};

    use super::{
        normalize_bytes, normalize_or_passthrough, normalize_payload, target_dimensions,
        NormalizeOptions, OutputFormat,
    };
    use crate::error::NormalizationError;
    use crate::payload::ImagePayload;

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, pixel);
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn bounded(max_dimension: u32) -> NormalizeOptions {
        NormalizeOptions {
            max_dimension,
            ..NormalizeOptions::default()
        }
    }

    #[test]
    fn defaults_match_booth_capture_settings() {
        let options = NormalizeOptions::default();
        assert_eq!(options.max_dimension, 1920);
        assert_eq!(options.quality, 0.85);
        assert_eq!(options.output, OutputFormat::Jpeg);
        assert_eq!(options.jpeg_quality(), 85);
    }

    #[test]
    fn oversized_images_scale_longest_side_to_bound() {
        assert_eq!(target_dimensions(4000, 3000, 1920), (1920, 1440));
        assert_eq!(target_dimensions(3000, 4000, 1920), (1440, 1920));
        assert_eq!(target_dimensions(2500, 2500, 1920), (1920, 1920));
        assert_eq!(target_dimensions(1921, 1080, 1920), (1920, 1079));
    }

    #[test]
    fn bounded_images_keep_their_dimensions() {
        assert_eq!(target_dimensions(1920, 1080, 1920), (1920, 1080));
        assert_eq!(target_dimensions(640, 480, 1920), (640, 480));
        assert_eq!(target_dimensions(1, 1, 1920), (1, 1));
    }

    #[test]
    fn extreme_aspect_ratios_never_collapse_to_zero() {
        assert_eq!(target_dimensions(10_000, 3, 1920), (1920, 1));
        assert_eq!(target_dimensions(3, 10_000, 1920), (1, 1920));
    }

    #[test]
    fn scaled_dimensions_stay_within_one_pixel_of_source_ratio() {
        for (width, height) in [
            (4032, 3024),
            (3024, 4032),
            (5000, 1234),
            (1999, 1998),
            (7777, 333),
            (2048, 4096),
        ] {
            for bound in [64u32, 512, 1920] {
                let (w, h) = target_dimensions(width, height, bound);
                assert!(w.max(h) <= bound, "{width}x{height} -> {w}x{h} over {bound}");
                let (long, short, new_long, new_short) = if width > height {
                    (width, height, w, h)
                } else {
                    (height, width, h, w)
                };
                let exact_short = short as f64 * new_long as f64 / long as f64;
                assert!(
                    (new_short as f64 - exact_short).abs() <= 0.5 + 1e-9
                        || (new_short == 1 && exact_short < 1.0),
                    "{width}x{height} -> {w}x{h}"
                );
            }
        }
    }

    #[test]
    fn normalize_resizes_and_reencodes_as_jpeg() {
        let source = png_bytes(64, 32, Rgba([10, 200, 30, 255]));
        let normalized = normalize_bytes(&source, &bounded(16)).unwrap();
        assert_eq!(normalized.payload.mime_type, "image/jpeg");
        assert_eq!((normalized.width, normalized.height), (16, 8));
        assert_eq!((normalized.source_width, normalized.source_height), (64, 32));
        assert!(normalized.was_resized());

        let decoded = image::load_from_memory(&normalized.payload.decode_bytes().unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn normalizing_twice_is_stable_on_dimensions() {
        let source = png_bytes(300, 100, Rgba([90, 90, 90, 255]));
        let first = normalize_bytes(&source, &bounded(120)).unwrap();
        let second = normalize_payload(&first.payload, &bounded(120)).unwrap();
        assert_eq!((first.width, first.height), (120, 40));
        assert_eq!((second.width, second.height), (120, 40));
        assert!(!second.was_resized());
    }

    #[test]
    fn transparency_is_flattened_onto_white_for_jpeg() {
        let source = png_bytes(8, 8, Rgba([0, 0, 0, 0]));
        let normalized = normalize_bytes(&source, &NormalizeOptions::default()).unwrap();
        let decoded = image::load_from_memory(&normalized.payload.decode_bytes().unwrap())
            .unwrap()
            .to_rgb8();
        let pixel = decoded.get_pixel(4, 4);
        assert!(pixel.0.iter().all(|channel| *channel > 245), "{pixel:?}");
    }

    #[test]
    fn png_output_keeps_alpha() {
        let source = png_bytes(40, 20, Rgba([255, 0, 0, 128]));
        let options = NormalizeOptions {
            max_dimension: 10,
            output: OutputFormat::Png,
            ..NormalizeOptions::default()
        };
        let normalized = normalize_bytes(&source, &options).unwrap();
        assert_eq!(normalized.payload.mime_type, "image/png");
        let decoded = image::load_from_memory(&normalized.payload.decode_bytes().unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (10, 5));
        assert!(decoded.pixels().any(|pixel| pixel[3] < 255));
    }

    #[test]
    fn garbage_bytes_are_a_decode_failure() {
        let err = normalize_bytes(b"definitely not an image", &NormalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, NormalizationError::Decode(_)), "{err}");
    }

    #[test]
    fn invalid_base64_is_a_decode_failure() {
        let payload = ImagePayload::new("!!!not-base64!!!", "image/png");
        let err = normalize_payload(&payload, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizationError::Decode(_)), "{err}");
    }

    #[test]
    fn oversized_jpeg_target_is_an_encode_failure() {
        let source = png_bytes(70_000, 1, Rgba([1, 2, 3, 255]));
        let err = normalize_bytes(&source, &bounded(100_000)).unwrap_err();
        assert!(matches!(err, NormalizationError::Encode(_)), "{err}");
    }

    #[test]
    fn passthrough_returns_original_payload_on_failure() {
        let raw = ImagePayload::new("bm90IGFuIGltYWdl", "image/heic");
        let (kept, err) = normalize_or_passthrough(raw.clone(), &NormalizeOptions::default());
        assert_eq!(kept, raw);
        assert!(matches!(err, Some(NormalizationError::Decode(_))));

        let good = ImagePayload::from_bytes(&png_bytes(4, 4, Rgba([0, 0, 255, 255])), "image/png");
        let (normalized, err) = normalize_or_passthrough(good, &NormalizeOptions::default());
        assert!(err.is_none());
        assert_eq!(normalized.mime_type, "image/jpeg");
    }
}
