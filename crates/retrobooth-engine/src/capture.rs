use std::fs;
use std::path::Path;

use crate::error::{CaptureError, NormalizationError};
use crate::normalize::{normalize_or_passthrough, NormalizeOptions};
use crate::payload::{guess_image_mime, ImagePayload, SourceImage};

/// A source image read from disk, plus the normalization failure if the raw bytes were kept.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub image: SourceImage,
    pub fallback: Option<NormalizationError>,
}

/// Reads `path` and bounds it with the normalizer.
///
/// The MIME type comes from the extension, or from the file header when the extension is
/// unknown. Anything not `image/*` is refused before decoding. A normalization failure is
/// not an error here: the raw bytes are kept with the file's own MIME type.
pub fn load_source_image(
    path: &Path,
    options: &NormalizeOptions,
) -> Result<CapturedImage, CaptureError> {
    let bytes = fs::read(path).map_err(|source| CaptureError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let mime_type = sniff_mime(path, &bytes);
    if !mime_type.starts_with("image/") {
        return Err(CaptureError::NotAnImage {
            path: path.display().to_string(),
            mime_type,
        });
    }

    let raw = ImagePayload::from_bytes(&bytes, mime_type);
    let (image, fallback) = normalize_or_passthrough(raw, options);
    Ok(CapturedImage { image, fallback })
}

fn sniff_mime(path: &Path, bytes: &[u8]) -> String {
    let guessed = guess_image_mime(path);
    if guessed != "application/octet-stream" {
        return guessed.to_string();
    }
    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| guessed.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    use super::load_source_image;
    use crate::error::{CaptureError, NormalizationError};
    use crate::normalize::NormalizeOptions;

    fn png_bytes(width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    #[test]
    fn large_photo_is_bounded_and_reencoded() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("photo.png");
        fs::write(&path, png_bytes(400, 200)?)?;

        let options = NormalizeOptions {
            max_dimension: 100,
            ..NormalizeOptions::default()
        };
        let captured = load_source_image(&path, &options)?;

        assert!(captured.fallback.is_none());
        assert_eq!(captured.image.mime_type, "image/jpeg");
        let decoded = image::load_from_memory(&captured.image.decode_bytes()?)?;
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
        Ok(())
    }

    #[test]
    fn header_sniffing_covers_unknown_extension() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("upload.bin");
        fs::write(&path, png_bytes(8, 8)?)?;

        let captured = load_source_image(&path, &NormalizeOptions::default())?;
        assert!(captured.fallback.is_none());
        assert_eq!(captured.image.mime_type, "image/jpeg");
        Ok(())
    }

    #[test]
    fn undecodable_image_falls_back_to_raw_bytes() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("broken.png");
        fs::write(&path, b"not really a png")?;

        let captured = load_source_image(&path, &NormalizeOptions::default())?;
        assert!(matches!(captured.fallback, Some(NormalizationError::Decode(_))));
        assert_eq!(captured.image.mime_type, "image/png");
        assert_eq!(captured.image.decode_bytes()?, b"not really a png");
        Ok(())
    }

    #[test]
    fn non_image_and_missing_files_are_capture_errors() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let notes = temp.path().join("notes.txt");
        fs::write(&notes, b"hello")?;

        let err = load_source_image(&notes, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, CaptureError::NotAnImage { .. }));

        let err = load_source_image(&temp.path().join("gone.jpg"), &NormalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, CaptureError::Unreadable { .. }));
        Ok(())
    }
}
