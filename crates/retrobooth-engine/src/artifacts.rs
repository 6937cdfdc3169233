use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::ReleaseError;
use crate::payload::extension_for_mime;

/// A locally allocated resource that must be explicitly released.
///
/// `release` consumes the handle, so a handle can be released at most once.
pub trait TransientResource {
    fn handle_id(&self) -> &str;
    fn release(self) -> Result<(), ReleaseError>;
}

/// Holds zero or one transient handle and releases it before it is superseded.
pub struct ArtifactSlot<H: TransientResource> {
    held: Option<H>,
}

impl<H: TransientResource> Default for ArtifactSlot<H> {
    fn default() -> Self {
        Self { held: None }
    }
}

impl<H: TransientResource> ArtifactSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&H> {
        self.held.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Releases the held handle (if any), then stores `next`.
    ///
    /// `next` is stored even when releasing the old handle fails; the old handle is
    /// gone either way and the failure is reported to the caller.
    pub fn replace(&mut self, next: H) -> Result<Option<String>, ReleaseError> {
        let released = self.held.take().map(|previous| {
            let id = previous.handle_id().to_string();
            (id, previous.release())
        });
        self.held = Some(next);
        match released {
            None => Ok(None),
            Some((id, Ok(()))) => Ok(Some(id)),
            Some((_, Err(err))) => Err(err),
        }
    }

    /// Releases and clears the held handle. A second call is a no-op returning `Ok(None)`.
    pub fn release_all(&mut self) -> Result<Option<String>, ReleaseError> {
        let Some(previous) = self.held.take() else {
            return Ok(None);
        };
        let id = previous.handle_id().to_string();
        previous.release()?;
        Ok(Some(id))
    }
}

impl<H: TransientResource> Drop for ArtifactSlot<H> {
    fn drop(&mut self) {
        if let Err(err) = self.release_all() {
            eprintln!("retrobooth: {err}");
        }
    }
}

impl<H: TransientResource + fmt::Debug> fmt::Debug for ArtifactSlot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactSlot")
            .field("held", &self.held)
            .finish()
    }
}

/// Generated video media written to a local file. Releasing deletes the file.
pub struct VideoHandle {
    id: String,
    path: TempPath,
    mime_type: String,
    byte_len: u64,
}

impl VideoHandle {
    pub fn write_to_dir(dir: &Path, bytes: &[u8], mime_type: &str) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        let id = format!("video-{}", uuid::Uuid::new_v4().simple());
        let suffix = format!(".{}", extension_for_mime(mime_type));
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{id}-"))
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            id,
            path: file.into_temp_path(),
            mime_type: mime_type.to_string(),
            byte_len: bytes.len() as u64,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// Copies the media into `dir`, returning the written path. The handle stays live.
    pub fn save_to(&self, dir: &Path, stem: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let target = dir.join(format!("{stem}.{}", extension_for_mime(&self.mime_type)));
        fs::copy(&self.path, &target)?;
        Ok(target)
    }
}

impl TransientResource for VideoHandle {
    fn handle_id(&self) -> &str {
        &self.id
    }

    fn release(self) -> Result<(), ReleaseError> {
        let id = self.id;
        self.path
            .close()
            .map_err(|err| ReleaseError::new(id, err.to_string()))
    }
}

impl fmt::Debug for VideoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoHandle")
            .field("id", &self.id)
            .field("path", &self.path.to_path_buf())
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}
