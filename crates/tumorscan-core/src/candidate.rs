use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;

use crate::consts::{IMAGE_MIME_PREFIX, UNKNOWN_MIME};
use crate::error::{Result, ScanError};

/// A file offered by the picker, before validation.
#[derive(Clone, Debug)]
pub struct ImageCandidate {
    pub name: String,
    /// MIME type declared by the picker. Not verified against the content.
    pub mime: String,
    /// Byte size declared by the picker.
    pub size: u64,
    /// Empty until loaded when the candidate came from a path.
    pub bytes: Arc<[u8]>,
    /// File whose bytes are read only once the candidate passes its checks.
    source: Option<PathBuf>,
}

impl ImageCandidate {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            bytes,
            source: None,
        }
    }

    /// A candidate that declares a size without carrying its bytes.
    pub fn declared(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
            bytes: Arc::from(Vec::new()),
            source: None,
        }
    }

    /// Candidate for a file on disk. Type comes from the extension and size
    /// from metadata; the contents are not read until validation passes.
    pub fn from_path(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut candidate = Self::declared(name, mime_for_path(path), size);
        candidate.source = Some(path.to_path_buf());
        Ok(candidate)
    }

    /// True while the bytes still live only on disk.
    pub fn is_deferred(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_image_type(&self) -> bool {
        self.mime.starts_with(IMAGE_MIME_PREFIX)
    }

    /// Read deferred bytes now if the candidate would pass validation, so
    /// the later `validate` does no I/O. A failing candidate is returned
    /// unread.
    pub fn preload(mut self, max_bytes: u64) -> Result<Self> {
        if self.check(max_bytes).is_ok() {
            self.load(max_bytes)?;
        }
        Ok(self)
    }

    /// Pre-flight checks. Type is checked before size, and both before any
    /// deferred bytes are read.
    pub fn validate(mut self, max_bytes: u64) -> Result<ValidatedImage> {
        self.check(max_bytes)?;
        self.load(max_bytes)?;
        Ok(ValidatedImage {
            name: self.name,
            mime: self.mime,
            size: self.size,
            bytes: self.bytes,
        })
    }

    fn check(&self, max_bytes: u64) -> Result<()> {
        if !self.is_image_type() {
            return Err(ScanError::InvalidType {
                mime: self.mime.clone(),
            });
        }
        if self.size > max_bytes {
            return Err(ScanError::TooLarge {
                size: self.size,
                limit: max_bytes,
            });
        }
        Ok(())
    }

    /// Read at most `max_bytes + 1` bytes from the source file. A file that
    /// grew past the limit since its metadata was read is still rejected.
    fn load(&mut self, max_bytes: u64) -> Result<()> {
        let Some(path) = self.source.take() else {
            return Ok(());
        };
        let mut bytes = Vec::new();
        File::open(&path)?
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)?;
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(ScanError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
        self.size = size;
        self.bytes = bytes.into();
        Ok(())
    }
}

/// An image that passed pre-flight validation.
#[derive(Clone, Debug)]
pub struct ValidatedImage {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub bytes: Arc<[u8]>,
}

/// Declared MIME type for a path, from its extension.
pub fn mime_for_path(path: &Path) -> String {
    match ImageFormat::from_path(path) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => UNKNOWN_MIME.to_string(),
    }
}

