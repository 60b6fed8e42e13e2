//! Image decode tasks for dropped files.
//!
//! DESIGN
//! ======
//! A drop produces a `PendingPlacement` that carries the session token taken
//! at drop time. `decode` runs every file on tokio's blocking pool so the
//! interaction thread never waits on a decoder. The resulting `DecodedBatch`
//! goes back to `EditorShell::apply_placement`, which compares tokens and
//! drops the batch if the session moved on in the meantime.
//!
//! ERROR HANDLING
//! ==============
//! A file that is not a readable PNG, JPEG, or GIF is logged and skipped. One
//! bad file never aborts the rest of a multi-file drop.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader};
use tracing::{debug, warn};
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

/// Identifies the session state a placement was requested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    pub session: Uuid,
    pub generation: u64,
}

/// Where decoded images end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementTarget {
    /// Fit-scaled, centered, selectable foreground images.
    Foreground,
    /// A single cover-scaled, non-selectable background image.
    Background,
}

/// Raw bytes of a file dropped onto a panel.
#[derive(Debug, Clone)]
pub struct DroppedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DroppedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    /// Read a file from disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }
}

/// A successfully decoded image, ready to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub name: String,
    /// `data:` URI carrying the original file bytes.
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{name}: unsupported image format")]
    Unsupported { name: String },
    #[error("{name}: {source}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{name}: decode task failed: {reason}")]
    Task { name: String, reason: String },
}

/// Images accepted by the image and background panels.
const ACCEPTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

/// Decode one file synchronously. Runs on the blocking pool.
///
/// # Errors
///
/// Returns `Unsupported` for anything other than PNG, JPEG, or GIF, and
/// `Image` when the bytes do not decode.
pub fn decode_file(file: &DroppedFile) -> Result<DecodedImage, DecodeError> {
    let format = image::guess_format(&file.bytes).map_err(|_| DecodeError::Unsupported { name: file.name.clone() })?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(DecodeError::Unsupported { name: file.name.clone() });
    }

    let decoded = ImageReader::with_format(Cursor::new(&file.bytes), format)
        .decode()
        .map_err(|source| DecodeError::Image { name: file.name.clone(), source })?;

    Ok(DecodedImage {
        name: file.name.clone(),
        data_uri: format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(&file.bytes)),
        width: decoded.width(),
        height: decoded.height(),
    })
}

// =============================================================================
// TASKS
// =============================================================================

/// Files waiting to be decoded and placed.
#[derive(Debug)]
pub struct PendingPlacement {
    token: SessionToken,
    target: PlacementTarget,
    files: Vec<DroppedFile>,
}

/// Output of a finished decode: images to place plus per-file failures.
#[derive(Debug)]
pub struct DecodedBatch {
    pub token: SessionToken,
    pub target: PlacementTarget,
    pub images: Vec<DecodedImage>,
    pub failures: Vec<DecodeError>,
}

impl PendingPlacement {
    pub(crate) fn new(token: SessionToken, target: PlacementTarget, files: Vec<DroppedFile>) -> Self {
        Self { token, target, files }
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    #[must_use]
    pub fn target(&self) -> PlacementTarget {
        self.target
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Decode every file off the interaction thread, preserving drop order.
    pub async fn decode(self) -> DecodedBatch {
        let tasks = self.files.into_iter().map(|file| async move {
            let name = file.name.clone();
            match tokio::task::spawn_blocking(move || decode_file(&file)).await {
                Ok(result) => result,
                Err(e) => Err(DecodeError::Task { name, reason: e.to_string() }),
            }
        });
        let results = futures::future::join_all(tasks).await;

        let mut images = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(image) => {
                    debug!(name = %image.name, width = image.width, height = image.height, "decoded dropped image");
                    images.push(image);
                }
                Err(e) => {
                    warn!(error = %e, "skipping undecodable dropped file");
                    failures.push(e);
                }
            }
        }

        DecodedBatch { token: self.token, target: self.target, images, failures }
    }
}
