use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

use crate::capture::{CaptureError, FrameSource};
use crate::sequence;
use crate::transform;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The camera returned no frame; nothing was written.
    #[error(transparent)]
    FrameRead(#[from] CaptureError),

    /// The output directory could not be enumerated for numbering.
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The frame could not be written to disk. The user may retry.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Owns the frame source and the output directory; drives the preview
/// tick and the save action.
pub struct CaptureSession<S: FrameSource> {
    source: S,
    output_dir: PathBuf,
}

impl<S: FrameSource> CaptureSession<S> {
    /// Create a session, preparing the output directory.
    ///
    /// A missing directory is created; creation failure is logged but not
    /// fatal, since later saves will then surface a write error the user
    /// can act on.
    pub fn new(source: S, output_dir: PathBuf) -> Self {
        if !output_dir.exists() {
            match std::fs::create_dir_all(&output_dir) {
                Ok(()) => {
                    tracing::info!("Created output directory {}", output_dir.display())
                }
                Err(e) => tracing::error!(
                    "Failed to create output directory {}: {}",
                    output_dir.display(),
                    e
                ),
            }
        }

        // Initial count is diagnostic only; saves recompute it fresh.
        match sequence::count_existing(&output_dir) {
            Ok(count) => tracing::info!(
                "Output directory {} holds {} existing captures",
                output_dir.display(),
                count
            ),
            Err(e) => tracing::warn!("Could not scan {}: {}", output_dir.display(), e),
        }

        Self { source, output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// One preview cycle: read a frame and prepare it for display.
    ///
    /// Returns `None` on a read or transform failure so the caller keeps
    /// showing the previous frame; the next tick proceeds regardless.
    pub fn tick(&mut self) -> Option<RgbImage> {
        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("Skipping preview cycle: {}", e);
                return None;
            }
        };

        match transform::transform(&frame) {
            Ok(display) => Some(display),
            Err(e) => {
                tracing::warn!("Cannot prepare frame for display: {}", e);
                None
            }
        }
    }

    /// Save a freshly read frame under the next sequence number.
    ///
    /// The number is recomputed from the directory on every call so files
    /// added or removed externally are respected at save time. The saved
    /// image is the raw capture, not the cropped and mirrored preview.
    pub fn save_current_frame(&mut self) -> Result<PathBuf, SaveError> {
        let number = sequence::next_number(&self.output_dir).map_err(|e| SaveError::Scan {
            path: self.output_dir.clone(),
            source: e,
        })?;
        let path = self.output_dir.join(sequence::capture_filename(number));
        tracing::info!("Saving capture to {}", path.display());

        let frame = self.source.read_frame()?;

        frame.save(&path).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Release the camera. Safe to call more than once and after a
    /// partially failed initialization.
    pub fn shutdown(&mut self) {
        self.source.release();
    }
}
