mod webcam;

pub use webcam::WebcamSource;

use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// No camera responded at the requested index.
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A single read attempt returned no usable frame. Recoverable; the
    /// caller skips this cycle or aborts this save.
    #[error("frame read failed: {0}")]
    FrameRead(String),
}

/// Trait for camera frame sources
pub trait FrameSource {
    /// Read one frame from the device
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError>;

    /// Relinquish the device. Idempotent; safe to call even if the
    /// stream never opened.
    fn release(&mut self);
}
