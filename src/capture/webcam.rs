use super::{CaptureError, FrameSource};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

pub struct WebcamSource {
    camera: Camera,
    released: bool,
}

impl WebcamSource {
    /// Open the camera at `device_index` and start streaming
    pub fn open(device_index: u32) -> Result<Self, CaptureError> {
        tracing::info!("Opening webcam {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested)
            .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?;

        camera
            .open_stream()
            .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?;

        tracing::info!("Webcam initialized successfully");

        Ok(Self {
            camera,
            released: false,
        })
    }
}

impl FrameSource for WebcamSource {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if self.released {
            return Err(CaptureError::FrameRead("camera already released".into()));
        }

        let frame = self
            .camera
            .frame()
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;

        frame
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::FrameRead(e.to_string()))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop camera stream: {}", e);
        }
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        self.release();
    }
}
