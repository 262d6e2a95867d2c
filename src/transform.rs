use image::{imageops, RgbImage};
use thiserror::Error;

/// Pixels cropped from each of the left and right edges before display.
pub const CROP_MARGIN: u32 = 200;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("frame width {width} too narrow to crop {margin}px from each side")]
    FrameTooNarrow { width: u32, margin: u32 },
}

/// Convert a captured frame into the preview image.
///
/// Steps:
/// 1. Crop `CROP_MARGIN` pixels from the left and right edges (the camera
///    is wide; top and bottom are untouched)
/// 2. Mirror horizontally, so the preview reads naturally to a user
///    facing the camera
///
/// Pure and deterministic; saved captures never pass through here.
pub fn transform(frame: &RgbImage) -> Result<RgbImage, TransformError> {
    let (width, height) = frame.dimensions();
    if width <= 2 * CROP_MARGIN {
        return Err(TransformError::FrameTooNarrow {
            width,
            margin: CROP_MARGIN,
        });
    }

    let cropped =
        imageops::crop_imm(frame, CROP_MARGIN, 0, width - 2 * CROP_MARGIN, height).to_image();
    Ok(imageops::flip_horizontal(&cropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _y| Rgb([(x % 256) as u8, 0, 0]))
    }

    #[test]
    fn crops_fixed_margin_from_both_sides() {
        let display = transform(&gradient(1920, 1080)).unwrap();
        assert_eq!(display.dimensions(), (1920 - 2 * CROP_MARGIN, 1080));
    }

    #[test]
    fn mirrors_after_cropping() {
        // Width 500 keeps original columns 200..300; after mirroring,
        // display column 0 holds original column 299 and column 99
        // holds original column 200.
        let display = transform(&gradient(500, 4)).unwrap();
        assert_eq!(display.dimensions(), (100, 4));
        assert_eq!(display.get_pixel(0, 0)[0], 43); // 299 % 256
        assert_eq!(display.get_pixel(99, 0)[0], 200);
    }

    #[test]
    fn rejects_frames_narrower_than_twice_the_margin() {
        assert!(matches!(
            transform(&gradient(400, 100)),
            Err(TransformError::FrameTooNarrow { width: 400, .. })
        ));
        assert!(matches!(
            transform(&gradient(64, 64)),
            Err(TransformError::FrameTooNarrow { .. })
        ));
    }

    #[test]
    fn transform_is_deterministic() {
        let frame = gradient(640, 48);
        assert_eq!(transform(&frame).unwrap(), transform(&frame).unwrap());
    }
}
