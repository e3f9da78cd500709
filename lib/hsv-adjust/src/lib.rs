//! In-place HSV saturation and brightness adjustment for raw pixel buffers.
//!
//! The two entry points [`adjust_saturation`] and [`adjust_brightness`]
//! rescale one HSV component of every pixel by `cur / last`.

pub mod adjust;
pub mod buffer;
pub mod channel;
pub mod colour_model;
pub mod worker;

use image::RgbaImage;

pub use adjust::{AdjustmentLevels, HsvAdjustConfig, adjust_brightness, adjust_saturation};
pub use buffer::{BufferAdjuster, PixelLayout, process_buffer};
pub use channel::{HsvChannel, adjust_channel};
pub use colour_model::{HueSector, Hsv, Precision, Rgb, hsv_to_rgb, rgb_to_hsv, rgb_to_hsv_with};
pub use worker::{AdjustJob, AdjustWorker, adjust_in_parallel};

pub type AdjustResult<T> = Result<T, AdjustError>;

#[derive(thiserror::Error, Debug)]
pub enum AdjustError {
    #[error("Invalid pixel layout: {0}")]
    InvalidLayout(String),
    #[error("Invalid adjustment levels: last={last}, cur={cur}")]
    InvalidLevels { last: f64, cur: f64 },
    #[error("Worker error: {0}")]
    Worker(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub trait Effect {
    fn apply(&self, image: &mut RgbaImage) -> AdjustResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save_into_missing_dir() -> AdjustResult<()> {
        RgbaImage::new(1, 1).save("missing-hsv-adjust-dir/out.png")?;
        Ok(())
    }

    #[test]
    fn test_image_error_converts() {
        let err = save_into_missing_dir().unwrap_err();
        assert!(matches!(err, AdjustError::Image(_)));
        assert!(err.to_string().starts_with("Image error"));
    }
}
