//! Saturation and brightness entry points

use crate::{
    AdjustError, AdjustResult, Effect,
    buffer::{BufferAdjuster, process_buffer},
    channel::HsvChannel,
    colour_model::Precision,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

/// Rescale the saturation of every RGBA pixel by `cur / last`
///
/// # Example
/// ```
/// let mut pixels = vec![200u8, 100, 50, 255];
/// hsv_adjust::adjust_saturation(Some(&mut pixels[..]), 50.0, 100.0);
/// assert_eq!(pixels[3], 255);
/// ```
pub fn adjust_saturation(buffer: Option<&mut [u8]>, last: f64, cur: f64) -> Option<&mut [u8]> {
    process_buffer(buffer, last, cur, HsvChannel::Saturation)
}

/// Rescale the value (brightness) of every RGBA pixel by `cur / last`
pub fn adjust_brightness(buffer: Option<&mut [u8]>, last: f64, cur: f64) -> Option<&mut [u8]> {
    process_buffer(buffer, last, cur, HsvChannel::Value)
}

/// Previous and current slider levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentLevels {
    pub last: f64,
    pub cur: f64,
}

impl AdjustmentLevels {
    pub fn new(last: f64, cur: f64) -> Self {
        Self { last, cur }
    }

    /// Reject a `last` level that cannot divide.
    pub fn checked(last: f64, cur: f64) -> AdjustResult<Self> {
        if last == 0.0 || !last.is_finite() || !cur.is_finite() {
            return Err(AdjustError::InvalidLevels { last, cur });
        }

        Ok(Self::new(last, cur))
    }

    pub fn rate(&self) -> f64 {
        self.cur / self.last
    }
}

/// HSV adjustment configuration for whole images
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct HsvAdjustConfig {
    #[derivative(Default(value = "HsvChannel::Saturation"))]
    channel: HsvChannel,
    #[derivative(Default(value = "1.0"))]
    last: f64,
    #[derivative(Default(value = "1.0"))]
    cur: f64,
    #[derivative(Default(value = "Precision::Full"))]
    precision: Precision,
}

impl HsvAdjustConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saturation(last: f64, cur: f64) -> Self {
        Self::default().with_last(last).with_cur(cur)
    }

    pub fn brightness(last: f64, cur: f64) -> Self {
        Self::saturation(last, cur).with_channel(HsvChannel::Value)
    }

    pub fn levels(&self) -> AdjustResult<AdjustmentLevels> {
        AdjustmentLevels::checked(self.last, self.cur)
    }
}

impl Effect for HsvAdjustConfig {
    fn apply(&self, image: &mut RgbaImage) -> AdjustResult<()> {
        let levels = self.levels()?;

        log::info!(
            "{} adjust {}x{}: {} -> {}",
            self.channel.name(),
            image.width(),
            image.height(),
            levels.last,
            levels.cur
        );

        BufferAdjuster::new().with_precision(self.precision).process(
            Some(&mut **image),
            levels.last,
            levels.cur,
            self.channel,
        );

        Ok(())
    }
}
