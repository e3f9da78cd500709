use crate::colour_model::{Hsv, Precision, Rgb, hsv_to_rgb, rgb_to_hsv_with};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// HSV component targeted by an adjustment
///
/// The tags follow the HSV component order (hue = 0), so a channel survives
/// being passed around as a plain `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum HsvChannel {
    Saturation = 1,
    Value = 2,
}

impl HsvChannel {
    pub fn name(&self) -> &'static str {
        match self {
            HsvChannel::Saturation => "Saturation",
            HsvChannel::Value => "Brightness",
        }
    }

    /// Multiply the selected component by `rate`. No clamping.
    pub fn scale(&self, hsv: Hsv, rate: f64) -> Hsv {
        match self {
            HsvChannel::Saturation => Hsv { s: hsv.s * rate, ..hsv },
            HsvChannel::Value => Hsv { v: hsv.v * rate, ..hsv },
        }
    }

    pub fn all_channels() -> &'static [HsvChannel] {
        &[HsvChannel::Saturation, HsvChannel::Value]
    }
}

/// Rescale one HSV component of a single pixel
pub fn adjust_channel(rgb: Rgb, channel: HsvChannel, rate: f64, precision: Precision) -> Rgb {
    let hsv = rgb_to_hsv_with(rgb, precision);
    hsv_to_rgb(channel.scale(hsv, rate))
}
