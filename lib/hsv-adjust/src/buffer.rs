//! Pixel buffer traversal
//!
//! A buffer is a flat `[u8]` split into fixed-size pixel records. Only the
//! three color bytes named by the [`PixelLayout`] are rewritten; alpha and
//! any trailing partial record are left alone.

use crate::{
    AdjustError, AdjustResult,
    channel::{HsvChannel, adjust_channel},
    colour_model::{Precision, Rgb},
};
use derivative::Derivative;
use derive_setters::Setters;

/// Byte layout of one pixel record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    stride: usize,
    red: usize,
    green: usize,
    blue: usize,
}

impl PixelLayout {
    pub const RGBA: PixelLayout = PixelLayout {
        stride: 4,
        red: 0,
        green: 1,
        blue: 2,
    };

    pub const RGB: PixelLayout = PixelLayout {
        stride: 3,
        red: 0,
        green: 1,
        blue: 2,
    };

    pub const BGRA: PixelLayout = PixelLayout {
        stride: 4,
        red: 2,
        green: 1,
        blue: 0,
    };

    pub fn new(stride: usize, red: usize, green: usize, blue: usize) -> AdjustResult<Self> {
        if stride == 0 {
            return Err(AdjustError::InvalidLayout("stride must be non-zero".to_string()));
        }

        for (name, offset) in [("red", red), ("green", green), ("blue", blue)] {
            if offset >= stride {
                return Err(AdjustError::InvalidLayout(format!(
                    "{name} offset {offset} outside stride {stride}"
                )));
            }
        }

        if red == green || red == blue || green == blue {
            return Err(AdjustError::InvalidLayout(format!(
                "channel offsets must be distinct: red={red}, green={green}, blue={blue}"
            )));
        }

        Ok(Self {
            stride,
            red,
            green,
            blue,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixel_count(&self, len: usize) -> usize {
        len / self.stride
    }

    fn read(&self, pixel: &[u8]) -> Rgb {
        Rgb::new(pixel[self.red], pixel[self.green], pixel[self.blue])
    }

    fn write(&self, pixel: &mut [u8], rgb: Rgb) {
        pixel[self.red] = rgb.r;
        pixel[self.green] = rgb.g;
        pixel[self.blue] = rgb.b;
    }
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::RGBA
    }
}

/// Buffer processing configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BufferAdjuster {
    #[derivative(Default(value = "PixelLayout::RGBA"))]
    layout: PixelLayout,
    #[derivative(Default(value = "Precision::Full"))]
    precision: Precision,
}

impl BufferAdjuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescale `channel` of every pixel by `cur / last`, in place.
    ///
    /// `last` is not validated: zero or non-finite values produce a NaN or
    /// infinite rate that degrades every pixel in-band.
    pub fn process<'a>(
        &self,
        buffer: Option<&'a mut [u8]>,
        last: f64,
        cur: f64,
        channel: HsvChannel,
    ) -> Option<&'a mut [u8]> {
        let buffer = buffer?;
        let rate = cur / last;

        log::debug!(
            "{} adjust: {} pixels, rate={rate}",
            channel.name(),
            self.layout.pixel_count(buffer.len()),
        );

        for pixel in buffer.chunks_exact_mut(self.layout.stride) {
            let rgb = self.layout.read(pixel);
            let adjusted = adjust_channel(rgb, channel, rate, self.precision);
            self.layout.write(pixel, adjusted);
        }

        Some(buffer)
    }
}

/// Rescale `channel` of every RGBA pixel by `cur / last`, in place
pub fn process_buffer(
    buffer: Option<&mut [u8]>,
    last: f64,
    cur: f64,
    channel: HsvChannel,
) -> Option<&mut [u8]> {
    BufferAdjuster::default().process(buffer, last, cur, channel)
}
