//! RGB <-> HSV conversion for a single pixel
//!
//! Hue is measured in degrees `[0, 360)`, saturation and value in percent
//! `[0, 100]`.

const COLOR_LEVEL_MAX: f64 = 255.0;
const PERCENT: f64 = 100.0;
const ANGLE_60: f64 = 60.0;
const ANGLE_120: f64 = 120.0;
const ANGLE_240: f64 = 240.0;
const ANGLE_360: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> Self {
        (rgb.r, rgb.g, rgb.b)
    }
}

/// HSV color representation
///
/// - `h`: Hue in degrees `[0, 360)`
/// - `s`: Saturation in percent `[0, 100]`
/// - `v`: Value in percent `[0, 100]`
///
/// `s` and `v` may leave their nominal range after scaling; [`hsv_to_rgb`]
/// accepts that and clamps its output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Numeric precision of the forward conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Full floating point. Round-trips every RGB triple within one level.
    #[default]
    Full,
    /// Reproduces the legacy pixel math bit for bit: normalised channels
    /// and the saturation ratio are rounded to two decimals, hue is floored
    /// to whole degrees.
    Legacy,
}

impl Precision {
    fn round_hundredths(self, x: f64) -> f64 {
        match self {
            Precision::Full => x,
            Precision::Legacy => to_fixed_hundredths(x),
        }
    }

    fn whole_degrees(self, hue: f64) -> f64 {
        match self {
            Precision::Full => hue,
            Precision::Legacy => hue.floor(),
        }
    }
}

/// Round to two decimals from the exact binary value of `x`, ties upward.
///
/// `(x * 100.0).round()` rounds twice: the product can land exactly on
/// `.5` when `x` sits just below it (`0.97499..` becomes `97.5`).
fn to_fixed_hundredths(x: f64) -> f64 {
    if !x.is_finite() || x < 0.0 {
        return (x * 100.0).round() / 100.0;
    }
    // far below the 0.005 threshold
    if x < 0.001 {
        return 0.0;
    }

    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = (bits & ((1 << 52) - 1)) | (1 << 52);
    if exponent >= 0 {
        return x;
    }

    // x * 200 == scaled * 2^exponent, with -exponent <= 62 here
    let scaled = mantissa as u128 * 200;
    let shift = (-exponent) as u32;
    let reaches = |odd: u128| scaled >= odd << shift;

    let mut n = (x * 100.0).round() as u128;
    while n > 0 && !reaches(2 * n - 1) {
        n -= 1;
    }
    while reaches(2 * n + 1) {
        n += 1;
    }

    n as f64 / 100.0
}

/// One of the six 60° sectors of the HSV hexagon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueSector {
    RedYellow,
    YellowGreen,
    GreenCyan,
    CyanBlue,
    BlueMagenta,
    MagentaRed,
}

impl HueSector {
    /// Sector containing `hue`, or `None` when `hue` is outside `[0, 360)`.
    pub fn from_hue(hue: f64) -> Option<Self> {
        if !(0.0..ANGLE_360).contains(&hue) {
            return None;
        }

        match (hue / ANGLE_60).floor() as u8 {
            0 => Some(HueSector::RedYellow),
            1 => Some(HueSector::YellowGreen),
            2 => Some(HueSector::GreenCyan),
            3 => Some(HueSector::CyanBlue),
            4 => Some(HueSector::BlueMagenta),
            5 => Some(HueSector::MagentaRed),
            _ => None,
        }
    }

    /// (R', G', B') before the `m` offset is added.
    pub fn components(self, c: f64, x: f64) -> (f64, f64, f64) {
        match self {
            HueSector::RedYellow => (c, x, 0.0),
            HueSector::YellowGreen => (x, c, 0.0),
            HueSector::GreenCyan => (0.0, c, x),
            HueSector::CyanBlue => (0.0, x, c),
            HueSector::BlueMagenta => (x, 0.0, c),
            HueSector::MagentaRed => (c, 0.0, x),
        }
    }
}

/// Convert RGB to HSV at full precision
///
/// The hue keeps its fractional degrees; see [`rgb_to_hsv_with`].
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    rgb_to_hsv_with(rgb, Precision::Full)
}

/// Convert RGB to HSV
///
/// [`Precision::Full`] keeps a fractional hue so the conversion round-trips
/// within one level; [`Precision::Legacy`] floors it to whole degrees.
///
/// When several channels tie for the maximum the red branch wins, then
/// green, then blue.
pub fn rgb_to_hsv_with(rgb: Rgb, precision: Precision) -> Hsv {
    let r = precision.round_hundredths(rgb.r as f64 / COLOR_LEVEL_MAX);
    let g = precision.round_hundredths(rgb.g as f64 / COLOR_LEVEL_MAX);
    let b = precision.round_hundredths(rgb.b as f64 / COLOR_LEVEL_MAX);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max * PERCENT;
    let s = if max == 0.0 {
        0.0
    } else {
        precision.round_hundredths(1.0 - min / max) * PERCENT
    };

    let h = if delta == 0.0 {
        0.0
    } else if max == r && g >= b {
        ANGLE_60 * ((g - b) / delta)
    } else if max == r {
        ANGLE_60 * ((g - b) / delta) + ANGLE_360
    } else if max == g {
        ANGLE_60 * ((b - r) / delta) + ANGLE_120
    } else {
        ANGLE_60 * ((r - g) / delta) + ANGLE_240
    };

    Hsv::new(precision.whole_degrees(h), s, v)
}

/// Convert HSV back to RGB
///
/// ```text
/// C = V * S
/// X = C * (1 - |(H / 60) mod 2 - 1|)
/// m = V - C
/// (R, G, B) = ((R' + m) * 255, (G' + m) * 255, (B' + m) * 255)
/// ```
///
/// Finite hues are wrapped into `[0, 360)`. A non-finite hue has no sector
/// and yields black.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;

    if s == 0.0 {
        let level = to_channel(v * COLOR_LEVEL_MAX / PERCENT);
        return Rgb::new(level, level, level);
    }

    let mut h = h.rem_euclid(ANGLE_360);
    if h >= ANGLE_360 {
        h = 0.0;
    }

    let Some(sector) = HueSector::from_hue(h) else {
        return Rgb::default();
    };

    let c = v * s / (PERCENT * PERCENT);
    let x = c * (1.0 - ((h / ANGLE_60) % 2.0 - 1.0).abs());
    let m = (v - c * PERCENT) / PERCENT;
    let (r, g, b) = sector.components(c, x);

    Rgb::new(
        to_channel((r + m) * COLOR_LEVEL_MAX),
        to_channel((g + m) * COLOR_LEVEL_MAX),
        to_channel((b + m) * COLOR_LEVEL_MAX),
    )
}

// NaN saturates to 0 in the cast.
fn to_channel(level: f64) -> u8 {
    level.round().clamp(0.0, COLOR_LEVEL_MAX) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_primary_colors() {
        let red = rgb_to_hsv(Rgb::new(255, 0, 0));
        assert_eq!(red, Hsv::new(0.0, 100.0, 100.0));

        let green = rgb_to_hsv(Rgb::new(0, 255, 0));
        assert_eq!(green, Hsv::new(120.0, 100.0, 100.0));

        let blue = rgb_to_hsv(Rgb::new(0, 0, 255));
        assert_eq!(blue, Hsv::new(240.0, 100.0, 100.0));

        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 100.0, 100.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120.0, 100.0, 100.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(240.0, 100.0, 100.0)), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_black_and_gray() {
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 0)), Hsv::new(0.0, 0.0, 0.0));

        let gray = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn test_tied_maximum() {
        // yellow: red and green tie
        assert_close(rgb_to_hsv(Rgb::new(255, 255, 0)).h, 60.0);
        // magenta: red and blue tie
        assert_close(rgb_to_hsv(Rgb::new(255, 0, 255)).h, 300.0);
        // cyan: green and blue tie
        assert_close(rgb_to_hsv(Rgb::new(0, 255, 255)).h, 180.0);
    }

    #[test]
    fn test_hue_below_zero_branch() {
        // max = r, g < b lands in the 300..360 sector
        let hsv = rgb_to_hsv(Rgb::new(255, 0, 128));
        assert!(hsv.h > 300.0 && hsv.h < 360.0);
    }

    #[test]
    fn test_legacy_precision() {
        let hsv = rgb_to_hsv_with(Rgb::new(200, 100, 50), Precision::Legacy);
        assert_eq!(hsv.h, 19.0);
        assert_close(hsv.s, 74.0);
        assert_close(hsv.v, 78.0);

        let hsv = rgb_to_hsv(Rgb::new(200, 100, 50));
        assert_close(hsv.h, 20.0);
        assert_close(hsv.s, 75.0);
        assert_close(hsv.v, 200.0 / 2.55);
    }

    #[test]
    fn test_fixed_hundredths_rounds_once() {
        assert_eq!(to_fixed_hundredths(0.875), 0.88);
        assert_eq!(to_fixed_hundredths(200.0 / 255.0), 0.78);
        // 0.97499.. in binary, so it must not round up to 0.98
        assert_eq!(to_fixed_hundredths(1.0 - 0.02 / 0.8), 0.97);
        assert_eq!(to_fixed_hundredths(0.0), 0.0);
        assert_eq!(to_fixed_hundredths(1.0), 1.0);
    }

    #[test]
    fn test_legacy_saturation_below_tie() {
        let hsv = rgb_to_hsv_with(Rgb::new(6, 5, 203), Precision::Legacy);
        assert_eq!(hsv.h, 240.0);
        assert_close(hsv.s, 97.0);
        assert_close(hsv.v, 80.0);
    }

    #[test]
    fn test_achromatic_fast_path() {
        for h in [0.0, 45.0, 180.0, 359.0, 720.0, f64::NAN] {
            let rgb = hsv_to_rgb(Hsv::new(h, 0.0, 50.0));
            assert_eq!(rgb, Rgb::new(128, 128, 128));
        }
    }

    #[test]
    fn test_hue_sectors() {
        assert_eq!(HueSector::from_hue(0.0), Some(HueSector::RedYellow));
        assert_eq!(HueSector::from_hue(59.9), Some(HueSector::RedYellow));
        assert_eq!(HueSector::from_hue(60.0), Some(HueSector::YellowGreen));
        assert_eq!(HueSector::from_hue(179.0), Some(HueSector::GreenCyan));
        assert_eq!(HueSector::from_hue(180.0), Some(HueSector::CyanBlue));
        assert_eq!(HueSector::from_hue(299.0), Some(HueSector::BlueMagenta));
        assert_eq!(HueSector::from_hue(359.9), Some(HueSector::MagentaRed));
        assert_eq!(HueSector::from_hue(360.0), None);
        assert_eq!(HueSector::from_hue(-1.0), None);
        assert_eq!(HueSector::from_hue(f64::NAN), None);
    }

    #[test]
    fn test_out_of_range_hue() {
        assert_eq!(hsv_to_rgb(Hsv::new(480.0, 100.0, 100.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(-120.0, 100.0, 100.0)), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(f64::INFINITY, 100.0, 100.0)), Rgb::default());
    }

    #[test]
    fn test_oversaturated_output_is_clamped() {
        let rgb = hsv_to_rgb(Hsv::new(20.0, 300.0, 100.0));
        assert_eq!(rgb.r, 255);
        assert_eq!(rgb.b, 0);

        let rgb = hsv_to_rgb(Hsv::new(20.0, 50.0, 250.0));
        assert_eq!(rgb, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_round_trip() {
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(5) {
                for b in (0..=255u16).step_by(5) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    assert!((back.r as i16 - rgb.r as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                    assert!((back.g as i16 - rgb.g as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                    assert!((back.b as i16 - rgb.b as i16).abs() <= 1, "{rgb:?} -> {back:?}");
                }
            }
        }
    }
}
