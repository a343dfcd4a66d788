//! Tone curves for LED gamma correction
//!
//! LED brightness grows linearly with drive current while perceived
//! brightness does not, so 8-bit color intent is remapped through a power
//! curve before it reaches the strip. Curves are kept in full precision;
//! rounding happens later, in the error-diffusion pass.

use libm::pow;

use crate::dither::quantize;

/// Default gamma exponent, matching the classic WS2812 table
pub const DEFAULT_GAMMA: f64 = 2.8;

const CURVE_LEN: usize = 256;

/// Classic 8-bit WS2812 gamma table (γ = 2.8)
const WS2812_GAMMA8: [u8; CURVE_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, //
    2, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 5, 5, 5, //
    5, 6, 6, 6, 6, 7, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, //
    10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, //
    17, 17, 18, 18, 19, 19, 20, 20, 21, 21, 22, 22, 23, 24, 24, 25, //
    25, 26, 27, 27, 28, 29, 29, 30, 31, 32, 32, 33, 34, 35, 35, 36, //
    37, 38, 39, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 50, //
    51, 52, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 66, 67, 68, //
    69, 70, 72, 73, 74, 75, 77, 78, 79, 81, 82, 83, 85, 86, 87, 89, //
    90, 92, 93, 95, 96, 98, 99, 101, 102, 104, 105, 107, 109, 110, 112, 114, //
    115, 117, 119, 120, 122, 124, 126, 127, 129, 131, 133, 135, 137, 138, 140, 142, //
    144, 146, 148, 150, 152, 154, 156, 158, 160, 162, 164, 167, 169, 171, 173, 175, //
    177, 180, 182, 184, 186, 189, 191, 193, 196, 198, 200, 203, 205, 208, 210, 213, //
    215, 218, 220, 223, 225, 228, 231, 233, 236, 239, 241, 244, 247, 249, 252, 255, //
];

/// Integer WS2812 gamma lookup (γ = 2.8)
#[inline]
pub const fn ws2812_lut(value: u8) -> u8 {
    WS2812_GAMMA8[value as usize]
}

/// Precomputed tone curve with sub-integer precision
///
/// Built once and shared read-only between encoders. Every curve is
/// monotonically non-decreasing and maps 0 to 0 and 255 to 255.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    table: [f64; CURVE_LEN],
}

impl ToneCurve {
    /// Build a curve `255 * (i / 255) ^ gamma`
    ///
    /// A gamma that is not a finite positive number yields the linear curve.
    pub fn new(gamma: f64) -> Self {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Self::linear();
        }

        let mut table = [0.0; CURVE_LEN];
        for (i, value) in (0u8..=255).zip(table.iter_mut()) {
            *value = 255.0 * pow(f64::from(i) / 255.0, gamma);
        }
        Self { table }
    }

    /// Identity curve
    pub fn linear() -> Self {
        Self::from_lut(|value| value)
    }

    /// Integer WS2812 table
    ///
    /// Every entry is already a whole number, so error diffusion has nothing
    /// to carry between LEDs.
    pub fn ws2812() -> Self {
        Self::from_lut(ws2812_lut)
    }

    fn from_lut(lut: fn(u8) -> u8) -> Self {
        let mut table = [0.0; CURVE_LEN];
        for (i, value) in (0u8..=255).zip(table.iter_mut()) {
            *value = f64::from(lut(i));
        }
        Self { table }
    }

    /// Corrected intensity in full precision
    #[inline]
    pub fn correct(&self, value: u8) -> f64 {
        self.table[usize::from(value)]
    }

    /// Corrected intensity rounded to the nearest byte
    #[inline]
    pub fn correct8(&self, value: u8) -> u8 {
        quantize(self.correct(value))
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::new(DEFAULT_GAMMA)
    }
}
