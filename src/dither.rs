//! One-dimensional error diffusion
//!
//! Rounding a smooth tone curve to bytes independently per LED leaves flat
//! runs at low brightness where neighbours should differ by a fraction of a
//! step. The diffuser carries each LED's rounding error into the next one,
//! so the running average of the emitted bytes stays on the curve.

use libm::round;

/// Round a real intensity to the nearest byte, clamped to `0..=255`
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(value: f64) -> u8 {
    round(value).clamp(0.0, 255.0) as u8
}

/// Per-channel rounding residuals for a single pass along the strip
///
/// Create one per frame. Residuals never exceed 0.5 in magnitude as long as
/// targets stay within `0.0..=255.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorDiffuser {
    residual: [f64; 3],
}

impl ErrorDiffuser {
    pub const fn new() -> Self {
        Self {
            residual: [0.0; 3],
        }
    }

    /// Error not yet emitted, per channel (`[r, g, b]`)
    pub const fn residual(&self) -> [f64; 3] {
        self.residual
    }

    /// Quantize one LED
    ///
    /// `target` holds the real-valued `[r, g, b]` intensities; the returned
    /// bytes are in the same order.
    pub fn quantize(&mut self, target: [f64; 3]) -> [u8; 3] {
        let mut output = [0; 3];
        for ((byte, residual), target) in output
            .iter_mut()
            .zip(self.residual.iter_mut())
            .zip(target)
        {
            let adjusted = target + *residual;
            *byte = quantize(adjusted);
            *residual = adjusted - f64::from(*byte);
        }
        output
    }
}
