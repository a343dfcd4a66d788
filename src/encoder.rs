//! Frame encoder
//!
//! Turns a borrowed slice of colors into one Adalight frame: tone mapping,
//! error diffusion along the strip, then framing. The encoder only holds
//! configuration; every call starts from zero residual error, so encoding
//! the same colors twice yields identical bytes.

use core::fmt;

use heapless::Vec;

use crate::color::{ChannelOrder, Rgb};
use crate::dither::ErrorDiffuser;
use crate::frame::{BYTES_PER_LED, FrameHeader, HEADER_LEN, MAX_LEDS, frame_len};
use crate::gamma::{DEFAULT_GAMMA, ToneCurve};

/// Error returned when a frame cannot be encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// LED count is zero or does not fit the 16-bit count field
    OutOfRange { count: usize },
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall { required: usize, available: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { count } => {
                write!(f, "LED count {} out of range 1..={}", count, MAX_LEDS)
            }
            Self::BufferTooSmall {
                required,
                available,
            } => write!(
                f,
                "frame needs {} bytes, buffer holds {}",
                required, available
            ),
        }
    }
}

impl core::error::Error for EncodeError {}

/// Tone mapping applied before quantization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneMode {
    /// No correction
    Linear,
    /// Continuous power curve with the given exponent
    Gamma(f64),
    /// Integer WS2812 lookup table
    ///
    /// Lower fidelity: values are rounded before diffusion, so low
    /// gradients band exactly as with plain rounding.
    Ws2812Table,
}

impl Default for ToneMode {
    fn default() -> Self {
        Self::Gamma(DEFAULT_GAMMA)
    }
}

impl ToneMode {
    /// Build the tone curve for this mode
    pub fn curve(self) -> ToneCurve {
        match self {
            Self::Linear => ToneCurve::linear(),
            Self::Gamma(gamma) => ToneCurve::new(gamma),
            Self::Ws2812Table => ToneCurve::ws2812(),
        }
    }
}

/// Configuration for the frame encoder
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncoderConfig {
    pub tone: ToneMode,
    pub channel_order: ChannelOrder,
}

/// Adalight frame encoder
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEncoder {
    curve: ToneCurve,
    channel_order: ChannelOrder,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(&EncoderConfig::default())
    }
}

impl FrameEncoder {
    /// Create an encoder from configuration
    pub fn new(config: &EncoderConfig) -> Self {
        Self::with_curve(config.tone.curve(), config.channel_order)
    }

    /// Create an encoder around a prebuilt curve
    pub const fn with_curve(curve: ToneCurve, channel_order: ChannelOrder) -> Self {
        Self {
            curve,
            channel_order,
        }
    }

    pub const fn curve(&self) -> &ToneCurve {
        &self.curve
    }

    pub const fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Encode `colors` into the start of `out`
    ///
    /// Returns the number of bytes written, always `6 + 3 * colors.len()`.
    pub fn encode_into(&self, colors: &[Rgb], out: &mut [u8]) -> Result<usize, EncodeError> {
        let header = FrameHeader::new(colors.len())?;
        let required = header.frame_len();
        let available = out.len();
        let Some(frame) = out.get_mut(..required) else {
            return Err(EncodeError::BufferTooSmall {
                required,
                available,
            });
        };

        let (head, payload) = frame.split_at_mut(HEADER_LEN);
        head.copy_from_slice(&header.to_bytes());

        let mut diffuser = ErrorDiffuser::new();
        for (color, led) in colors.iter().zip(payload.chunks_exact_mut(BYTES_PER_LED)) {
            led.copy_from_slice(&self.quantize(&mut diffuser, *color));
        }

        Ok(required)
    }

    /// Encode `colors` into a new fixed-capacity buffer
    pub fn encode<const CAP: usize>(&self, colors: &[Rgb]) -> Result<Vec<u8, CAP>, EncodeError> {
        let mut buffer = Vec::new();
        self.encode_to_vec(colors, &mut buffer)?;
        Ok(buffer)
    }

    /// Encode `colors` into `buffer`, replacing its contents
    pub fn encode_to_vec<const CAP: usize>(
        &self,
        colors: &[Rgb],
        buffer: &mut Vec<u8, CAP>,
    ) -> Result<(), EncodeError> {
        let required = FrameHeader::new(colors.len())?.frame_len();
        buffer.clear();
        buffer
            .resize(required, 0)
            .map_err(|()| EncodeError::BufferTooSmall {
                required,
                available: CAP,
            })?;
        self.encode_into(colors, buffer)?;
        Ok(())
    }

    /// Encode colors of unknown count, replacing the contents of `buffer`
    ///
    /// The header is written last, once the count is known. Capacity is
    /// checked as LEDs arrive, so an oversized sequence may report
    /// `BufferTooSmall` before `OutOfRange`.
    pub fn encode_iter<I, const CAP: usize>(
        &self,
        colors: I,
        buffer: &mut Vec<u8, CAP>,
    ) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = Rgb>,
    {
        buffer.clear();
        buffer
            .resize(HEADER_LEN, 0)
            .map_err(|()| EncodeError::BufferTooSmall {
                required: HEADER_LEN,
                available: CAP,
            })?;

        let mut diffuser = ErrorDiffuser::new();
        let mut count = 0;
        for color in colors {
            count += 1;
            if count > MAX_LEDS {
                return Err(EncodeError::OutOfRange { count });
            }
            buffer
                .extend_from_slice(&self.quantize(&mut diffuser, color))
                .map_err(|()| EncodeError::BufferTooSmall {
                    required: frame_len(count),
                    available: CAP,
                })?;
        }

        let header = FrameHeader::new(count)?;
        buffer[..HEADER_LEN].copy_from_slice(&header.to_bytes());
        Ok(())
    }

    /// Tone map and quantize one LED, returning bytes in wire order
    fn quantize(&self, diffuser: &mut ErrorDiffuser, color: Rgb) -> [u8; 3] {
        let target = [
            self.curve.correct(color.r),
            self.curve.correct(color.g),
            self.curve.correct(color.b),
        ];
        self.channel_order.arrange(diffuser.quantize(target))
    }
}
