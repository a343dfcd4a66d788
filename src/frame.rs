//! Adalight wire format
//!
//! ```text
//! 'A' 'd' 'a' | count-1 (u16, big endian) | hi ^ lo ^ 0x55 | R G B ...
//! ```
//!
//! The checksum covers only the count, letting a receiver validate the
//! header before committing to read `3 * count` payload bytes.

use core::fmt;

use crate::encoder::EncodeError;

/// Protocol magic, `"Ada"`
pub const MAGIC: [u8; 3] = *b"Ada";
/// Salt mixed into the header checksum
pub const CHECKSUM_SALT: u8 = 0x55;
/// Length of the frame header in bytes
pub const HEADER_LEN: usize = 6;
/// Payload bytes per LED
pub const BYTES_PER_LED: usize = 3;
/// Largest LED count the 16-bit count field can express
pub const MAX_LEDS: usize = u16::MAX as usize + 1;

/// Total encoded length of a frame with `count` LEDs
pub const fn frame_len(count: usize) -> usize {
    HEADER_LEN + count * BYTES_PER_LED
}

/// Header checksum over the two count bytes
pub const fn checksum(high: u8, low: u8) -> u8 {
    high ^ low ^ CHECKSUM_SALT
}

/// Error returned when a received header fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer than [`HEADER_LEN`] bytes available
    Truncated,
    /// First three bytes are not [`MAGIC`]
    BadMagic,
    /// Checksum byte does not match the count field
    BadChecksum { expected: u8, actual: u8 },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "frame header truncated"),
            Self::BadMagic => write!(f, "frame header magic mismatch"),
            Self::BadChecksum { expected, actual } => write!(
                f,
                "frame header checksum mismatch: expected {:#04x}, got {:#04x}",
                expected, actual
            ),
        }
    }
}

impl core::error::Error for HeaderError {}

/// Decoded frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// `count - 1`, as carried on the wire
    last_index: u16,
}

impl FrameHeader {
    /// Header for a frame of `count` LEDs
    ///
    /// Fails with [`EncodeError::OutOfRange`] when `count` is zero or above
    /// [`MAX_LEDS`].
    pub fn new(count: usize) -> Result<Self, EncodeError> {
        count
            .checked_sub(1)
            .and_then(|last| u16::try_from(last).ok())
            .map(|last_index| Self { last_index })
            .ok_or(EncodeError::OutOfRange { count })
    }

    /// Parse and validate a header from the start of `bytes`
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        let Some(header) = bytes.get(..HEADER_LEN) else {
            return Err(HeaderError::Truncated);
        };
        if header[..3] != MAGIC {
            return Err(HeaderError::BadMagic);
        }

        let (high, low, actual) = (header[3], header[4], header[5]);
        let expected = checksum(high, low);
        if actual != expected {
            return Err(HeaderError::BadChecksum { expected, actual });
        }

        Ok(Self {
            last_index: u16::from_be_bytes([high, low]),
        })
    }

    /// Number of LEDs in the frame
    pub const fn led_count(self) -> usize {
        self.last_index as usize + 1
    }

    /// Number of payload bytes following the header
    pub const fn payload_len(self) -> usize {
        self.led_count() * BYTES_PER_LED
    }

    /// Total frame length, header included
    pub const fn frame_len(self) -> usize {
        frame_len(self.led_count())
    }

    pub const fn to_bytes(self) -> [u8; HEADER_LEN] {
        let [high, low] = self.last_index.to_be_bytes();
        [MAGIC[0], MAGIC[1], MAGIC[2], high, low, checksum(high, low)]
    }
}
