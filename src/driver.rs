//! Byte-sink output driver
//!
//! Bridges frame producers and an already-open serial transport. Opening
//! the port, picking the device and configuring the baud rate belong to
//! the caller.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;
use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::encoder::{EncodeError, EncoderConfig, FrameEncoder};

/// An open byte stream towards the strip controller
pub trait ByteSink {
    type Error;

    /// Write the whole buffer
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Push buffered bytes to the device
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Error returned by [`AdalightDriver::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<E> {
    /// Frame could not be encoded; nothing was written
    Encode(EncodeError),
    /// Transport rejected the write
    Sink(E),
}

impl<E> DriverError<E> {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode",
            Self::Sink(_) => "sink",
        }
    }
}

impl<E> From<EncodeError> for DriverError<E> {
    fn from(error: EncodeError) -> Self {
        Self::Encode(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(error) => write!(f, "{}", error),
            Self::Sink(error) => write!(f, "sink write failed: {:?}", error),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DriverError<E> {}

/// Adalight output driver
///
/// Encodes each frame into a reusable buffer of `CAP` bytes and writes it
/// to the sink in one piece. A strip of `n` LEDs needs `CAP >= 6 + 3 * n`.
/// Failed frames are not retried.
pub struct AdalightDriver<S, const CAP: usize> {
    sink: S,
    encoder: FrameEncoder,
    buffer: Vec<u8, CAP>,
    dropped_frames: u32,
}

impl<S: ByteSink, const CAP: usize> AdalightDriver<S, CAP> {
    pub fn new(sink: S, config: &EncoderConfig) -> Self {
        Self::with_encoder(sink, FrameEncoder::new(config))
    }

    pub const fn with_encoder(sink: S, encoder: FrameEncoder) -> Self {
        Self {
            sink,
            encoder,
            buffer: Vec::new(),
            dropped_frames: 0,
        }
    }

    /// Encode and send one frame
    pub fn push(&mut self, colors: &[Rgb]) -> Result<(), DriverError<S::Error>> {
        self.encoder.encode_to_vec(colors, &mut self.buffer)?;
        self.send()
    }

    /// Frames lost through [`OutputDriver::write`]
    pub const fn dropped_frames(&self) -> u32 {
        self.dropped_frames
    }

    pub const fn encoder(&self) -> &FrameEncoder {
        &self.encoder
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn send(&mut self) -> Result<(), DriverError<S::Error>> {
        self.sink
            .write_all(&self.buffer)
            .map_err(DriverError::Sink)?;
        self.sink.flush().map_err(DriverError::Sink)
    }

    fn record_drop(&mut self, error: &DriverError<S::Error>) {
        self.dropped_frames = self.dropped_frames.saturating_add(1);
        #[cfg(feature = "esp32-log")]
        println!(
            "[AdalightDriver.write] dropped frame ({} error), {} dropped so far",
            error.kind(),
            self.dropped_frames
        );
        #[cfg(not(feature = "esp32-log"))]
        let _ = error;
    }
}

impl<S: ByteSink, const CAP: usize> OutputDriver for AdalightDriver<S, CAP> {
    fn write(&mut self, colors: &[Rgb]) {
        if let Err(error) = self.push(colors) {
            self.record_drop(&error);
        }
    }
}

impl<S: ByteSink, const CAP: usize> SmartLedsWrite for AdalightDriver<S, CAP> {
    type Error = DriverError<S::Error>;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.encoder
            .encode_iter(iterator.into_iter().map(Into::into), &mut self.buffer)?;
        self.send()
    }
}
