#![no_std]

pub mod color;
pub mod dither;
pub mod driver;
pub mod encoder;
pub mod frame;
pub mod frame_scheduler;
pub mod gamma;

pub use color::{ChannelOrder, Rgb};
pub use dither::ErrorDiffuser;
pub use driver::{AdalightDriver, ByteSink, DriverError};
pub use encoder::{EncodeError, EncoderConfig, FrameEncoder, ToneMode};
pub use frame::{FrameHeader, HeaderError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::{ToneCurve, ws2812_lut};
pub use embassy_time::{Duration, Instant};

/// Abstract LED output trait
///
/// Implement this trait to support different transports.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
