//! Frame pacing
//!
//! Serial bridges and the firmware behind them need a minimum gap between
//! frames. The scheduler decides when a frame may go out and tells the
//! caller how long to sleep; it never sleeps itself.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::color::Rgb;

/// Default minimum gap between frames for a 1 Mbaud bridge
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(7);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The earliest instant the next frame may be written.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if already due).
    pub sleep_duration: Duration,
    /// Whether this tick wrote the frame to the output.
    pub written: bool,
}

/// Portable frame scheduler.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(driver);
///
/// loop {
///     let colors = next_colors();
///     let result = scheduler.tick(now(), &colors);
///
///     // Platform-specific sleep
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver> {
    output: O,
    next_frame: Instant,
    frame_interval: Duration,
}

impl<O: OutputDriver> FrameScheduler<O> {
    /// Create a new frame scheduler with [`DEFAULT_FRAME_INTERVAL`].
    pub fn new(driver: O) -> Self {
        Self::with_frame_interval(driver, DEFAULT_FRAME_INTERVAL)
    }

    /// Create a new frame scheduler with a custom minimum interval.
    pub fn with_frame_interval(driver: O, frame_interval: Duration) -> Self {
        Self {
            output: driver,
            next_frame: Instant::from_millis(0),
            frame_interval,
        }
    }

    /// Write `colors` if the next frame is due.
    ///
    /// Frames offered before the deadline are skipped, not queued. If the
    /// caller stalled for more than two intervals, the schedule restarts
    /// from `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant, colors: &[Rgb]) -> FrameResult {
        if now < self.next_frame {
            return FrameResult {
                next_deadline: self.next_frame,
                sleep_duration: self.next_frame.saturating_duration_since(now),
                written: false,
            };
        }

        let max_drift = self.frame_interval + self.frame_interval;
        if now.saturating_duration_since(self.next_frame) > max_drift {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FrameScheduler.tick] resetting schedule, {}ms behind",
                now.saturating_duration_since(self.next_frame).as_millis()
            );
            self.next_frame = now;
        }

        self.output.write(colors);
        self.next_frame += self.frame_interval;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
            written: true,
        }
    }

    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
