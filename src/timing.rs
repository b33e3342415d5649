//! Frame timing and loop scheduling.
//!
//! The animation loop is made of two independent repeating actions:
//!
//! - [`FrameClock`]: the self-rescheduling frame tick. Each tick draws a
//!   frame, measures the real elapsed wall-clock time, and schedules the
//!   next tick one period from now. Because the next deadline is derived
//!   from the time the tick actually ran, the achieved rate drifts under
//!   load instead of catching up.
//! - [`FixedTick`]: a fixed-rate timer used for the once-per-second FPS
//!   readout update.
//!
//! Both are driven externally (by the winit event loop) and are given
//! the current [`Instant`] explicitly, which keeps them testable without
//! a running loop. [`CancellationToken`] is the teardown path: once
//! cancelled, the loop stops scheduling ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Instantaneous frame rate from a measured frame interval, rounded up
/// to the nearest whole frame per second.
///
/// A sub-millisecond interval saturates to `u32::MAX` rather than
/// dividing by zero.
#[must_use]
pub fn fps_from_elapsed(elapsed: Duration) -> u32 {
    let ms = elapsed.as_secs_f64() * 1000.0;
    if ms <= 0.0 {
        return u32::MAX;
    }
    (1000.0 / ms).ceil() as u32
}

/// Timing state for the self-rescheduling frame tick.
pub struct FrameClock {
    period: Duration,
    prev: Instant,
    real_fps: u32,
}

impl FrameClock {
    /// Creates a clock with the given target period, starting now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// Creates a clock with an explicit start instant.
    #[must_use]
    pub fn starting_at(period: Duration, now: Instant) -> Self {
        Self {
            period,
            prev: now,
            // Seed value reported until the first tick has been measured.
            real_fps: 60,
        }
    }

    /// Records a tick at `now`: computes the instantaneous frame rate
    /// from the interval since the previous tick and advances the
    /// previous-tick marker.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.real_fps = fps_from_elapsed(now.duration_since(self.prev));
        self.prev = now;
        self.real_fps
    }

    /// The deadline for the next tick, one period after `now`.
    ///
    /// Deliberately relative to the caller's `now`, not to the previous
    /// deadline. A late tick pushes every following tick later.
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Instant {
        now + self.period
    }

    /// Last computed instantaneous frame rate.
    #[must_use]
    pub fn real_fps(&self) -> u32 {
        self.real_fps
    }

    /// The fixed target period between ticks.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

/// A fixed-rate repeating deadline.
///
/// Unlike [`FrameClock`], deadlines advance by whole intervals from the
/// start instant, so a late poll does not shift the schedule.
pub struct FixedTick {
    interval: Duration,
    next: Instant,
}

impl FixedTick {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    #[must_use]
    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Returns `true` if the deadline has been reached, advancing it by
    /// one interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next += self.interval;
            true
        } else {
            false
        }
    }

    /// The upcoming deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}

/// Clonable handle used to stop the animation loop.
///
/// The loop checks the token at the top of every tick; once cancelled,
/// no further frame is drawn and no further tick is scheduled. The
/// atomic exists only so handles can be cloned; all access stays on one
/// thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
