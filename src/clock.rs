use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use crate::foundation::core::{FrameIndex, Fps};

/// Monotonic time read by a mounted marquee on every tick.
///
/// Only differences between readings matter; the origin is arbitrary.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Time that only moves when told to. Used for frame-stepped renders and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to the presentation time of `frame`.
    pub fn seek_frame(&self, fps: Fps, frame: FrameIndex) {
        let at = Duration::try_from_secs_f64(fps.frames_to_secs(frame.0)).unwrap_or(Duration::MAX);
        self.set(at);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Position within a repeating loop: `(elapsed mod loop) / loop`, always in `[0, 1)`.
pub fn loop_progress(elapsed: Duration, loop_duration: Duration) -> f64 {
    let total = loop_duration.as_nanos();
    if total == 0 {
        return 0.0;
    }
    let within = elapsed.as_nanos() % total;
    within as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_wraps_at_loop_duration() {
        let loop_len = Duration::from_secs(20);
        assert_eq!(loop_progress(Duration::ZERO, loop_len), 0.0);
        assert_eq!(loop_progress(Duration::from_secs(5), loop_len), 0.25);
        assert_eq!(loop_progress(Duration::from_secs(20), loop_len), 0.0);
        assert_eq!(loop_progress(Duration::from_secs(65), loop_len), 0.25);
    }

    #[test]
    fn progress_stays_below_one() {
        let loop_len = Duration::from_millis(1000);
        let p = loop_progress(Duration::from_nanos(999_999_999), loop_len);
        assert!(p < 1.0);
        assert!(p > 0.999);
    }

    #[test]
    fn zero_loop_is_pinned() {
        assert_eq!(loop_progress(Duration::from_secs(3), Duration::ZERO), 0.0);
    }

    #[test]
    fn manual_clock_steps_frames() {
        let clock = ManualClock::new();
        let fps = Fps::new(30, 1).unwrap();

        clock.seek_frame(fps, FrameIndex(45));
        assert_eq!(clock.now(), Duration::from_millis(1500));

        clock.advance(Duration::from_millis(500));
        assert_eq!((&clock).now(), Duration::from_secs(2));
    }

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
