//! Turn countdown.
//!
//! The countdown holds whole seconds and only moves when [`Countdown::tick`]
//! is called; whoever owns the game (the session actor, a test, the
//! simulator) decides when a second has elapsed. Reaching zero reports
//! [`Tick::Expired`] exactly once and deactivates the countdown, so later
//! ticks are [`Tick::Idle`] until it is reset.
//!
//! ```
//! use party_board::timer::{Countdown, Tick};
//!
//! let mut timer = Countdown::new(2);
//! timer.resume();
//!
//! assert_eq!(timer.tick(), Tick::Running { remaining: 1 });
//! assert_eq!(timer.tick(), Tick::Expired);
//! assert_eq!(timer.tick(), Tick::Idle);
//! ```

use serde::{Deserialize, Serialize};

/// Outcome of one elapsed second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The countdown is not running.
    Idle,
    Running { remaining: u32 },
    /// Hit zero on this tick.
    Expired,
}

/// Seconds-resolution countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    active: bool,
}

impl Countdown {
    /// Inactive countdown loaded with `duration` seconds.
    #[must_use]
    pub const fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            active: false,
        }
    }

    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Load a new duration, discarding any countdown in progress.
    pub fn reset(&mut self, duration: u32, active: bool) {
        self.duration = duration;
        self.remaining = duration;
        self.active = active;
    }

    /// Start counting. An expired countdown reloads its duration first.
    pub fn resume(&mut self) {
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Remaining fraction of the duration, for progress bars.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            0.0
        } else {
            self.remaining as f32 / self.duration as f32
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_clock(self.remaining))
    }
}

/// Render seconds as `MM:SS`.
///
/// ```
/// assert_eq!(party_board::timer::format_clock(125), "02:05");
/// ```
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_ticks_expire_once() {
        let mut timer = Countdown::new(30);
        timer.reset(30, true);

        let mut expirations = 0;
        for _ in 0..30 {
            if timer.tick() == Tick::Expired {
                expirations += 1;
            }
        }
        assert_eq!(timer.remaining(), 0);
        assert_eq!(expirations, 1);
        assert!(!timer.is_active());

        for _ in 0..10 {
            assert_eq!(timer.tick(), Tick::Idle);
        }
    }

    #[test]
    fn test_inactive_does_not_move() {
        let mut timer = Countdown::new(10);
        assert_eq!(timer.tick(), Tick::Idle);
        assert_eq!(timer.remaining(), 10);
    }

    #[test]
    fn test_reset_cancels_countdown() {
        let mut timer = Countdown::new(10);
        timer.resume();
        timer.tick();
        timer.tick();

        timer.reset(60, true);
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.duration(), 60);
        assert!(timer.is_active());
    }

    #[test]
    fn test_stop_and_resume() {
        let mut timer = Countdown::new(5);
        timer.resume();
        timer.tick();
        timer.stop();
        assert_eq!(timer.tick(), Tick::Idle);

        timer.resume();
        assert_eq!(timer.tick(), Tick::Running { remaining: 3 });
    }

    #[test]
    fn test_resume_reloads_after_expiry() {
        let mut timer = Countdown::new(1);
        timer.resume();
        assert_eq!(timer.tick(), Tick::Expired);

        timer.resume();
        assert_eq!(timer.remaining(), 1);
        assert!(timer.is_active());
    }

    #[test]
    fn test_progress() {
        let mut timer = Countdown::new(4);
        assert!((timer.progress() - 1.0).abs() < f32::EPSILON);
        timer.resume();
        timer.tick();
        assert!((timer.progress() - 0.75).abs() < f32::EPSILON);
        assert_eq!(Countdown::new(0).progress(), 0.0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(30), "00:30");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(Countdown::new(61).to_string(), "01:01");
    }
}
