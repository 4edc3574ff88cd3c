//! In-game clock and day/night cycle.
//!
//! Time of day is an integer in `[0, 2400)`, advanced by one unit per survival
//! tick. Reaching 2400 wraps to 0; the day counter is bumped by the host when
//! [`Clock::advance`] reports the wrap.

use serde::{Deserialize, Serialize};

/// Units per in-game day.
pub const DAY_LENGTH: u32 = 2400;

/// Night starts after this time of day.
pub const DUSK: u32 = 1900;

/// Night ends before this time of day.
pub const DAWN: u32 = 500;

/// Default time of day for a fresh game (mid-morning).
pub const START_TIME: u32 = 800;

/// Day counter and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Current day, starting at 1.
    pub day: u32,
    /// Time of day in `[0, 2400)`.
    pub time: u32,
}

impl Clock {
    /// Create a clock at `time` on `day`, wrapping `time` into range.
    pub fn new(day: u32, time: u32) -> Self {
        Self {
            day: day.max(1),
            time: time % DAY_LENGTH,
        }
    }

    /// Advance time of day by one unit.
    ///
    /// Returns `true` when the time wrapped past midnight. The caller owns the
    /// day increment (see [`Clock::roll_day`]).
    pub fn advance(&mut self) -> bool {
        self.time += 1;
        if self.time >= DAY_LENGTH {
            self.time = 0;
            true
        } else {
            false
        }
    }

    /// Increment the day counter.
    pub fn roll_day(&mut self) {
        self.day = self.day.saturating_add(1);
    }

    /// Night is `time > 1900 || time < 500`.
    pub fn is_night(&self) -> bool {
        is_night(self.time)
    }

    /// Time of day as `(hour, minute)` for the HUD.
    pub fn hour_minute(&self) -> (u32, u32) {
        let hour = self.time / 100;
        let minute = (self.time % 100) * 60 / 100;
        (hour, minute)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1, START_TIME)
    }
}

/// Night predicate on a raw time-of-day value.
pub fn is_night(time: u32) -> bool {
    time > DUSK || time < DAWN
}
