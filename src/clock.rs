//! Fixed-step frame clock and tick-based timers.
//!
//! `draw_web()` runs at the display refresh rate with a variable delta.
//! [`FrameClock`] turns wall-clock timestamps into whole ticks so that
//! polling and delayed transitions advance in discrete, testable steps.

pub struct FrameClock {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a `performance.now()` timestamp; returns the ticks elapsed since
    /// the previous frame. The first frame yields zero.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // A backgrounded tab resumes with a huge gap; cap it.
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Repeating timer that fires once per `period` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    period: u32,
    elapsed: u32,
}

impl Interval {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    /// Advance by `ticks`. Returns true if the period elapsed at least once;
    /// missed periods collapse into a single firing.
    pub fn advance(&mut self, ticks: u32) -> bool {
        self.elapsed += ticks;
        if self.elapsed >= self.period {
            self.elapsed %= self.period;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// One-shot timer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delay {
    remaining: Option<u32>,
}

impl Delay {
    pub fn start(&mut self, ticks: u32) {
        self.remaining = Some(ticks);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `ticks`. Returns true exactly once, on the tick the delay
    /// runs out.
    pub fn advance(&mut self, ticks: u32) -> bool {
        match self.remaining {
            Some(left) if left <= ticks => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - ticks);
                false
            }
            None => false,
        }
    }
}
