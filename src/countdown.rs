//! Adventure-mode countdown.
//!
//! There is only ever one timer: starting always cancels first and restarts
//! the one-second phase, so two countdowns can never tick side by side.

use crate::clock::FixedStep;

/// Outcome of one countdown second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Timer not running; nothing happened
    Idle,
    Remaining(u32),
    /// Hit zero; the timer has stopped itself
    Expired,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    second: FixedStep,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Countdown {
            duration,
            remaining: duration,
            running: false,
            second: FixedStep::per_second(1),
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume from the remaining time
    pub fn start(&mut self) {
        self.cancel();
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = true;
    }

    /// Start again from the full duration
    pub fn restart(&mut self) {
        self.cancel();
        self.remaining = self.duration;
        self.running = true;
    }

    /// Stop ticking; the remaining time is kept
    pub fn cancel(&mut self) {
        self.running = false;
        self.second.restart();
    }

    /// Stop and restore the full duration (session reset)
    pub fn reset(&mut self, duration: u32) {
        self.cancel();
        self.duration = duration;
        self.remaining = duration;
    }

    /// One elapsed second
    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cancel();
            return CountdownTick::Expired;
        }
        CountdownTick::Remaining(self.remaining)
    }

    /// Feed frame time; ticks once per accumulated second while running
    pub fn advance(&mut self, delta_time: f32) -> CountdownTick {
        if !self.running || !self.second.advance(delta_time) {
            return CountdownTick::Idle;
        }
        self.tick()
    }
}
