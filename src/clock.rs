/// Frame-time gate: fires once the configured interval has elapsed since the
/// last firing. Leftover time is dropped, so a slow frame never triggers a
/// burst of catch-up steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: f32,
    elapsed: f32,
}

impl FixedStep {
    /// Gate firing `rate` times per second
    pub fn per_second(rate: u32) -> Self {
        FixedStep {
            interval: 1.0 / rate.max(1) as f32,
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_rate(&mut self, rate: u32) {
        self.interval = 1.0 / rate.max(1) as f32;
    }

    /// Restart the phase without firing
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Feed one frame's delta time (seconds); returns true when a step is due
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time.max(0.0);
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}
