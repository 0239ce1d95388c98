use std::time::Duration;

use crate::config::GeneralConfig;

/// Upper bound on any configured rate.
pub const MAX_REFRESH_MS: u64 = 60_000;

/// Tick interval in milliseconds, held inside `[min, max]` on a `step` grid
/// anchored at `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRate {
    value: u64,
    min: u64,
    max: u64,
    step: u64,
}

impl RefreshRate {
    pub fn new(value: u64, min: u64, max: u64, step: u64) -> Self {
        let min = min.clamp(1, MAX_REFRESH_MS);
        let max = max.clamp(min, MAX_REFRESH_MS);
        let mut rate = Self {
            value: min,
            min,
            max,
            step: step.clamp(1, MAX_REFRESH_MS),
        };
        rate.value = rate.snap(value);
        rate
    }

    pub fn from_config(general: &GeneralConfig) -> Self {
        Self::new(
            general.refresh_rate_ms,
            general.refresh_min_ms,
            general.refresh_max_ms,
            general.refresh_step_ms,
        )
    }

    pub fn millis(&self) -> u64 {
        self.value
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.value)
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Clamps `ms` into range and rounds it to the nearest step.
    pub fn snap(&self, ms: u64) -> u64 {
        let clamped = ms.clamp(self.min, self.max);
        let steps = (clamped - self.min).saturating_add(self.step / 2) / self.step;
        self.min
            .saturating_add(steps.saturating_mul(self.step))
            .min(self.max)
    }

    /// Sets the rate; returns `true` if it changed.
    pub fn set(&mut self, ms: u64) -> bool {
        let snapped = self.snap(ms);
        let changed = snapped != self.value;
        self.value = snapped;
        changed
    }

    pub fn step_up(&mut self) -> bool {
        self.set(self.value.saturating_add(self.step))
    }

    pub fn step_down(&mut self) -> bool {
        self.set(self.value.saturating_sub(self.step))
    }

    /// Rate at `fraction` (0.0 to 1.0) of the slider track.
    pub fn at_fraction(&self, fraction: f64) -> u64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let span = (self.max - self.min) as f64;
        self.snap(self.min + (fraction * span).round() as u64)
    }

    /// Position of the current rate along the slider track.
    pub fn fraction(&self) -> f64 {
        if self.max == self.min {
            return 1.0;
        }
        (self.value - self.min) as f64 / (self.max - self.min) as f64
    }
}
