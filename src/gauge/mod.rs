pub mod color;
pub mod geometry;

use color::{Rgb, derive_track_color};
use geometry::sweep_degrees;

pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(170, 85, 255);
pub const DEFAULT_TRACK: Rgb = Rgb::new(60, 62, 90);

/// Current reading and colors of one radial gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeState {
    value: u8,
    foreground: Rgb,
    track: Rgb,
}

impl Default for GaugeState {
    fn default() -> Self {
        Self {
            value: 0,
            foreground: DEFAULT_FOREGROUND,
            track: DEFAULT_TRACK,
        }
    }
}

impl GaugeState {
    /// Gauge with the given foreground; the track color is derived from it.
    pub fn new(percent: i64, foreground: Rgb) -> Self {
        Self {
            value: clamp_percent(percent),
            foreground,
            track: derive_track_color(foreground),
        }
    }

    pub fn with_track(mut self, track: Rgb) -> Self {
        self.track = track;
        self
    }

    /// Stores the clamped value. Returns `true` when a redraw is needed.
    pub fn set_value(&mut self, percent: i64) -> bool {
        let clamped = clamp_percent(percent);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn track(&self) -> Rgb {
        self.track
    }

    pub fn sweep_degrees(&self) -> u16 {
        sweep_degrees(self.value)
    }

    pub fn label(&self) -> String {
        format!("{}%", self.value)
    }
}

pub fn clamp_percent(percent: i64) -> u8 {
    percent.clamp(0, 100) as u8
}

/// Rounds a fractional usage reading to the gauge's integer scale.
pub fn percent_from_usage(usage: f64) -> i64 {
    if usage.is_nan() {
        return 0;
    }
    usage.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64
}
