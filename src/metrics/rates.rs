use std::time::Instant;

use super::report::DiskCounters;

pub const SECTOR_BYTES: f64 = 512.0;

/// Turns cumulative disk sector counters into byte rates between two reports.
#[derive(Debug, Default)]
pub struct DiskRateTracker {
    previous: Option<(DiskCounters, Instant)>,
}

impl DiskRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns (read, write) bytes per second, or `None` for the first sample,
    /// a zero interval, or counters that went backwards (device reset).
    pub fn observe(&mut self, counters: DiskCounters, at: Instant) -> Option<(f64, f64)> {
        let previous = self.previous.replace((counters, at));
        let (prev, prev_at) = previous?;

        let elapsed = at.checked_duration_since(prev_at)?.as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }
        let read = counters.sectors_read.checked_sub(prev.sectors_read)?;
        let written = counters.sectors_written.checked_sub(prev.sectors_written)?;

        Some((
            read as f64 * SECTOR_BYTES / elapsed,
            written as f64 * SECTOR_BYTES / elapsed,
        ))
    }
}
