use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 60;

/// Fixed-capacity series feeding the line graph; the oldest sample is
/// dropped once full.
#[derive(Debug, Clone)]
pub struct SeriesHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SeriesHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn with_samples(capacity: usize, samples: &[f64]) -> Self {
        let mut history = Self::new(capacity);
        for &sample in samples {
            history.push(sample);
        }
        history
    }

    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (index, value) pairs ready for a chart dataset.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// Smallest and largest sample, padded so a flat series still has height.
    pub fn bounds(&self) -> [f64; 2] {
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        if (max - min).abs() < f64::EPSILON {
            return [min - 1.0, max + 1.0];
        }
        [min, max]
    }
}

impl Default for SeriesHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_caps_at_capacity() {
        let mut history = SeriesHistory::new(5);
        for i in 0..10 {
            history.push(i as f64);
        }
        assert_eq!(history.len(), 5);
        let points = history.points();
        assert_eq!(points[0], (0.0, 5.0));
        assert_eq!(points[4], (4.0, 9.0));
    }

    #[test]
    fn bounds_cover_samples() {
        let history = SeriesHistory::with_samples(60, &[1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 7.0, 8.0, 7.0, 6.0]);
        assert_eq!(history.bounds(), [1.0, 8.0]);
        assert_eq!(SeriesHistory::new(3).bounds(), [0.0, 1.0]);
        assert_eq!(SeriesHistory::with_samples(3, &[4.0]).bounds(), [3.0, 5.0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = SeriesHistory::new(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }
}
