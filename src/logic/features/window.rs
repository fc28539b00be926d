//! Heart Rate Window - bounded ring buffer for the `hr_variance` feature
//!
//! Holds the current heart rate and up to two predecessors from the same
//! batch. A fresh window is created per batch; nothing carries across calls.

/// Rolling window size for `hr_variance`
pub const HR_WINDOW_SIZE: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct HeartRateWindow {
    values: [f64; HR_WINDOW_SIZE],
    head: usize,
    len: usize,
}

impl HeartRateWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a reading, evicting the oldest once full
    pub fn push(&mut self, heart_rate: f64) {
        self.values[self.head] = heart_rate;
        self.head = (self.head + 1) % HR_WINDOW_SIZE;
        if self.len < HR_WINDOW_SIZE {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffered values, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = (self.head + HR_WINDOW_SIZE - self.len) % HR_WINDOW_SIZE;
        (0..self.len).map(move |i| self.values[(start + i) % HR_WINDOW_SIZE])
    }

    /// Sample standard deviation (ddof = 1); 0 when fewer than two readings
    pub fn std_dev(&self) -> f64 {
        if self.len < 2 {
            return 0.0;
        }

        let n = self.len as f64;
        let mean = self.iter().sum::<f64>() / n;
        let variance = self.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    }
}
