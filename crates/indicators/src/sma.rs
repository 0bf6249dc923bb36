use crate::Indicator;
use std::collections::VecDeque;

/// Simple Moving Average (SMA).
///
/// Reports the mean of however many prices are retained, so during warm-up
/// the window grows until it saturates at `period` and then slides.
#[derive(Debug, Clone)]
pub struct Sma {
    len: usize,
    buffer: VecDeque<f64>,
    sum: f64,
    /// Evictions since `sum` was last recomputed from the buffer.
    evictions: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            len: period,
            buffer: VecDeque::with_capacity(period + 1),
            sum: 0.0,
            evictions: 0,
        }
    }

    /// Number of prices currently in the window.
    pub fn samples(&self) -> usize {
        self.buffer.len()
    }

    fn resync(&mut self) {
        self.sum = self.buffer.iter().sum();
        self.evictions = 0;
    }
}

impl Indicator for Sma {
    type Input<'a> = f64;

    fn update(&mut self, price: f64) {
        self.sum += price;
        self.buffer.push_back(price);

        if self.buffer.len() > self.len {
            if let Some(removed) = self.buffer.pop_front() {
                self.sum -= removed;
                self.evictions += 1;
                // Rebuild the running sum once per window to cap rounding
                // drift, and immediately when the evicted price outweighed
                // everything left (its subtraction cancelled the low digits).
                if self.evictions >= self.len
                    || !removed.is_finite()
                    || removed.abs() > self.sum.abs()
                {
                    self.resync();
                }
            }
        }
    }

    fn value(&self) -> f64 {
        if self.buffer.is_empty() {
            return 0.0;
        }
        self.sum / self.buffer.len() as f64
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0.0;
        self.evictions = 0;
    }

    fn period(&self) -> usize {
        self.len
    }

    fn is_ready(&self) -> bool {
        self.buffer.len() == self.len
    }
}
