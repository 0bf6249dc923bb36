use crate::Indicator;
use std::collections::VecDeque;

/// Rolling volatility: sample standard deviation of returns over a window.
///
/// Callers feed percentage returns (`price / prev - 1`), not prices. Mean and
/// sum of squared deviations are kept incrementally (Welford, with removal
/// for the sliding window) and rebuilt from the window once per `period`
/// evictions.
#[derive(Debug, Clone)]
pub struct Volatility {
    len: usize,
    returns: VecDeque<f64>,
    mean: f64,
    m2: f64,
    evictions: usize,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Volatility period must be > 0");
        Self {
            len: period,
            returns: VecDeque::with_capacity(period + 1),
            mean: 0.0,
            m2: 0.0,
            evictions: 0,
        }
    }

    /// Number of returns currently in the window.
    pub fn samples(&self) -> usize {
        self.returns.len()
    }

    /// Mean of the returns in the window, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Welford: fold `x` in. `returns` already contains it.
    fn welford_add(&mut self, x: f64) {
        let n = self.returns.len() as f64;
        let delta = x - self.mean;
        self.mean += delta / n;
        self.m2 += delta * (x - self.mean);
    }

    /// Welford: take `x` out. `returns` no longer contains it.
    ///
    /// Returns `true` when `x` carried at least half of the squared
    /// deviation; what is left of `mean` and `m2` is then mostly rounding
    /// error and must be rebuilt from the window.
    fn welford_remove(&mut self, x: f64) -> bool {
        let remaining = self.returns.len();
        if remaining == 0 {
            self.mean = 0.0;
            self.m2 = 0.0;
            return false;
        }
        let n = remaining as f64;
        let prev_mean = self.mean;
        self.mean = (prev_mean * (n + 1.0) - x) / n;
        let term = (x - prev_mean) * (x - self.mean);
        let dominant = term > 0.0 && term >= 0.5 * self.m2;
        self.m2 -= term;
        if self.m2 < 0.0 {
            self.m2 = 0.0;
        }
        dominant
    }

    fn resync(&mut self) {
        let n = self.returns.len();
        self.evictions = 0;
        if n == 0 {
            self.mean = 0.0;
            self.m2 = 0.0;
            return;
        }
        self.mean = self.returns.iter().sum::<f64>() / n as f64;
        self.m2 = self
            .returns
            .iter()
            .map(|r| {
                let diff = r - self.mean;
                diff * diff
            })
            .sum();
    }
}

impl Indicator for Volatility {
    type Input<'a> = f64;

    fn update(&mut self, ret: f64) {
        self.returns.push_back(ret);
        self.welford_add(ret);

        if self.returns.len() > self.len {
            if let Some(removed) = self.returns.pop_front() {
                let dominant = self.welford_remove(removed);
                self.evictions += 1;
                if dominant || self.evictions >= self.len || !removed.is_finite() {
                    self.resync();
                }
            }
        }
    }

    fn value(&self) -> f64 {
        let n = self.returns.len();
        if n < 2 {
            return 0.0;
        }
        // Bessel's correction: sample, not population, variance.
        (self.m2.max(0.0) / (n - 1) as f64).sqrt()
    }

    fn reset(&mut self) {
        self.returns.clear();
        self.mean = 0.0;
        self.m2 = 0.0;
        self.evictions = 0;
    }

    fn period(&self) -> usize {
        self.len
    }

    fn is_ready(&self) -> bool {
        self.returns.len() == self.len
    }
}
