use crate::Indicator;

/// Exponential Moving Average (EMA).
///
/// Seeded with the first price; every later price is folded in as
/// `alpha * price + (1 - alpha) * current`. No history is retained.
#[derive(Debug, Clone)]
pub struct Ema {
    len: usize,
    alpha: f64,
    current: Option<f64>,
}

impl Ema {
    /// EMA over `span` periods, `alpha = 2 / (span + 1)`.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be > 0");
        Self {
            len: span,
            alpha: 2.0 / (span as f64 + 1.0),
            current: None,
        }
    }

    /// EMA with an explicit smoothing factor in `(0, 1]`.
    pub fn with_alpha(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "EMA alpha must be in (0, 1]");
        let span = (2.0 / alpha - 1.0).round().max(1.0) as usize;
        Self {
            len: span,
            alpha,
            current: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Indicator for Ema {
    type Input<'a> = f64;

    fn update(&mut self, price: f64) {
        self.current = Some(match self.current {
            None => price,
            Some(prev) => self.alpha * price + (1.0 - self.alpha) * prev,
        });
    }

    fn value(&self) -> f64 {
        self.current.unwrap_or(0.0)
    }

    fn reset(&mut self) {
        self.current = None;
    }

    fn period(&self) -> usize {
        self.len
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}
