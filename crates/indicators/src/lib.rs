pub mod ema;
pub mod series;
pub mod sma;
pub mod volatility;
pub mod vwap;

pub use ema::Ema;
pub use series::Series;
pub use sma::Sma;
pub use volatility::Volatility;
pub use vwap::{Vwap, VwapInput};

/// Trait for streaming (incremental) indicators.
/// Feed one input at a time; the indicator maintains internal state.
pub trait Indicator: Send + Sync {
    /// What a single update consumes (a price, a return, or a trade).
    type Input<'a>;

    /// Fold the next input into the indicator state.
    fn update(&mut self, input: Self::Input<'_>);

    /// Current value. Reports `0.0` when there is no data yet.
    fn value(&self) -> f64;

    /// Reset the indicator to its initial state.
    fn reset(&mut self);

    /// The number of data points the indicator's window spans.
    fn period(&self) -> usize;

    /// Whether the indicator has seen enough data to be fully warmed up.
    fn is_ready(&self) -> bool;
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
