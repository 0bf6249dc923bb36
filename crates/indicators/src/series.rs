use crate::{Ema, Indicator, Sma, Volatility, Vwap, VwapInput};
use tickstats_core::{IndicatorError, IndicatorKind, IndicatorParams};

/// The full indicator set for one symbol.
///
/// The first price only seeds the return baseline: no indicator is updated
/// until a return can be computed, so all four stay consistent with each
/// other.
#[derive(Debug, Clone)]
pub struct Series {
    sma: Sma,
    ema: Ema,
    volatility: Volatility,
    vwap: Vwap,
    last_price: Option<f64>,
    updates: usize,
}

impl Series {
    pub fn new(params: &IndicatorParams) -> Self {
        Self {
            sma: Sma::new(params.sma_window),
            ema: Ema::with_alpha(params.ema_alpha),
            volatility: Volatility::new(params.vol_window),
            vwap: Vwap::new(),
            last_price: None,
            updates: 0,
        }
    }

    /// Apply one trade.
    ///
    /// A zero previous price yields a non-finite return, which is passed to
    /// the volatility window unchanged.
    pub fn update(&mut self, price: f64, volume: i64, timestamp: &str) {
        let Some(last) = self.last_price else {
            self.last_price = Some(price);
            return;
        };

        let ret = price / last - 1.0;
        self.sma.update(price);
        self.ema.update(price);
        self.volatility.update(ret);
        self.vwap.update(VwapInput {
            price,
            volume,
            timestamp,
        });

        self.last_price = Some(price);
        self.updates += 1;
    }

    pub fn get(&self, kind: IndicatorKind) -> f64 {
        match kind {
            IndicatorKind::Sma => self.sma.value(),
            IndicatorKind::Ema => self.ema.value(),
            IndicatorKind::Volatility => self.volatility.value(),
            IndicatorKind::Vwap => self.vwap.value(),
        }
    }

    /// Look up an indicator by name (`sma`, `ema`, `volatility`, `vwap`).
    pub fn get_named(&self, name: &str) -> Result<f64, IndicatorError> {
        Ok(self.get(name.parse()?))
    }

    pub fn is_ready(&self, kind: IndicatorKind) -> bool {
        match kind {
            IndicatorKind::Sma => self.sma.is_ready(),
            IndicatorKind::Ema => self.ema.is_ready(),
            IndicatorKind::Volatility => self.volatility.is_ready(),
            IndicatorKind::Vwap => self.vwap.is_ready(),
        }
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    /// Number of trades that reached the indicators (excludes the seed).
    pub fn updates(&self) -> usize {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    fn params() -> IndicatorParams {
        IndicatorParams {
            sma_window: 2,
            ema_alpha: 0.5,
            vol_window: 3,
        }
    }

    fn snapshot(series: &Series) -> Vec<f64> {
        IndicatorKind::ALL.iter().map(|k| series.get(*k)).collect()
    }

    #[test]
    fn test_first_update_only_seeds() {
        let mut series = Series::new(&params());
        let before = snapshot(&series);
        series.update(150.0, 1000, "2023-09-15 09:30:00");
        assert_eq!(snapshot(&series), before);
        assert_eq!(series.last_price(), Some(150.0));
        assert_eq!(series.updates(), 0);
    }

    #[test]
    fn test_second_update_feeds_all_indicators() {
        let mut series = Series::new(&params());
        series.update(100.0, 10, "2024-01-01 09:30:00");
        series.update(110.0, 20, "2024-01-01 09:31:00");

        assert_eq!(series.get(IndicatorKind::Sma), 110.0);
        assert_eq!(series.get(IndicatorKind::Ema), 110.0);
        // Single return: not enough for a deviation yet.
        assert_eq!(series.get(IndicatorKind::Volatility), 0.0);
        assert_eq!(series.get(IndicatorKind::Vwap), 110.0);
        assert_eq!(series.last_price(), Some(110.0));
        assert_eq!(series.updates(), 1);
    }

    #[test]
    fn test_returns_drive_volatility() {
        let mut series = Series::new(&params());
        series.update(100.0, 1, "2024-01-01");
        series.update(110.0, 1, "2024-01-01"); // +10%
        series.update(99.0, 1, "2024-01-01"); // -10%
        // returns [0.1, -0.1]: mean 0, sample std sqrt(0.02)
        assert_close(series.get(IndicatorKind::Volatility), 0.02f64.sqrt());
    }

    #[test]
    fn test_zero_price_seed_is_a_real_price() {
        let mut series = Series::new(&params());
        series.update(0.0, 1, "2024-01-01");
        assert_eq!(series.last_price(), Some(0.0));
        series.update(5.0, 1, "2024-01-01");
        assert_eq!(series.updates(), 1);
        assert_eq!(series.get(IndicatorKind::Sma), 5.0);
    }

    #[test]
    fn test_readiness_tracks_warm_up() {
        let mut series = Series::new(&params());
        series.update(100.0, 1, "2024-01-01");
        assert!(!series.is_ready(IndicatorKind::Ema));
        series.update(101.0, 1, "2024-01-01");
        assert!(series.is_ready(IndicatorKind::Ema));
        assert!(series.is_ready(IndicatorKind::Vwap));
        assert!(!series.is_ready(IndicatorKind::Sma));
        series.update(102.0, 1, "2024-01-01");
        assert!(series.is_ready(IndicatorKind::Sma));
        assert!(!series.is_ready(IndicatorKind::Volatility));
    }

    #[test]
    fn test_get_named() {
        let mut series = Series::new(&params());
        series.update(100.0, 1, "2024-01-01");
        series.update(102.0, 1, "2024-01-01");
        assert_eq!(series.get_named("sma").unwrap(), 102.0);
        assert_eq!(series.get_named("VWAP").unwrap(), 102.0);
        match series.get_named("rsi") {
            Err(IndicatorError::UnknownKind(name)) => assert_eq!(name, "rsi"),
            other => panic!("Expected UnknownKind, got {:?}", other),
        }
    }
}
