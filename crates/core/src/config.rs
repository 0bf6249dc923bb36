use crate::error::ConfigError;
use crate::models::IndicatorKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run configuration for the analyzer.
///
/// All four indicators are always computed with these parameters; the
/// `output_*` flags only decide which columns are emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Window size for the simple moving average.
    pub sma_window: usize,
    /// Span for the exponential moving average (alpha = 2 / (span + 1)).
    pub ema_span: usize,
    /// Window size (in returns) for rolling volatility.
    pub vol_window: usize,
    pub output_sma: bool,
    pub output_ema: bool,
    pub output_vol: bool,
    pub output_vwap: bool,
    /// Only rows for this symbol are processed when set.
    pub filter_symbol: Option<String>,
    /// Decimal places used when rendering prices and indicator values.
    pub precision: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sma_window: 20,
            ema_span: 50,
            vol_window: 30,
            output_sma: false,
            output_ema: false,
            output_vol: false,
            output_vwap: false,
            filter_symbol: None,
            precision: 6,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sma_window", self.sma_window),
            ("ema_span", self.ema_span),
            ("vol_window", self.vol_window),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroWindow(name));
            }
        }
        if matches!(self.filter_symbol.as_deref(), Some("")) {
            return Err(ConfigError::Invalid("filter_symbol must not be empty".into()));
        }
        Ok(())
    }

    pub fn ema_alpha(&self) -> f64 {
        span_to_alpha(self.ema_span)
    }

    /// Indicator construction parameters shared by every series in the run.
    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            sma_window: self.sma_window,
            ema_alpha: self.ema_alpha(),
            vol_window: self.vol_window,
        }
    }

    /// Indicators selected for output, in column order.
    pub fn selected_indicators(&self) -> Vec<IndicatorKind> {
        IndicatorKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                IndicatorKind::Sma => self.output_sma,
                IndicatorKind::Ema => self.output_ema,
                IndicatorKind::Volatility => self.output_vol,
                IndicatorKind::Vwap => self.output_vwap,
            })
            .collect()
    }
}

/// Immutable per-run parameters used to build each symbol's indicator set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub sma_window: usize,
    pub ema_alpha: f64,
    pub vol_window: usize,
}

/// EMA smoothing factor for a span: `2 / (span + 1)`.
pub fn span_to_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.sma_window, 20);
        assert_eq!(config.ema_span, 50);
        assert_eq!(config.vol_window, 30);
        assert!(config.selected_indicators().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_span_to_alpha() {
        assert_eq!(span_to_alpha(1), 1.0);
        assert_eq!(span_to_alpha(3), 0.5);
        assert!((span_to_alpha(50) - 0.0392156862745098).abs() < 1e-15);
    }

    #[test]
    fn test_toml_partial_override() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
            sma_window = 5
            output_sma = true
            output_vwap = true
            filter_symbol = "AAPL"
            "#,
        )
        .unwrap();
        assert_eq!(config.sma_window, 5);
        assert_eq!(config.ema_span, 50);
        assert_eq!(config.filter_symbol.as_deref(), Some("AAPL"));
        assert_eq!(
            config.selected_indicators(),
            vec![IndicatorKind::Sma, IndicatorKind::Vwap]
        );
    }

    #[test]
    fn test_toml_unknown_key_rejected() {
        let err = AnalyzerConfig::from_toml_str("rsi_window = 14").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = AnalyzerConfig {
            vol_window: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::ZeroWindow(name)) => assert_eq!(name, "vol_window"),
            other => panic!("Expected ZeroWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_params_derive_alpha_once() {
        let config = AnalyzerConfig {
            ema_span: 3,
            ..Default::default()
        };
        let params = config.indicator_params();
        assert_eq!(params.ema_alpha, 0.5);
        assert_eq!(params.sma_window, 20);
    }
}
