use crate::error::IndicatorError;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Indicator kinds
// ---------------------------------------------------------------------------

/// The fixed set of indicators maintained for every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma,
    Ema,
    Volatility,
    Vwap,
}

impl IndicatorKind {
    /// All kinds, in output column order.
    pub const ALL: [IndicatorKind; 4] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Volatility,
        IndicatorKind::Vwap,
    ];

    /// Column header used in the CSV output.
    pub fn column_name(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "sma",
            IndicatorKind::Ema => "ema",
            IndicatorKind::Volatility => "volatility",
            IndicatorKind::Vwap => "vwap",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(IndicatorKind::Sma),
            "ema" => Ok(IndicatorKind::Ema),
            "volatility" | "vol" => Ok(IndicatorKind::Volatility),
            "vwap" => Ok(IndicatorKind::Vwap),
            _ => Err(IndicatorError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One successfully parsed input line.
///
/// `timestamp` and `symbol` borrow from the raw line, so a record never
/// outlives the buffer it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRecord<'a> {
    pub timestamp: &'a str,
    pub symbol: &'a str,
    pub price: f64,
    pub volume: i64,
}

/// A parsed record paired with the indicator values selected for output.
///
/// Each indicator field is `Some` exactly when that column is part of the
/// run's output; the values reflect the series state after the record itself
/// has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRecord<'a> {
    pub record: ParsedRecord<'a>,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub volatility: Option<f64>,
    pub vwap: Option<f64>,
}

impl<'a> OutputRecord<'a> {
    pub fn new(record: ParsedRecord<'a>) -> Self {
        Self {
            record,
            sma: None,
            ema: None,
            volatility: None,
            vwap: None,
        }
    }

    pub fn set(&mut self, kind: IndicatorKind, value: f64) {
        let slot = match kind {
            IndicatorKind::Sma => &mut self.sma,
            IndicatorKind::Ema => &mut self.ema,
            IndicatorKind::Volatility => &mut self.volatility,
            IndicatorKind::Vwap => &mut self.vwap,
        };
        *slot = Some(value);
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<f64> {
        match kind {
            IndicatorKind::Sma => self.sma,
            IndicatorKind::Ema => self.ema,
            IndicatorKind::Volatility => self.volatility,
            IndicatorKind::Vwap => self.vwap,
        }
    }

    /// Selected indicator values in column order.
    pub fn indicator_values(&self) -> impl Iterator<Item = (IndicatorKind, f64)> + '_ {
        IndicatorKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|v| (kind, v)))
    }
}
