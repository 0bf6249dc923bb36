use crate::registry::SeriesRegistry;
use tickstats_core::{
    AnalyzerConfig, ConfigError, IndicatorKind, LineSource, OutputRecord, ParseError,
    RecordSink, StreamError,
};
use tickstats_data::parse_record;
use tracing::{debug, info};

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome<'a> {
    /// Zero-length line; skipped without parsing.
    Empty,
    /// Could not be parsed; skipped.
    Malformed(ParseError),
    /// Parsed, but its symbol is excluded by the filter. No series was touched.
    Filtered,
    /// Applied to its series and ready for output.
    Emitted(OutputRecord<'a>),
}

/// Tally of one [`StreamDriver::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_lines: u64,
    pub empty_lines: u64,
    pub parsed: u64,
    pub malformed: u64,
    pub filtered: u64,
    pub emitted: u64,
    pub symbols: usize,
}

/// Single-pass driver: every line is parsed, routed to its symbol's series,
/// and emitted with the indicator values as of after the update.
pub struct StreamDriver {
    config: AnalyzerConfig,
    columns: Vec<IndicatorKind>,
    registry: SeriesRegistry,
}

impl StreamDriver {
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let columns = config.selected_indicators();
        let registry = SeriesRegistry::new(config.indicator_params());
        Ok(Self {
            config,
            columns,
            registry,
        })
    }

    /// Indicator columns emitted for every record, fixed for the run.
    pub fn columns(&self) -> &[IndicatorKind] {
        &self.columns
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    pub fn process_line<'a>(&mut self, line: &'a str) -> LineOutcome<'a> {
        if line.is_empty() {
            return LineOutcome::Empty;
        }

        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => return LineOutcome::Malformed(e),
        };

        if let Some(filter) = self.config.filter_symbol.as_deref() {
            if record.symbol != filter {
                return LineOutcome::Filtered;
            }
        }

        let series = self.registry.get_or_create(record.symbol);
        series.update(record.price, record.volume, record.timestamp);

        let mut out = OutputRecord::new(record);
        for &kind in &self.columns {
            out.set(kind, series.get(kind));
        }
        LineOutcome::Emitted(out)
    }

    /// Stream every line of `source` into `sink`.
    ///
    /// The header is written before the first line. Malformed lines are
    /// counted and skipped; any source or sink failure ends the run.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<RunStats, StreamError>
    where
        S: LineSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        info!(
            columns = ?self.columns,
            filter = self.config.filter_symbol.as_deref().unwrap_or("*"),
            sma_window = self.config.sma_window,
            ema_span = self.config.ema_span,
            vol_window = self.config.vol_window,
            "Starting stream"
        );

        sink.begin(&self.columns)?;

        let mut stats = RunStats::default();
        while let Some(line) = source.next_line()? {
            stats.total_lines += 1;
            match self.process_line(line) {
                LineOutcome::Empty => stats.empty_lines += 1,
                LineOutcome::Malformed(e) => {
                    stats.malformed += 1;
                    debug!(line = stats.total_lines, error = %e, "Skipping malformed line");
                }
                LineOutcome::Filtered => {
                    stats.parsed += 1;
                    stats.filtered += 1;
                }
                LineOutcome::Emitted(out) => {
                    stats.parsed += 1;
                    sink.emit(&out)?;
                    stats.emitted += 1;
                }
            }
        }

        sink.finish()?;
        stats.symbols = self.registry.len();
        Ok(stats)
    }
}
