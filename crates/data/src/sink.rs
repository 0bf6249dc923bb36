use std::fmt::Write as _;
use std::io::Write;
use tickstats_core::{IndicatorKind, OutputRecord, RecordSink, StreamError};

/// Default number of decimal places for prices and indicator values.
pub const DEFAULT_PRECISION: usize = 6;

/// Writes output records as comma-separated rows.
///
/// Header: `timestamp,symbol,price,volume` followed by the selected indicator
/// columns. Text fields are written verbatim, never quoted.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    precision: usize,
    scratch: String,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self::with_precision(inner, DEFAULT_PRECISION)
    }

    pub fn with_precision(inner: W, precision: usize) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(inner);
        Self {
            writer,
            precision,
            scratch: String::with_capacity(32),
            rows: 0,
        }
    }

    /// Data rows written so far (the header is not counted).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    fn write_field(&mut self, field: &str) -> Result<(), StreamError> {
        self.writer
            .write_field(field)
            .map_err(|e| StreamError::Output(format!("Failed to write field: {}", e)))
    }

    fn write_float(&mut self, value: f64) -> Result<(), StreamError> {
        self.scratch.clear();
        // Writing into a String cannot fail.
        let _ = write!(self.scratch, "{:.*}", self.precision, value);
        self.writer
            .write_field(&self.scratch)
            .map_err(|e| StreamError::Output(format!("Failed to write field: {}", e)))
    }

    fn end_row(&mut self) -> Result<(), StreamError> {
        self.writer
            .write_record(None::<&[u8]>)
            .map_err(|e| StreamError::Output(format!("Failed to end row: {}", e)))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn begin(&mut self, columns: &[IndicatorKind]) -> Result<(), StreamError> {
        for name in ["timestamp", "symbol", "price", "volume"] {
            self.write_field(name)?;
        }
        for kind in columns {
            self.write_field(kind.column_name())?;
        }
        self.end_row()
    }

    fn emit(&mut self, out: &OutputRecord<'_>) -> Result<(), StreamError> {
        let record = &out.record;
        self.write_field(record.timestamp)?;
        self.write_field(record.symbol)?;
        self.write_float(record.price)?;

        self.scratch.clear();
        let _ = write!(self.scratch, "{}", record.volume);
        self.writer
            .write_field(&self.scratch)
            .map_err(|e| StreamError::Output(format!("Failed to write field: {}", e)))?;

        for (_, value) in out.indicator_values() {
            self.write_float(value)?;
        }
        self.end_row()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        self.writer.flush()?;
        Ok(())
    }
}
