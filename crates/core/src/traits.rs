use crate::error::StreamError;
use crate::models::{IndicatorKind, OutputRecord};

// ---------------------------------------------------------------------------
// Line Source Trait
// ---------------------------------------------------------------------------

/// Pull-based supplier of raw input lines.
///
/// Each returned line borrows the source's internal buffer and is only valid
/// until the next call, so callers can stream arbitrarily large inputs without
/// allocating per line.
pub trait LineSource {
    /// The next line with its terminator stripped, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<&str>, StreamError>;
}

// ---------------------------------------------------------------------------
// Record Sink Trait
// ---------------------------------------------------------------------------

/// Destination for emitted output records.
pub trait RecordSink {
    /// Called once before any record, with the indicator columns fixed for the run.
    fn begin(&mut self, columns: &[IndicatorKind]) -> Result<(), StreamError>;

    /// Called for every emitted record.
    fn emit(&mut self, record: &OutputRecord<'_>) -> Result<(), StreamError>;

    /// Called once after the input is exhausted.
    fn finish(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}
