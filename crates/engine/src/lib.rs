pub mod driver;
pub mod registry;

pub use driver::{LineOutcome, RunStats, StreamDriver};
pub use registry::SeriesRegistry;
