//! Input and output plumbing for the analyzer: line sources, the zero-copy
//! record parser, and the CSV record sink.

pub mod parser;
pub mod reader;
pub mod sink;
pub mod tokenizer;

pub use parser::parse_record;
pub use reader::LineReader;
pub use sink::{CsvSink, DEFAULT_PRECISION};
pub use tokenizer::{tokenize, FieldSpan, Fields, RECORD_FIELDS};
