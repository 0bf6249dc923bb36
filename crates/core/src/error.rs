// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Why a single input line was rejected. Always recoverable: the line is
/// skipped and the stream continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Expected 4 fields, found {found}")]
    FieldCount { found: usize },
    #[error("Invalid price '{0}'")]
    Price(String),
    #[error("Invalid volume '{0}'")]
    Volume(String),
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndicatorError {
    #[error("Unknown indicator kind: {0}")]
    UnknownKind(String),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroWindow(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Streaming I/O
// ---------------------------------------------------------------------------

/// Fatal failure at the input or output boundary. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output error: {0}")]
    Output(String),
}
