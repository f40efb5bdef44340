use thiserror::Error;

/// Errors produced by the risk analysis core
#[derive(Error, Debug)]
pub enum RiskError {
    /// Too few observations to compute returns or a metric
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The market data provider could not supply a series for a symbol/range
    #[error("Data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Degenerate denominator (constant benchmark, zero volatility)
    #[error("Division by zero in calculation: {0}")]
    DivisionByZero(String),

    /// VaR tail level outside the open interval (0, 1)
    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    /// Pairwise statistic invoked on series of unequal length
    #[error("Misaligned series: expected {expected} observations, got {actual}")]
    MisalignedSeries { expected: usize, actual: usize },

    /// Price series violates ordering or positivity constraints
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failure while writing exported output
    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<serde_yaml::Error> for RiskError {
    fn from(err: serde_yaml::Error) -> Self {
        RiskError::ConfigError(err.to_string())
    }
}

impl From<csv::Error> for RiskError {
    fn from(err: csv::Error) -> Self {
        RiskError::ExportError(err.to_string())
    }
}

/// Result type for risk analysis operations
pub type Result<T> = std::result::Result<T, RiskError>;
