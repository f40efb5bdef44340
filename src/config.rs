//! Analysis configuration
//!
//! Explicit configuration for an analysis run: which symbols to analyze,
//! over which date range, against which benchmark, and with which
//! statistical parameters. Validation happens up front so that a bad
//! configuration aborts the run before any data is fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, RiskError};

/// Configuration for a portfolio risk analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Ticker symbols to analyze, in presentation order
    pub symbols: Vec<String>,

    /// First date of the analysis window (inclusive)
    pub start_date: NaiveDate,

    /// Last date of the analysis window (inclusive)
    pub end_date: NaiveDate,

    /// Benchmark index symbol used for beta
    #[serde(default = "default_benchmark")]
    pub benchmark: String,

    /// Annual risk-free rate used in the Sharpe ratio
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Lower-tail probability for historical VaR (e.g. 0.05 for the 5th percentile)
    #[serde(default = "default_var_confidence")]
    pub var_confidence: f64,

    /// Trading days per year used for annualization
    #[serde(default = "default_trading_days_per_year")]
    pub trading_days_per_year: f64,

    /// Maximum number of symbols allowed in one run
    #[serde(default = "default_max_portfolio_size")]
    pub max_portfolio_size: usize,
}

// Default value functions
fn default_benchmark() -> String {
    "^GSPC".to_string()
}

fn default_risk_free_rate() -> f64 {
    0.02
}

fn default_var_confidence() -> f64 {
    0.05
}

fn default_trading_days_per_year() -> f64 {
    252.0
}

fn default_max_portfolio_size() -> usize {
    20
}

impl AnalysisConfig {
    /// Create a configuration with default statistical parameters
    pub fn new(symbols: Vec<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            symbols,
            start_date,
            end_date,
            benchmark: default_benchmark(),
            risk_free_rate: default_risk_free_rate(),
            var_confidence: default_var_confidence(),
            trading_days_per_year: default_trading_days_per_year(),
            max_portfolio_size: default_max_portfolio_size(),
        }
    }

    /// Set the benchmark symbol
    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    /// Set the annual risk-free rate
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Set the VaR lower-tail probability
    pub fn with_var_confidence(mut self, confidence: f64) -> Self {
        self.var_confidence = confidence;
        self
    }

    /// Validate the configuration
    ///
    /// Called by the analyzer before any fetch; a failure here aborts the
    /// entire run.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(RiskError::ConfigError("symbol list is empty".to_string()));
        }

        if self.symbols.len() > self.max_portfolio_size {
            return Err(RiskError::ConfigError(format!(
                "portfolio has {} symbols, maximum is {}",
                self.symbols.len(),
                self.max_portfolio_size
            )));
        }

        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if symbol.trim().is_empty() {
                return Err(RiskError::ConfigError("blank symbol in list".to_string()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(RiskError::ConfigError(format!(
                    "duplicate symbol in list: {symbol}"
                )));
            }
        }

        if self.benchmark.trim().is_empty() {
            return Err(RiskError::ConfigError("benchmark symbol is empty".to_string()));
        }

        if self.start_date >= self.end_date {
            return Err(RiskError::ConfigError(format!(
                "start date {} is not before end date {}",
                self.start_date, self.end_date
            )));
        }

        if self.var_confidence <= 0.0 || self.var_confidence >= 1.0 {
            return Err(RiskError::InvalidConfidenceLevel(self.var_confidence));
        }

        if self.trading_days_per_year <= 0.0 {
            return Err(RiskError::ConfigError(format!(
                "trading days per year must be positive, got {}",
                self.trading_days_per_year
            )));
        }

        Ok(())
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RiskError::ConfigError(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|e| RiskError::ConfigError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AnalysisConfig {
        AnalysisConfig::new(
            vec!["AAPL".to_string(), "MSFT".to_string()],
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = sample_config();
        assert_eq!(config.benchmark, "^GSPC");
        assert_eq!(config.risk_free_rate, 0.02);
        assert_eq!(config.var_confidence, 0.05);
        assert_eq!(config.trading_days_per_year, 252.0);
        assert_eq!(config.max_portfolio_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_symbols_rejected() {
        let mut config = sample_config();
        config.symbols.clear();
        assert!(matches!(
            config.validate(),
            Err(RiskError::ConfigError(_))
        ));
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let mut config = sample_config();
        config.symbols.push("AAPL".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut config = sample_config();
        config.end_date = config.start_date;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let mut config = sample_config();
        config.var_confidence = 1.0;
        assert!(matches!(
            config.validate(),
            Err(RiskError::InvalidConfidenceLevel(_))
        ));

        config.var_confidence = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_portfolio_rejected() {
        let mut config = sample_config();
        config.symbols = (0..21).map(|i| format!("SYM{i}")).collect();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = sample_config().with_risk_free_rate(0.03);
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AnalysisConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.symbols, config.symbols);
        assert_eq!(parsed.risk_free_rate, 0.03);
    }

    #[test]
    fn test_yaml_defaults_applied() {
        let yaml = r#"
symbols: ["AAPL"]
start_date: 2024-01-02
end_date: 2024-06-28
"#;
        let config = AnalysisConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.benchmark, "^GSPC");
        assert_eq!(config.var_confidence, 0.05);
    }
}
