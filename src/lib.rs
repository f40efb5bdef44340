//! # mra-core: Market Risk Analysis Core
//!
//! Computational core for a portfolio risk dashboard: builds daily return
//! series from historical prices, computes classical risk metrics
//! (annualized volatility, beta, Sharpe ratio, historical VaR, maximum
//! drawdown, total return), and aggregates per-symbol results into an
//! exportable report.
//!
//! ## Core Components
//!
//! - **MetricsCalculator**: the six risk metrics as pure functions of a
//!   return series
//! - **PortfolioAnalyzer**: per-symbol fetch-and-compute pipeline with
//!   partial-failure isolation
//! - **MarketDataProvider**: trait seam for the external price data source
//! - **AnalysisReport**: ordered result table, error list, CSV export,
//!   correlation matrix
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mra_core::{
//!     AnalysisConfig, MarketDataProvider, PortfolioAnalyzer, PricePoint, PriceSeries,
//!     StaticProvider,
//! };
//!
//! fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
//!     let points = closes
//!         .iter()
//!         .enumerate()
//!         .map(|(i, &close)| PricePoint {
//!             date: NaiveDate::from_ymd_opt(2024, 1, i as u32 + 1).unwrap(),
//!             close,
//!         })
//!         .collect();
//!     PriceSeries::new(symbol, points).unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = StaticProvider::with_series(vec![
//!         series("AAPL", &[100.0, 102.0, 101.0, 104.0, 103.0]),
//!         series("^GSPC", &[4000.0, 4030.0, 4010.0, 4060.0, 4045.0]),
//!     ]);
//!
//!     let config = AnalysisConfig::new(
//!         vec!["AAPL".to_string()],
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     );
//!
//!     let analyzer = PortfolioAnalyzer::new(config, Box::new(provider));
//!     let report = analyzer.run().await.unwrap();
//!
//!     let record = &report.records["AAPL"];
//!     assert!(record.volatility >= 0.0);
//!     assert!(record.max_drawdown <= 0.0);
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod report;
pub mod series;

pub use analyzer::PortfolioAnalyzer;
pub use config::AnalysisConfig;
pub use error::{Result, RiskError};
pub use metrics::{MetricsCalculator, RiskMetricsRecord};
pub use provider::{MarketDataProvider, StaticProvider};
pub use report::{AnalysisReport, SummaryRow, SymbolError};
pub use series::{PricePoint, PriceSeries, ReturnSeries};
