//! Portfolio analyzer
//!
//! Runs the fetch -> returns -> metrics pipeline for every configured
//! symbol. Symbols are independent; a failure for one is caught at this
//! boundary, recorded, and never aborts the rest of the batch.
//! Configuration errors abort the run before any fetch.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::metrics::{MetricsCalculator, RiskMetricsRecord};
use crate::provider::MarketDataProvider;
use crate::report::{AnalysisReport, SymbolError};
use crate::series::ReturnSeries;

/// Portfolio risk analyzer
///
/// Owns the configuration and the market data provider, and produces an
/// `AnalysisReport` per run.
pub struct PortfolioAnalyzer {
    config: AnalysisConfig,
    provider: Box<dyn MarketDataProvider>,
}

impl PortfolioAnalyzer {
    /// Create an analyzer from a configuration and a data provider
    pub fn new(config: AnalysisConfig, provider: Box<dyn MarketDataProvider>) -> Self {
        Self { config, provider }
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis pipeline
    ///
    /// Fetches the benchmark first (its returns feed every beta), then
    /// analyzes each symbol in configured order. Per-symbol failures are
    /// downgraded to `SymbolError` entries in the report; a benchmark
    /// failure aborts the run.
    pub async fn run(&self) -> Result<AnalysisReport> {
        self.config.validate()?;

        info!(
            symbols = self.config.symbols.len(),
            benchmark = %self.config.benchmark,
            start = %self.config.start_date,
            end = %self.config.end_date,
            "Starting portfolio risk analysis"
        );

        let benchmark_prices = self
            .provider
            .fetch_prices(
                &self.config.benchmark,
                self.config.start_date,
                self.config.end_date,
            )
            .await?;
        let benchmark_returns = benchmark_prices.returns()?;
        debug!(
            observations = benchmark_returns.len(),
            "Benchmark returns ready"
        );

        let mut records = IndexMap::new();
        let mut returns = IndexMap::new();
        let mut errors = Vec::new();

        returns.insert(self.config.benchmark.clone(), benchmark_returns.clone());

        for symbol in &self.config.symbols {
            match self.analyze_symbol(symbol, &benchmark_returns).await {
                Ok((record, symbol_returns)) => {
                    info!(%symbol, "Computed risk metrics");
                    records.insert(symbol.clone(), record);
                    returns.insert(symbol.clone(), symbol_returns);
                }
                Err(error) => {
                    warn!(%symbol, %error, "Skipping symbol");
                    errors.push(SymbolError {
                        symbol: symbol.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            succeeded = records.len(),
            failed = errors.len(),
            "Analysis completed"
        );

        Ok(AnalysisReport {
            records,
            returns,
            errors,
            generated_at: Utc::now(),
        })
    }

    /// Fetch and compute the full metrics record for one symbol
    ///
    /// Any error here is terminal for the symbol; the caller records it and
    /// moves on.
    async fn analyze_symbol(
        &self,
        symbol: &str,
        benchmark_returns: &ReturnSeries,
    ) -> Result<(RiskMetricsRecord, ReturnSeries)> {
        let prices = self
            .provider
            .fetch_prices(symbol, self.config.start_date, self.config.end_date)
            .await?;
        debug!(%symbol, observations = prices.len(), "Fetched prices");

        let symbol_returns = prices.returns()?;

        // Pairwise statistics require a common date index
        let (stock, benchmark) = symbol_returns.align(benchmark_returns)?;

        let calculator = MetricsCalculator::new(
            stock,
            self.config.risk_free_rate,
            self.config.trading_days_per_year,
        );

        let record = RiskMetricsRecord {
            volatility: calculator.annualized_volatility(),
            beta: calculator.beta(&benchmark)?,
            sharpe_ratio: calculator.sharpe_ratio()?,
            var: calculator.historical_var(self.config.var_confidence)?,
            max_drawdown: calculator.max_drawdown()?,
            total_return: calculator.total_return()?,
        };

        Ok((record, symbol_returns))
    }
}
