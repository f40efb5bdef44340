//! Risk metric calculations
//!
//! Implements the six classical risk metrics over a daily return series:
//! - Annualized Volatility: sample std-dev of daily returns x sqrt(252)
//! - Beta: covariance with the benchmark / benchmark variance
//! - Sharpe Ratio: excess return per unit of volatility, annualized
//! - Historical VaR: empirical lower-tail quantile of the return distribution
//! - Maximum Drawdown: largest peak-to-trough decline of cumulative wealth
//! - Total Return: cumulative product of (1 + return) minus 1
//!
//! All six are independent, deterministic pure functions of the same return
//! series; no state is carried between calls.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{Result, RiskError};

/// The fixed-shape record of metrics computed for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricsRecord {
    /// Annualized volatility (>= 0)
    pub volatility: f64,

    /// Beta relative to the benchmark
    pub beta: f64,

    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,

    /// Historical VaR at the configured tail level (typically negative)
    pub var: f64,

    /// Maximum drawdown, in [-1, 0]
    pub max_drawdown: f64,

    /// Total return over the period
    pub total_return: f64,
}

/// Risk metric calculator for one symbol's daily return series
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    returns: Vec<f64>,
    risk_free_rate: f64,
    trading_days: f64,
}

impl MetricsCalculator {
    /// Create a calculator over a daily return series
    ///
    /// `risk_free_rate` is annual; `trading_days` is the annualization
    /// constant (252 for daily equity data).
    pub fn new(returns: Vec<f64>, risk_free_rate: f64, trading_days: f64) -> Self {
        Self {
            returns,
            risk_free_rate,
            trading_days,
        }
    }

    /// Number of return observations
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Whether the calculator has no observations
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Calculate annualized volatility
    ///
    /// Sample standard deviation of daily returns, scaled by
    /// sqrt(trading days). Undefined (NaN) with fewer than 2 observations.
    pub fn annualized_volatility(&self) -> f64 {
        let daily = (&self.returns[..]).std_dev();
        daily * self.trading_days.sqrt()
    }

    /// Calculate beta relative to the benchmark
    ///
    /// Beta = Cov(stock, benchmark) / Var(benchmark), both as sample
    /// statistics so that a series regressed on itself gives exactly 1.
    pub fn beta(&self, benchmark: &[f64]) -> Result<f64> {
        if self.returns.len() != benchmark.len() {
            return Err(RiskError::MisalignedSeries {
                expected: self.returns.len(),
                actual: benchmark.len(),
            });
        }

        if self.returns.len() < 2 {
            return Err(RiskError::InsufficientData(
                "need at least 2 aligned observations for beta".to_string(),
            ));
        }

        let covariance = sample_covariance(&self.returns, benchmark);
        let benchmark_variance = benchmark.variance();

        if benchmark_variance == 0.0 {
            return Err(RiskError::DivisionByZero(
                "benchmark variance is zero".to_string(),
            ));
        }

        Ok(covariance / benchmark_variance)
    }

    /// Calculate the annualized Sharpe ratio
    ///
    /// Daily excess mean over daily std-dev, annualized by
    /// sqrt(trading days); the annual risk-free rate is de-annualized to a
    /// daily rate first.
    pub fn sharpe_ratio(&self) -> Result<f64> {
        if self.returns.len() < 2 {
            return Err(RiskError::InsufficientData(
                "need at least 2 observations for Sharpe ratio".to_string(),
            ));
        }

        let mean = (&self.returns[..]).mean();
        let std_dev = (&self.returns[..]).std_dev();

        if std_dev == 0.0 {
            return Err(RiskError::DivisionByZero(
                "volatility is zero".to_string(),
            ));
        }

        let daily_rf = self.risk_free_rate / self.trading_days;
        Ok((mean - daily_rf) / std_dev * self.trading_days.sqrt())
    }

    /// Calculate historical Value at Risk
    ///
    /// The linearly interpolated empirical quantile at the lower-tail
    /// probability `tail` (0.05 for the 5th percentile). No distributional
    /// assumption is made.
    pub fn historical_var(&self, tail: f64) -> Result<f64> {
        if tail <= 0.0 || tail >= 1.0 {
            return Err(RiskError::InvalidConfidenceLevel(tail));
        }

        if self.returns.is_empty() {
            return Err(RiskError::InsufficientData(
                "no returns for VaR".to_string(),
            ));
        }

        let mut sorted = self.returns.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        // Linear interpolation between order statistics
        let rank = tail * (sorted.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - lo as f64;

        Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }

    /// Calculate maximum drawdown
    ///
    /// Largest peak-to-trough decline of the cumulative wealth curve,
    /// expressed as a negative fraction. Zero only when the curve never
    /// declines.
    pub fn max_drawdown(&self) -> Result<f64> {
        if self.returns.is_empty() {
            return Err(RiskError::InsufficientData(
                "no returns for drawdown".to_string(),
            ));
        }

        let mut wealth = 1.0;
        let mut peak = 1.0;
        let mut max_dd = 0.0;

        for ret in &self.returns {
            wealth *= 1.0 + ret;
            if wealth > peak {
                peak = wealth;
            }

            let drawdown = wealth / peak - 1.0;
            if drawdown < max_dd {
                max_dd = drawdown;
            }
        }

        Ok(max_dd)
    }

    /// Calculate total return over the whole period
    pub fn total_return(&self) -> Result<f64> {
        if self.returns.is_empty() {
            return Err(RiskError::InsufficientData(
                "no returns for total return".to_string(),
            ));
        }

        let growth: f64 = self.returns.iter().map(|r| 1.0 + r).product();
        Ok(growth - 1.0)
    }
}

/// Unbiased sample covariance of two equal-length series
pub(crate) fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mean_a = (&a[..]).mean();
    let mean_b = (&b[..]).mean();

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / (a.len() - 1) as f64
}
