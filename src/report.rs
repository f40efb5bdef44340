//! Analysis report and export
//!
//! The report assembles one `RiskMetricsRecord` per successful symbol (in
//! configured order), the per-symbol error list, and the return series the
//! records were computed from. Export targets delimited text; chart
//! rendering is a downstream concern.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use nalgebra::DMatrix;
use statrs::statistics::Statistics;
use std::collections::BTreeSet;
use std::io::Write;

use crate::error::{Result, RiskError};
use crate::metrics::RiskMetricsRecord;
use crate::series::ReturnSeries;

/// A symbol whose analysis failed, with the terminal error
#[derive(Debug)]
pub struct SymbolError {
    /// Ticker symbol
    pub symbol: String,

    /// The error that ended the symbol's pipeline
    pub error: RiskError,
}

/// One presentation row of the summary table, percent-scaled and rounded
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub symbol: String,
    pub total_return_pct: f64,
    pub volatility_pct: f64,
    pub beta: f64,
    pub sharpe_ratio: f64,
    pub var_pct: f64,
    pub max_drawdown_pct: f64,
}

/// Result of one full analysis run
#[derive(Debug)]
pub struct AnalysisReport {
    /// Symbol -> metrics record, in configured symbol order
    pub records: IndexMap<String, RiskMetricsRecord>,

    /// Symbol -> daily return series (benchmark included)
    pub returns: IndexMap<String, ReturnSeries>,

    /// Symbols that failed, with their terminal errors
    pub errors: Vec<SymbolError>,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Build the percent-scaled summary rows
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.records
            .iter()
            .map(|(symbol, record)| SummaryRow {
                symbol: symbol.clone(),
                total_return_pct: round_to(record.total_return * 100.0, 2),
                volatility_pct: round_to(record.volatility * 100.0, 2),
                beta: round_to(record.beta, 3),
                sharpe_ratio: round_to(record.sharpe_ratio, 3),
                var_pct: round_to(record.var * 100.0, 2),
                max_drawdown_pct: round_to(record.max_drawdown * 100.0, 2),
            })
            .collect()
    }

    /// Write the summary table as CSV
    ///
    /// One row per successful symbol; columns are the six metric names.
    pub fn write_summary_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record([
            "Symbol",
            "Total Return (%)",
            "Volatility (%)",
            "Beta",
            "Sharpe Ratio",
            "VaR (%)",
            "Max Drawdown (%)",
        ])?;

        for row in self.summary_rows() {
            wtr.write_record([
                row.symbol.as_str(),
                &format!("{:.2}", row.total_return_pct),
                &format!("{:.2}", row.volatility_pct),
                &format!("{:.3}", row.beta),
                &format!("{:.3}", row.sharpe_ratio),
                &format!("{:.2}", row.var_pct),
                &format!("{:.2}", row.max_drawdown_pct),
            ])?;
        }

        wtr.flush().map_err(|e| RiskError::ExportError(e.to_string()))?;
        Ok(())
    }

    /// Write all daily return series as CSV
    ///
    /// Rows are the union of return dates across symbols; a symbol with no
    /// observation on a date gets an empty cell.
    pub fn write_returns_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["Date".to_string()];
        header.extend(self.returns.keys().cloned());
        wtr.write_record(&header)?;

        let dates: BTreeSet<_> = self
            .returns
            .values()
            .flat_map(|series| series.points().iter().map(|(d, _)| *d))
            .collect();

        for date in dates {
            let mut row = vec![date.to_string()];
            for series in self.returns.values() {
                row.push(match series.value_on(date) {
                    Some(value) => format!("{value:.6}"),
                    None => String::new(),
                });
            }
            wtr.write_record(&row)?;
        }

        wtr.flush().map_err(|e| RiskError::ExportError(e.to_string()))?;
        Ok(())
    }

    /// Serialize the metrics records as JSON for downstream consumers
    pub fn records_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| RiskError::ExportError(e.to_string()))
    }

    /// Pairwise Pearson correlation of the daily return series
    ///
    /// Returns the symbol labels and the correlation matrix in that order.
    /// Pairs are aligned to their common dates; a pair with fewer than 2
    /// common observations or a constant side yields NaN. Diagonal is 1.
    pub fn correlation_matrix(&self) -> (Vec<String>, DMatrix<f64>) {
        let symbols: Vec<String> = self.returns.keys().cloned().collect();
        let n = symbols.len();
        let mut matrix = DMatrix::from_element(n, n, f64::NAN);

        for i in 0..n {
            matrix[(i, i)] = 1.0;
            for j in (i + 1)..n {
                let value = correlation(&self.returns[i], &self.returns[j]);
                matrix[(i, j)] = value;
                matrix[(j, i)] = value;
            }
        }

        (symbols, matrix)
    }
}

/// Sample Pearson correlation over the common dates of two return series
fn correlation(a: &ReturnSeries, b: &ReturnSeries) -> f64 {
    let (left, right) = match a.align(b) {
        Ok(pair) => pair,
        Err(_) => return f64::NAN,
    };

    if left.len() < 2 {
        return f64::NAN;
    }

    let covariance = crate::metrics::sample_covariance(&left, &right);
    let sd_left = (&left[..]).std_dev();
    let sd_right = (&right[..]).std_dev();

    if sd_left == 0.0 || sd_right == 0.0 {
        return f64::NAN;
    }

    covariance / (sd_left * sd_right)
}

/// Round to `decimals` decimal places; NaN passes through
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
