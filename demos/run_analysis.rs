//! End-to-end demo: analyze a small synthetic portfolio and export CSV
//!
//! Run with: cargo run --example run_analysis

use chrono::NaiveDate;
use mra_core::{
    AnalysisConfig, PortfolioAnalyzer, PricePoint, PriceSeries, StaticProvider,
};

/// Deterministic synthetic price path: trend plus a couple of cycles
fn synthetic_series(symbol: &str, start_price: f64, drift: f64, swing: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let points = (0..120)
        .map(|i| {
            let t = i as f64;
            let cycle = (t / 9.0).sin() * swing + (t / 23.0).sin() * swing * 0.5;
            PricePoint {
                date: start + chrono::Duration::days(i),
                close: start_price * (1.0 + drift * t / 120.0) + cycle,
            }
        })
        .collect();

    PriceSeries::new(symbol, points).expect("synthetic series is ordered")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let provider = StaticProvider::with_series(vec![
        synthetic_series("AAPL", 180.0, 0.12, 4.0),
        synthetic_series("MSFT", 390.0, 0.08, 6.0),
        synthetic_series("TSLA", 240.0, -0.05, 18.0),
        synthetic_series("^GSPC", 4700.0, 0.06, 30.0),
    ]);

    let config = AnalysisConfig::new(
        vec![
            "AAPL".to_string(),
            "MSFT".to_string(),
            "TSLA".to_string(),
            "NVDA".to_string(), // not in the provider: exercises error isolation
        ],
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
    );

    let analyzer = PortfolioAnalyzer::new(config, Box::new(provider));
    let report = analyzer.run().await.expect("analysis run");

    println!("\n{:<8} {:>12} {:>12} {:>8} {:>8} {:>9} {:>14}",
        "Symbol", "Return (%)", "Vol (%)", "Beta", "Sharpe", "VaR (%)", "Drawdown (%)");
    for row in report.summary_rows() {
        println!(
            "{:<8} {:>12.2} {:>12.2} {:>8.3} {:>8.3} {:>9.2} {:>14.2}",
            row.symbol,
            row.total_return_pct,
            row.volatility_pct,
            row.beta,
            row.sharpe_ratio,
            row.var_pct,
            row.max_drawdown_pct,
        );
    }

    for failed in &report.errors {
        println!("skipped {}: {}", failed.symbol, failed.error);
    }

    let (symbols, correlations) = report.correlation_matrix();
    println!("\nReturns correlation ({} series):", symbols.len());
    for (i, symbol) in symbols.iter().enumerate() {
        let row: Vec<String> = (0..symbols.len())
            .map(|j| format!("{:>7.3}", correlations[(i, j)]))
            .collect();
        println!("{:<8} {}", symbol, row.join(" "));
    }

    let summary = std::fs::File::create("portfolio_risk_analysis.csv").expect("create csv");
    report.write_summary_csv(summary).expect("write summary csv");

    let returns = std::fs::File::create("portfolio_risk_analysis_returns.csv").expect("create csv");
    report.write_returns_csv(returns).expect("write returns csv");

    println!("\nExported portfolio_risk_analysis.csv and portfolio_risk_analysis_returns.csv");
}
