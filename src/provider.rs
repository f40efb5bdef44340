//! Market data provider seam
//!
//! The core treats the data source as an opaque, potentially slow,
//! potentially failing collaborator behind the `MarketDataProvider` trait.
//! Network-backed implementations live outside this crate; `StaticProvider`
//! serves preloaded series for tests and demos.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::{Result, RiskError};
use crate::series::PriceSeries;

/// Market data provider trait
///
/// Given a symbol and a date range, supplies an ordered daily price series
/// or fails with `DataUnavailable`.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch adjusted close prices for `symbol` within [start, end]
    async fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;
}

/// In-memory provider backed by preloaded price series
#[derive(Debug, Default)]
pub struct StaticProvider {
    series: HashMap<String, PriceSeries>,
}

impl StaticProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a price series, keyed by its symbol
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().to_string(), series);
    }

    /// Create a provider preloaded with the given series
    pub fn with_series(series: Vec<PriceSeries>) -> Self {
        let mut provider = Self::new();
        for s in series {
            provider.insert(s);
        }
        provider
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let series = self.series.get(symbol).ok_or_else(|| RiskError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "unknown symbol".to_string(),
        })?;

        let sliced = series.slice(start, end);
        if sliced.is_empty() {
            return Err(RiskError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("no observations between {start} and {end}"),
            });
        }

        Ok(sliced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PricePoint;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample_series() -> PriceSeries {
        let points = (1..=10)
            .map(|d| PricePoint {
                date: date(d),
                close: 100.0 + d as f64,
            })
            .collect();
        PriceSeries::new("AAPL", points).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_within_range() {
        let provider = StaticProvider::with_series(vec![sample_series()]);

        let prices = provider
            .fetch_prices("AAPL", date(3), date(7))
            .await
            .unwrap();

        assert_eq!(prices.len(), 5);
        assert_eq!(prices.points()[0].date, date(3));
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let provider = StaticProvider::with_series(vec![sample_series()]);

        let result = provider.fetch_prices("NOPE", date(1), date(10)).await;
        assert!(matches!(
            result,
            Err(RiskError::DataUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_range() {
        let provider = StaticProvider::with_series(vec![sample_series()]);

        let result = provider.fetch_prices("AAPL", date(20), date(25)).await;
        assert!(result.is_err());
    }
}
