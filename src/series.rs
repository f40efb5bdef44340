//! Price and return series
//!
//! A `PriceSeries` is an ordered sequence of (date, adjusted close) pairs for
//! one symbol. Dates are strictly increasing; missing trading days are simply
//! absent. A `ReturnSeries` is derived from it by period-over-period
//! percentage change and is one element shorter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};

/// One daily observation: trading date and adjusted close price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date
    pub date: NaiveDate,

    /// Adjusted close price
    pub close: f64,
}

/// Ordered daily price history for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a price series, enforcing strictly increasing dates and
    /// positive prices
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();

        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(RiskError::InvalidSeries(format!(
                    "{symbol}: dates not strictly increasing at {}",
                    window[1].date
                )));
            }
        }

        if let Some(point) = points.iter().find(|p| !(p.close > 0.0)) {
            return Err(RiskError::InvalidSeries(format!(
                "{symbol}: non-positive price {} on {}",
                point.close, point.date
            )));
        }

        Ok(Self { symbol, points })
    }

    /// Symbol this series belongs to
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Underlying observations
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Restrict the series to dates within [start, end]
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();

        // Subsequence of an ordered series stays ordered
        Self {
            symbol: self.symbol.clone(),
            points,
        }
    }

    /// Build the daily return series
    ///
    /// `return[i] = price[i] / price[i-1] - 1`; the first observation has no
    /// prior reference and is dropped.
    pub fn returns(&self) -> Result<ReturnSeries> {
        if self.points.len() < 2 {
            return Err(RiskError::InsufficientData(format!(
                "{}: need at least 2 price points to compute returns, got {}",
                self.symbol,
                self.points.len()
            )));
        }

        let points = self
            .points
            .windows(2)
            .map(|w| (w[1].date, w[1].close / w[0].close - 1.0))
            .collect();

        Ok(ReturnSeries {
            symbol: self.symbol.clone(),
            points,
        })
    }
}

/// Ordered daily fractional returns for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSeries {
    symbol: String,
    points: Vec<(NaiveDate, f64)>,
}

impl ReturnSeries {
    /// Symbol this series belongs to
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of return observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dated observations
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Return values without dates
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, r)| *r).collect()
    }

    /// Look up the return on a specific date
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|i| self.points[i].1)
    }

    /// Align two return series to their common date index
    ///
    /// Pairwise statistics (beta) must operate on observations from the same
    /// dates. Returns the two equal-length value vectors restricted to the
    /// intersection of the date indexes.
    pub fn align(&self, other: &ReturnSeries) -> Result<(Vec<f64>, Vec<f64>)> {
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.points.len() && j < other.points.len() {
            let (da, ra) = self.points[i];
            let (db, rb) = other.points[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push(ra);
                    right.push(rb);
                    i += 1;
                    j += 1;
                }
            }
        }

        if left.is_empty() {
            return Err(RiskError::InsufficientData(format!(
                "{} and {} share no common dates",
                self.symbol, other.symbol
            )));
        }

        Ok((left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: date(1) + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        PriceSeries::new(symbol, points).unwrap()
    }

    #[test]
    fn test_returns_length() {
        let prices = series("AAPL", &[100.0, 101.0, 99.0, 103.0]);
        let returns = prices.returns().unwrap();
        assert_eq!(returns.len(), 3);
    }

    #[test]
    fn test_returns_values() {
        let prices = series("AAPL", &[100.0, 110.0, 121.0]);
        let returns = prices.returns().unwrap();
        let values = returns.values();

        assert_relative_eq!(values[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(values[1], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_returns_insufficient_data() {
        let prices = series("AAPL", &[100.0]);
        assert!(matches!(
            prices.returns(),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_non_increasing_dates_rejected() {
        let points = vec![
            PricePoint { date: date(2), close: 100.0 },
            PricePoint { date: date(2), close: 101.0 },
        ];
        assert!(matches!(
            PriceSeries::new("AAPL", points),
            Err(RiskError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let points = vec![
            PricePoint { date: date(1), close: 100.0 },
            PricePoint { date: date(2), close: 0.0 },
        ];
        assert!(PriceSeries::new("AAPL", points).is_err());
    }

    #[test]
    fn test_slice_filters_range() {
        let prices = series("AAPL", &[100.0, 101.0, 102.0, 103.0, 104.0]);
        let sliced = prices.slice(date(2), date(4));
        assert_eq!(sliced.len(), 3);
        assert_eq!(sliced.points()[0].date, date(2));
    }

    #[test]
    fn test_align_intersects_dates() {
        // Stock misses day 3, benchmark misses day 2
        let stock = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint { date: date(1), close: 100.0 },
                PricePoint { date: date(2), close: 101.0 },
                PricePoint { date: date(4), close: 103.0 },
                PricePoint { date: date(5), close: 104.0 },
            ],
        )
        .unwrap()
        .returns()
        .unwrap();

        let bench = PriceSeries::new(
            "^GSPC",
            vec![
                PricePoint { date: date(1), close: 50.0 },
                PricePoint { date: date(3), close: 51.0 },
                PricePoint { date: date(4), close: 52.0 },
                PricePoint { date: date(5), close: 53.0 },
            ],
        )
        .unwrap()
        .returns()
        .unwrap();

        let (a, b) = stock.align(&bench).unwrap();
        assert_eq!(a.len(), b.len());
        // Common return dates: day 4 and day 5
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_align_no_overlap() {
        let a = series("A", &[100.0, 101.0]).returns().unwrap();
        let b = PriceSeries::new(
            "B",
            vec![
                PricePoint { date: date(10), close: 100.0 },
                PricePoint { date: date(11), close: 101.0 },
            ],
        )
        .unwrap()
        .returns()
        .unwrap();

        assert!(a.align(&b).is_err());
    }

    proptest! {
        #[test]
        fn prop_returns_length_is_n_minus_one(closes in proptest::collection::vec(1.0f64..1000.0, 2..60)) {
            let prices = series("X", &closes);
            let returns = prices.returns().unwrap();
            prop_assert_eq!(returns.len(), closes.len() - 1);
        }
    }
}
