//! # Series Containers
//!
//! $$
//! \text{symbol} \times \text{date} \to \text{value}
//! $$
//!
//! Validated tabular time-series containers used at the library boundary.
//! Construction rejects malformed rows instead of letting NaNs drift past the
//! invariant checks downstream.

use chrono::NaiveDate;

use crate::error::AnalyticsError;
use crate::error::Result;

/// Column label produced by portfolio-level aggregation.
pub const PORTFOLIO_SYMBOL: &str = "Portfolio";

/// One dated observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
  /// Observation date. Monthly series use the first day of the month.
  pub date: NaiveDate,
  /// Observed value (price or percent return depending on the container).
  pub value: f64,
}

impl SeriesPoint {
  /// Construct a new point.
  pub fn new(date: NaiveDate, value: f64) -> Self {
    Self { date, value }
  }
}

/// Ordered observations for a single symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolSeries {
  /// Asset identifier.
  pub symbol: String,
  /// Observations in ascending date order.
  pub points: Vec<SeriesPoint>,
}

impl SymbolSeries {
  /// Construct a series from (date, value) pairs.
  pub fn from_pairs(symbol: impl Into<String>, pairs: &[(NaiveDate, f64)]) -> Self {
    Self {
      symbol: symbol.into(),
      points: pairs
        .iter()
        .map(|&(date, value)| SeriesPoint::new(date, value))
        .collect(),
    }
  }

  /// Number of observations.
  pub fn len(&self) -> usize {
    self.points.len()
  }

  /// Whether the series holds no observations.
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Values in date order.
  pub fn values(&self) -> Vec<f64> {
    self.points.iter().map(|p| p.value).collect()
  }

  fn check_dates(&self) -> Result<()> {
    for w in self.points.windows(2) {
      if w[1].date <= w[0].date {
        return Err(AnalyticsError::invalid(format!(
          "series `{}` has non-increasing or duplicate date {}",
          self.symbol, w[1].date
        )));
      }
    }
    Ok(())
  }
}

fn check_unique_symbols(series: &[SymbolSeries]) -> Result<()> {
  for (i, s) in series.iter().enumerate() {
    if series[..i].iter().any(|other| other.symbol == s.symbol) {
      return Err(AnalyticsError::invalid(format!(
        "duplicate symbol `{}`",
        s.symbol
      )));
    }
  }
  Ok(())
}

/// Historical prices per symbol, validated at construction.
///
/// Dates per symbol are strictly increasing and prices are finite and
/// positive; symbols are unique. Immutable once built.
#[derive(Clone, Debug)]
pub struct PriceSeries {
  series: Vec<SymbolSeries>,
}

impl PriceSeries {
  /// Validate and wrap symbol price columns.
  pub fn new(series: Vec<SymbolSeries>) -> Result<Self> {
    check_unique_symbols(&series)?;
    for s in &series {
      s.check_dates()?;
      for p in &s.points {
        if !p.value.is_finite() || p.value <= 0.0 {
          return Err(AnalyticsError::invalid(format!(
            "series `{}` has non-positive or non-finite price {} at {}",
            s.symbol, p.value, p.date
          )));
        }
      }
    }
    Ok(Self { series })
  }

  /// Per-symbol price columns.
  pub fn series(&self) -> &[SymbolSeries] {
    &self.series
  }

  /// Symbols in column order.
  pub fn symbols(&self) -> Vec<&str> {
    self.series.iter().map(|s| s.symbol.as_str()).collect()
  }
}

/// Period-over-period percent returns per symbol.
///
/// One observation shorter than the source price series; the first period has
/// no prior value. NaN entries are representable and skipped by aggregation.
#[derive(Clone, Debug)]
pub struct ReturnSeries {
  series: Vec<SymbolSeries>,
}

impl ReturnSeries {
  /// Validate and wrap symbol return columns.
  pub fn new(series: Vec<SymbolSeries>) -> Result<Self> {
    check_unique_symbols(&series)?;
    for s in &series {
      s.check_dates()?;
    }
    Ok(Self { series })
  }

  /// Per-symbol return columns.
  pub fn series(&self) -> &[SymbolSeries] {
    &self.series
  }

  /// Symbols in column order.
  pub fn symbols(&self) -> Vec<&str> {
    self.series.iter().map(|s| s.symbol.as_str()).collect()
  }

  /// Copy with the first retained observation of every symbol forced to 0.
  ///
  /// Anchors a subsequent cumulative index to 0%. Explicit caller opt-in;
  /// the percent-change transform itself never rewrites the first row.
  pub fn zero_anchored(&self) -> Self {
    let mut series = self.series.clone();
    for s in &mut series {
      if let Some(first) = s.points.first_mut() {
        first.value = 0.0;
      }
    }
    Self { series }
  }
}

/// Cumulative compounded percent returns per symbol.
///
/// Only ever derived from a [`ReturnSeries`]; never mutated independently.
#[derive(Clone, Debug)]
pub struct CumulativeReturnSeries {
  series: Vec<SymbolSeries>,
}

impl CumulativeReturnSeries {
  pub(crate) fn from_parts(series: Vec<SymbolSeries>) -> Self {
    Self { series }
  }

  /// Per-symbol cumulative return columns.
  pub fn series(&self) -> &[SymbolSeries] {
    &self.series
  }

  /// Symbols in column order.
  pub fn symbols(&self) -> Vec<&str> {
    self.series.iter().map(|s| s.symbol.as_str()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn price_series_rejects_non_positive_prices() {
    let s = SymbolSeries::from_pairs("AAPL", &[(d(2023, 1, 1), 100.0), (d(2023, 2, 1), -3.0)]);
    assert!(matches!(
      PriceSeries::new(vec![s]),
      Err(AnalyticsError::InvalidInput { .. })
    ));
  }

  #[test]
  fn price_series_rejects_duplicate_dates() {
    let s = SymbolSeries::from_pairs("AAPL", &[(d(2023, 1, 1), 100.0), (d(2023, 1, 1), 101.0)]);
    assert!(matches!(
      PriceSeries::new(vec![s]),
      Err(AnalyticsError::InvalidInput { .. })
    ));
  }

  #[test]
  fn price_series_rejects_duplicate_symbols() {
    let a = SymbolSeries::from_pairs("AAPL", &[(d(2023, 1, 1), 100.0)]);
    let b = SymbolSeries::from_pairs("AAPL", &[(d(2023, 1, 1), 101.0)]);
    assert!(matches!(
      PriceSeries::new(vec![a, b]),
      Err(AnalyticsError::InvalidInput { .. })
    ));
  }

  #[test]
  fn zero_anchor_rewrites_only_the_first_observation() {
    let s = SymbolSeries::from_pairs("AAPL", &[(d(2023, 2, 1), 10.0), (d(2023, 3, 1), 5.0)]);
    let returns = ReturnSeries::new(vec![s]).unwrap();
    let anchored = returns.zero_anchored();

    assert_eq!(anchored.series()[0].points[0].value, 0.0);
    assert_eq!(anchored.series()[0].points[1].value, 5.0);
    // source untouched
    assert_eq!(returns.series()[0].points[0].value, 10.0);
  }
}
