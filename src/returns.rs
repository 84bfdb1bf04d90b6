//! # Return Transforms
//!
//! $$
//! r_t = \frac{p_t - p_{t-1}}{p_{t-1}} \cdot 100,\qquad
//! c_t = \Big(\prod_{i \le t}\big(1 + r_i/100\big) - 1\Big) \cdot 100
//! $$
//!
//! Price-to-return pipeline: percent changes, cumulative compounding and
//! portfolio-level aggregation. Every transform is a pure function of its
//! input; callers pre-sort by date (construction of the containers enforces
//! ascending order).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::AnalyticsError;
use crate::error::Result;
use crate::series::CumulativeReturnSeries;
use crate::series::PriceSeries;
use crate::series::ReturnSeries;
use crate::series::SeriesPoint;
use crate::series::SymbolSeries;
use crate::series::PORTFOLIO_SYMBOL;

/// Output stage of the return pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnFormat {
  /// Raw prices, untransformed.
  Absolute,
  /// Period-over-period percent returns.
  #[default]
  Percentage,
  /// Cumulative compounded percent returns.
  CumulativePercentage,
}

impl ReturnFormat {
  /// Parse a format name; unknown names fall back to [`ReturnFormat::Percentage`].
  pub fn from_str(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "absolute" => Self::Absolute,
      "cumulative_percentage" | "cumulative" => Self::CumulativePercentage,
      _ => Self::Percentage,
    }
  }
}

/// Pipeline output for [`transform`].
#[derive(Clone, Debug)]
pub enum TransformedSeries {
  /// Prices passed through untouched.
  Absolute(PriceSeries),
  /// Percent returns.
  Percentage(ReturnSeries),
  /// Cumulative compounded percent returns.
  CumulativePercentage(CumulativeReturnSeries),
}

/// Run the pipeline up to the requested stage.
pub fn transform(prices: &PriceSeries, format: ReturnFormat) -> Result<TransformedSeries> {
  match format {
    ReturnFormat::Absolute => Ok(TransformedSeries::Absolute(prices.clone())),
    ReturnFormat::Percentage => Ok(TransformedSeries::Percentage(percentage_returns(prices)?)),
    ReturnFormat::CumulativePercentage => {
      let returns = percentage_returns(prices)?;
      Ok(TransformedSeries::CumulativePercentage(cumulative_returns(
        &returns,
      )))
    }
  }
}

/// Period-over-period percent change per symbol.
///
/// The first observation of every symbol is dropped, not zeroed; callers
/// needing a zero-anchored series call [`ReturnSeries::zero_anchored`]
/// afterwards. Fails with [`AnalyticsError::EmptySeries`] if any symbol has
/// fewer than 2 observations.
pub fn percentage_returns(prices: &PriceSeries) -> Result<ReturnSeries> {
  let mut out = Vec::with_capacity(prices.series().len());

  for s in prices.series() {
    if s.len() < 2 {
      debug!(symbol = %s.symbol, observations = s.len(), "too few observations for a return");
      return Err(AnalyticsError::EmptySeries {
        symbol: s.symbol.clone(),
        observations: s.len(),
        required: 2,
      });
    }

    let points = s
      .points
      .windows(2)
      .map(|w| {
        let change = (w[1].value - w[0].value) / w[0].value * 100.0;
        SeriesPoint::new(w[1].date, change)
      })
      .collect();

    out.push(SymbolSeries {
      symbol: s.symbol.clone(),
      points,
    });
  }

  ReturnSeries::new(out)
}

/// Compound percent returns into a cumulative percent index per symbol.
pub fn cumulative_returns(returns: &ReturnSeries) -> CumulativeReturnSeries {
  let series = returns
    .series()
    .iter()
    .map(|s| {
      let mut index = 1.0;
      let points = s
        .points
        .iter()
        .map(|p| {
          index *= 1.0 + p.value / 100.0;
          SeriesPoint::new(p.date, (index - 1.0) * 100.0)
        })
        .collect();
      SymbolSeries {
        symbol: s.symbol.clone(),
        points,
      }
    })
    .collect();

  CumulativeReturnSeries::from_parts(series)
}

/// Row-wise mean across symbols per date, as a single `"Portfolio"` column.
///
/// Symbols with no (or NaN) observation at a date are excluded from that
/// date's mean rather than treated as zero.
pub fn aggregate_across_portfolio(cumulative: &CumulativeReturnSeries) -> SymbolSeries {
  let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

  for s in cumulative.series() {
    for p in &s.points {
      if p.value.is_nan() {
        continue;
      }
      let entry = by_date.entry(p.date).or_insert((0.0, 0));
      entry.0 += p.value;
      entry.1 += 1;
    }
  }

  let points = by_date
    .into_iter()
    .map(|(date, (sum, count))| SeriesPoint::new(date, sum / count as f64))
    .collect();

  SymbolSeries {
    symbol: PORTFOLIO_SYMBOL.to_string(),
    points,
  }
}
