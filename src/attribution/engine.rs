//! # Attribution Engine
//!
//! Date-joins a portfolio return column with a factor frame and runs the OLS
//! fit. Attribution only covers the overlapping date range: rows present on
//! one side only are dropped by the inner join.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::attribution::frame::FactorFrame;
use crate::attribution::ols::fit_regression;
use crate::attribution::ols::RegressionResult;
use crate::error::Result;
use crate::series::SymbolSeries;

/// Regress portfolio returns on the factor columns over their common dates.
///
/// The dependent series is the portfolio return column; the regressors are
/// the frame's factors plus an appended intercept. A join with too little
/// overlap surfaces as
/// [`AnalyticsError::InsufficientObservations`](crate::error::AnalyticsError::InsufficientObservations)
/// from the fit.
pub fn attribute(portfolio: &SymbolSeries, factors: &FactorFrame) -> Result<RegressionResult> {
  let by_date: BTreeMap<NaiveDate, &[f64]> = factors
    .rows()
    .iter()
    .map(|row| (row.date, row.values.as_slice()))
    .collect();

  let mut y = Vec::new();
  let mut x = Vec::new();
  for point in &portfolio.points {
    if let Some(values) = by_date.get(&point.date) {
      y.push(point.value);
      x.push(values.to_vec());
    }
  }

  debug!(
    symbol = %portfolio.symbol,
    joined = y.len(),
    factors = factors.factor_names().len(),
    "joined portfolio returns with factor frame"
  );

  fit_regression(&y, &x, factors.factor_names())
}
