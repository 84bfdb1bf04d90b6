//! # Factor Frame
//!
//! $$
//! \text{date} \to (f_1, \dots, f_k)
//! $$
//!
//! Dated records of named factor returns (market-minus-riskfree, size, value,
//! profitability, investment, risk-free rate, ...), width-validated at
//! construction. Missing observations are representable as NaN and removed by
//! listwise deletion during the fit.

use chrono::NaiveDate;

use crate::error::AnalyticsError;
use crate::error::Result;

/// One dated row of factor returns, in `factor_names` order.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorRow {
  /// Observation date.
  pub date: NaiveDate,
  /// Factor values, one per named factor.
  pub values: Vec<f64>,
}

impl FactorRow {
  /// Construct a row.
  pub fn new(date: NaiveDate, values: Vec<f64>) -> Self {
    Self { date, values }
  }
}

/// Validated factor return table joined to portfolio returns by date.
#[derive(Clone, Debug)]
pub struct FactorFrame {
  factor_names: Vec<String>,
  rows: Vec<FactorRow>,
}

impl FactorFrame {
  /// Validate and wrap factor rows.
  ///
  /// Every row must carry one value per factor name; dates must be unique
  /// and ascending.
  pub fn new(factor_names: Vec<String>, rows: Vec<FactorRow>) -> Result<Self> {
    if factor_names.is_empty() {
      return Err(AnalyticsError::invalid("factor frame has no factor columns"));
    }
    for (i, name) in factor_names.iter().enumerate() {
      if factor_names[..i].contains(name) {
        return Err(AnalyticsError::invalid(format!(
          "duplicate factor column `{name}`"
        )));
      }
    }
    for row in &rows {
      if row.values.len() != factor_names.len() {
        return Err(AnalyticsError::invalid(format!(
          "factor row at {} has {} value(s), expected {}",
          row.date,
          row.values.len(),
          factor_names.len()
        )));
      }
    }
    for w in rows.windows(2) {
      if w[1].date <= w[0].date {
        return Err(AnalyticsError::invalid(format!(
          "factor rows have non-increasing or duplicate date {}",
          w[1].date
        )));
      }
    }
    Ok(Self { factor_names, rows })
  }

  /// Factor column names in row order.
  pub fn factor_names(&self) -> &[String] {
    &self.factor_names
  }

  /// Dated factor rows.
  pub fn rows(&self) -> &[FactorRow] {
    &self.rows
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, 1).unwrap()
  }

  #[test]
  fn rejects_width_mismatched_rows() {
    let frame = FactorFrame::new(
      vec!["mkt_rf".to_string(), "smb".to_string()],
      vec![FactorRow::new(d(1), vec![0.5])],
    );
    assert!(matches!(frame, Err(AnalyticsError::InvalidInput { .. })));
  }

  #[test]
  fn rejects_duplicate_dates() {
    let frame = FactorFrame::new(
      vec!["mkt_rf".to_string()],
      vec![
        FactorRow::new(d(1), vec![0.5]),
        FactorRow::new(d(1), vec![0.6]),
      ],
    );
    assert!(matches!(frame, Err(AnalyticsError::InvalidInput { .. })));
  }

  #[test]
  fn rejects_duplicate_factor_names() {
    let frame = FactorFrame::new(
      vec!["smb".to_string(), "smb".to_string()],
      vec![FactorRow::new(d(1), vec![0.5, 0.6])],
    );
    assert!(matches!(frame, Err(AnalyticsError::InvalidInput { .. })));
  }
}
