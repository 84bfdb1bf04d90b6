//! # Ordinary Least Squares
//!
//! $$
//! \hat\beta = (X^\top X)^{-1} X^\top y,\qquad
//! \operatorname{se}(\hat\beta_j) = \sqrt{\hat\sigma^2 \,[(X^\top X)^{-1}]_{jj}}
//! $$
//!
//! Closed-form OLS fit with Student-t inference: coefficients, standard
//! errors, t-statistics, two-sided p-values and 95% confidence intervals.
//! Rows containing any non-finite value are removed before the fit (listwise
//! deletion, no imputation).

use nalgebra::DMatrix;
use nalgebra::DVector;
use prettytable::row;
use prettytable::Table;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::StudentsT;

use crate::error::AnalyticsError;
use crate::error::Result;

/// Label of the intercept row.
pub const INTERCEPT_NAME: &str = "const";

const CONFIDENCE_LEVEL: f64 = 0.95;

/// Inference for one regressor.
#[derive(Clone, Debug)]
pub struct RegressionRow {
  /// Regressor name; the intercept is labeled `"const"`.
  pub var: String,
  /// Fitted coefficient.
  pub coef: f64,
  /// Standard error of the coefficient.
  pub std_err: f64,
  /// t-statistic under the zero-coefficient null.
  pub t_stat: f64,
  /// Two-sided p-value.
  pub p_value: f64,
  /// Lower bound of the 95% confidence interval.
  pub ci_low: f64,
  /// Upper bound of the 95% confidence interval.
  pub ci_high: f64,
}

/// Full OLS fit: one row per regressor plus the intercept, with fit
/// diagnostics.
#[derive(Clone, Debug)]
pub struct RegressionResult {
  /// Per-regressor inference, factor columns first, intercept last.
  pub rows: Vec<RegressionRow>,
  /// Observations used after listwise deletion.
  pub n_observations: usize,
  /// Residual degrees of freedom.
  pub residual_df: usize,
  /// Coefficient of determination.
  pub r_squared: f64,
  /// Degrees-of-freedom adjusted R².
  pub adj_r_squared: f64,
}

impl RegressionResult {
  /// Render the coefficient table in a `summary()`-style layout.
  pub fn summary_table(&self) -> Table {
    let mut table = Table::new();
    table.add_row(row![
      "var", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
    ]);
    for r in &self.rows {
      table.add_row(row![
        r.var,
        format!("{:.4}", r.coef),
        format!("{:.4}", r.std_err),
        format!("{:.3}", r.t_stat),
        format!("{:.3}", r.p_value),
        format!("{:.4}", r.ci_low),
        format!("{:.4}", r.ci_high)
      ]);
    }
    table
  }
}

impl std::fmt::Display for RegressionResult {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.summary_table())
  }
}

fn two_sided_p(t: f64, dist: &StudentsT) -> f64 {
  if t.is_nan() {
    f64::NAN
  } else if t.is_infinite() {
    0.0
  } else {
    2.0 * (1.0 - dist.cdf(t.abs()))
  }
}

/// Fit OLS of `y` on the factor columns of `x` plus an appended intercept.
///
/// `x` holds one row per observation, one value per factor in `names` order.
/// Listwise deletion drops any row with a non-finite entry on either side.
/// Fails with [`AnalyticsError::InsufficientObservations`] when the usable
/// rows are not enough for inference (rows ≤ regressors + 1), and with
/// [`AnalyticsError::DegenerateInput`] on a singular design matrix.
pub fn fit_regression(y: &[f64], x: &[Vec<f64>], names: &[String]) -> Result<RegressionResult> {
  if x.len() != y.len() {
    return Err(AnalyticsError::invalid(format!(
      "dependent series has {} row(s) but the factor matrix has {}",
      y.len(),
      x.len()
    )));
  }
  if x.iter().any(|row| row.len() != names.len()) {
    return Err(AnalyticsError::invalid(
      "factor matrix rows do not match the regressor names",
    ));
  }

  // Listwise deletion.
  let usable: Vec<usize> = (0..y.len())
    .filter(|&i| y[i].is_finite() && x[i].iter().all(|v| v.is_finite()))
    .collect();

  let n = usable.len();
  let p = names.len() + 1; // + intercept
  if n <= p + 1 {
    return Err(AnalyticsError::InsufficientObservations {
      usable: n,
      regressors: p,
    });
  }

  let xm = DMatrix::from_fn(n, p, |i, j| {
    if j < names.len() {
      x[usable[i]][j]
    } else {
      1.0
    }
  });
  let yv = DVector::from_fn(n, |i, _| y[usable[i]]);

  let xtx = xm.transpose() * &xm;
  let xtx_inv = xtx
    .try_inverse()
    .ok_or_else(|| AnalyticsError::degenerate("singular design matrix (collinear regressors)"))?;
  let beta = &xtx_inv * xm.transpose() * &yv;

  let residuals = &yv - &xm * &beta;
  let rss = residuals.norm_squared();
  let df = n - p;
  let sigma2 = rss / df as f64;

  let y_mean = yv.sum() / n as f64;
  let tss: f64 = yv.iter().map(|v| (v - y_mean).powi(2)).sum();
  let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { f64::NAN };
  let adj_r_squared = if tss > 0.0 {
    1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / df as f64
  } else {
    f64::NAN
  };

  let dist = StudentsT::new(0.0, 1.0, df as f64)
    .map_err(|e| AnalyticsError::degenerate(format!("t-distribution: {e}")))?;
  let t_crit = dist.inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);

  let rows = (0..p)
    .map(|j| {
      let coef = beta[j];
      let std_err = (sigma2 * xtx_inv[(j, j)]).max(0.0).sqrt();
      let t_stat = coef / std_err;
      let var = if j < names.len() {
        names[j].clone()
      } else {
        INTERCEPT_NAME.to_string()
      };
      RegressionRow {
        var,
        coef,
        std_err,
        t_stat,
        p_value: two_sided_p(t_stat, &dist),
        ci_low: coef - t_crit * std_err,
        ci_high: coef + t_crit * std_err,
      }
    })
    .collect();

  Ok(RegressionResult {
    rows,
    n_observations: n,
    residual_df: df,
    r_squared,
    adj_r_squared,
  })
}
