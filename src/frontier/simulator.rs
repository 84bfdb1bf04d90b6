//! # Random-Portfolio Simulator
//!
//! $$
//! \mathbb E[R_p] = \mathbf{w}^\top \mu \cdot A,\qquad
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}} \cdot \sqrt{A}
//! $$
//!
//! Draws `num_trials` uniform weight vectors on the long-only simplex and
//! evaluates annualized return, volatility and Sharpe ratio for each under
//! the closed-form mean/variance model. Trials are independent; the parallel
//! variant derives one RNG per trial from the base seed, so serial and
//! parallel runs with the same seed produce identical result sets.

use ndarray::Array1;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Uniform;
use rayon::prelude::*;
use tracing::debug;

use crate::error::AnalyticsError;
use crate::error::Result;
use crate::frontier::types::SimulatedPortfolio;
use crate::frontier::types::SimulationConfig;
use crate::series::ReturnSeries;

const SYMMETRY_TOL: f64 = 1e-8;
const EIGENVALUE_TOL: f64 = 1e-10;
const VOLATILITY_TOL: f64 = 1e-12;

/// Mean returns and sample covariance derived from a return series.
#[derive(Clone, Debug)]
pub struct SimulationInputs {
  /// Asset names in column order.
  pub assets: Vec<String>,
  /// Per-asset mean period return.
  pub mean_returns: Vec<f64>,
  /// Sample covariance matrix of period returns.
  pub cov_matrix: Vec<Vec<f64>>,
}

impl SimulationInputs {
  /// Compute mean returns and covariance over the dates shared by every
  /// symbol (inner join on date; non-finite observations are dropped from
  /// the join).
  ///
  /// Fails with [`AnalyticsError::EmptySeries`] when fewer than 2 common
  /// dates remain.
  pub fn from_returns(returns: &ReturnSeries) -> Result<Self> {
    let series = returns.series();
    if series.is_empty() {
      return Err(AnalyticsError::invalid("no symbols in return series"));
    }

    // Dates where every symbol has a finite observation.
    let mut common: Vec<chrono::NaiveDate> = series[0]
      .points
      .iter()
      .filter(|p| p.value.is_finite())
      .map(|p| p.date)
      .collect();
    for s in &series[1..] {
      common.retain(|date| {
        s.points
          .iter()
          .any(|p| p.date == *date && p.value.is_finite())
      });
    }

    if common.len() < 2 {
      return Err(AnalyticsError::EmptySeries {
        symbol: "common date range".to_string(),
        observations: common.len(),
        required: 2,
      });
    }

    let t = common.len();
    let n = series.len();
    let mut aligned = Array2::<f64>::zeros((t, n));
    for (j, s) in series.iter().enumerate() {
      for (i, date) in common.iter().enumerate() {
        // presence of every date was just verified
        let point = s.points.iter().find(|p| p.date == *date);
        if let Some(p) = point {
          aligned[(i, j)] = p.value;
        }
      }
    }

    let mean: Vec<f64> = (0..n)
      .map(|j| aligned.column(j).sum() / t as f64)
      .collect();

    let mut cov = vec![vec![0.0; n]; n];
    for i in 0..n {
      for j in i..n {
        let mut acc = 0.0;
        for k in 0..t {
          acc += (aligned[(k, i)] - mean[i]) * (aligned[(k, j)] - mean[j]);
        }
        let c = acc / (t - 1) as f64;
        cov[i][j] = c;
        cov[j][i] = c;
      }
    }

    Ok(Self {
      assets: returns.symbols().iter().map(|s| s.to_string()).collect(),
      mean_returns: mean,
      cov_matrix: cov,
    })
  }
}

fn validate_inputs(mean_returns: &[f64], cov_matrix: &[Vec<f64>]) -> Result<()> {
  let n = mean_returns.len();
  if n == 0 {
    return Err(AnalyticsError::degenerate("no assets to simulate"));
  }
  if cov_matrix.len() != n || cov_matrix.iter().any(|row| row.len() != n) {
    return Err(AnalyticsError::degenerate(format!(
      "covariance matrix is not {n}x{n}"
    )));
  }
  for i in 0..n {
    for j in 0..n {
      if !cov_matrix[i][j].is_finite() {
        return Err(AnalyticsError::degenerate(
          "covariance matrix has non-finite entries",
        ));
      }
      if (cov_matrix[i][j] - cov_matrix[j][i]).abs() > SYMMETRY_TOL {
        return Err(AnalyticsError::degenerate(
          "covariance matrix is not symmetric",
        ));
      }
    }
  }
  if mean_returns.iter().any(|m| !m.is_finite()) {
    return Err(AnalyticsError::degenerate(
      "mean returns have non-finite entries",
    ));
  }

  let m = nalgebra::DMatrix::from_fn(n, n, |i, j| cov_matrix[i][j]);
  let eigenvalues = m.symmetric_eigen().eigenvalues;
  let scale = eigenvalues.iter().fold(1.0_f64, |acc, e| acc.max(e.abs()));
  if eigenvalues.iter().any(|&e| e < -EIGENVALUE_TOL * scale) {
    return Err(AnalyticsError::degenerate(
      "covariance matrix is not positive semi-definite",
    ));
  }

  Ok(())
}

fn run_trial(
  mu: &Array1<f64>,
  sigma: &Array2<f64>,
  config: &SimulationConfig,
  rng: &mut StdRng,
) -> SimulatedPortfolio {
  let raw: Array1<f64> = Array1::random_using(mu.len(), Uniform::new(0.0, 1.0), rng);
  let weights = &raw / raw.sum();

  let annualized_return = mu.dot(&weights) * config.annualization_factor;
  let variance = weights.dot(&sigma.dot(&weights));
  let annualized_volatility = variance.max(0.0).sqrt() * config.annualization_factor.sqrt();

  let sharpe_ratio = if annualized_volatility > VOLATILITY_TOL {
    (annualized_return - config.risk_free_rate) / annualized_volatility
  } else {
    f64::NAN
  };

  SimulatedPortfolio {
    weights: weights.to_vec(),
    annualized_return,
    annualized_volatility,
    sharpe_ratio,
  }
}

fn base_seed(config: &SimulationConfig) -> u64 {
  config.seed.unwrap_or_else(|| rand::thread_rng().gen())
}

/// Simulate `config.num_trials` random long-only portfolios.
///
/// Each weight vector is drawn uniformly and normalized by its sum, so all
/// entries are non-negative and sum to 1. The result holds exactly
/// `num_trials` records; zero-volatility trials keep their slot with a NaN
/// Sharpe ratio instead of being retried or substituted.
pub fn simulate(
  mean_returns: &[f64],
  cov_matrix: &[Vec<f64>],
  config: &SimulationConfig,
) -> Result<Vec<SimulatedPortfolio>> {
  validate_inputs(mean_returns, cov_matrix)?;
  debug!(
    assets = mean_returns.len(),
    trials = config.num_trials,
    "simulating random portfolios"
  );

  let n = mean_returns.len();
  let mu = Array1::from_vec(mean_returns.to_vec());
  let sigma = Array2::from_shape_fn((n, n), |(i, j)| cov_matrix[i][j]);
  let seed = base_seed(config);

  Ok(
    (0..config.num_trials as u64)
      .map(|trial| {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial));
        run_trial(&mu, &sigma, config, &mut rng)
      })
      .collect(),
  )
}

/// Parallel variant of [`simulate`] over rayon's thread pool.
///
/// Each trial seeds its own RNG from the base seed and trial index; the
/// output is identical to the serial run for the same seed.
pub fn simulate_par(
  mean_returns: &[f64],
  cov_matrix: &[Vec<f64>],
  config: &SimulationConfig,
) -> Result<Vec<SimulatedPortfolio>> {
  validate_inputs(mean_returns, cov_matrix)?;
  debug!(
    assets = mean_returns.len(),
    trials = config.num_trials,
    "simulating random portfolios in parallel"
  );

  let n = mean_returns.len();
  let mu = Array1::from_vec(mean_returns.to_vec());
  let sigma = Array2::from_shape_fn((n, n), |(i, j)| cov_matrix[i][j]);
  let seed = base_seed(config);

  Ok(
    (0..config.num_trials as u64)
      .into_par_iter()
      .map(|trial| {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial));
        run_trial(&mu, &sigma, config, &mut rng)
      })
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frontier::selector::max_sharpe;
  use crate::series::SymbolSeries;
  use chrono::NaiveDate;

  fn config(trials: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
      num_trials: trials,
      risk_free_rate: 0.0,
      annualization_factor: 252.0,
      seed: Some(seed),
    }
  }

  fn two_asset_inputs() -> (Vec<f64>, Vec<Vec<f64>>) {
    (
      vec![0.01, 0.02],
      vec![vec![0.0004, 0.0], vec![0.0, 0.0001]],
    )
  }

  #[test]
  fn weights_are_long_only_and_sum_to_one() {
    let (mu, cov) = two_asset_inputs();
    let portfolios = simulate(&mu, &cov, &config(500, 7)).unwrap();

    for p in &portfolios {
      let sum: f64 = p.weights.iter().sum();
      assert!((sum - 1.0).abs() < 1e-9);
      assert!(p.weights.iter().all(|&w| w >= 0.0));
    }
  }

  #[test]
  fn produces_exactly_num_trials_records() {
    let (mu, cov) = two_asset_inputs();
    let portfolios = simulate(&mu, &cov, &config(1234, 3)).unwrap();
    assert_eq!(portfolios.len(), 1234);
  }

  #[test]
  fn same_seed_reproduces_the_same_portfolios() {
    let (mu, cov) = two_asset_inputs();
    let a = simulate(&mu, &cov, &config(50, 99)).unwrap();
    let b = simulate(&mu, &cov, &config(50, 99)).unwrap();

    for (x, y) in a.iter().zip(b.iter()) {
      assert_eq!(x.weights, y.weights);
      assert_eq!(x.sharpe_ratio.to_bits(), y.sharpe_ratio.to_bits());
    }
  }

  #[test]
  fn parallel_run_matches_serial_run() {
    let (mu, cov) = two_asset_inputs();
    let serial = simulate(&mu, &cov, &config(200, 11)).unwrap();
    let parallel = simulate_par(&mu, &cov, &config(200, 11)).unwrap();

    assert_eq!(serial.len(), parallel.len());
    for (s, p) in serial.iter().zip(parallel.iter()) {
      assert_eq!(s.weights, p.weights);
      assert_eq!(s.annualized_return, p.annualized_return);
    }
  }

  #[test]
  fn max_sharpe_favors_the_dominant_asset() {
    // Asset 1 has the higher mean and the lower variance; the best Sharpe
    // among 1000 trials must lean on it.
    let (mu, cov) = two_asset_inputs();
    let portfolios = simulate(&mu, &cov, &config(1000, 42)).unwrap();

    let best = max_sharpe(&portfolios).unwrap();
    assert!(best.weights[1] > 0.5);
  }

  #[test]
  fn zero_covariance_flags_trials_as_degenerate() {
    let mu = vec![0.01, 0.02];
    let cov = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
    let portfolios = simulate(&mu, &cov, &config(25, 5)).unwrap();

    assert_eq!(portfolios.len(), 25);
    assert!(portfolios.iter().all(|p| p.is_degenerate()));
  }

  #[test]
  fn rejects_non_positive_semi_definite_covariance() {
    let mu = vec![0.01, 0.02];
    let cov = vec![vec![1.0, 2.0], vec![2.0, 1.0]];

    assert!(matches!(
      simulate(&mu, &cov, &config(10, 1)),
      Err(AnalyticsError::DegenerateInput { .. })
    ));
  }

  #[test]
  fn rejects_mis_sized_covariance() {
    let mu = vec![0.01, 0.02];
    let cov = vec![vec![1.0]];

    assert!(matches!(
      simulate(&mu, &cov, &config(10, 1)),
      Err(AnalyticsError::DegenerateInput { .. })
    ));
  }

  #[test]
  fn inputs_from_returns_computes_mean_and_covariance() {
    let d = |m: u32| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
    let returns = ReturnSeries::new(vec![
      SymbolSeries::from_pairs("A", &[(d(1), 1.0), (d(2), 2.0), (d(3), 3.0)]),
      SymbolSeries::from_pairs("B", &[(d(1), 2.0), (d(2), 4.0), (d(3), 6.0)]),
    ])
    .unwrap();

    let inputs = SimulationInputs::from_returns(&returns).unwrap();
    assert_eq!(inputs.assets, vec!["A", "B"]);
    assert!((inputs.mean_returns[0] - 2.0).abs() < 1e-12);
    assert!((inputs.mean_returns[1] - 4.0).abs() < 1e-12);
    // var(A) = 1, var(B) = 4, cov = 2 with the n-1 denominator
    assert!((inputs.cov_matrix[0][0] - 1.0).abs() < 1e-12);
    assert!((inputs.cov_matrix[1][1] - 4.0).abs() < 1e-12);
    assert!((inputs.cov_matrix[0][1] - 2.0).abs() < 1e-12);
  }

  #[test]
  fn inputs_from_returns_requires_overlapping_dates() {
    let d = |m: u32| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
    let returns = ReturnSeries::new(vec![
      SymbolSeries::from_pairs("A", &[(d(1), 1.0), (d(2), 2.0)]),
      SymbolSeries::from_pairs("B", &[(d(3), 2.0), (d(4), 4.0)]),
    ])
    .unwrap();

    assert!(matches!(
      SimulationInputs::from_returns(&returns),
      Err(AnalyticsError::EmptySeries { .. })
    ));
  }
}
