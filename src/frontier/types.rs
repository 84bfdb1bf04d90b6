//! # Frontier Types
//!
//! $$
//! \mathbf{w} \in \Delta^{n-1} \to \{\mathbb E[R_p],\ \sigma_p,\ S\}
//! $$
//!
//! Configuration and result containers for the random-portfolio simulator.

/// Runtime configuration for [`simulate`](crate::frontier::simulate).
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
  /// Number of random portfolios to draw.
  pub num_trials: usize,
  /// Risk-free rate in the same units as the annualized return.
  pub risk_free_rate: f64,
  /// Periods per year used for annualization (252 trading days).
  pub annualization_factor: f64,
  /// Base seed for reproducible draws; `None` uses a fresh seed per run.
  pub seed: Option<u64>,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      num_trials: 10_000,
      risk_free_rate: 0.018,
      annualization_factor: 252.0,
      seed: None,
    }
  }
}

/// One simulated random portfolio.
///
/// Immutable once computed. A zero-volatility draw keeps its slot in the
/// result set with a NaN Sharpe ratio; selection treats it as ineligible.
#[derive(Clone, Debug)]
pub struct SimulatedPortfolio {
  /// Long-only weights summing to 1, in asset order.
  pub weights: Vec<f64>,
  /// Annualized portfolio return.
  pub annualized_return: f64,
  /// Annualized portfolio volatility.
  pub annualized_volatility: f64,
  /// `(annualized_return - risk_free_rate) / annualized_volatility`, NaN for
  /// degenerate trials.
  pub sharpe_ratio: f64,
}

impl SimulatedPortfolio {
  /// Whether the trial produced no usable Sharpe ratio.
  pub fn is_degenerate(&self) -> bool {
    !self.sharpe_ratio.is_finite()
  }
}

/// Tabular frontier view for rendering/persistence collaborators.
///
/// One row per simulated portfolio: per-asset weights followed by
/// `portfolio_std_dev`, `portfolio_return`, `sharpe_ratio`.
#[derive(Clone, Debug)]
pub struct FrontierTable {
  /// Column labels: asset names then the three statistic columns.
  pub columns: Vec<String>,
  /// One row per trial.
  pub rows: Vec<Vec<f64>>,
}

impl FrontierTable {
  /// Flatten simulated portfolios into a table.
  pub fn from_portfolios(portfolios: &[SimulatedPortfolio], assets: &[String]) -> Self {
    let mut columns: Vec<String> = assets.to_vec();
    columns.push("portfolio_std_dev".to_string());
    columns.push("portfolio_return".to_string());
    columns.push("sharpe_ratio".to_string());

    let rows = portfolios
      .iter()
      .map(|p| {
        let mut row = p.weights.clone();
        row.push(p.annualized_volatility);
        row.push(p.annualized_return);
        row.push(p.sharpe_ratio);
        row
      })
      .collect();

    Self { columns, rows }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn frontier_table_orders_weights_before_statistics() {
    let portfolios = vec![SimulatedPortfolio {
      weights: vec![0.4, 0.6],
      annualized_return: 0.1,
      annualized_volatility: 0.2,
      sharpe_ratio: 0.5,
    }];
    let assets = vec!["A".to_string(), "B".to_string()];

    let table = FrontierTable::from_portfolios(&portfolios, &assets);
    assert_eq!(
      table.columns,
      vec!["A", "B", "portfolio_std_dev", "portfolio_return", "sharpe_ratio"]
    );
    assert_eq!(table.rows[0], vec![0.4, 0.6, 0.2, 0.1, 0.5]);
  }
}
