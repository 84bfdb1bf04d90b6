//! # Frontier Selection
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{p \in P} S(p)
//! $$
//!
//! Pure O(n) extremal scans over a simulated portfolio set. Degenerate trials
//! (NaN Sharpe) are ineligible for Sharpe selection; ties break toward lower
//! volatility.

use crate::error::AnalyticsError;
use crate::error::Result;
use crate::frontier::types::SimulatedPortfolio;

fn select_by<F>(portfolios: &[SimulatedPortfolio], better: F) -> Result<&SimulatedPortfolio>
where
  F: Fn(&SimulatedPortfolio, &SimulatedPortfolio) -> bool,
{
  let mut best: Option<&SimulatedPortfolio> = None;
  for p in portfolios {
    match best {
      Some(current) if !better(p, current) => {}
      _ => best = Some(p),
    }
  }
  best.ok_or(AnalyticsError::EmptyResultSet)
}

/// Portfolio with the highest Sharpe ratio.
///
/// Skips degenerate trials; fails with [`AnalyticsError::EmptyResultSet`]
/// when the set is empty or every trial is ineligible.
pub fn max_sharpe(portfolios: &[SimulatedPortfolio]) -> Result<&SimulatedPortfolio> {
  let eligible: Vec<&SimulatedPortfolio> =
    portfolios.iter().filter(|p| !p.is_degenerate()).collect();

  let mut best: Option<&SimulatedPortfolio> = None;
  for p in eligible {
    let replace = match best {
      None => true,
      Some(current) => {
        p.sharpe_ratio > current.sharpe_ratio
          || (p.sharpe_ratio == current.sharpe_ratio
            && p.annualized_volatility < current.annualized_volatility)
      }
    };
    if replace {
      best = Some(p);
    }
  }
  best.ok_or(AnalyticsError::EmptyResultSet)
}

/// Portfolio with the highest annualized return.
pub fn max_return(portfolios: &[SimulatedPortfolio]) -> Result<&SimulatedPortfolio> {
  select_by(portfolios, |p, current| {
    p.annualized_return > current.annualized_return
  })
}

/// Portfolio with the lowest annualized volatility.
pub fn min_volatility(portfolios: &[SimulatedPortfolio]) -> Result<&SimulatedPortfolio> {
  select_by(portfolios, |p, current| {
    p.annualized_volatility < current.annualized_volatility
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn portfolio(ret: f64, vol: f64, sharpe: f64) -> SimulatedPortfolio {
    SimulatedPortfolio {
      weights: vec![1.0],
      annualized_return: ret,
      annualized_volatility: vol,
      sharpe_ratio: sharpe,
    }
  }

  #[test]
  fn max_sharpe_picks_the_highest_ratio() {
    let set = vec![
      portfolio(0.1, 0.2, 0.5),
      portfolio(0.2, 0.2, 1.0),
      portfolio(0.15, 0.2, 0.75),
    ];

    let best = max_sharpe(&set).unwrap();
    assert_eq!(best.sharpe_ratio, 1.0);
  }

  #[test]
  fn max_sharpe_breaks_ties_toward_lower_volatility() {
    let set = vec![portfolio(0.2, 0.3, 1.0), portfolio(0.2, 0.1, 1.0)];

    let best = max_sharpe(&set).unwrap();
    assert_eq!(best.annualized_volatility, 0.1);
  }

  #[test]
  fn max_sharpe_skips_degenerate_trials() {
    let set = vec![portfolio(0.5, 0.0, f64::NAN), portfolio(0.1, 0.2, 0.5)];

    let best = max_sharpe(&set).unwrap();
    assert_eq!(best.sharpe_ratio, 0.5);
  }

  #[test]
  fn all_degenerate_trials_yield_empty_result_set() {
    let set = vec![portfolio(0.5, 0.0, f64::NAN)];

    assert!(matches!(
      max_sharpe(&set),
      Err(AnalyticsError::EmptyResultSet)
    ));
  }

  #[test]
  fn selection_is_idempotent() {
    let set = vec![
      portfolio(0.1, 0.2, 0.5),
      portfolio(0.2, 0.2, 1.0),
      portfolio(0.15, 0.2, 0.75),
    ];

    let first = max_sharpe(&set).unwrap().sharpe_ratio;
    let second = max_sharpe(&set).unwrap().sharpe_ratio;
    assert_eq!(first, second);
  }

  #[test]
  fn extremal_scans_over_empty_sets_fail() {
    assert!(matches!(max_return(&[]), Err(AnalyticsError::EmptyResultSet)));
    assert!(matches!(
      min_volatility(&[]),
      Err(AnalyticsError::EmptyResultSet)
    ));
  }

  #[test]
  fn max_return_and_min_volatility_scan_single_dimensions() {
    let set = vec![
      portfolio(0.1, 0.05, 0.5),
      portfolio(0.3, 0.4, 0.7),
      portfolio(0.2, 0.2, 0.9),
    ];

    assert_eq!(max_return(&set).unwrap().annualized_return, 0.3);
    assert_eq!(min_volatility(&set).unwrap().annualized_volatility, 0.05);
  }
}
