//! # quantfolio
//!
//! $$
//! \text{prices} \to \text{returns} \to
//! \big\{\text{efficient frontier},\ \text{factor attribution}\big\}
//! $$
//!
//! Portfolio return analytics: price-to-return transformation, Monte-Carlo
//! simulation of random long-only portfolios with Sharpe-ratio ranking, and
//! multi-factor OLS attribution of portfolio returns.
//!
//! The crate is a pure in-process library. Callers pass already-materialized
//! tabular data in ([`series::PriceSeries`], [`attribution::FactorFrame`])
//! and receive freshly constructed tables back; fetching, persistence and
//! rendering live with the callers. All computation is synchronous and
//! side-effect free; the simulator's trial loop additionally offers a rayon
//! variant ([`frontier::simulate_par`]) since trials are independent draws.
//!
//! ```
//! use chrono::NaiveDate;
//! use quantfolio::frontier;
//! use quantfolio::frontier::SimulationConfig;
//! use quantfolio::frontier::SimulationInputs;
//! use quantfolio::returns;
//! use quantfolio::series::PriceSeries;
//! use quantfolio::series::SymbolSeries;
//!
//! let d = |m: u32| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
//! let prices = PriceSeries::new(vec![
//!   SymbolSeries::from_pairs(
//!     "A",
//!     &[(d(1), 100.0), (d(2), 110.0), (d(3), 104.0), (d(4), 118.0)],
//!   ),
//!   SymbolSeries::from_pairs(
//!     "B",
//!     &[(d(1), 50.0), (d(2), 45.0), (d(3), 48.0), (d(4), 50.0)],
//!   ),
//! ])
//! .unwrap();
//!
//! let pct = returns::percentage_returns(&prices).unwrap();
//! let inputs = SimulationInputs::from_returns(&pct).unwrap();
//! let config = SimulationConfig {
//!   num_trials: 1000,
//!   seed: Some(42),
//!   ..Default::default()
//! };
//! let portfolios =
//!   frontier::simulate(&inputs.mean_returns, &inputs.cov_matrix, &config).unwrap();
//! let best = frontier::max_sharpe(&portfolios).unwrap();
//! assert!((best.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```

pub mod attribution;
pub mod error;
pub mod frontier;
pub mod returns;
pub mod series;

pub use error::AnalyticsError;
pub use error::Result;
