//! # Efficient Frontier
//!
//! $$
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}},\qquad
//! S = \frac{\mathbb E[R_p] - r_f}{\sigma_p}
//! $$
//!
//! Monte-Carlo simulation of random long-only weight vectors and extremal
//! selection over the simulated set.

pub mod selector;
pub mod simulator;
pub mod types;

pub use selector::max_return;
pub use selector::max_sharpe;
pub use selector::min_volatility;
pub use simulator::simulate;
pub use simulator::simulate_par;
pub use simulator::SimulationInputs;
pub use types::FrontierTable;
pub use types::SimulatedPortfolio;
pub use types::SimulationConfig;
