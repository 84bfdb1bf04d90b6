//! # Factor Attribution
//!
//! $$
//! r_{p,t} = \alpha + \sum_k \beta_k f_{k,t} + \varepsilon_t
//! $$
//!
//! Joins portfolio returns with factor-model returns by date and fits an
//! ordinary-least-squares regression to produce coefficient and significance
//! tables.

pub mod engine;
pub mod frame;
pub mod ols;

pub use engine::attribute;
pub use frame::FactorFrame;
pub use frame::FactorRow;
pub use ols::fit_regression;
pub use ols::RegressionResult;
pub use ols::RegressionRow;
