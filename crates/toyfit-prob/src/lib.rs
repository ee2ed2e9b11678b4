//! # toyfit-prob
//!
//! Probability building blocks for toyfit:
//! - chi-square distribution (upper-tail survival via the regularized
//!   incomplete gamma function, log-pdf)
//! - Kolmogorov–Smirnov statistics and the asymptotic Kolmogorov
//!   survival function
//!
//! These are consumed as pure functions taking numeric arguments and
//! returning probabilities in `[0, 1]`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chi_squared;
pub mod kolmogorov;

pub use kolmogorov::KsTest;
