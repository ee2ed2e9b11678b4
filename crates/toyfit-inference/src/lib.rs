//! # toyfit-inference
//!
//! Statistical machinery for toyfit:
//! - synthetic linear dataset generation from a seedable random source
//! - the closed-form (analytic) straight-line least-squares fitter
//! - chi-square goodness-of-fit evaluation
//! - repeated toy experiments collected into batches
//! - a numerical cross-check fitter behind an explicit optimizer contract
//! - plain-text numeric table input
//!
//! ## Architecture
//!
//! Everything here consumes the shared types from `toyfit-core` and the
//! tail probabilities from `toyfit-prob`; randomness is always passed in
//! as an explicit generator so seeding and draw order stay under caller
//! control.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Toy experiment repetition: generate, fit, evaluate, accumulate.
pub mod experiment;
/// Chi-square goodness-of-fit evaluation.
pub mod gof;
/// Closed-form straight-line least squares.
pub mod linfit;
/// Numerical cross-check fit of the same chi-square objective.
pub mod numeric;
/// Generic numerical optimizer (L-BFGS backend).
pub mod optimizer;
/// Synthetic dataset generation.
pub mod sample;
/// Whitespace-delimited numeric table input.
pub mod table;

pub use experiment::{run_experiments, run_experiments_parallel, run_one};
pub use gof::goodness_of_fit;
pub use linfit::fit_linear;
pub use numeric::{fit_linear_numeric, ChiSquareObjective, NumericFit};
pub use optimizer::{LbfgsOptimizer, ObjectiveFunction, OptimizationResult, OptimizerConfig};
pub use sample::{exponential_sample, linear_dataset, uniform_sample};
pub use table::{dataset_from_table, dataset_with_sigma, parse_table, read_table};
