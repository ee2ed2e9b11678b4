//! Generic numerical optimizer.
//!
//! The external minimizer is deliberately pinned to an explicit contract
//! instead of a specific library's defaults: the caller supplies an
//! objective, starting values, and per-parameter bounds; the optimizer
//! reports best-fit parameters, the minimized objective value,
//! evaluation counts, and a convergence flag. Any solver honoring this
//! contract can replace the L-BFGS backend used here.

use argmin::core::{CostFunction, Executor, Gradient, State, TerminationReason, TerminationStatus};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use toyfit_core::{Error, Result};

/// Configuration of the L-BFGS minimization.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Maximum number of iterations
    pub max_iter: u64,
    /// Convergence tolerance on the gradient norm
    pub tol: f64,
    /// Number of corrections kept for the inverse-Hessian approximation
    pub m: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { max_iter: 200, tol: 1e-10, m: 10 }
    }
}

/// Result of one minimization.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best-fit parameters
    pub parameters: Vec<f64>,
    /// Objective value at the minimum
    pub fval: f64,
    /// Iterations performed
    pub n_iter: u64,
    /// Objective evaluations
    pub n_fev: usize,
    /// Gradient evaluations
    pub n_gev: usize,
    /// Whether the solver reported convergence
    pub converged: bool,
    /// Termination message from the solver
    pub message: String,
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizationResult(fval={:.6}, n_iter={}, n_fev={}, n_gev={}, converged={})",
            self.fval, self.n_iter, self.n_fev, self.n_gev, self.converged
        )
    }
}

/// Objective function contract for the minimizer.
pub trait ObjectiveFunction: Send + Sync {
    /// Evaluate the objective at `params`.
    fn eval(&self, params: &[f64]) -> Result<f64>;

    /// Gradient at `params`; central differences unless overridden.
    fn gradient(&self, params: &[f64]) -> Result<Vec<f64>> {
        let mut grad = vec![0.0; params.len()];
        for i in 0..params.len() {
            let eps = 1e-8 * params[i].abs().max(1.0);

            let mut plus = params.to_vec();
            plus[i] += eps;
            let f_plus = self.eval(&plus)?;

            let mut minus = params.to_vec();
            minus[i] -= eps;
            let f_minus = self.eval(&minus)?;

            grad[i] = (f_plus - f_minus) / (2.0 * eps);
        }
        Ok(grad)
    }
}

fn clamp_params(params: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    params.iter().zip(bounds.iter()).map(|(&v, &(lo, hi))| v.clamp(lo, hi)).collect()
}

#[derive(Default)]
struct EvalCounts {
    cost: AtomicUsize,
    grad: AtomicUsize,
}

/// Adapter exposing an [`ObjectiveFunction`] to argmin.
struct Problem<'a> {
    objective: &'a dyn ObjectiveFunction,
    bounds: &'a [(f64, f64)],
    counts: Arc<EvalCounts>,
}

impl CostFunction for Problem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        self.counts.cost.fetch_add(1, Ordering::Relaxed);
        let clamped = clamp_params(params, self.bounds);
        self.objective.eval(&clamped).map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

impl Gradient for Problem<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(
        &self,
        params: &Self::Param,
    ) -> std::result::Result<Self::Gradient, argmin::core::Error> {
        self.counts.grad.fetch_add(1, Ordering::Relaxed);
        let clamped = clamp_params(params, self.bounds);
        let mut g = self
            .objective
            .gradient(&clamped)
            .map_err(|e| argmin::core::Error::msg(e.to_string()))?;

        // At an active bound, zero any gradient component pointing
        // further outside so the line search cannot step into the flat
        // clamped region.
        const EPS: f64 = 1e-12;
        for (i, (&x, &(lo, hi))) in clamped.iter().zip(self.bounds.iter()).enumerate() {
            if x <= lo + EPS && g[i] > 0.0 {
                g[i] = 0.0;
            }
            if x >= hi - EPS && g[i] < 0.0 {
                g[i] = 0.0;
            }
        }
        Ok(g)
    }
}

/// L-BFGS minimizer with box constraints enforced by clamping.
pub struct LbfgsOptimizer {
    config: OptimizerConfig,
}

impl LbfgsOptimizer {
    /// Create a new optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Minimize `objective` starting from `init_params` within `bounds`.
    pub fn minimize(
        &self,
        objective: &dyn ObjectiveFunction,
        init_params: &[f64],
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult> {
        if init_params.len() != bounds.len() {
            return Err(Error::InvalidConfiguration(format!(
                "parameter and bounds length mismatch: {} != {}",
                init_params.len(),
                bounds.len()
            )));
        }

        let init_clamped = clamp_params(init_params, bounds);
        let counts = Arc::new(EvalCounts::default());
        let problem = Problem { objective, bounds, counts: counts.clone() };

        let linesearch = MoreThuenteLineSearch::new();
        // Argmin's default cost tolerance is near machine epsilon, which
        // tends to end runs with a max-iter verdict; tie it to the
        // gradient tolerance instead.
        let tol_cost = if self.config.tol == 0.0 { 0.0 } else { (0.1 * self.config.tol).max(1e-14) };
        let solver = LBFGS::new(linesearch, self.config.m)
            .with_tolerance_grad(self.config.tol)
            .map_err(|e| Error::InvalidConfiguration(format!("invalid gradient tolerance: {e}")))?
            .with_tolerance_cost(tol_cost)
            .map_err(|e| Error::InvalidConfiguration(format!("invalid cost tolerance: {e}")))?;

        let res = Executor::new(problem, solver)
            .configure(|state| state.param(init_clamped).max_iters(self.config.max_iter))
            .run()
            .map_err(|e| Error::Computation(format!("optimization failed: {}", e)))?;

        let state = res.state();
        let best = state
            .get_best_param()
            .ok_or_else(|| Error::Computation("no best parameters found".to_string()))?
            .clone();
        let termination = state.get_termination_status();
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
                | TerminationStatus::Terminated(TerminationReason::TargetCostReached)
        );

        Ok(OptimizationResult {
            parameters: clamp_params(&best, bounds),
            fval: state.get_best_cost(),
            n_iter: state.get_iter(),
            n_fev: counts.cost.load(Ordering::Relaxed),
            n_gev: counts.grad.load(Ordering::Relaxed),
            converged,
            message: termination.to_string(),
        })
    }
}

impl Default for LbfgsOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // f(x, y) = (x - 2)^2 + (y - 3)^2, minimum at (2, 3).
    struct Paraboloid;

    impl ObjectiveFunction for Paraboloid {
        fn eval(&self, params: &[f64]) -> Result<f64> {
            Ok((params[0] - 2.0).powi(2) + (params[1] - 3.0).powi(2))
        }
    }

    #[test]
    fn test_unbounded_minimum() {
        let optimizer = LbfgsOptimizer::default();
        let bounds = [(f64::NEG_INFINITY, f64::INFINITY); 2];
        let result = optimizer.minimize(&Paraboloid, &[0.0, 0.0], &bounds).unwrap();
        assert!(result.converged, "{}", result.message);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-6);
        assert!(result.fval < 1e-10);
        assert!(result.n_fev > 0);
    }

    #[test]
    fn test_minimum_pushed_to_bound() {
        let optimizer = LbfgsOptimizer::default();
        let bounds = [(0.0, 1.0), (0.0, 1.0)];
        let result = optimizer.minimize(&Paraboloid, &[0.5, 0.5], &bounds).unwrap();
        // Unconstrained minimum (2, 3) lies outside the box.
        assert!(result.parameters[0] <= 1.0 + 1e-12);
        assert!(result.parameters[1] <= 1.0 + 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let optimizer = LbfgsOptimizer::default();
        let result = optimizer.minimize(&Paraboloid, &[0.0], &[(0.0, 1.0); 2]);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_default_numerical_gradient() {
        let g = Paraboloid.gradient(&[0.0, 0.0]).unwrap();
        assert!((g[0] + 4.0).abs() < 1e-5);
        assert!((g[1] + 6.0).abs() < 1e-5);
    }
}
