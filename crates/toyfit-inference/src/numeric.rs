//! Numerical cross-check of the analytic fit.
//!
//! Minimizes half the chi-square objective with L-BFGS and derives the
//! parameter uncertainties from the inverted numerical Hessian. On a
//! linear model this must land on the same minimum as
//! [`crate::linfit::fit_linear`]; it exists so the closed-form result can
//! be validated against an iterative minimizer honoring the optimizer
//! contract.

use nalgebra::DMatrix;
use toyfit_core::{Error, LinearModel, Observation, Result};

use crate::optimizer::{LbfgsOptimizer, ObjectiveFunction, OptimizationResult, OptimizerConfig};

/// Half chi-square of a straight line on a fixed dataset.
///
/// The factor 1/2 makes the objective a negative log-likelihood up to an
/// additive constant, so the inverse Hessian at the minimum is directly
/// the parameter covariance.
pub struct ChiSquareObjective<'a> {
    data: &'a [Observation],
}

impl<'a> ChiSquareObjective<'a> {
    /// Wrap a dataset; inputs are validated once here.
    pub fn new(data: &'a [Observation]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidConfiguration("dataset must be non-empty".to_string()));
        }
        for (i, obs) in data.iter().enumerate() {
            if !obs.x.is_finite() || !obs.y.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "observation {} has non-finite coordinates (x={}, y={})",
                    i, obs.x, obs.y
                )));
            }
            if !obs.sigma_y.is_finite() || obs.sigma_y <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "observation {} has invalid sigma_y = {}",
                    i, obs.sigma_y
                )));
            }
        }
        Ok(Self { data })
    }

    fn check_dim(params: &[f64]) -> Result<()> {
        if params.len() != LinearModel::N_PARAMS {
            return Err(Error::InvalidConfiguration(format!(
                "expected {} parameters, got {}",
                LinearModel::N_PARAMS,
                params.len()
            )));
        }
        Ok(())
    }
}

impl ObjectiveFunction for ChiSquareObjective<'_> {
    fn eval(&self, params: &[f64]) -> Result<f64> {
        Self::check_dim(params)?;
        let (a0, a1) = (params[0], params[1]);
        let mut acc = 0.0;
        for obs in self.data {
            let r = (obs.y - (a0 + a1 * obs.x)) / obs.sigma_y;
            acc += r * r;
        }
        if !acc.is_finite() {
            return Err(Error::Computation(format!("chi-square objective is {}", acc)));
        }
        Ok(0.5 * acc)
    }

    fn gradient(&self, params: &[f64]) -> Result<Vec<f64>> {
        Self::check_dim(params)?;
        let (a0, a1) = (params[0], params[1]);
        let mut g0 = 0.0;
        let mut g1 = 0.0;
        for obs in self.data {
            let w = (obs.y - (a0 + a1 * obs.x)) / (obs.sigma_y * obs.sigma_y);
            g0 -= w;
            g1 -= w * obs.x;
        }
        Ok(vec![g0, g1])
    }
}

/// Outcome of the numerical fit.
#[derive(Debug, Clone)]
pub struct NumericFit {
    /// Fitted model with Hessian-derived uncertainties
    pub model: LinearModel,
    /// Chi-square at the minimum (twice the minimized objective)
    pub chi2: f64,
    /// Raw optimizer result (evaluation counts, convergence)
    pub minimum: OptimizationResult,
}

/// Hessian of the objective by forward differences of its gradient,
/// symmetrised.
fn compute_hessian(objective: &dyn ObjectiveFunction, best: &[f64]) -> Result<DMatrix<f64>> {
    let n = best.len();
    let grad_center = objective.gradient(best)?;

    let mut hessian = DMatrix::zeros(n, n);
    for j in 0..n {
        let eps = 1e-6 * best[j].abs().max(1.0);
        let mut params = best.to_vec();
        params[j] += eps;
        let grad_plus = objective.gradient(&params)?;
        for i in 0..n {
            hessian[(i, j)] = (grad_plus[i] - grad_center[i]) / eps;
        }
    }
    let ht = hessian.transpose();
    Ok((&hessian + &ht) * 0.5)
}

/// Invert the Hessian into a covariance matrix; `None` if it is not
/// usable as one (not positive definite and not cleanly invertible).
fn invert_hessian(hessian: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let n = hessian.nrows();
    if let Some(chol) = nalgebra::linalg::Cholesky::new(hessian.clone()) {
        return Some(chol.solve(&DMatrix::identity(n, n)));
    }
    let cov = hessian.clone().lu().try_inverse()?;
    for i in 0..n {
        let v = cov[(i, i)];
        if !(v.is_finite() && v > 0.0) {
            return None;
        }
    }
    Some(cov)
}

/// Fit `y = a0 + a1 * x` numerically by minimizing half chi-square.
pub fn fit_linear_numeric(
    data: &[Observation],
    config: &OptimizerConfig,
) -> Result<NumericFit> {
    let objective = ChiSquareObjective::new(data)?;

    // Start from the mean ordinate with zero slope; for a quadratic
    // objective the start only affects the iteration count.
    let y_mean = data.iter().map(|o| o.y).sum::<f64>() / data.len() as f64;
    let init = [y_mean, 0.0];
    let bounds = [(f64::NEG_INFINITY, f64::INFINITY); LinearModel::N_PARAMS];

    let minimum = LbfgsOptimizer::new(config.clone()).minimize(&objective, &init, &bounds)?;

    let hessian = compute_hessian(&objective, &minimum.parameters)?;
    let uncertainties = match invert_hessian(&hessian) {
        Some(cov) => (0..LinearModel::N_PARAMS).map(|i| cov[(i, i)].sqrt()).collect::<Vec<_>>(),
        None => {
            log::warn!("Hessian inversion failed, falling back to diagonal uncertainties");
            (0..LinearModel::N_PARAMS)
                .map(|i| 1.0 / hessian[(i, i)].abs().max(1e-12).sqrt())
                .collect()
        }
    };

    let model = LinearModel::new(
        minimum.parameters[0],
        minimum.parameters[1],
        uncertainties[0],
        uncertainties[1],
    );
    Ok(NumericFit { model, chi2: 2.0 * minimum.fval, minimum })
}
