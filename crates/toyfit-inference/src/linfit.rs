//! Closed-form straight-line least squares.
//!
//! For a linear-in-parameters model with Gaussian errors the chi-square
//! minimization has an analytic solution via the method-of-moments sums,
//! so the fit is a direct evaluation: no iteration, no starting values,
//! no convergence criteria, and no local-minimum risk. The result is the
//! exact global minimum of `sum(((y_i - a0 - a1*x_i)/sigma_y)^2)` for the
//! homoscedastic case.

use toyfit_core::{Error, LinearModel, Observation, Result};

/// Relative threshold below which the design determinant is treated as
/// zero (all x values numerically identical).
const DEGENERACY_EPS: f64 = 1e-12;

/// Maximum relative spread of `sigma_y` across a dataset before it is
/// rejected as heteroscedastic.
const SIGMA_SPREAD_EPS: f64 = 1e-12;

/// Validate the dataset and return the common measurement uncertainty.
///
/// The closed-form error propagation below assumes one shared `sigma_y`;
/// a dataset with varying uncertainties is rejected rather than silently
/// mis-propagated (weighted least squares is out of scope).
fn common_sigma(data: &[Observation]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::InvalidConfiguration("dataset must be non-empty".to_string()));
    }
    let sigma = data[0].sigma_y;
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
        if (obs.sigma_y - sigma).abs() > SIGMA_SPREAD_EPS * sigma {
            return Err(Error::InvalidConfiguration(format!(
                "heteroscedastic dataset: sigma_y varies ({} vs {} at observation {})",
                sigma, obs.sigma_y, i
            )));
        }
    }
    Ok(sigma)
}

/// Fit `y = a0 + a1 * x` by closed-form least squares.
///
/// Fails with [`Error::DegenerateDesign`] when the design determinant
/// `Sxx*S - Sx^2` is zero or numerically indistinguishable from zero,
/// which happens only if all x values coincide.
pub fn fit_linear(data: &[Observation]) -> Result<LinearModel> {
    let sigma = common_sigma(data)?;

    let s = data.len() as f64;
    let mut sx = 0.0;
    let mut sxx = 0.0;
    let mut sy = 0.0;
    let mut sxy = 0.0;
    for obs in data {
        sx += obs.x;
        sxx += obs.x * obs.x;
        sy += obs.y;
        sxy += obs.x * obs.y;
    }

    let delta = sxx * s - sx * sx;
    if !delta.is_finite() {
        return Err(Error::Computation(format!("design determinant is {}", delta)));
    }
    if delta.abs() <= DEGENERACY_EPS * sxx * s {
        return Err(Error::DegenerateDesign);
    }

    let intercept = (sy * sxx - sxy * sx) / delta;
    let slope = (sxy * s - sy * sx) / delta;
    let intercept_err = sigma * (sxx / delta).sqrt();
    let slope_err = sigma * (s / delta).sqrt();

    let model = LinearModel::new(intercept, slope, intercept_err, slope_err);
    if !intercept.is_finite() || !slope.is_finite() {
        return Err(Error::Computation(format!(
            "non-finite fit parameters: intercept={}, slope={}",
            intercept, slope
        )));
    }
    Ok(model)
}
