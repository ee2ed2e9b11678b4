//! Chi-square goodness-of-fit evaluation.

use toyfit_core::{Error, FitResult, LinearModel, Observation, Result};
use toyfit_prob::chi_squared;

/// Evaluate the chi-square goodness of fit of `model` on `data`.
///
/// Computes `chi2 = sum(((y_i - model.predict(x_i)) / sigma_y_i)^2)`,
/// the degrees of freedom `ndf = N - 2`, and the upper-tail survival
/// probability of ChiSquare(ndf) at `chi2`.
///
/// Fails with [`Error::InsufficientDegreesOfFreedom`] when the dataset
/// does not exceed the parameter count. A non-finite statistic is a
/// defect to surface, not a value to return.
pub fn goodness_of_fit(data: &[Observation], model: &LinearModel) -> Result<FitResult> {
    let n_obs = data.len();
    if n_obs <= LinearModel::N_PARAMS {
        return Err(Error::InsufficientDegreesOfFreedom {
            n_obs,
            n_params: LinearModel::N_PARAMS,
        });
    }

    let mut chi2 = 0.0;
    for (i, obs) in data.iter().enumerate() {
        if !obs.sigma_y.is_finite() || obs.sigma_y <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "observation {} has invalid sigma_y = {}",
                i, obs.sigma_y
            )));
        }
        let r = (obs.y - model.predict(obs.x)) / obs.sigma_y;
        chi2 += r * r;
    }
    if !chi2.is_finite() {
        return Err(Error::Computation(format!("chi-square statistic is {}", chi2)));
    }

    let ndf = n_obs - LinearModel::N_PARAMS;
    let p_value = chi_squared::survival(chi2, ndf)?;

    Ok(FitResult { model: *model, chi2, ndf, p_value })
}
