//! Chi-square distribution utilities.

use statrs::function::gamma::{gamma_ur, ln_gamma};
use toyfit_core::{Error, Result};

const LN_2: f64 = std::f64::consts::LN_2;

fn validate_ndf(k: usize) -> Result<f64> {
    if k == 0 {
        return Err(Error::InvalidConfiguration(
            "degrees of freedom must be >= 1".to_string(),
        ));
    }
    Ok(k as f64)
}

/// Upper-tail survival probability `P(X >= x)` for `X ~ ChiSquare(k)`.
///
/// Computed as the regularized upper incomplete gamma function
/// `Q(k/2, x/2)`. Strictly decreasing in `x` for fixed `k`; exactly 1 at
/// `x = 0`.
pub fn survival(x: f64, k: usize) -> Result<f64> {
    let kf = validate_ndf(k)?;
    if !x.is_finite() {
        return Err(Error::Computation(format!(
            "chi-square statistic must be finite, got {}",
            x
        )));
    }
    // x <= 0 is the lower support edge: the full upper tail remains.
    if x <= 0.0 {
        return Ok(1.0);
    }
    Ok(gamma_ur(0.5 * kf, 0.5 * x).clamp(0.0, 1.0))
}

/// Log-PDF of a ChiSquare(k) distribution at `x`.
///
/// Support: `x >= 0`.
pub fn logpdf(x: f64, k: usize) -> Result<f64> {
    let kf = validate_ndf(k)?;
    if x < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    let half_k = 0.5 * kf;
    if x == 0.0 {
        if k < 2 {
            return Ok(f64::INFINITY);
        }
        if k > 2 {
            return Ok(f64::NEG_INFINITY);
        }
        // k == 2 => exponential with rate 1/2
        return Ok(-LN_2);
    }
    Ok((half_k - 1.0) * x.ln() - 0.5 * x - half_k * LN_2 - ln_gamma(half_k))
}
