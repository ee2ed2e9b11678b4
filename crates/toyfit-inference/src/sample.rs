//! Synthetic dataset generation.
//!
//! All generators take `&mut impl Rng`, so the caller owns seeding and
//! draw order; the same seed consumed in the same order reproduces
//! identical output. Inputs are checked before any entropy is consumed.

use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use toyfit_core::{Error, Observation, Result};

fn validate_count(n: usize) -> Result<()> {
    if n < 1 {
        return Err(Error::InvalidConfiguration("sample count must be >= 1".to_string()));
    }
    Ok(())
}

/// Generate `n` observations from the straight line
/// `y = alpha0 + alpha1 * x` with additive Gaussian noise of standard
/// deviation `sigma_y`.
///
/// The abscissas are `x_i = i + 1` for `i` in `[0, n)` and every
/// observation carries `sigma_y` as its measurement uncertainty.
pub fn linear_dataset<R: Rng + ?Sized>(
    n: usize,
    alpha0: f64,
    alpha1: f64,
    sigma_y: f64,
    rng: &mut R,
) -> Result<Vec<Observation>> {
    validate_count(n)?;
    if !alpha0.is_finite() || !alpha1.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "model parameters must be finite, got alpha0={}, alpha1={}",
            alpha0, alpha1
        )));
    }
    if !sigma_y.is_finite() || sigma_y <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "sigma_y must be finite and > 0, got {}",
            sigma_y
        )));
    }

    let noise = Normal::new(0.0, sigma_y)
        .map_err(|e| Error::InvalidConfiguration(format!("invalid noise distribution: {}", e)))?;

    Ok((0..n)
        .map(|i| {
            let x = (i + 1) as f64;
            let y = alpha0 + alpha1 * x + noise.sample(rng);
            Observation::new(x, y, sigma_y)
        })
        .collect())
}

/// Draw `n` uniform reals in `[0, 1)`.
pub fn uniform_sample<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<f64>> {
    validate_count(n)?;
    Ok((0..n).map(|_| rng.gen::<f64>()).collect())
}

/// Draw `n` exponential variates with the given `scale` (mean).
pub fn exponential_sample<R: Rng + ?Sized>(n: usize, scale: f64, rng: &mut R) -> Result<Vec<f64>> {
    validate_count(n)?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "scale must be finite and > 0, got {}",
            scale
        )));
    }
    let dist = Exp::new(1.0 / scale)
        .map_err(|e| Error::InvalidConfiguration(format!("invalid exponential rate: {}", e)))?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}
