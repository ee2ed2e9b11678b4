//! Experiment configuration.
//!
//! The source material hard-codes these as per-script constants; here they
//! are an explicit, serializable parameter set validated before any
//! computation begins.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration of one repeated-experiment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Points per synthetic dataset (>= 3 so a 2-parameter fit keeps
    /// at least one degree of freedom)
    pub n_points: usize,
    /// Number of independent experiments (>= 1)
    pub n_experiments: usize,
    /// True intercept of the generating model
    pub alpha0: f64,
    /// True slope of the generating model
    pub alpha1: f64,
    /// Gaussian noise standard deviation, also used as the per-point
    /// measurement uncertainty (> 0)
    pub sigma_y: f64,
    /// RNG seed; the same seed and call sequence reproduce the batch
    /// bit for bit
    pub seed: u64,
}

impl ExperimentConfig {
    /// Check all parameters before any entropy is consumed.
    pub fn validate(&self) -> Result<()> {
        if self.n_points < 3 {
            return Err(Error::InvalidConfiguration(format!(
                "n_points must be >= 3, got {}",
                self.n_points
            )));
        }
        if self.n_experiments < 1 {
            return Err(Error::InvalidConfiguration("n_experiments must be >= 1".to_string()));
        }
        if !self.alpha0.is_finite() || !self.alpha1.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "true parameters must be finite, got alpha0={}, alpha1={}",
                self.alpha0, self.alpha1
            )));
        }
        if !self.sigma_y.is_finite() || self.sigma_y <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "sigma_y must be finite and > 0, got {}",
                self.sigma_y
            )));
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    /// The worked example used throughout the course material:
    /// nine points on x = 1..9 with unit noise.
    fn default() -> Self {
        Self {
            n_points: 9,
            n_experiments: 1000,
            alpha0: 3.6,
            alpha1: 0.3,
            sigma_y: 1.0,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_small_sample() {
        let cfg = ExperimentConfig { n_points: 2, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_bad_noise() {
        let cfg = ExperimentConfig { sigma_y: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = ExperimentConfig { sigma_y: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = ExperimentConfig { seed: 42, ..Default::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ExperimentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 42);
        assert_eq!(back.n_points, 9);
    }
}
