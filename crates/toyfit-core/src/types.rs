//! Common data types for toyfit

use serde::{Deserialize, Serialize};

/// A single measured point: abscissa, ordinate, and the ordinate's
/// Gaussian standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Independent variable
    pub x: f64,
    /// Measured value
    pub y: f64,
    /// Standard deviation of `y` (must be > 0)
    pub sigma_y: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(x: f64, y: f64, sigma_y: f64) -> Self {
        Self { x, y, sigma_y }
    }
}

/// A fitted straight line `y = intercept + slope * x` with the standard
/// errors of both parameters.
///
/// Immutable after creation; owned by the [`FitResult`] it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Fitted intercept
    pub intercept: f64,
    /// Fitted slope
    pub slope: f64,
    /// Standard error of the intercept
    pub intercept_err: f64,
    /// Standard error of the slope
    pub slope_err: f64,
}

impl LinearModel {
    /// Number of free parameters of a straight-line model.
    pub const N_PARAMS: usize = 2;

    /// Create a new linear model
    pub fn new(intercept: f64, slope: f64, intercept_err: f64, slope_err: f64) -> Self {
        Self { intercept, slope, intercept_err, slope_err }
    }

    /// Model prediction at `x`
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Result of fitting one dataset and evaluating its goodness of fit.
///
/// Invariant: `p_value` is the upper-tail survival probability of the
/// chi-square distribution with `ndf` degrees of freedom evaluated at
/// `chi2`, so it is monotonically non-increasing in `chi2` for fixed `ndf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted model with parameter uncertainties
    pub model: LinearModel,
    /// Chi-square statistic (>= 0)
    pub chi2: f64,
    /// Degrees of freedom (>= 1)
    pub ndf: usize,
    /// Upper-tail probability P(X >= chi2 | X ~ ChiSquare(ndf))
    pub p_value: f64,
}

/// An ordered collection of [`FitResult`]s from repeated independent
/// experiments, populated in generation order.
///
/// The column accessors hand flat numeric arrays to downstream reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentBatch {
    /// Per-experiment fit results, in the order generated
    pub results: Vec<FitResult>,
}

impl ExperimentBatch {
    /// Create an empty batch with room for `n` results
    pub fn with_capacity(n: usize) -> Self {
        Self { results: Vec::with_capacity(n) }
    }

    /// Create a batch from already-collected results
    pub fn from_results(results: Vec<FitResult>) -> Self {
        Self { results }
    }

    /// Append one experiment's result
    pub fn push(&mut self, result: FitResult) {
        self.results.push(result);
    }

    /// Number of completed experiments
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if no experiment has completed
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Tail probabilities, one per experiment
    pub fn p_values(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.p_value).collect()
    }

    /// Chi-square statistics, one per experiment
    pub fn chi2s(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.chi2).collect()
    }

    /// Fitted slopes, one per experiment
    pub fn slopes(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.model.slope).collect()
    }

    /// Fitted intercepts, one per experiment
    pub fn intercepts(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.model.intercept).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict() {
        let m = LinearModel::new(3.6, 0.3, 0.7, 0.1);
        assert!((m.predict(0.0) - 3.6).abs() < 1e-15);
        assert!((m.predict(2.0) - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_batch_columns() {
        let m = LinearModel::new(1.0, 2.0, 0.1, 0.2);
        let mut batch = ExperimentBatch::with_capacity(2);
        batch.push(FitResult { model: m, chi2: 4.0, ndf: 7, p_value: 0.78 });
        batch.push(FitResult { model: m, chi2: 9.0, ndf: 7, p_value: 0.25 });

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.chi2s(), vec![4.0, 9.0]);
        assert_eq!(batch.p_values(), vec![0.78, 0.25]);
        assert_eq!(batch.slopes(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_fit_result_serde_roundtrip() {
        let r = FitResult {
            model: LinearModel::new(3.6, 0.3, 0.73, 0.13),
            chi2: 3.1,
            ndf: 7,
            p_value: 0.87,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: FitResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ndf, 7);
        assert!((back.model.slope - 0.3).abs() < 1e-15);
    }
}
