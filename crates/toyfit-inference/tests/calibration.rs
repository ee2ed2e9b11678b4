//! End-to-end calibration tests for the toy-experiment pipeline.
//!
//! - p-values from a correctly-specified linear model must be uniform
//! - batches must be bit-reproducible under a fixed seed
//! - the analytic and numerical fitters must agree on the same dataset

use rand::rngs::StdRng;
use rand::SeedableRng;
use toyfit_core::ExperimentConfig;
use toyfit_inference::{
    exponential_sample, fit_linear, fit_linear_numeric, goodness_of_fit, linear_dataset,
    run_experiments, run_experiments_parallel, uniform_sample, OptimizerConfig,
};
use toyfit_prob::kolmogorov;

fn course_config() -> ExperimentConfig {
    ExperimentConfig {
        n_points: 9,
        n_experiments: 1000,
        alpha0: 3.6,
        alpha1: 0.3,
        sigma_y: 1.0,
        seed: 20260806,
    }
}

#[test]
fn p_values_are_uniform_for_correct_model() {
    let batch = run_experiments(&course_config()).unwrap();
    let p_values = batch.p_values();
    assert_eq!(p_values.len(), 1000);

    // Exact linear model with known Gaussian noise: chi2 follows
    // ChiSquare(7) exactly, so the p-values are Uniform(0, 1).
    let ks = kolmogorov::one_sample_uniform_test(&p_values).unwrap();
    assert!(
        ks.p_value > 1e-3,
        "p-value distribution rejected as non-uniform: D = {}, p = {}",
        ks.statistic,
        ks.p_value
    );

    let mean = p_values.iter().sum::<f64>() / p_values.len() as f64;
    assert!((mean - 0.5).abs() < 0.05, "p-value mean {} far from 0.5", mean);
}

#[test]
fn batches_are_bit_identical_under_a_fixed_seed() {
    let config = course_config();
    let a = run_experiments(&config).unwrap();
    let b = run_experiments(&config).unwrap();

    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.results.iter().zip(b.results.iter()) {
        assert_eq!(ra.chi2.to_bits(), rb.chi2.to_bits());
        assert_eq!(ra.p_value.to_bits(), rb.p_value.to_bits());
        assert_eq!(ra.model.intercept.to_bits(), rb.model.intercept.to_bits());
        assert_eq!(ra.model.slope.to_bits(), rb.model.slope.to_bits());
    }
}

#[test]
fn parallel_batch_is_reproducible_and_calibrated() {
    let config = course_config();
    let a = run_experiments_parallel(&config).unwrap();
    let b = run_experiments_parallel(&config).unwrap();
    assert_eq!(a.p_values(), b.p_values());

    let ks = kolmogorov::one_sample_uniform_test(&a.p_values()).unwrap();
    assert!(ks.p_value > 1e-3, "parallel p-values non-uniform: p = {}", ks.p_value);
}

#[test]
fn analytic_and_numeric_fits_agree_on_a_noisy_dataset() {
    let config = course_config();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let data =
        linear_dataset(config.n_points, config.alpha0, config.alpha1, config.sigma_y, &mut rng)
            .unwrap();

    let analytic = fit_linear(&data).unwrap();
    let numeric = fit_linear_numeric(&data, &OptimizerConfig::default()).unwrap();
    assert!(numeric.minimum.converged, "{}", numeric.minimum.message);

    assert!((numeric.model.intercept - analytic.intercept).abs() < 1e-6);
    assert!((numeric.model.slope - analytic.slope).abs() < 1e-6);
    assert!((numeric.model.intercept_err - analytic.intercept_err).abs() < 1e-6);
    assert!((numeric.model.slope_err - analytic.slope_err).abs() < 1e-6);

    let gof = goodness_of_fit(&data, &analytic).unwrap();
    assert!((numeric.chi2 - gof.chi2).abs() < 1e-6);

    // The design-driven uncertainties for nine points on x = 1..9.
    assert!((analytic.intercept_err - 0.7265).abs() < 1e-3);
    assert!((analytic.slope_err - 0.1291).abs() < 1e-3);
}

#[test]
fn batch_survives_json_roundtrip() {
    let config = ExperimentConfig { n_experiments: 5, ..course_config() };
    let batch = run_experiments(&config).unwrap();

    let json = serde_json::to_string(&batch).unwrap();
    let back: toyfit_core::ExperimentBatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), batch.len());
    assert_eq!(back.p_values(), batch.p_values());
    assert_eq!(back.chi2s(), batch.chi2s());
}

#[test]
fn two_sample_ks_separates_exponential_from_uniform() {
    let mut rng = StdRng::seed_from_u64(9);
    let uniform = uniform_sample(500, &mut rng).unwrap();
    let exponential = exponential_sample(500, 1.0, &mut rng).unwrap();

    let different = kolmogorov::two_sample_test(&uniform, &exponential).unwrap();
    assert!(different.p_value < 1e-6, "failed to separate: p = {}", different.p_value);

    let mut rng2 = StdRng::seed_from_u64(10);
    let uniform2 = uniform_sample(500, &mut rng2).unwrap();
    let same = kolmogorov::two_sample_test(&uniform, &uniform2).unwrap();
    assert!(same.p_value > 1e-3, "same distribution rejected: p = {}", same.p_value);
}
