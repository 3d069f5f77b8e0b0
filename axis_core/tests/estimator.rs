use axis_core::{Estimator, EstimatorCfg, EstimatorKind};
use rstest::rstest;

fn cfg_with_radius(radius: Option<f64>, settling: u32) -> EstimatorCfg {
    EstimatorCfg {
        kind: EstimatorKind::Adaptive,
        process_noise: 1.0,
        sensor_noise: 0.1,
        estimation_error: 0.1,
        escape_radius: radius,
        settling_samples: settling,
    }
}

#[rstest]
#[case(0.0)]
#[case(0.37)]
#[case(-1.0)]
#[case(1.0)]
fn first_sample_seeds_exactly(#[case] x: f64) {
    let mut est = Estimator::new(EstimatorCfg::default()).unwrap();
    assert_eq!(est.estimate(), None);
    assert_eq!(est.apply(x), x);
    assert_eq!(est.estimate(), Some(x));
}

#[test]
fn constant_input_stays_at_fixed_point() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.25);
    for _ in 0..50 {
        assert_eq!(est.apply(0.25), 0.25);
    }
}

#[test]
fn step_input_converges_monotonically() {
    // No radius: pure recursive smoothing, so the step is never escaped.
    let mut est = Estimator::new(cfg_with_radius(None, 1)).unwrap();
    est.apply(0.0);
    let mut prev = 0.0;
    for _ in 0..100 {
        let out = est.apply(1.0);
        assert!(out > prev, "estimate must increase toward the input");
        assert!(out < 1.0 + 1e-12, "estimate must not overshoot the input");
        prev = out;
    }
    assert!(prev > 0.99, "estimate should be close to the input by now");
}

#[test]
fn smoothing_uses_covariance_gain() {
    // gain = p / (p + r) = 0.1 / 0.2 = 0.5 on the second sample
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.0);
    let out = est.apply(0.02);
    assert!((out - 0.01).abs() < 1e-12);
    // p' = (1 - 0.5) * 0.1 + |0.0 - 0.01| * 1.0 = 0.06
    assert!((est.estimation_error() - 0.06).abs() < 1e-12);
}

#[test]
fn escape_snaps_to_raw_and_resets_covariance() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.0);
    est.apply(0.02); // perturb the covariance away from its initial value
    let out = est.apply(0.5);
    assert_eq!(out, 0.5, "escape must return the raw sample exactly");
    assert!(est.is_escaped());
    assert_eq!(est.estimate(), Some(0.5));
    assert_eq!(est.estimation_error(), 0.1, "covariance reset on escape");
}

#[test]
fn escape_triggers_only_beyond_radius() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.0);
    est.apply(0.07); // deviation == radius: not an escape
    assert!(!est.is_escaped());
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.0);
    est.apply(0.07 + 1e-9);
    assert!(est.is_escaped());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn settling_passes_through_exactly_n_samples(#[case] settling: u32) {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), settling)).unwrap();
    est.apply(0.0);
    est.apply(0.5); // escape
    assert!(est.is_escaped());

    // Drift within the radius of the tracked estimate: raw passthrough
    // for `settling` samples.
    let mut v = 0.5;
    for _ in 0..settling {
        v += 0.01;
        assert_eq!(est.apply(v), v);
        assert!(est.is_escaped());
    }

    // The sample that ends settling is itself smoothed in the same call.
    let raw = v + 0.01;
    let out = est.apply(raw);
    assert!(!est.is_escaped());
    assert_ne!(out, raw, "post-settling sample must be blended, not raw");
    assert!(out > v && out < raw);
}

#[test]
fn post_settling_sample_blends_with_reset_covariance() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.0);
    est.apply(0.5); // escape, covariance back to 0.1
    est.apply(0.5); // settling passthrough, counter 1 -> 0
    // Within radius of 0.5, so settling ends and this call smooths:
    // gain = 0.1 / 0.2 = 0.5 -> 0.5 + 0.5 * (0.45 - 0.5) = 0.475
    let out = est.apply(0.45);
    assert!((out - 0.475).abs() < 1e-12);
}

#[test]
fn new_escape_during_settling_restarts_tracking() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 3)).unwrap();
    est.apply(0.0);
    est.apply(0.5); // escape
    est.apply(0.51); // settling 3 -> 2
    // A second decisive move while settling re-enters escape mode.
    let out = est.apply(0.9);
    assert_eq!(out, 0.9);
    assert!(est.is_escaped());
}

#[test]
fn without_radius_escape_state_is_inert() {
    let mut est = Estimator::new(cfg_with_radius(None, 1)).unwrap();
    est.apply(0.0);
    for x in [1.0, -1.0, 0.5, -0.9] {
        est.apply(x);
        assert!(!est.is_escaped());
    }
}

#[test]
fn classic_kind_runs_predict_update_cycle() {
    let cfg = EstimatorCfg {
        kind: EstimatorKind::Classic,
        process_noise: 0.1,
        sensor_noise: 1.0,
        estimation_error: 1.0,
        escape_radius: None,
        settling_samples: 1,
    };
    let mut est = Estimator::new(cfg).unwrap();
    assert_eq!(est.apply(10.0), 10.0);
    // p = 1.0 + 0.1 = 1.1; k = 1.1 / 2.1; x = 10 + k * 5
    let out = est.apply(15.0);
    let k = 1.1 / 2.1;
    assert!((out - (10.0 + k * 5.0)).abs() < 1e-12);
    assert!(out > 10.0 && out < 15.0);
    assert!((est.estimation_error() - (1.0 - k) * 1.1).abs() < 1e-12);
}

#[test]
fn reset_returns_to_constructed_state() {
    let mut est = Estimator::new(cfg_with_radius(Some(0.07), 1)).unwrap();
    est.apply(0.1);
    est.apply(0.9); // escape
    est.reset();
    assert_eq!(est.estimate(), None);
    assert!(!est.is_escaped());
    assert_eq!(est.estimation_error(), 0.1);
    assert_eq!(est.apply(0.3), 0.3, "first sample after reset seeds again");
}

#[rstest]
#[case(EstimatorCfg { process_noise: 0.0, ..EstimatorCfg::default() })]
#[case(EstimatorCfg { process_noise: f64::NAN, ..EstimatorCfg::default() })]
#[case(EstimatorCfg { sensor_noise: -0.1, ..EstimatorCfg::default() })]
#[case(EstimatorCfg { estimation_error: 0.0, ..EstimatorCfg::default() })]
#[case(EstimatorCfg { estimation_error: f64::INFINITY, ..EstimatorCfg::default() })]
#[case(EstimatorCfg { escape_radius: Some(0.0), ..EstimatorCfg::default() })]
#[case(EstimatorCfg { escape_radius: Some(f64::NAN), ..EstimatorCfg::default() })]
fn construction_rejects_bad_config(#[case] cfg: EstimatorCfg) {
    assert!(Estimator::new(cfg).is_err());
}
