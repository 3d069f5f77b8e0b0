use axis_core::{AxisShaper, EstimatorCfg, ShaperCfg};
use rstest::rstest;

fn dz_cfg() -> ShaperCfg {
    ShaperCfg {
        deadzone_upper: 0.05,
        deadzone_lower: -0.05,
        saturation_upper: 0.9,
        saturation_lower: -0.9,
        invert: false,
        input_max: 1.0,
    }
}

fn estimator_cfg() -> EstimatorCfg {
    EstimatorCfg {
        escape_radius: Some(0.07),
        ..EstimatorCfg::default()
    }
}

#[rstest]
#[case(0.0)]
#[case(0.05)]
#[case(-0.05)]
#[case(0.031)]
fn deadzone_snaps_to_zero(#[case] raw: f64) {
    let mut shaper = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    assert_eq!(shaper.process(raw), 0.0);
}

#[test]
fn deadzone_does_not_touch_estimator_state() {
    let mut shaper = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    shaper.process(0.5); // seeds the estimator
    let before = shaper.estimator().clone();
    shaper.process(0.02); // dead-zone, bypasses the filter
    assert_eq!(shaper.estimator().estimate(), before.estimate());
    assert_eq!(
        shaper.estimator().estimation_error(),
        before.estimation_error()
    );
}

#[rstest]
#[case(0.9, 0.9)]
#[case(0.95, 0.9)]
#[case(1.0, 0.9)]
#[case(-0.9, -0.9)]
#[case(-1.0, -0.9)]
fn saturation_clamps(#[case] raw: f64, #[case] expected: f64) {
    let mut shaper = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    assert_eq!(shaper.process(raw), expected);
}

#[test]
fn endstop_passes_through_exactly_without_smoothing() {
    // Saturation at the full range so the end-stop is not pre-clamped.
    let cfg = ShaperCfg {
        deadzone_upper: 0.05,
        deadzone_lower: -0.05,
        saturation_upper: 1.0,
        saturation_lower: -1.0,
        invert: false,
        input_max: 1.0,
    };
    let mut shaper = AxisShaper::new(cfg, estimator_cfg()).unwrap();
    shaper.process(0.5); // give the filter some state
    assert_eq!(shaper.process(1.0), 1.0);
    assert_eq!(shaper.process(-1.0), -1.0);
}

#[test]
fn midrange_samples_are_smoothed() {
    let mut shaper = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    assert_eq!(shaper.process(0.5), 0.5, "first sample seeds the filter");
    let out = shaper.process(0.52);
    // Within the escape radius: blended strictly between estimate and raw.
    assert!(out > 0.5 && out < 0.52);
}

#[test]
fn inversion_negates_every_case() {
    let inverted = ShaperCfg {
        invert: true,
        ..dz_cfg()
    };
    let mut plain = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    let mut inv = AxisShaper::new(inverted, estimator_cfg()).unwrap();
    for raw in [0.02, 0.5, 0.52, 0.95, -0.95, 0.3] {
        let a = plain.process(raw);
        let b = inv.process(raw);
        assert_eq!(b, -a, "inversion must negate the output for raw={raw}");
    }
}

#[test]
fn reset_clears_filter_state() {
    let mut shaper = AxisShaper::new(dz_cfg(), estimator_cfg()).unwrap();
    shaper.process(0.5);
    shaper.reset();
    assert_eq!(shaper.estimator().estimate(), None);
    assert_eq!(shaper.process(0.3), 0.3, "reseeds after reset");
}

#[rstest]
#[case(ShaperCfg { input_max: 0.0, ..ShaperCfg::default() })]
#[case(ShaperCfg { input_max: f64::NAN, ..ShaperCfg::default() })]
#[case(ShaperCfg { deadzone_upper: -0.1, ..ShaperCfg::default() })]
#[case(ShaperCfg { deadzone_lower: 0.1, ..ShaperCfg::default() })]
#[case(ShaperCfg { deadzone_upper: 1.5, ..ShaperCfg::default() })]
#[case(ShaperCfg { saturation_upper: -1.0, saturation_lower: 1.0, ..ShaperCfg::default() })]
#[case(ShaperCfg { saturation_upper: 1.5, ..ShaperCfg::default() })]
#[case(ShaperCfg { saturation_lower: f64::NEG_INFINITY, ..ShaperCfg::default() })]
fn construction_rejects_bad_bounds(#[case] cfg: ShaperCfg) {
    assert!(AxisShaper::new(cfg, EstimatorCfg::default()).is_err());
}
