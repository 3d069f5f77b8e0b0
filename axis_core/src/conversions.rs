//! `From` implementations bridging `axis_config` types to `axis_core` types.
//!
//! The shaper bridge is where dead-zone percentages become absolute
//! bounds: `pct / 100 * input_max`.

use crate::config::{EstimatorCfg, EstimatorKind, ShaperCfg};

// ── EstimatorKind ────────────────────────────────────────────────────────────

impl From<axis_config::EstimatorKind> for EstimatorKind {
    fn from(k: axis_config::EstimatorKind) -> Self {
        match k {
            axis_config::EstimatorKind::Adaptive => Self::Adaptive,
            axis_config::EstimatorKind::Classic => Self::Classic,
        }
    }
}

// ── EstimatorCfg ─────────────────────────────────────────────────────────────

impl From<&axis_config::EstimatorCfg> for EstimatorCfg {
    fn from(c: &axis_config::EstimatorCfg) -> Self {
        Self {
            kind: c.kind.into(),
            process_noise: c.process_noise,
            sensor_noise: c.sensor_noise,
            estimation_error: c.estimation_error,
            escape_radius: c.escape_radius,
            settling_samples: c.settling_samples,
        }
    }
}

// ── ShaperCfg ────────────────────────────────────────────────────────────────

impl From<&axis_config::AxisCfg> for ShaperCfg {
    fn from(c: &axis_config::AxisCfg) -> Self {
        Self {
            deadzone_upper: (c.deadzone_upper_pct / 100.0) * c.input_max,
            deadzone_lower: (c.deadzone_lower_pct / 100.0) * c.input_max,
            saturation_upper: c.saturation_upper,
            saturation_lower: c.saturation_lower,
            invert: c.invert,
            input_max: c.input_max,
        }
    }
}
