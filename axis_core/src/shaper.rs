//! Per-sample shaping around the estimator.
//!
//! Dead-zone, saturation, and end-stop handling run *before* the filter
//! so its internal state is only perturbed by samples in the interesting
//! dynamic range; a dead-zone sample snaps to zero immediately instead of
//! the filter lagging back to center after the control is released.

use crate::config::{EstimatorCfg, ShaperCfg};
use crate::error::{BuildError, Result};
use crate::estimator::Estimator;

#[derive(Debug, Clone)]
pub struct AxisShaper {
    cfg: ShaperCfg,
    estimator: Estimator,
}

impl AxisShaper {
    /// Validate both configs and construct the shaper with its owned
    /// estimator. Fails fast on inverted saturation bounds, dead-zone
    /// bounds on the wrong side of zero, or a non-positive input range.
    pub fn new(cfg: ShaperCfg, estimator: EstimatorCfg) -> Result<Self> {
        if !(cfg.input_max.is_finite() && cfg.input_max > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "input_max must be finite and > 0",
            )));
        }
        if !(cfg.deadzone_upper.is_finite() && (0.0..=cfg.input_max).contains(&cfg.deadzone_upper))
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "deadzone_upper must be in [0, input_max]",
            )));
        }
        if !(cfg.deadzone_lower.is_finite()
            && (-cfg.input_max..=0.0).contains(&cfg.deadzone_lower))
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "deadzone_lower must be in [-input_max, 0]",
            )));
        }
        if !cfg.saturation_upper.is_finite() || !cfg.saturation_lower.is_finite() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "saturation bounds must be finite",
            )));
        }
        if cfg.saturation_lower >= cfg.saturation_upper {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "saturation_lower must be < saturation_upper",
            )));
        }
        if cfg.saturation_upper > cfg.input_max || cfg.saturation_lower < -cfg.input_max {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "saturation bounds must be within [-input_max, input_max]",
            )));
        }
        let estimator = Estimator::new(estimator)?;
        Ok(Self { cfg, estimator })
    }

    /// Shape one raw sample. Ordered case evaluation, first match wins;
    /// only case 5 reaches the estimator.
    pub fn process(&mut self, raw: f64) -> f64 {
        let mut value = if raw >= self.cfg.deadzone_lower && raw <= self.cfg.deadzone_upper {
            // Center dead-zone: snapped, never smoothed.
            0.0
        } else if raw >= self.cfg.saturation_upper {
            self.cfg.saturation_upper
        } else if raw <= self.cfg.saturation_lower {
            self.cfg.saturation_lower
        } else if raw.abs() == self.cfg.input_max {
            // Mechanical end-stop: report exactly, zero smoothing latency.
            raw
        } else {
            self.estimator.apply(raw)
        };

        if self.cfg.invert {
            value = -value;
        }
        value
    }

    pub fn cfg(&self) -> &ShaperCfg {
        &self.cfg
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Clear the owned estimator's state; shaping config is untouched.
    pub fn reset(&mut self) {
        self.estimator.reset();
    }
}
