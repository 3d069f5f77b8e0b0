//! Scalar recursive estimator with a threshold-escape mode.
//!
//! While the input hovers around a point, samples are smoothed with a
//! Kalman-style recursive update. When a sample deviates from the current
//! estimate by more than the configured escape radius, smoothing is
//! abandoned: the filter snaps to the raw value and keeps passing raw
//! values through for `settling_samples` further calls, then re-engages
//! the recursive update starting with the sample that ended the settling
//! period (that sample is smoothed, not dropped).
//!
//! `apply` is total: every finite input yields a value, including the very
//! first sample (which seeds the estimate) and arbitrarily dense escape
//! sequences.

use crate::config::{EstimatorCfg, EstimatorKind};
use crate::error::{BuildError, Result};

#[derive(Debug, Clone)]
pub struct Estimator {
    kind: EstimatorKind,
    process_noise: f64,
    sensor_noise: f64,
    /// Running estimation error covariance; invariant: > 0.
    estimation_error: f64,
    /// Constructor-time covariance, restored on escape and on reset.
    estimation_error_initial: f64,
    /// `None` exactly until the first sample is applied.
    estimate: Option<f64>,
    escape_radius: Option<f64>,
    settling_samples: u32,
    /// Samples remaining in raw passthrough after an escape.
    settling_left: u32,
    escaped: bool,
}

impl Estimator {
    /// Validate `cfg` and construct. Non-finite or non-positive
    /// covariances and a non-positive escape radius are rejected here,
    /// never tolerated at run time.
    pub fn new(cfg: EstimatorCfg) -> Result<Self> {
        if !(cfg.process_noise.is_finite() && cfg.process_noise > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "process_noise must be finite and > 0",
            )));
        }
        if !(cfg.sensor_noise.is_finite() && cfg.sensor_noise > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "sensor_noise must be finite and > 0",
            )));
        }
        if !(cfg.estimation_error.is_finite() && cfg.estimation_error > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "estimation_error must be finite and > 0",
            )));
        }
        if let Some(r) = cfg.escape_radius
            && !(r.is_finite() && r > 0.0)
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "escape_radius must be finite and > 0",
            )));
        }
        Ok(Self {
            kind: cfg.kind,
            process_noise: cfg.process_noise,
            sensor_noise: cfg.sensor_noise,
            estimation_error: cfg.estimation_error,
            estimation_error_initial: cfg.estimation_error,
            estimate: None,
            escape_radius: cfg.escape_radius,
            settling_samples: cfg.settling_samples,
            settling_left: cfg.settling_samples,
            escaped: false,
        })
    }

    /// Feed one sample through the filter and return the new output.
    pub fn apply(&mut self, new_sample: f64) -> f64 {
        let Some(prev) = self.estimate else {
            // Seed with the first observation rather than zero.
            self.estimate = Some(new_sample);
            return new_sample;
        };

        let deviation = (new_sample - prev).abs();

        if let Some(radius) = self.escape_radius
            && deviation > radius
        {
            // The control is moving decisively; stop trusting the
            // smoothed trajectory and track the raw input directly.
            self.escaped = true;
            self.estimation_error = self.estimation_error_initial;
            self.estimate = Some(new_sample);
            return new_sample;
        }

        if self.escaped {
            if self.settling_left > 0 {
                self.settling_left -= 1;
                self.estimate = Some(new_sample);
                return new_sample;
            }
            // Settling over: re-engage smoothing with this very sample.
            self.escaped = false;
            self.settling_left = self.settling_samples;
        }

        let next = match self.kind {
            EstimatorKind::Adaptive => {
                let gain = self.estimation_error / (self.estimation_error + self.sensor_noise);
                let next = prev + gain * (new_sample - prev);
                self.estimation_error =
                    (1.0 - gain) * self.estimation_error + (prev - next).abs() * self.process_noise;
                next
            }
            EstimatorKind::Classic => {
                // Prediction update
                self.estimation_error += self.process_noise;
                // Measurement update
                let gain = self.estimation_error / (self.estimation_error + self.sensor_noise);
                let next = prev + gain * (new_sample - prev);
                self.estimation_error *= 1.0 - gain;
                next
            }
        };
        self.estimate = Some(next);
        next
    }

    /// Return to the constructed state: estimate unset, covariance back to
    /// its initial value, escape cleared.
    pub fn reset(&mut self) {
        self.estimate = None;
        self.estimation_error = self.estimation_error_initial;
        self.escaped = false;
        self.settling_left = self.settling_samples;
    }

    /// Last smoothed output, if any sample has been applied.
    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    /// True while in post-escape raw passthrough.
    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Current estimation error covariance (always > 0).
    pub fn estimation_error(&self) -> f64 {
        self.estimation_error
    }
}
