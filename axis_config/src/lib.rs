#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the axis shaping pipeline.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Each `[[axis]]` table describes one mapping from a physical input
//!   axis to a virtual output axis, with its own estimator and shaping
//!   settings. Validation is the single gate between "text the user
//!   wrote" and "numbers the filter math is allowed to see": anything
//!   that would make the recursive update numerically meaningless is
//!   rejected here, before a single sample is processed.
use serde::Deserialize;

/// Console/file logging settings.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

/// Smoothing algorithm selection for the estimator update step.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Covariance blends in the magnitude of each correction; pairs with
    /// the threshold-escape machinery.
    #[default]
    Adaptive,
    /// Textbook 1-D predict/update cycle.
    Classic,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct EstimatorCfg {
    #[serde(default)]
    pub kind: EstimatorKind,
    /// Process noise covariance: trust in the motion model.
    pub process_noise: f64,
    /// Measurement noise covariance: trust in new samples.
    pub sensor_noise: f64,
    /// Initial estimation error covariance.
    pub estimation_error: f64,
    /// Deviation from the current estimate beyond which smoothing is
    /// abandoned and the raw value tracked directly. Absent disables
    /// escape behavior entirely (pure recursive smoothing).
    #[serde(default)]
    pub escape_radius: Option<f64>,
    /// Number of post-escape samples passed through raw before smoothing
    /// re-engages. Also accepts alias "delay_radius_count".
    #[serde(default = "default_settling_samples", alias = "delay_radius_count")]
    pub settling_samples: u32,
}

fn default_settling_samples() -> u32 {
    1
}

/// One input-axis → output-axis mapping.
#[derive(Debug, Deserialize)]
pub struct AxisCfg {
    /// Physical input axis id as reported by the host.
    pub input_id: u32,
    /// Virtual output axis id to drive.
    pub output_id: u32,
    /// Negate the shaped value before it reaches the sink.
    #[serde(default)]
    pub invert: bool,
    /// Absolute physical extreme of the input range.
    #[serde(default = "default_input_max")]
    pub input_max: f64,
    /// Center dead-zone upper limit, percent of `input_max` (0..=100).
    #[serde(default)]
    pub deadzone_upper_pct: f64,
    /// Center dead-zone lower limit, percent of `input_max` (-100..=0).
    #[serde(default)]
    pub deadzone_lower_pct: f64,
    /// Upper output saturation; raw at or above clamps here.
    #[serde(default = "default_saturation_upper")]
    pub saturation_upper: f64,
    /// Lower output saturation; raw at or below clamps here.
    #[serde(default = "default_saturation_lower")]
    pub saturation_lower: f64,
    pub estimator: EstimatorCfg,
}

fn default_input_max() -> f64 {
    1.0
}

fn default_saturation_upper() -> f64 {
    1.0
}

fn default_saturation_lower() -> f64 {
    -1.0
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: Logging,
    /// One or more axis mappings; each gets an independent filter instance.
    #[serde(rename = "axis", default)]
    pub axes: Vec<AxisCfg>,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl EstimatorCfg {
    pub fn validate(&self, idx: usize) -> eyre::Result<()> {
        if !(self.process_noise.is_finite() && self.process_noise > 0.0) {
            eyre::bail!("axis[{idx}].estimator.process_noise must be finite and > 0");
        }
        if !(self.sensor_noise.is_finite() && self.sensor_noise > 0.0) {
            eyre::bail!("axis[{idx}].estimator.sensor_noise must be finite and > 0");
        }
        if !(self.estimation_error.is_finite() && self.estimation_error > 0.0) {
            eyre::bail!("axis[{idx}].estimator.estimation_error must be finite and > 0");
        }
        if let Some(r) = self.escape_radius
            && !(r.is_finite() && r > 0.0)
        {
            eyre::bail!("axis[{idx}].estimator.escape_radius must be finite and > 0");
        }
        Ok(())
    }
}

impl AxisCfg {
    pub fn validate(&self, idx: usize) -> eyre::Result<()> {
        if !(self.input_max.is_finite() && self.input_max > 0.0) {
            eyre::bail!("axis[{idx}].input_max must be finite and > 0");
        }
        if !(0.0..=100.0).contains(&self.deadzone_upper_pct) {
            eyre::bail!("axis[{idx}].deadzone_upper_pct must be in [0, 100]");
        }
        if !(-100.0..=0.0).contains(&self.deadzone_lower_pct) {
            eyre::bail!("axis[{idx}].deadzone_lower_pct must be in [-100, 0]");
        }
        if !self.saturation_upper.is_finite() || !self.saturation_lower.is_finite() {
            eyre::bail!("axis[{idx}] saturation bounds must be finite");
        }
        if self.saturation_lower >= self.saturation_upper {
            eyre::bail!("axis[{idx}].saturation_lower must be < saturation_upper");
        }
        if self.saturation_upper > self.input_max || self.saturation_lower < -self.input_max {
            eyre::bail!("axis[{idx}] saturation bounds must be within [-input_max, input_max]");
        }
        self.estimator.validate(idx)
    }
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        if self.axes.is_empty() {
            eyre::bail!("config must declare at least one [[axis]] mapping");
        }
        for (idx, axis) in self.axes.iter().enumerate() {
            axis.validate(idx)?;
        }
        // Reject two mappings claiming the same physical input
        for i in 0..self.axes.len() {
            for j in (i + 1)..self.axes.len() {
                if self.axes[i].input_id == self.axes[j].input_id {
                    eyre::bail!(
                        "axis[{i}] and axis[{j}] both map input_id {}",
                        self.axes[i].input_id
                    );
                }
            }
        }
        Ok(())
    }
}
