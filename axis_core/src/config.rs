//! Runtime configuration types for the axis shaping engine.
//!
//! These are the structs consumed by `Estimator` and `AxisShaper`.
//! They are separate from the TOML-deserialized config in `axis_config`;
//! see `conversions` for the bridge (including the percent → absolute
//! dead-zone bound translation).

/// Smoothing algorithm used by the estimator update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimatorKind {
    /// Covariance update blends in the magnitude of each correction, so
    /// the gain stays responsive after large moves. Pairs with the
    /// threshold-escape machinery.
    #[default]
    Adaptive,
    /// Textbook 1-D predict/update cycle (`p += q`, then measurement
    /// update). Retained for comparison tuning.
    Classic,
}

/// Estimator configuration. All covariances must be finite and > 0.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorCfg {
    pub kind: EstimatorKind,
    /// Process noise covariance: trust in the motion model. Low values
    /// favor the model; high values admit larger local deviations but
    /// track measurement noise more closely.
    pub process_noise: f64,
    /// Measurement noise covariance: trust in new samples. High values
    /// make the filter react more slowly to deviations.
    pub sensor_noise: f64,
    /// Initial estimation error covariance; also the value the running
    /// covariance is reset to on a threshold escape.
    pub estimation_error: f64,
    /// Deviation magnitude that triggers escape mode. `None` disables
    /// escape entirely (pure recursive smoothing).
    pub escape_radius: Option<f64>,
    /// Number of post-escape samples passed through raw before smoothing
    /// re-engages.
    pub settling_samples: u32,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            kind: EstimatorKind::Adaptive,
            process_noise: 1.0,
            sensor_noise: 0.1,
            estimation_error: 0.1,
            escape_radius: None,
            settling_samples: 1,
        }
    }
}

/// Shaper configuration: dead-zone, saturation, and inversion applied
/// around the estimator. Immutable for the mapping's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct ShaperCfg {
    /// Center dead-zone upper bound (absolute units, >= 0).
    pub deadzone_upper: f64,
    /// Center dead-zone lower bound (absolute units, <= 0).
    pub deadzone_lower: f64,
    /// Raw at or above this clamps here.
    pub saturation_upper: f64,
    /// Raw at or below this clamps here.
    pub saturation_lower: f64,
    /// Negate the final value.
    pub invert: bool,
    /// Absolute physical extreme of the input range; samples exactly at
    /// ±`input_max` bypass the estimator (end-stop exactness).
    pub input_max: f64,
}

impl Default for ShaperCfg {
    fn default() -> Self {
        Self {
            deadzone_upper: 0.0,
            deadzone_lower: 0.0,
            saturation_upper: 1.0,
            saturation_lower: -1.0,
            invert: false,
            input_max: 1.0,
        }
    }
}
