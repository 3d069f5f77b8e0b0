#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core axis shaping logic (host-agnostic).
//!
//! This crate turns noisy analog axis samples into a clean output signal.
//! All host interaction goes through `axis_traits::AxisSink` (and, for
//! offline replay, `axis_traits::SampleSource`).
//!
//! ## Architecture
//!
//! - **Estimator**: adaptive Kalman-style scalar filter with threshold
//!   escape and settling passthrough (`estimator` module)
//! - **Shaper**: dead-zone / saturation / end-stop shaping applied around
//!   the estimator, plus inversion (`shaper` module)
//! - **Mapping**: one shaper wired between an input axis and an output
//!   sink (`mapping` module)
//! - **Configuration**: runtime config structs (`config` module) and
//!   bridges from the TOML schema (`conversions` module)
//!
//! Per-sample processing is total: every finite input produces a defined
//! output. Construction is fail-fast: bad covariances or bounds are
//! rejected before any sample is processed. Each mapping is single-writer;
//! filter state is mutated in place with no internal synchronization.

// Module declarations
pub mod config;
pub mod conversions;
pub mod error;
pub mod estimator;
pub mod mapping;
pub mod mocks;
pub mod shaper;

pub use config::{EstimatorCfg, EstimatorKind, ShaperCfg};
pub use error::{AxisError, BuildError};
pub use estimator::Estimator;
pub use mapping::{AxisMapping, BoxedMapping, MappingBuilder, build_mapping};
pub use shaper::AxisShaper;
