//! Axis mapping: one shaper wired between a host input axis and an
//! output sink, plus the type-state builder that assembles it.
//!
//! The builder enforces at compile time that a sink is provided before
//! `build()` is available. `try_build()` is always available for dynamic
//! checks. One `AxisMapping` per configured axis; the mapping owns its
//! shaper and estimator for the lifetime of the axis, with no hidden
//! process-wide state.

use std::marker::PhantomData;

use axis_traits::{AxisId, AxisSink};
use eyre::WrapErr;

use crate::config::{EstimatorCfg, ShaperCfg};
use crate::error::{AxisError, BuildError, Result};
use crate::shaper::AxisShaper;

pub struct AxisMapping<K: AxisSink> {
    input_id: AxisId,
    output_id: AxisId,
    shaper: AxisShaper,
    sink: K,
}

impl<K: AxisSink> std::fmt::Debug for AxisMapping<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisMapping")
            .field("input_id", &self.input_id)
            .field("output_id", &self.output_id)
            .field("shaper", &self.shaper)
            .finish_non_exhaustive()
    }
}

/// Boxed (dynamically dispatched) mapping, the form the builder produces.
pub type BoxedMapping = AxisMapping<Box<dyn AxisSink>>;

impl BoxedMapping {
    /// Start building a mapping with a boxed sink.
    pub fn builder() -> MappingBuilder<Missing> {
        MappingBuilder::default()
    }
}

impl<K: AxisSink> AxisMapping<K> {
    /// Shape one raw sample, forward it to the sink, and return it.
    ///
    /// The shaping itself is total; only the sink write can fail.
    pub fn on_sample(&mut self, raw: f64) -> Result<f64> {
        let value = self.shaper.process(raw);
        tracing::trace!(
            input = self.input_id,
            output = self.output_id,
            raw,
            value,
            "shaped sample"
        );
        self.sink
            .write(self.output_id, value)
            .map_err(|e| AxisError::Sink(e.to_string()))
            .wrap_err_with(|| format!("writing output axis {}", self.output_id))?;
        Ok(value)
    }

    pub fn input_id(&self) -> AxisId {
        self.input_id
    }

    pub fn output_id(&self) -> AxisId {
        self.output_id
    }

    pub fn shaper(&self) -> &AxisShaper {
        &self.shaper
    }

    /// Clear filter state, e.g. when the host re-activates the mapping.
    pub fn reset(&mut self) {
        self.shaper.reset();
    }
}

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `AxisMapping<Box<dyn AxisSink>>`. Config setters are
/// chainable in any state; `build()` appears once the sink is set.
pub struct MappingBuilder<S> {
    sink: Option<Box<dyn AxisSink>>,
    input_id: AxisId,
    output_id: AxisId,
    estimator: Option<EstimatorCfg>,
    shaper: Option<ShaperCfg>,
    _s: PhantomData<S>,
}

impl Default for MappingBuilder<Missing> {
    fn default() -> Self {
        Self {
            sink: None,
            input_id: 0,
            output_id: 0,
            estimator: None,
            shaper: None,
            _s: PhantomData,
        }
    }
}

/// Validate configuration and construct an `AxisMapping`.
///
/// Single source of truth for construction, used by both
/// `MappingBuilder::try_build()` and `build_mapping()`.
fn validate_and_build<K: AxisSink>(
    sink: K,
    input_id: AxisId,
    output_id: AxisId,
    estimator: EstimatorCfg,
    shaper: ShaperCfg,
) -> Result<AxisMapping<K>> {
    let shaper = AxisShaper::new(shaper, estimator)?;
    Ok(AxisMapping {
        input_id,
        output_id,
        shaper,
        sink,
    })
}

impl<S> MappingBuilder<S> {
    /// Fallible build available in any type-state; errors on a missing sink.
    pub fn try_build(self) -> Result<AxisMapping<Box<dyn AxisSink>>> {
        let sink = self
            .sink
            .ok_or_else(|| eyre::Report::new(BuildError::MissingSink))?;
        validate_and_build(
            sink,
            self.input_id,
            self.output_id,
            self.estimator.unwrap_or_default(),
            self.shaper.unwrap_or_default(),
        )
    }

    pub fn with_input_id(mut self, id: AxisId) -> Self {
        self.input_id = id;
        self
    }

    pub fn with_output_id(mut self, id: AxisId) -> Self {
        self.output_id = id;
        self
    }

    pub fn with_estimator(mut self, cfg: EstimatorCfg) -> Self {
        self.estimator = Some(cfg);
        self
    }

    pub fn with_shaper(mut self, cfg: ShaperCfg) -> Self {
        self.shaper = Some(cfg);
        self
    }
}

impl MappingBuilder<Missing> {
    pub fn with_sink(self, sink: impl AxisSink + 'static) -> MappingBuilder<Set> {
        MappingBuilder {
            sink: Some(Box::new(sink)),
            input_id: self.input_id,
            output_id: self.output_id,
            estimator: self.estimator,
            shaper: self.shaper,
            _s: PhantomData,
        }
    }
}

impl MappingBuilder<Set> {
    /// Validate and build the mapping. Only available once the sink is set.
    pub fn build(self) -> Result<AxisMapping<Box<dyn AxisSink>>> {
        self.try_build()
    }
}

/// Build a statically-dispatched mapping from a concrete sink.
///
/// Delegates to the shared `validate_and_build` — no duplicated validation.
pub fn build_mapping<K>(
    sink: K,
    input_id: AxisId,
    output_id: AxisId,
    estimator: EstimatorCfg,
    shaper: ShaperCfg,
) -> Result<AxisMapping<K>>
where
    K: AxisSink,
{
    validate_and_build(sink, input_id, output_id, estimator, shaper)
}
