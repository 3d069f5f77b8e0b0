//! Boundary traits for the axis shaping pipeline.
//!
//! The core is hardware- and host-agnostic: samples come in through a
//! `SampleSource` (or are pushed directly by a host callback) and shaped
//! values leave through an `AxisSink`.

/// Identifier of a physical or virtual axis as assigned by the host.
pub type AxisId = u32;

/// Pull-based provider of raw axis samples, used for offline replay.
///
/// A live host dispatcher does not need this trait; it can push samples
/// straight into the pipeline. Returns `Ok(None)` when the stream ends.
pub trait SampleSource {
    fn next_sample(
        &mut self,
    ) -> Result<Option<(AxisId, f64)>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Consumer of shaped axis values (a virtual output device, a recorder, ...).
pub trait AxisSink {
    fn write(
        &mut self,
        axis: AxisId,
        value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: AxisSink + ?Sized> AxisSink for &mut T {
    fn write(
        &mut self,
        axis: AxisId,
        value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).write(axis, value)
    }
}

impl AxisSink for Box<dyn AxisSink> {
    fn write(
        &mut self,
        axis: AxisId,
        value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).write(axis, value)
    }
}
