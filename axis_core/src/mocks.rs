//! Test and helper mocks for axis_core

use axis_traits::{AxisId, AxisSink, SampleSource};

/// A sink that records every write; useful for asserting on shaped output.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<(AxisId, f64)>,
}

impl AxisSink for RecordingSink {
    fn write(
        &mut self,
        axis: AxisId,
        value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.writes.push((axis, value));
        Ok(())
    }
}

/// A sink that always errors; useful for exercising the sink failure path.
pub struct FailingSink;

impl AxisSink for FailingSink {
    fn write(
        &mut self,
        _axis: AxisId,
        _value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("failing sink")))
    }
}

/// A source that replays a prepared sample sequence, then ends.
#[derive(Debug, Default)]
pub struct VecSource {
    samples: Vec<(AxisId, f64)>,
    idx: usize,
}

impl VecSource {
    pub fn new(samples: Vec<(AxisId, f64)>) -> Self {
        Self { samples, idx: 0 }
    }
}

impl SampleSource for VecSource {
    fn next_sample(
        &mut self,
    ) -> Result<Option<(AxisId, f64)>, Box<dyn std::error::Error + Send + Sync>> {
        let s = self.samples.get(self.idx).copied();
        self.idx += 1;
        Ok(s)
    }
}
