//! Replay execution: config mapping assembly and the sample loop.

use std::collections::HashMap;
use std::io::Write;

use axis_core::{AxisMapping, build_mapping};
use axis_traits::{AxisId, AxisSink, SampleSource};
use eyre::WrapErr;

/// Sink that emits shaped values to stdout, one line per sample:
/// `axis,value` in plain mode, `{"axis":..,"value":..}` in JSON mode.
pub struct StdoutSink {
    json: bool,
}

impl StdoutSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl AxisSink for StdoutSink {
    fn write(
        &mut self,
        axis: AxisId,
        value: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            let line = serde_json::json!({ "axis": axis, "value": value });
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{axis},{value}")?;
        }
        Ok(())
    }
}

/// One independent mapping per configured axis, keyed by input id.
pub fn build_mappings(
    cfg: &axis_config::Config,
    json: bool,
) -> eyre::Result<HashMap<AxisId, AxisMapping<StdoutSink>>> {
    let mut mappings = HashMap::new();
    for axis in &cfg.axes {
        let estimator: axis_core::EstimatorCfg = (&axis.estimator).into();
        let shaper: axis_core::ShaperCfg = axis.into();
        let mapping = build_mapping(
            StdoutSink::new(json),
            axis.input_id,
            axis.output_id,
            estimator,
            shaper,
        )
        .wrap_err_with(|| format!("building mapping for input axis {}", axis.input_id))?;
        tracing::info!(
            input = axis.input_id,
            output = axis.output_id,
            invert = axis.invert,
            escape_radius = ?axis.estimator.escape_radius,
            "axis mapping ready"
        );
        mappings.insert(axis.input_id, mapping);
    }
    Ok(mappings)
}

#[derive(Debug, Default)]
pub struct RunStats {
    pub processed: u64,
    pub skipped: u64,
    pub per_axis: HashMap<AxisId, u64>,
}

/// Drain `source`, routing each sample to its mapping. Samples for axes
/// with no configured mapping are counted and skipped.
pub fn replay(
    source: &mut dyn SampleSource,
    mappings: &mut HashMap<AxisId, AxisMapping<StdoutSink>>,
) -> eyre::Result<RunStats> {
    let mut stats = RunStats::default();
    loop {
        let next = source
            .next_sample()
            .map_err(|e| eyre::eyre!("reading sample stream: {e}"))?;
        let Some((axis, raw)) = next else {
            break;
        };
        match mappings.get_mut(&axis) {
            Some(mapping) => {
                mapping.on_sample(raw)?;
                stats.processed += 1;
                *stats.per_axis.entry(axis).or_default() += 1;
            }
            None => {
                if stats.skipped == 0 {
                    tracing::warn!(axis, "sample for unmapped axis; skipping");
                }
                stats.skipped += 1;
            }
        }
    }
    tracing::debug!(
        processed = stats.processed,
        skipped = stats.skipped,
        "replay drained"
    );
    Ok(stats)
}
