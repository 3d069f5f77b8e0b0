//! Replay sample sources: CSV files and stdin lines.

use std::io::BufRead;
use std::path::Path;

use axis_traits::{AxisId, SampleSource};
use eyre::WrapErr;
use serde::Deserialize;

/// CSV replay schema.
///
/// Expected headers:
/// axis,sample
///
/// Example:
/// axis,sample
/// 0,0.0213
/// 0,0.0192
#[derive(Debug, Deserialize, Clone, Copy)]
struct SampleRow {
    axis: AxisId,
    sample: f64,
}

pub struct CsvSource {
    rows: std::vec::IntoIter<SampleRow>,
}

impl CsvSource {
    /// Open `path`, enforcing the exact 'axis,sample' header pair.
    pub fn open(path: &Path) -> eyre::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| eyre::eyre!("open sample CSV {:?}: {}", path, e))?;

        let headers = rdr
            .headers()
            .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
            .clone();
        let expected = ["axis", "sample"];
        let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        if actual != expected {
            eyre::bail!(
                "sample CSV must have headers 'axis,sample', got: {}",
                actual.join(",")
            );
        }

        let mut rows = Vec::new();
        for (idx, rec) in rdr.deserialize::<SampleRow>().enumerate() {
            let row = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
            rows.push(row);
        }
        Ok(Self {
            rows: rows.into_iter(),
        })
    }
}

impl SampleSource for CsvSource {
    fn next_sample(
        &mut self,
    ) -> Result<Option<(AxisId, f64)>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.rows.next().map(|r| (r.axis, r.sample)))
    }
}

/// Stdin replay: one sample per line, either 'axis,sample' or a bare
/// sample routed to `default_axis`.
pub struct StdinSource<R: BufRead> {
    reader: R,
    default_axis: AxisId,
    line_no: usize,
}

impl<R: BufRead> StdinSource<R> {
    pub fn new(reader: R, default_axis: AxisId) -> Self {
        Self {
            reader,
            default_axis,
            line_no: 0,
        }
    }

    fn parse_line(&self, line: &str) -> eyre::Result<Option<(AxisId, f64)>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if let Some((axis, sample)) = line.split_once(',') {
            let axis: AxisId = axis
                .trim()
                .parse()
                .wrap_err_with(|| format!("line {}: bad axis id", self.line_no))?;
            let sample: f64 = sample
                .trim()
                .parse()
                .wrap_err_with(|| format!("line {}: bad sample", self.line_no))?;
            Ok(Some((axis, sample)))
        } else {
            let sample: f64 = line
                .parse()
                .wrap_err_with(|| format!("line {}: bad sample", self.line_no))?;
            Ok(Some((self.default_axis, sample)))
        }
    }
}

impl<R: BufRead> SampleSource for StdinSource<R> {
    fn next_sample(
        &mut self,
    ) -> Result<Option<(AxisId, f64)>, Box<dyn std::error::Error + Send + Sync>> {
        loop {
            let mut buf = String::new();
            let n = self.reader.read_line(&mut buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            match self.parse_line(&buf) {
                Ok(Some(pair)) => return Ok(Some(pair)),
                Ok(None) => continue, // blank or comment line
                Err(e) => return Err(e.into()),
            }
        }
    }
}
