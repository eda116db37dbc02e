use super::dataset::Dataset;
use super::error::EngineError;
use crate::core::io::{OutputError, tables};
use crate::core::metrics::Metric;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument};

/// A reduction of per-frame vectors into one value per residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    #[default]
    Mean,
    Median,
    /// Sample standard deviation (`n - 1` in the denominator).
    Std,
}

impl Statistic {
    pub const ALL: [Statistic; 3] = [Statistic::Mean, Statistic::Median, Statistic::Std];

    pub fn label(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Std => "std",
        }
    }

    /// Reduces a set of samples. Empty input yields `NaN`, and so does `Std`
    /// on a single sample.
    pub fn reduce(self, samples: &mut [f64]) -> f64 {
        let n = samples.len();
        if n == 0 {
            return f64::NAN;
        }
        match self {
            Statistic::Mean => samples.iter().sum::<f64>() / n as f64,
            Statistic::Median => {
                samples.sort_by(f64::total_cmp);
                if n % 2 == 1 {
                    samples[n / 2]
                } else {
                    (samples[n / 2 - 1] + samples[n / 2]) / 2.0
                }
            }
            Statistic::Std => {
                if n < 2 {
                    return f64::NAN;
                }
                let mean = samples.iter().sum::<f64>() / n as f64;
                let squares: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
                (squares / (n - 1) as f64).sqrt()
            }
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown statistic '{0}'. Expected one of: mean, median, std")]
pub struct ParseStatisticError(pub String);

impl FromStr for Statistic {
    type Err = ParseStatisticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStatisticError(s.to_string()))
    }
}

/// One column per metric, one row per residue.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    statistic: Statistic,
    metrics: Vec<Metric>,
    columns: Vec<Vec<f64>>,
    residue_count: usize,
}

impl AggregateTable {
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// The metrics present, in [`Metric`] order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn residue_count(&self) -> usize {
        self.residue_count
    }

    pub fn column(&self, metric: Metric) -> Option<&[f64]> {
        self.metrics
            .iter()
            .position(|&m| m == metric)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (Metric, &[f64])> + '_ {
        self.metrics
            .iter()
            .copied()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// The conventional file name, `<basename>_<stat>.csv`.
    pub fn file_name(&self, basename: &str) -> String {
        format!("{}_{}.csv", basename, self.statistic.label())
    }

    /// Writes the table as CSV with metric labels as the header.
    pub fn write_csv(&self, path: &Path) -> Result<(), OutputError> {
        let headers: Vec<&str> = self.metrics.iter().map(|m| m.label()).collect();
        tables::write_columns(path, &headers, &self.columns)
    }

    /// Writes `<directory>/<basename>_<stat>.csv` and returns its path.
    pub fn save(&self, directory: &Path, basename: &str) -> Result<PathBuf, OutputError> {
        let path = directory.join(self.file_name(basename));
        self.write_csv(&path)?;
        Ok(path)
    }
}

/// Reduces every metric of the dataset across frames.
///
/// The residue count is taken from the first vector encountered (in metric
/// order, then frame order). Metrics without recorded frames are left out.
///
/// # Errors
///
/// Returns [`EngineError::DataIntegrity`] for the first vector whose length
/// differs from the residue count.
#[instrument(skip_all, name = "aggregate", fields(statistic = %statistic))]
pub fn aggregate(dataset: &Dataset, statistic: Statistic) -> Result<AggregateTable, EngineError> {
    let mut residue_count = None;
    let mut metrics = Vec::new();
    let mut columns = Vec::new();

    for metric in dataset.metrics() {
        let vectors: Vec<(usize, &[f64])> = dataset.frames(metric).collect();
        if vectors.is_empty() {
            debug!(%metric, "No frames recorded; leaving metric out of the table");
            continue;
        }

        let expected = *residue_count.get_or_insert(vectors[0].1.len());
        if let Some(&(frame, values)) = vectors.iter().find(|(_, v)| v.len() != expected) {
            return Err(EngineError::DataIntegrity {
                metric,
                frame,
                expected,
                found: values.len(),
            });
        }

        let mut samples = vec![0.0; vectors.len()];
        let column: Vec<f64> = (0..expected)
            .map(|residue| {
                for (slot, (_, values)) in samples.iter_mut().zip(&vectors) {
                    *slot = values[residue];
                }
                statistic.reduce(&mut samples)
            })
            .collect();

        debug!(%metric, frames = vectors.len(), residues = expected, "Aggregated metric");
        metrics.push(metric);
        columns.push(column);
    }

    Ok(AggregateTable {
        statistic,
        metrics,
        columns,
        residue_count: residue_count.unwrap_or(0),
    })
}
