use super::aggregate::Statistic;
use crate::core::metrics::{CentralityParams, Metric};
use crate::core::selection::AtomSelection;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Contact threshold must be a finite positive distance in Angstroms, got {0}")]
    InvalidThreshold(f64),
    #[error("Frame stride must be at least 1")]
    InvalidStride,
    #[error("No centrality metric selected. Enable at least one metric.")]
    NoMetricSelected,
    #[error("Unknown failure policy '{0}'. Expected 'abort' or 'skip-frame'.")]
    UnknownFailurePolicy(String),
}

/// What to do when a metric cannot be computed for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the run at the first failing metric.
    #[default]
    Abort,
    /// Drop the whole frame when a metric reports a degenerate graph or fails
    /// to converge. Orphan nodes still abort.
    SkipFrame,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip-frame" | "skip_frame" | "skip" => Ok(FailurePolicy::SkipFrame),
            _ => Err(ConfigError::UnknownFailurePolicy(s.to_string())),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => f.write_str("abort"),
            FailurePolicy::SkipFrame => f.write_str("skip-frame"),
        }
    }
}

/// Where and what to write while the network workflow runs.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Prefix of every output file name.
    pub basename: String,
    /// Write one `.dat` vector per frame and metric.
    pub write_frame_data: bool,
    /// Render one SVG plot per frame and metric.
    pub generate_plots: bool,
    /// Persist each frame's contact graph as GML and GraphML.
    pub save_graphs: bool,
}

impl OutputConfig {
    pub fn new(directory: impl Into<PathBuf>, basename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            basename: basename.into(),
            write_frame_data: true,
            generate_plots: false,
            save_graphs: false,
        }
    }

    /// Path prefix for files belonging to one frame: `<dir>/<basename>_<frame>`.
    pub fn frame_prefix(&self, frame: usize) -> PathBuf {
        self.directory.join(format!("{}_{}", self.basename, frame))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub threshold: f64,
    pub stride: usize,
    pub selection: AtomSelection,
    pub metrics: BTreeSet<Metric>,
    pub centrality: CentralityParams,
    pub failure_policy: FailurePolicy,
    pub statistic: Statistic,
    pub output: Option<OutputConfig>,
}

#[derive(Default)]
pub struct NetworkConfigBuilder {
    threshold: Option<f64>,
    stride: Option<usize>,
    selection: Option<AtomSelection>,
    metrics: BTreeSet<Metric>,
    centrality: Option<CentralityParams>,
    failure_policy: Option<FailurePolicy>,
    statistic: Option<Statistic>,
    output: Option<OutputConfig>,
}

impl NetworkConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, angstroms: f64) -> Self {
        self.threshold = Some(angstroms);
        self
    }
    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }
    pub fn selection(mut self, selection: AtomSelection) -> Self {
        self.selection = Some(selection);
        self
    }
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metrics.insert(metric);
        self
    }
    pub fn metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics.extend(metrics);
        self
    }
    pub fn centrality(mut self, params: CentralityParams) -> Self {
        self.centrality = Some(params);
        self
    }
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }
    pub fn statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = Some(statistic);
        self
    }
    pub fn output(mut self, output: OutputConfig) -> Self {
        self.output = Some(output);
        self
    }

    pub fn build(self) -> Result<NetworkConfig, ConfigError> {
        let threshold = self
            .threshold
            .ok_or(ConfigError::MissingParameter("threshold"))?;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        let stride = self.stride.unwrap_or(1);
        if stride == 0 {
            return Err(ConfigError::InvalidStride);
        }
        if self.metrics.is_empty() {
            return Err(ConfigError::NoMetricSelected);
        }

        Ok(NetworkConfig {
            threshold,
            stride,
            selection: self.selection.unwrap_or_default(),
            metrics: self.metrics,
            centrality: self.centrality.unwrap_or_default(),
            failure_policy: self.failure_policy.unwrap_or_default(),
            statistic: self.statistic.unwrap_or_default(),
            output: self.output,
        })
    }
}
