use thiserror::Error;

use super::config::ConfigError;
use crate::core::graph::GraphError;
use crate::core::io::OutputError;
use crate::core::io::trajectory::TrajectoryError;
use crate::core::metrics::{Metric, MetricError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("Graph construction failed: {0}")]
    Graph(#[from] GraphError),

    #[error("Metric {metric} failed on frame {frame}: {source}")]
    Metric {
        frame: usize,
        metric: Metric,
        #[source]
        source: MetricError,
    },

    #[error(
        "Data integrity violation: {metric} vector of frame {frame} has {found} values, expected {expected}"
    )]
    DataIntegrity {
        metric: Metric,
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "Data integrity violation: the selection resolves to {found} atoms but the table has {expected} residues"
    )]
    SelectionMismatch { expected: usize, found: usize },

    #[error("No frames were recorded; the trajectory is empty or every frame was skipped")]
    EmptyTrajectory,

    #[error("Output failed: {0}")]
    Output(#[from] OutputError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
