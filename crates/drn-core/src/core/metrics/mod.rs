//! Per-node graph centralities.
//!
//! Every metric is a pure function of a [`ContactGraph`] and the
//! [`CentralityParams`], returning one value per node in node order. The
//! [`Metric`] enumeration is closed and [`compute`] dispatches on it with a
//! `match`, so adding a metric is a compile-checked change.

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eccentricity;
pub mod eigenvector;
pub mod katz;
pub mod pagerank;
pub mod path_length;

use crate::core::graph::ContactGraph;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error(
        "Orphan node detected: no path from node {from} to node {to}. \
         Try increasing the contact threshold."
    )]
    OrphanNode { from: usize, to: usize },
    #[error("Degenerate graph: the centrality vector sums to zero")]
    DegenerateGraph,
    #[error("Iteration did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

impl MetricError {
    /// Whether the failure describes the whole frame rather than a specific
    /// structural defect. Such failures may be skipped under a lenient policy.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MetricError::DegenerateGraph | MetricError::NotConverged { .. }
        )
    }
}

/// The supported centralities. The derived ordering is the canonical output
/// order of all tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Metric {
    #[serde(rename = "BC", alias = "bc", alias = "betweenness")]
    Betweenness,
    #[serde(rename = "CC", alias = "cc", alias = "closeness")]
    Closeness,
    #[serde(rename = "DC", alias = "dc", alias = "degree")]
    Degree,
    #[serde(rename = "EC", alias = "ec", alias = "eigenvector")]
    Eigenvector,
    #[serde(rename = "ECC", alias = "ecc", alias = "eccentricity")]
    Eccentricity,
    #[serde(rename = "L", alias = "l", alias = "average-path-length")]
    AveragePathLength,
    #[serde(rename = "PR", alias = "pr", alias = "pagerank")]
    PageRank,
    #[serde(rename = "katz", alias = "KATZ")]
    Katz,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Betweenness,
        Metric::Closeness,
        Metric::Degree,
        Metric::Eigenvector,
        Metric::Eccentricity,
        Metric::AveragePathLength,
        Metric::PageRank,
        Metric::Katz,
    ];

    /// The short label used in file names and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Betweenness => "BC",
            Metric::Closeness => "CC",
            Metric::Degree => "DC",
            Metric::Eigenvector => "EC",
            Metric::Eccentricity => "ECC",
            Metric::AveragePathLength => "L",
            Metric::PageRank => "PR",
            Metric::Katz => "katz",
        }
    }

    /// The label used in per-frame file names.
    pub fn file_label(self) -> &'static str {
        match self {
            Metric::AveragePathLength => "avg_L",
            other => other.label(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Metric::Betweenness => "Betweenness centrality (Brandes, normalized)",
            Metric::Closeness => "Closeness centrality (Wasserman-Faust)",
            Metric::Degree => "Degree centrality",
            Metric::Eigenvector => "Eigenvector centrality",
            Metric::Eccentricity => "Eccentricity (longest shortest path)",
            Metric::AveragePathLength => "Average shortest path length",
            Metric::PageRank => "PageRank",
            Metric::Katz => "Katz centrality",
        }
    }

    /// Whether the metric is computed by iterating to a fixed point.
    pub fn is_iterative(self) -> bool {
        matches!(self, Metric::Eigenvector | Metric::PageRank | Metric::Katz)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown metric '{0}'. Expected one of: BC, CC, DC, EC, ECC, L, PR, katz")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

/// Tunable parameters of the iterative centralities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CentralityParams {
    pub pagerank_damping: f64,
    pub pagerank_max_iterations: usize,
    pub katz_alpha: f64,
    pub katz_beta: f64,
    pub katz_max_iterations: usize,
    pub eigen_max_iterations: usize,
    pub tolerance: f64,
}

impl Default for CentralityParams {
    fn default() -> Self {
        Self {
            pagerank_damping: 0.85,
            pagerank_max_iterations: 100,
            katz_alpha: 0.1,
            katz_beta: 1.0,
            katz_max_iterations: 1000,
            eigen_max_iterations: 10_000,
            tolerance: 1e-6,
        }
    }
}

/// Computes one centrality vector for `graph`.
///
/// # Errors
///
/// Returns the metric's own failure, or [`MetricError::DegenerateGraph`] if
/// the resulting vector sums to exactly zero.
pub fn compute(
    graph: &ContactGraph,
    metric: Metric,
    params: &CentralityParams,
) -> Result<Vec<f64>, MetricError> {
    let values = match metric {
        Metric::Betweenness => betweenness::betweenness_centrality(graph),
        Metric::Closeness => closeness::closeness_centrality(graph),
        Metric::Degree => degree::degree_centrality(graph),
        Metric::Eigenvector => eigenvector::eigenvector_centrality(graph, params)?,
        Metric::Eccentricity => eccentricity::eccentricity(graph)?,
        Metric::AveragePathLength => path_length::average_path_length(graph)?,
        Metric::PageRank => pagerank::pagerank(graph, params)?,
        Metric::Katz => katz::katz_centrality(graph, params)?,
    };

    if values.iter().sum::<f64>() == 0.0 {
        return Err(MetricError::DegenerateGraph);
    }
    trace!(metric = %metric, nodes = values.len(), "Computed centrality");
    Ok(values)
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use crate::core::graph::ContactGraph;

    pub fn path(n: usize) -> ContactGraph {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        ContactGraph::from_edges(n, &edges).unwrap()
    }

    pub fn star(leaves: usize) -> ContactGraph {
        let edges: Vec<_> = (1..=leaves).map(|i| (0, i)).collect();
        ContactGraph::from_edges(leaves + 1, &edges).unwrap()
    }

    pub fn complete(n: usize) -> ContactGraph {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        ContactGraph::from_edges(n, &edges).unwrap()
    }

    pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len(), "length mismatch");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "index {i}: {a} != {e}");
        }
    }
}
