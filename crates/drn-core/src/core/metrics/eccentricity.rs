use super::MetricError;
use crate::core::graph::ContactGraph;
use crate::core::graph::paths::{bfs_distances, first_unreachable};

/// The longest shortest-path distance from each node.
///
/// # Errors
///
/// Returns [`MetricError::OrphanNode`] for the first node (in index order)
/// that cannot reach every other node.
pub fn eccentricity(graph: &ContactGraph) -> Result<Vec<f64>, MetricError> {
    let adjacency = graph.adjacency_lists();
    (0..adjacency.len())
        .map(|node| {
            let distances = bfs_distances(&adjacency, node);
            if let Some(to) = first_unreachable(&distances) {
                return Err(MetricError::OrphanNode { from: node, to });
            }
            Ok(distances.iter().flatten().copied().max().unwrap_or(0) as f64)
        })
        .collect()
}
