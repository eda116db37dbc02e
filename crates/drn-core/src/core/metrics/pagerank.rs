use super::{CentralityParams, MetricError};
use crate::core::graph::ContactGraph;

/// PageRank by power iteration with uniform teleportation.
///
/// Each undirected edge is followed in both directions with probability
/// `1/deg`. Rank held by isolated (dangling) nodes is redistributed uniformly.
/// Iteration stops once the L1 change drops below `n * tolerance`.
///
/// # Errors
///
/// Returns [`MetricError::NotConverged`] when `params.pagerank_max_iterations`
/// is exhausted.
pub fn pagerank(graph: &ContactGraph, params: &CentralityParams) -> Result<Vec<f64>, MetricError> {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let alpha = params.pagerank_damping;
    let uniform = 1.0 / n as f64;
    let mut x = vec![uniform; n];

    for _ in 0..params.pagerank_max_iterations {
        let last = x;
        let mut next = vec![0.0; n];
        let mut dangling_mass = 0.0;
        for (node, neighbors) in adjacency.iter().enumerate() {
            if neighbors.is_empty() {
                dangling_mass += last[node];
                continue;
            }
            let share = last[node] / neighbors.len() as f64;
            for &neighbor in neighbors {
                next[neighbor] += share;
            }
        }
        for value in next.iter_mut() {
            *value = alpha * (*value + dangling_mass * uniform) + (1.0 - alpha) * uniform;
        }

        let error: f64 = next.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        x = next;
        if error < n as f64 * params.tolerance {
            return Ok(x);
        }
    }

    Err(MetricError::NotConverged {
        iterations: params.pagerank_max_iterations,
    })
}
