use crate::core::graph::ContactGraph;

/// Degree centrality: the fraction of other nodes each node touches.
///
/// A graph with at most one node has no "other nodes", and every entry is zero.
pub fn degree_centrality(graph: &ContactGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|node| graph.degree(node) as f64 * scale).collect()
}
