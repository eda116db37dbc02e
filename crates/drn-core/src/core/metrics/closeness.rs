use crate::core::graph::ContactGraph;
use crate::core::graph::paths::bfs_distances;

/// Closeness centrality with the Wasserman-Faust correction for graphs with
/// more than one component.
///
/// For a node reaching `r` nodes (itself included) at total distance `d`, the
/// score is `(r-1)/d * (r-1)/(n-1)`, and zero when it reaches nothing.
pub fn closeness_centrality(graph: &ContactGraph) -> Vec<f64> {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();

    (0..n)
        .map(|node| {
            let distances = bfs_distances(&adjacency, node);
            let (reached, total) = distances
                .iter()
                .flatten()
                .fold((0usize, 0usize), |(r, t), &d| (r + 1, t + d));
            if total > 0 && n > 1 {
                let reached_others = (reached - 1) as f64;
                (reached_others / total as f64) * (reached_others / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}
