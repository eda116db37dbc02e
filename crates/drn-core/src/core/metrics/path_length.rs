use super::MetricError;
use crate::core::graph::ContactGraph;
use crate::core::graph::paths::{bfs_distances, first_unreachable};

/// All-pairs hop distances, one row per node.
///
/// # Errors
///
/// Returns [`MetricError::OrphanNode`] naming the first unreachable pair in
/// row-major order.
pub fn shortest_path_matrix(graph: &ContactGraph) -> Result<Vec<Vec<usize>>, MetricError> {
    let adjacency = graph.adjacency_lists();
    (0..adjacency.len())
        .map(|node| {
            let distances = bfs_distances(&adjacency, node);
            if let Some(to) = first_unreachable(&distances) {
                return Err(MetricError::OrphanNode { from: node, to });
            }
            Ok(distances.into_iter().flatten().collect())
        })
        .collect()
}

/// Average shortest path length from each node to every other node.
///
/// Entry `i` is `sum_j d(i, j) / (n - 1)`. Graphs with at most one node yield
/// zeros.
///
/// # Errors
///
/// Same as [`shortest_path_matrix`].
pub fn average_path_length(graph: &ContactGraph) -> Result<Vec<f64>, MetricError> {
    let matrix = shortest_path_matrix(graph)?;
    let n = matrix.len();
    if n <= 1 {
        return Ok(vec![0.0; n]);
    }

    let denominator = (n - 1) as f64;
    Ok(matrix
        .iter()
        .map(|row| row.iter().sum::<usize>() as f64 / denominator)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::test_graphs::*;

    #[test]
    fn three_node_path() {
        assert_close(&average_path_length(&path(3)).unwrap(), &[1.5, 1.0, 1.5], 1e-12);
    }

    #[test]
    fn complete_graph_has_unit_path_lengths() {
        assert_close(&average_path_length(&complete(5)).unwrap(), &[1.0; 5], 1e-12);
    }

    #[test]
    fn two_components_report_the_first_unreachable_pair() {
        let graph = ContactGraph::from_edges(5, &[(0, 1), (1, 2), (3, 4)]).unwrap();
        assert_eq!(
            average_path_length(&graph),
            Err(MetricError::OrphanNode { from: 0, to: 3 })
        );
    }

    #[test]
    fn distance_matrix_is_symmetric_hop_counts() {
        let matrix = shortest_path_matrix(&path(4)).unwrap();
        assert_eq!(
            matrix,
            vec![
                vec![0, 1, 2, 3],
                vec![1, 0, 1, 2],
                vec![2, 1, 0, 1],
                vec![3, 2, 1, 0]
            ]
        );
    }

    #[test]
    fn distance_matrix_reports_orphans_like_the_average() {
        let graph = ContactGraph::from_edges(3, &[(0, 1)]).unwrap();
        assert_eq!(
            shortest_path_matrix(&graph),
            Err(MetricError::OrphanNode { from: 0, to: 2 })
        );
    }

    #[test]
    fn single_node_is_zero() {
        assert_eq!(average_path_length(&path(1)).unwrap(), vec![0.0]);
    }
}
