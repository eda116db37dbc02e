use super::{CentralityParams, MetricError};
use crate::core::graph::ContactGraph;
use nalgebra::SymmetricEigen;

/// Eigenvector centrality from the dense symmetric eigendecomposition of the
/// adjacency matrix.
///
/// The eigenvector of the largest eigenvalue is oriented to have a positive
/// sum and scaled to unit Euclidean norm. A graph without edges has no
/// dominant direction and yields zeros.
///
/// # Errors
///
/// Returns [`MetricError::NotConverged`] if the QR iteration exceeds
/// `params.eigen_max_iterations`.
pub fn eigenvector_centrality(
    graph: &ContactGraph,
    params: &CentralityParams,
) -> Result<Vec<f64>, MetricError> {
    let n = graph.node_count();
    if n == 0 || graph.edge_count() == 0 {
        return Ok(vec![0.0; n]);
    }

    let eigen = SymmetricEigen::try_new(
        graph.adjacency_matrix(),
        f64::EPSILON,
        params.eigen_max_iterations,
    )
    .ok_or(MetricError::NotConverged {
        iterations: params.eigen_max_iterations,
    })?;

    let leading = eigen.eigenvalues.imax();
    let mut vector = eigen.eigenvectors.column(leading).into_owned();
    if vector.sum() < 0.0 {
        vector.neg_mut();
    }
    let norm = vector.norm();
    if norm > 0.0 {
        vector /= norm;
    }
    Ok(vector.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::test_graphs::*;

    #[test]
    fn three_node_path() {
        let values = eigenvector_centrality(&path(3), &CentralityParams::default()).unwrap();
        assert_close(&values, &[0.5, std::f64::consts::FRAC_1_SQRT_2, 0.5], 1e-9);
    }

    #[test]
    fn complete_graph_is_uniform() {
        let values = eigenvector_centrality(&complete(3), &CentralityParams::default()).unwrap();
        assert_close(&values, &[1.0 / 3.0_f64.sqrt(); 3], 1e-9);
    }

    #[test]
    fn result_is_unit_length_and_non_negative() {
        let graph = ContactGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 2)]).unwrap();
        let values = eigenvector_centrality(&graph, &CentralityParams::default()).unwrap();
        let norm: f64 = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(values.iter().all(|&v| v > -1e-12));
        assert!(values[2] > values[4]);
    }

    #[test]
    fn edgeless_graph_yields_zeros() {
        let graph = ContactGraph::from_edges(3, &[]).unwrap();
        let values = eigenvector_centrality(&graph, &CentralityParams::default()).unwrap();
        assert_eq!(values, vec![0.0; 3]);
    }
}
