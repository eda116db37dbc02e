use super::{CentralityParams, MetricError};
use crate::core::graph::ContactGraph;
use nalgebra::DVector;

/// Katz centrality by power iteration of `x <- alpha * A * x + beta`, starting
/// from zero, with the result scaled to unit Euclidean norm.
///
/// # Errors
///
/// Returns [`MetricError::NotConverged`] when `params.katz_max_iterations` is
/// exhausted, which happens whenever `alpha` is not below the reciprocal of
/// the largest adjacency eigenvalue.
pub fn katz_centrality(
    graph: &ContactGraph,
    params: &CentralityParams,
) -> Result<Vec<f64>, MetricError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let adjacency = graph.adjacency_matrix();
    let beta = DVector::from_element(n, params.katz_beta);
    let mut x: DVector<f64> = DVector::zeros(n);

    for _ in 0..params.katz_max_iterations {
        let next = &adjacency * &x * params.katz_alpha + &beta;
        let error = (&next - &x).abs().sum();
        x = next;
        if error < n as f64 * params.tolerance {
            let norm = x.norm();
            if norm > 0.0 {
                x /= norm;
            }
            return Ok(x.iter().copied().collect());
        }
    }

    Err(MetricError::NotConverged {
        iterations: params.katz_max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::test_graphs::*;
    use nalgebra::DMatrix;

    fn closed_form(graph: &ContactGraph, alpha: f64) -> Vec<f64> {
        let n = graph.node_count();
        let system = DMatrix::identity(n, n) - graph.adjacency_matrix() * alpha;
        let solution = system.lu().solve(&DVector::from_element(n, 1.0)).unwrap();
        let norm = solution.norm();
        solution.iter().map(|v| v / norm).collect()
    }

    #[test]
    fn converges_to_the_resolvent_solution() {
        let graph = ContactGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (1, 3)]).unwrap();
        let values = katz_centrality(&graph, &CentralityParams::default()).unwrap();
        assert_close(&values, &closed_form(&graph, 0.1), 1e-6);
    }

    #[test]
    fn path_middle_outranks_its_ends() {
        let values = katz_centrality(&path(3), &CentralityParams::default()).unwrap();
        assert!(values[1] > values[0]);
        assert!((values[0] - values[2]).abs() < 1e-12);
    }

    #[test]
    fn too_large_alpha_does_not_converge() {
        let params = CentralityParams {
            katz_alpha: 1.0,
            katz_max_iterations: 50,
            ..CentralityParams::default()
        };
        assert_eq!(
            katz_centrality(&complete(3), &params),
            Err(MetricError::NotConverged { iterations: 50 })
        );
    }
}
