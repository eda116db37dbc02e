use crate::core::graph::ContactGraph;
use std::collections::VecDeque;

const UNVISITED: usize = usize::MAX;

/// Normalized betweenness centrality using Brandes' algorithm.
///
/// Every ordered source is processed, so each unordered pair contributes twice
/// to the raw scores; the raw scores are then scaled by `1 / ((n-1)(n-2))`.
/// Graphs with two or fewer nodes are returned unscaled (all zero).
pub fn betweenness_centrality(graph: &ContactGraph) -> Vec<f64> {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();
    let mut centrality = vec![0.0; n];

    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut distance = vec![UNVISITED; n];
    let mut delta = vec![0.0_f64; n];

    for source in 0..n {
        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.iter_mut().for_each(|s| *s = 0.0);
        distance.iter_mut().for_each(|d| *d = UNVISITED);
        delta.iter_mut().for_each(|d| *d = 0.0);

        sigma[source] = 1.0;
        distance[source] = 0;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adjacency[v] {
                if distance[w] == UNVISITED {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        centrality.iter_mut().for_each(|c| *c *= scale);
    }
    centrality
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::test_graphs::*;

    #[test]
    fn middle_of_a_three_node_path_lies_on_every_path() {
        assert_close(&betweenness_centrality(&path(3)), &[0.0, 1.0, 0.0], 1e-12);
    }

    #[test]
    fn inner_nodes_of_a_four_node_path() {
        let expected = [0.0, 2.0 / 3.0, 2.0 / 3.0, 0.0];
        assert_close(&betweenness_centrality(&path(4)), &expected, 1e-12);
    }

    #[test]
    fn star_center_has_maximal_betweenness() {
        assert_close(
            &betweenness_centrality(&star(3)),
            &[1.0, 0.0, 0.0, 0.0],
            1e-12,
        );
    }

    #[test]
    fn equal_length_paths_split_the_credit() {
        let square = ContactGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_close(&betweenness_centrality(&square), &[1.0 / 6.0; 4], 1e-12);
    }

    #[test]
    fn complete_graph_has_no_brokers() {
        assert_close(&betweenness_centrality(&complete(5)), &[0.0; 5], 1e-12);
    }

    #[test]
    fn disconnected_components_are_scored_independently() {
        let graph = ContactGraph::from_edges(5, &[(0, 1), (1, 2), (3, 4)]).unwrap();
        let values = betweenness_centrality(&graph);
        assert_close(&values, &[0.0, 2.0 / 12.0, 0.0, 0.0, 0.0], 1e-12);
    }

    #[test]
    fn tiny_graphs_are_left_unscaled() {
        assert_eq!(betweenness_centrality(&path(2)), vec![0.0, 0.0]);
        assert!(betweenness_centrality(&path(0)).is_empty());
    }
}
