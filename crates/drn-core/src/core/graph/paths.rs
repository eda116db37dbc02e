use std::collections::VecDeque;

/// Unweighted single-source shortest path lengths by breadth-first search.
///
/// Entry `j` is the hop count from `source` to `j`, or `None` if `j` is not
/// reachable. `adjacency` is a neighbor list per node, as produced by
/// [`ContactGraph::adjacency_lists`](super::ContactGraph::adjacency_lists).
pub fn bfs_distances(adjacency: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; adjacency.len()];
    if source >= adjacency.len() {
        return distances;
    }

    let mut queue = VecDeque::with_capacity(adjacency.len());
    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let next = distances[v].map_or(0, |d| d + 1);
        for &w in &adjacency[v] {
            if distances[w].is_none() {
                distances[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    distances
}

/// Returns the first node, scanning in index order, that `source` cannot reach.
pub fn first_unreachable(distances: &[Option<usize>]) -> Option<usize> {
    distances.iter().position(Option::is_none)
}
