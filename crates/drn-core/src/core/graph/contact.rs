use crate::core::models::frame::Frame;
use crate::core::selection::AtomSelection;
use itertools::Itertools;
use nalgebra::{DMatrix, Point3};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("Contact threshold must be a finite positive distance in Angstroms, got {0}")]
    InvalidThreshold(f64),
    #[error("Edge ({a}, {b}) references a node outside 0..{node_count}")]
    NodeOutOfRange {
        a: usize,
        b: usize,
        node_count: usize,
    },
}

/// An undirected, unweighted residue contact network for a single frame.
///
/// Node `i` corresponds to the `i`-th atom of the selection the graph was built
/// from; its weight is that atom's index in the frame topology. Nodes without
/// contacts are kept so that every centrality vector has one entry per
/// selected atom.
#[derive(Debug, Clone)]
pub struct ContactGraph {
    graph: UnGraph<usize, ()>,
    threshold: Option<f64>,
}

impl ContactGraph {
    /// Builds the contact graph of a frame.
    ///
    /// An edge joins two selected atoms iff their Euclidean distance is strictly
    /// below `threshold`. Edges are inserted in row-major pair order whether or
    /// not the scan runs in parallel, so the resulting graph is deterministic.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame providing coordinates.
    /// * `selection` - The atoms that become network nodes.
    /// * `threshold` - The contact cutoff in Angstroms.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidThreshold`] if the threshold is not a
    /// finite positive number.
    pub fn build(
        frame: &Frame,
        selection: &AtomSelection,
        threshold: f64,
    ) -> Result<Self, GraphError> {
        validate_threshold(threshold)?;

        let atom_indices = frame.select(selection);
        let points: Vec<Point3<f64>> = atom_indices
            .iter()
            .map(|&idx| frame.positions()[idx])
            .collect();

        #[cfg(feature = "parallel")]
        let contacts = scan_contacts_parallel(&points, threshold);
        #[cfg(not(feature = "parallel"))]
        let contacts = scan_contacts(&points, threshold);

        let mut graph = UnGraph::with_capacity(atom_indices.len(), contacts.len());
        for &atom_index in &atom_indices {
            graph.add_node(atom_index);
        }
        for (i, j) in contacts {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
        }

        debug!(
            frame = frame.index(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            threshold,
            "Built contact graph"
        );

        Ok(Self {
            graph,
            threshold: Some(threshold),
        })
    }

    /// Builds a graph from an explicit edge list over nodes `0..node_count`.
    ///
    /// Node weights are set to the node indices themselves.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = UnGraph::with_capacity(node_count, edges.len());
        for i in 0..node_count {
            graph.add_node(i);
        }
        for &(a, b) in edges {
            if a >= node_count || b >= node_count {
                return Err(GraphError::NodeOutOfRange { a, b, node_count });
            }
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        Ok(Self {
            graph,
            threshold: None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The cutoff the graph was built with, if it came from coordinates.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Topology index of the atom behind a node.
    pub fn atom_index(&self, node: usize) -> Option<usize> {
        self.graph.node_weight(NodeIndex::new(node)).copied()
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(NodeIndex::new(node)).map(|n| n.index())
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        a < self.node_count()
            && b < self.node_count()
            && self
                .graph
                .find_edge(NodeIndex::new(a), NodeIndex::new(b))
                .is_some()
    }

    /// Edges as `(smaller, larger)` node pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            (a.min(b), a.max(b))
        })
    }

    /// Neighbor lists indexed by node, used by the traversal-heavy metrics.
    pub fn adjacency_lists(&self) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.node_count()];
        for (a, b) in self.edges() {
            lists[a].push(b);
            lists[b].push(a);
        }
        lists
    }

    /// Dense symmetric 0/1 adjacency matrix.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::zeros(n, n);
        for (a, b) in self.edges() {
            matrix[(a, b)] = 1.0;
            matrix[(b, a)] = 1.0;
        }
        matrix
    }
}

fn validate_threshold(threshold: f64) -> Result<(), GraphError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidThreshold(threshold))
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn scan_contacts(points: &[Point3<f64>], threshold: f64) -> Vec<(usize, usize)> {
    (0..points.len())
        .tuple_combinations()
        .filter(|&(i, j)| nalgebra::distance(&points[i], &points[j]) < threshold)
        .collect()
}

#[cfg(feature = "parallel")]
fn scan_contacts_parallel(points: &[Point3<f64>], threshold: f64) -> Vec<(usize, usize)> {
    (0..points.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            (i + 1..points.len())
                .filter(move |&j| nalgebra::distance(&points[i], &points[j]) < threshold)
                .map(move |j| (i, j))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::Topology;
    use std::sync::Arc;

    fn line_frame(spacing: f64, count: usize) -> Frame {
        let atoms = (0..count)
            .map(|i| Atom::new(i + 1, "CB", "ALA", i as isize + 1, 'A'))
            .collect();
        let positions = (0..count)
            .map(|i| Point3::new(i as f64 * spacing, 0.0, 0.0))
            .collect();
        Frame::new(1, Arc::new(Topology::from_atoms(atoms)), positions).unwrap()
    }

    #[test]
    fn build_connects_only_pairs_strictly_below_threshold() {
        let frame = line_frame(5.0, 4);
        let graph = ContactGraph::build(&frame, &AtomSelection::default(), 6.7).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.threshold(), Some(6.7));

        let touching = ContactGraph::build(&frame, &AtomSelection::default(), 5.0).unwrap();
        assert_eq!(touching.edge_count(), 0);
        assert_eq!(touching.node_count(), 4);
    }

    #[test]
    fn every_edge_is_a_contact_and_every_contact_is_an_edge() {
        let atoms = (0..6)
            .map(|i| Atom::new(i + 1, "CB", "VAL", i as isize + 1, 'A'))
            .collect();
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(9.0, 1.0, 2.0),
            Point3::new(-2.0, 5.5, 1.0),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 4.0),
        ];
        let frame = Frame::new(2, Arc::new(Topology::from_atoms(atoms)), positions).unwrap();
        let graph = ContactGraph::build(&frame, &AtomSelection::default(), 6.7).unwrap();

        for i in 0..6 {
            for j in (i + 1)..6 {
                let close = frame.distance(i, j).unwrap() < 6.7;
                assert_eq!(graph.contains_edge(i, j), close, "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn nodes_map_back_to_selected_atoms() {
        let atoms = vec![
            Atom::new(1, "CA", "ALA", 1, 'A'),
            Atom::new(2, "CB", "ALA", 1, 'A'),
            Atom::new(3, "CA", "GLY", 2, 'A'),
        ];
        let frame = Frame::new(
            1,
            Arc::new(Topology::from_atoms(atoms)),
            vec![Point3::origin(); 3],
        )
        .unwrap();
        let graph = ContactGraph::build(&frame, &AtomSelection::default(), 6.7).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.atom_index(0), Some(1));
        assert_eq!(graph.atom_index(1), Some(2));
        assert_eq!(graph.atom_index(2), None);
    }

    #[test]
    fn build_rejects_invalid_thresholds() {
        let frame = line_frame(1.0, 2);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ContactGraph::build(&frame, &AtomSelection::default(), bad).unwrap_err();
            assert!(matches!(err, GraphError::InvalidThreshold(_)));
        }
    }

    #[test]
    fn from_edges_validates_node_indices() {
        let graph = ContactGraph::from_edges(3, &[(0, 1), (2, 1)]).unwrap();
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(0), 1);
        assert!(graph.contains_edge(1, 2));
        assert!(!graph.contains_edge(0, 2));
        assert!(!graph.contains_edge(0, 7));
        assert_eq!(graph.threshold(), None);

        assert_eq!(
            ContactGraph::from_edges(2, &[(0, 2)]).unwrap_err(),
            GraphError::NodeOutOfRange {
                a: 0,
                b: 2,
                node_count: 2
            }
        );
    }

    #[test]
    fn adjacency_views_agree() {
        let graph = ContactGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let matrix = graph.adjacency_matrix();
        assert_eq!(matrix, matrix.transpose());
        assert_eq!(matrix[(0, 1)], 1.0);
        assert_eq!(matrix[(0, 2)], 0.0);

        let mut lists = graph.adjacency_lists();
        lists.iter_mut().for_each(|l| l.sort_unstable());
        assert_eq!(lists, vec![vec![1], vec![0, 2], vec![1]]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_scan_matches_sequential_order() {
        let points: Vec<Point3<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.7;
                Point3::new(t.cos() * 8.0, t.sin() * 8.0, t)
            })
            .collect();
        assert_eq!(
            scan_contacts_parallel(&points, 6.7),
            scan_contacts(&points, 6.7)
        );
    }
}
