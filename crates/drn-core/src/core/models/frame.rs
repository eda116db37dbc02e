use super::topology::Topology;
use crate::core::selection::AtomSelection;
use nalgebra::Point3;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame {index} has {found} coordinates but the topology has {expected} atoms")]
    AtomCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// One sampled timestep of a trajectory.
///
/// A frame owns its coordinates (in Angstroms) and shares the static
/// [`Topology`] with every other frame of the same trajectory. Frames are
/// read-only once constructed.
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    topology: Arc<Topology>,
    positions: Vec<Point3<f64>>,
}

impl Frame {
    /// Creates a frame, checking that there is exactly one coordinate per
    /// topology atom.
    ///
    /// # Arguments
    ///
    /// * `index` - The 1-based position of the frame in the processed sequence.
    /// * `topology` - The shared topology.
    /// * `positions` - One coordinate per topology atom, in topology order.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::AtomCountMismatch`] if the lengths differ.
    pub fn new(
        index: usize,
        topology: Arc<Topology>,
        positions: Vec<Point3<f64>>,
    ) -> Result<Self, FrameError> {
        if positions.len() != topology.atom_count() {
            return Err(FrameError::AtomCountMismatch {
                index,
                expected: topology.atom_count(),
                found: positions.len(),
            });
        }
        Ok(Self {
            index,
            topology,
            positions,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn position(&self, atom_index: usize) -> Option<&Point3<f64>> {
        self.positions.get(atom_index)
    }

    /// Resolves a selection against this frame's topology into an ordered list
    /// of atom indices.
    pub fn select(&self, selection: &AtomSelection) -> Vec<usize> {
        selection.resolve(&self.topology)
    }

    /// Euclidean distance between two atoms, or `None` if either index is out
    /// of range.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        let pa = self.positions.get(a)?;
        let pb = self.positions.get(b)?;
        Some(nalgebra::distance(pa, pb))
    }
}
