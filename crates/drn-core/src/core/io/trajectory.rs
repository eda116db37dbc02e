use super::pdb::{self, ModelParser, PdbError, RawModel};
use super::traits::FrameSource;
use crate::core::models::frame::{Frame, FrameError};
use crate::core::models::topology::Topology;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("PDB error: {0}")]
    Pdb(#[from] PdbError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("Frame stride must be at least 1 (got {0})")]
    InvalidStride(usize),
    #[error(
        "The first trajectory model does not match the topology ({expected} topology atoms, {found} model atoms)"
    )]
    TopologyMismatch { expected: usize, found: usize },
}

/// Lazily reads frames from a multi-model PDB stream, one model at a time.
///
/// Model `k` (0-based, in file order) is kept when `k % stride == 0`. Kept
/// models are numbered from 1. After the first error the reader yields `None`.
pub struct PdbFrameReader<R: BufRead> {
    parser: ModelParser<R>,
    topology: Arc<Topology>,
    pending: Option<RawModel>,
    stride: usize,
    models_read: usize,
    frames_emitted: usize,
    failed: bool,
}

impl PdbFrameReader<BufReader<File>> {
    /// Opens a trajectory file.
    ///
    /// # Arguments
    ///
    /// * `path` - The multi-model PDB file.
    /// * `topology` - A topology the first model must match atom for atom. If
    ///   `None`, the first model of the file defines it.
    /// * `stride` - Keep every `stride`-th model.
    pub fn open(
        path: impl AsRef<Path>,
        topology: Option<Arc<Topology>>,
        stride: usize,
    ) -> Result<Self, TrajectoryError> {
        let file = File::open(path).map_err(PdbError::from)?;
        Self::new(BufReader::new(file), topology, stride)
    }
}

impl<R: BufRead> PdbFrameReader<R> {
    pub fn new(
        reader: R,
        topology: Option<Arc<Topology>>,
        stride: usize,
    ) -> Result<Self, TrajectoryError> {
        if stride == 0 {
            return Err(TrajectoryError::InvalidStride(stride));
        }

        let mut parser = ModelParser::new(reader);
        let RawModel { atoms, positions } = parser.next_model()?.ok_or(PdbError::NoAtoms)?;
        let first_model = Topology::from_atoms(atoms);
        let topology = match topology {
            Some(topology) => {
                if !topology.is_compatible_with(&first_model) {
                    return Err(TrajectoryError::TopologyMismatch {
                        expected: topology.atom_count(),
                        found: first_model.atom_count(),
                    });
                }
                topology
            }
            None => Arc::new(first_model),
        };
        let pending = Some(RawModel {
            atoms: Vec::new(),
            positions,
        });

        Ok(Self {
            parser,
            topology,
            pending,
            stride,
            models_read: 0,
            frames_emitted: 0,
            failed: false,
        })
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, TrajectoryError> {
        loop {
            let model = match self.pending.take() {
                Some(model) => model,
                None => match self.parser.next_model()? {
                    Some(model) => model,
                    None => return Ok(None),
                },
            };

            let model_index = self.models_read;
            self.models_read += 1;
            if model_index % self.stride != 0 {
                continue;
            }

            self.frames_emitted += 1;
            let frame = Frame::new(
                self.frames_emitted,
                Arc::clone(&self.topology),
                model.positions,
            )?;
            return Ok(Some(frame));
        }
    }
}

impl<R: BufRead> Iterator for PdbFrameReader<R> {
    type Item = Result<Frame, TrajectoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_frame() {
            Ok(frame) => frame.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FrameSource for PdbFrameReader<R> {
    fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    fn total_frames(&self) -> Option<usize> {
        None
    }
}

/// A fully materialized trajectory.
#[derive(Debug)]
pub struct InMemoryTrajectory {
    topology: Arc<Topology>,
    frames: std::vec::IntoIter<Frame>,
    total: usize,
}

impl InMemoryTrajectory {
    pub fn from_frames(topology: Arc<Topology>, frames: Vec<Frame>) -> Self {
        let total = frames.len();
        Self {
            topology,
            frames: frames.into_iter(),
            total,
        }
    }

    /// Drains another source into memory, stopping at its first error.
    pub fn load<S: FrameSource>(source: S) -> Result<Self, TrajectoryError> {
        let topology = Arc::clone(source.topology());
        let frames = source.collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_frames(topology, frames))
    }
}

impl Iterator for InMemoryTrajectory {
    type Item = Result<Frame, TrajectoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next().map(Ok)
    }
}

impl FrameSource for InMemoryTrajectory {
    fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    fn total_frames(&self) -> Option<usize> {
        Some(self.total)
    }
}

/// Opens a trajectory as a frame source.
///
/// # Arguments
///
/// * `path` - The multi-model PDB trajectory.
/// * `topology_path` - An optional separate topology PDB whose first model
///   defines the atoms. The first trajectory model must list the same atoms
///   and every later model must have the same atom count.
/// * `stride` - Keep every `stride`-th model.
/// * `lazy` - Stream frames from disk instead of loading them all up front.
pub fn open_trajectory(
    path: &Path,
    topology_path: Option<&Path>,
    stride: usize,
    lazy: bool,
) -> Result<Box<dyn FrameSource>, TrajectoryError> {
    let topology = match topology_path {
        Some(topology_path) => {
            let (topology, _) = pdb::read_structure(topology_path)?;
            debug!(
                path = %topology_path.display(),
                atoms = topology.atom_count(),
                "Loaded topology"
            );
            Some(Arc::new(topology))
        }
        None => None,
    };

    let reader = PdbFrameReader::open(path, topology, stride)?;
    if lazy {
        info!(path = %path.display(), stride, "Streaming trajectory frames from disk");
        return Ok(Box::new(reader));
    }

    let trajectory = InMemoryTrajectory::load(reader)?;
    info!(
        path = %path.display(),
        frames = trajectory.total,
        atoms = trajectory.topology.atom_count(),
        stride,
        "Loaded trajectory"
    );
    Ok(Box::new(trajectory))
}
