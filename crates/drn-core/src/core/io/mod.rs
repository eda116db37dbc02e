//! File input and output.
//!
//! Trajectories are read as multi-model PDB files through the [`FrameSource`]
//! abstraction. Results are written as plain numeric vectors, CSV tables,
//! graph interchange files (GML and GraphML), annotated mmCIF structures and
//! SVG line plots.
//!
//! [`FrameSource`]: traits::FrameSource

pub mod graph_formats;
pub mod mmcif;
pub mod pdb;
pub mod plot;
pub mod tables;
pub mod traits;
pub mod trajectory;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write table '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to render plot '{path}': {message}")]
    Plot { path: PathBuf, message: String },
}

impl OutputError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            OutputError::Io { path, .. }
            | OutputError::Csv { path, .. }
            | OutputError::Plot { path, .. } => path,
        }
    }
}

/// Appends `suffix` to the final component of `prefix` (`out/run_1` + `_DC.dat`).
pub(crate) fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
