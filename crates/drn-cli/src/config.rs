pub mod builder;
pub mod defaults;
pub mod file;

use drnkit::engine::config::NetworkConfig;
use std::path::{Path, PathBuf};

/// Everything the `network` command needs after merging defaults, the
/// configuration file, `--set` overrides and command-line flags.
#[derive(Debug)]
pub struct AppConfig {
    pub trajectory: PathBuf,
    pub topology: Option<PathBuf>,
    pub lazy_load: bool,
    pub network: NetworkConfig,
}

impl AppConfig {
    /// The structure aggregate statistics are mapped onto: the topology file
    /// if one was given, otherwise the first model of the trajectory.
    pub fn reference_structure(&self) -> &Path {
        self.topology.as_deref().unwrap_or(&self.trajectory)
    }
}
