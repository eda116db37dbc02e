use super::config::OutputConfig;
use crate::core::graph::ContactGraph;
use crate::core::io::{OutputError, graph_formats, plot, tables, with_suffix};
use crate::core::metrics::Metric;
use crate::core::models::topology::Topology;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Writes the files that belong to a single frame.
///
/// Numeric vectors are part of the results and their write failures are
/// returned. Graphs and plots are auxiliary: failures are logged and ignored.
pub(crate) struct FrameOutputWriter<'a> {
    config: &'a OutputConfig,
}

impl<'a> FrameOutputWriter<'a> {
    pub fn new(config: &'a OutputConfig) -> Self {
        Self { config }
    }

    pub fn save_graph(&self, frame: usize, graph: &ContactGraph, topology: &Topology) {
        if !self.config.save_graphs {
            return;
        }
        let prefix = self.config.frame_prefix(frame);
        match graph_formats::save_graph(graph, topology, &prefix) {
            Ok(paths) => debug!(frame, gml = %paths[0].display(), "Saved contact graph"),
            Err(e) => warn!(frame, error = %e, "Could not save contact graph; continuing"),
        }
    }

    /// Writes `<basename>_<frame>_<label>.dat` (and `.svg` when plotting is
    /// enabled) for every vector, returning the data files written.
    pub fn save_vectors(
        &self,
        frame: usize,
        vectors: &[(Metric, Vec<f64>)],
    ) -> Result<Vec<PathBuf>, OutputError> {
        let prefix = self.config.frame_prefix(frame);
        let mut written = Vec::new();

        for (metric, values) in vectors {
            let label = metric.file_label();

            if self.config.write_frame_data {
                let path = with_suffix(&prefix, &format!("_{label}.dat"));
                tables::write_vector(&path, values)?;
                written.push(path);
            }

            if self.config.generate_plots {
                let path = with_suffix(&prefix, &format!("_{label}.svg"));
                let title = format!("{} (frame {})", metric.description(), frame);
                if let Err(e) = plot::plot_series(&path, &title, metric.label(), values) {
                    warn!(frame, %metric, error = %e, "Could not render plot; continuing");
                }
            }
        }
        Ok(written)
    }

    /// Writes the all-pairs hop distances as `<basename>_<frame>_L.dat`.
    ///
    /// Returns `None` when per-frame data is disabled.
    pub fn save_distance_matrix(
        &self,
        frame: usize,
        distances: &[Vec<usize>],
    ) -> Result<Option<PathBuf>, OutputError> {
        if !self.config.write_frame_data {
            return Ok(None);
        }
        let path = with_suffix(&self.config.frame_prefix(frame), "_L.dat");
        tables::write_matrix(&path, distances)?;
        Ok(Some(path))
    }

    pub fn writes_frame_data(&self) -> bool {
        self.config.write_frame_data
    }
}
