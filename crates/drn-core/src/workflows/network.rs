use crate::core::io::OutputError;
use crate::core::io::traits::FrameSource;
use crate::engine::aggregate::{AggregateTable, aggregate};
use crate::engine::config::NetworkConfig;
use crate::engine::dataset::Dataset;
use crate::engine::driver::FrameDriver;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct NetworkResult {
    pub dataset: Dataset,
    pub table: AggregateTable,
    pub frames_recorded: usize,
    pub frames_skipped: Vec<usize>,
    /// Every result file written, per-frame vectors first and the aggregate
    /// table last.
    pub files_written: Vec<PathBuf>,
}

/// Runs the dynamic residue network analysis over a trajectory.
///
/// Frames are consumed in order. Each becomes a contact graph whose
/// centralities are recorded, then all recorded vectors are reduced with the
/// configured statistic. When an output configuration is present, per-frame
/// files and the `<basename>_<stat>.csv` table are written as well.
///
/// # Errors
///
/// Propagates trajectory, graph, metric and output failures; returns
/// [`EngineError::EmptyTrajectory`] if no frame was recorded.
#[instrument(skip_all, name = "network_workflow")]
pub fn run<S: FrameSource>(
    source: S,
    config: &NetworkConfig,
    reporter: &ProgressReporter,
) -> Result<NetworkResult, EngineError> {
    let labels: Vec<&str> = config.metrics.iter().map(|m| m.label()).collect();
    let nodes = config.selection.resolve(source.topology()).len();
    info!(
        threshold = config.threshold,
        metrics = ?labels,
        nodes,
        policy = %config.failure_policy,
        "Starting network analysis"
    );
    if nodes == 0 {
        warn!(selection = %config.selection, "The selection matches no atoms");
    }

    if let Some(output) = &config.output {
        std::fs::create_dir_all(&output.directory)
            .map_err(|e| OutputError::io(&output.directory, e))?;
    }

    // === Phase 1: Per-frame networks and centralities ===
    reporter.report(Progress::PhaseStart {
        name: "Network construction",
    });
    let mut driver = FrameDriver::new(config, reporter);
    driver.run(source)?;
    let driver_output = driver.finish()?;
    if !driver_output.frames_skipped.is_empty() {
        reporter.report(Progress::Message(format!(
            "Skipped {} frame(s) under the '{}' policy",
            driver_output.frames_skipped.len(),
            config.failure_policy
        )));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Aggregation ===
    reporter.report(Progress::PhaseStart {
        name: "Aggregation",
    });
    let table = aggregate(&driver_output.dataset, config.statistic)?;
    let mut files_written = driver_output.files_written;
    if let Some(output) = &config.output {
        let path = table.save(&output.directory, &output.basename)?;
        info!(path = %path.display(), "Wrote aggregate table");
        files_written.push(path);
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        frames = driver_output.frames_recorded,
        skipped = driver_output.frames_skipped.len(),
        residues = table.residue_count(),
        "Network analysis complete"
    );

    Ok(NetworkResult {
        dataset: driver_output.dataset,
        table,
        frames_recorded: driver_output.frames_recorded,
        frames_skipped: driver_output.frames_skipped,
        files_written,
    })
}
