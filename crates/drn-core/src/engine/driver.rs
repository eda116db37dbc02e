use super::config::{FailurePolicy, NetworkConfig};
use super::dataset::Dataset;
use super::error::EngineError;
use super::outputs::FrameOutputWriter;
use super::progress::{Progress, ProgressReporter};
use crate::core::graph::ContactGraph;
use crate::core::io::traits::FrameSource;
use crate::core::metrics::{self, Metric, MetricError, path_length};
use crate::core::models::frame::Frame;
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

/// Where the driver is in its per-frame cycle.
///
/// `Init -> (BuildGraph -> ComputeMetrics -> Record | Skip)* -> Finalize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Init,
    BuildGraph { frame: usize },
    ComputeMetrics { frame: usize },
    Record { frame: usize },
    Skip { frame: usize },
    Finalize,
}

/// The result of processing one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Recorded { frame: usize },
    Skipped { frame: usize, metric: Metric, reason: MetricError },
}

/// What the driver hands back once the trajectory is exhausted.
#[derive(Debug, Clone)]
pub struct DriverOutput {
    pub dataset: Dataset,
    pub frames_recorded: usize,
    pub frames_skipped: Vec<usize>,
    pub files_written: Vec<PathBuf>,
}

/// Turns frames into centrality vectors, one frame at a time, in source order.
pub struct FrameDriver<'a> {
    config: &'a NetworkConfig,
    reporter: &'a ProgressReporter<'a>,
    outputs: Option<FrameOutputWriter<'a>>,
    state: DriverState,
    dataset: Dataset,
    frames_recorded: usize,
    frames_skipped: Vec<usize>,
    files_written: Vec<PathBuf>,
}

impl<'a> FrameDriver<'a> {
    pub fn new(config: &'a NetworkConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self {
            config,
            reporter,
            outputs: config.output.as_ref().map(FrameOutputWriter::new),
            state: DriverState::Init,
            dataset: Dataset::with_metrics(config.metrics.iter().copied()),
            frames_recorded: 0,
            frames_skipped: Vec::new(),
            files_written: Vec::new(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Builds the frame's graph, computes every requested metric and records
    /// them, or skips the frame if the failure policy allows it.
    ///
    /// Either all requested metrics of a frame are recorded or none are.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Metric`] for failures the policy does not cover,
    /// and graph or output errors as they occur.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameOutcome, EngineError> {
        if self.state == DriverState::Finalize {
            return Err(EngineError::Internal(
                "frame submitted after the driver was finalized".to_string(),
            ));
        }
        let index = frame.index();

        self.state = DriverState::BuildGraph { frame: index };
        let graph = ContactGraph::build(frame, &self.config.selection, self.config.threshold)?;
        if let Some(outputs) = &self.outputs {
            outputs.save_graph(index, &graph, frame.topology());
        }

        self.state = DriverState::ComputeMetrics { frame: index };
        let mut vectors = Vec::with_capacity(self.config.metrics.len());
        for &metric in &self.config.metrics {
            match metrics::compute(&graph, metric, &self.config.centrality) {
                Ok(values) => vectors.push((metric, values)),
                Err(reason)
                    if reason.is_recoverable()
                        && self.config.failure_policy == FailurePolicy::SkipFrame =>
                {
                    warn!(frame = index, %metric, error = %reason, "Skipping frame");
                    self.state = DriverState::Skip { frame: index };
                    self.frames_skipped.push(index);
                    return Ok(FrameOutcome::Skipped {
                        frame: index,
                        metric,
                        reason,
                    });
                }
                Err(source) => {
                    return Err(EngineError::Metric {
                        frame: index,
                        metric,
                        source,
                    });
                }
            }
        }

        self.state = DriverState::Record { frame: index };
        if let Some(outputs) = &self.outputs {
            let mut written = outputs.save_vectors(index, &vectors)?;
            if outputs.writes_frame_data()
                && self.config.metrics.contains(&Metric::AveragePathLength)
            {
                let distances = path_length::shortest_path_matrix(&graph).map_err(|source| {
                    EngineError::Metric {
                        frame: index,
                        metric: Metric::AveragePathLength,
                        source,
                    }
                })?;
                written.extend(outputs.save_distance_matrix(index, &distances)?);
            }
            self.files_written.extend(written);
        }
        for (metric, values) in vectors {
            self.dataset.insert(metric, index, values)?;
        }
        self.frames_recorded += 1;
        trace!(frame = index, nodes = graph.node_count(), "Recorded frame");
        Ok(FrameOutcome::Recorded { frame: index })
    }

    /// Drains a frame source through [`process_frame`](Self::process_frame).
    pub fn run<S: FrameSource>(&mut self, source: S) -> Result<(), EngineError> {
        let total = source.total_frames();
        for frame in source {
            let frame = frame?;
            let index = frame.index();
            self.reporter.report(Progress::FrameStart { index, total });
            let outcome = self.process_frame(&frame)?;
            self.reporter.report(Progress::FrameFinish {
                index,
                recorded: matches!(outcome, FrameOutcome::Recorded { .. }),
            });
        }
        Ok(())
    }

    /// Ends the run and hands over the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyTrajectory`] if no frame was recorded.
    pub fn finish(mut self) -> Result<DriverOutput, EngineError> {
        self.state = DriverState::Finalize;
        if self.frames_recorded == 0 {
            return Err(EngineError::EmptyTrajectory);
        }
        if !self.frames_skipped.is_empty() {
            info!(
                skipped = self.frames_skipped.len(),
                recorded = self.frames_recorded,
                "Some frames were skipped by the failure policy"
            );
        }
        debug!(frames = self.frames_recorded, "Frame driver finished");
        Ok(DriverOutput {
            dataset: self.dataset,
            frames_recorded: self.frames_recorded,
            frames_skipped: self.frames_skipped,
            files_written: self.files_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::trajectory::InMemoryTrajectory;
    use crate::core::metrics::CentralityParams;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::Topology;
    use crate::engine::config::NetworkConfigBuilder;
    use nalgebra::Point3;
    use std::sync::Arc;

    fn topology(n: usize) -> Arc<Topology> {
        Arc::new(Topology::from_atoms(
            (0..n)
                .map(|i| Atom::new(i + 1, "CB", "ALA", i as isize + 1, 'A'))
                .collect(),
        ))
    }

    fn frame(index: usize, topology: &Arc<Topology>, xs: &[f64]) -> Frame {
        let positions = xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect();
        Frame::new(index, Arc::clone(topology), positions).unwrap()
    }

    fn config(metrics: &[Metric], policy: FailurePolicy) -> NetworkConfig {
        NetworkConfigBuilder::new()
            .threshold(6.7)
            .metrics(metrics.iter().copied())
            .failure_policy(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn records_every_metric_for_each_frame() {
        let topology = topology(3);
        let config = config(&[Metric::Degree, Metric::Closeness], FailurePolicy::Abort);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);
        assert_eq!(driver.state(), DriverState::Init);

        let outcome = driver
            .process_frame(&frame(1, &topology, &[0.0, 5.0, 10.0]))
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Recorded { frame: 1 });
        assert_eq!(driver.state(), DriverState::Record { frame: 1 });

        let output = driver.finish().unwrap();
        assert_eq!(output.frames_recorded, 1);
        assert_eq!(output.dataset.get(Metric::Degree, 1), Some(&[0.5, 1.0, 0.5][..]));
        assert!(output.dataset.get(Metric::Closeness, 1).is_some());
    }

    #[test]
    fn abort_policy_reports_frame_and_metric() {
        let topology = topology(2);
        let config = config(&[Metric::Degree], FailurePolicy::Abort);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);

        let err = driver
            .process_frame(&frame(4, &topology, &[0.0, 50.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Metric {
                frame: 4,
                metric: Metric::Degree,
                source: MetricError::DegenerateGraph
            }
        ));
    }

    #[test]
    fn skip_policy_drops_the_whole_frame() {
        let topology = topology(2);
        let config = config(&[Metric::Closeness, Metric::Degree], FailurePolicy::SkipFrame);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);

        driver.process_frame(&frame(1, &topology, &[0.0, 5.0])).unwrap();
        let outcome = driver
            .process_frame(&frame(2, &topology, &[0.0, 50.0]))
            .unwrap();
        assert!(matches!(
            outcome,
            FrameOutcome::Skipped {
                frame: 2,
                metric: Metric::Closeness,
                reason: MetricError::DegenerateGraph
            }
        ));
        assert_eq!(driver.state(), DriverState::Skip { frame: 2 });

        let output = driver.finish().unwrap();
        assert_eq!(output.frames_skipped, vec![2]);
        assert_eq!(output.dataset.frame_indices(Metric::Closeness), vec![1]);
        assert_eq!(output.dataset.frame_indices(Metric::Degree), vec![1]);
    }

    fn starved_pagerank(policy: FailurePolicy) -> NetworkConfig {
        NetworkConfigBuilder::new()
            .threshold(6.7)
            .metrics([Metric::Degree, Metric::PageRank])
            .centrality(CentralityParams {
                pagerank_max_iterations: 1,
                ..Default::default()
            })
            .failure_policy(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn unconverged_metric_is_attributed_to_its_frame() {
        let topology = topology(3);
        let config = starved_pagerank(FailurePolicy::Abort);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);

        let err = driver
            .process_frame(&frame(2, &topology, &[0.0, 5.0, 10.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Metric {
                frame: 2,
                metric: Metric::PageRank,
                source: MetricError::NotConverged { iterations: 1 }
            }
        ));
        assert!(driver.dataset().is_empty());
    }

    #[test]
    fn unconverged_metric_skips_the_frame_under_skip_policy() {
        let topology = topology(3);
        let config = starved_pagerank(FailurePolicy::SkipFrame);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);

        let outcome = driver
            .process_frame(&frame(3, &topology, &[0.0, 5.0, 10.0]))
            .unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Skipped {
                frame: 3,
                metric: Metric::PageRank,
                reason: MetricError::NotConverged { iterations: 1 }
            }
        );
        assert_eq!(driver.state(), DriverState::Skip { frame: 3 });
        assert!(driver.dataset().get(Metric::Degree, 3).is_none());
        assert!(matches!(driver.finish(), Err(EngineError::EmptyTrajectory)));
    }

    #[test]
    fn distance_matrix_is_written_with_path_lengths() {
        use crate::engine::config::OutputConfig;

        let dir = tempfile::tempdir().unwrap();
        let topology = topology(3);
        let config = NetworkConfigBuilder::new()
            .threshold(6.7)
            .metric(Metric::AveragePathLength)
            .output(OutputConfig::new(dir.path(), "md"))
            .build()
            .unwrap();
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);
        driver
            .process_frame(&frame(1, &topology, &[0.0, 5.0, 10.0]))
            .unwrap();

        let output = driver.finish().unwrap();
        assert_eq!(
            output.files_written,
            vec![dir.path().join("md_1_avg_L.dat"), dir.path().join("md_1_L.dat")]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("md_1_L.dat")).unwrap(),
            "0 1 2\n1 0 1\n2 1 0\n"
        );
    }

    #[test]
    fn orphan_nodes_abort_even_when_skipping() {
        let topology = topology(4);
        let config = config(&[Metric::AveragePathLength], FailurePolicy::SkipFrame);
        let reporter = ProgressReporter::new();
        let mut driver = FrameDriver::new(&config, &reporter);

        let err = driver
            .process_frame(&frame(7, &topology, &[0.0, 5.0, 100.0, 105.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Metric {
                frame: 7,
                metric: Metric::AveragePathLength,
                source: MetricError::OrphanNode { from: 0, to: 2 }
            }
        ));
    }

    #[test]
    fn finish_without_recorded_frames_is_an_empty_trajectory() {
        let config = config(&[Metric::Degree], FailurePolicy::Abort);
        let reporter = ProgressReporter::new();
        let driver = FrameDriver::new(&config, &reporter);
        assert!(matches!(driver.finish(), Err(EngineError::EmptyTrajectory)));
    }

    #[test]
    fn run_reports_progress_for_each_frame() {
        use std::sync::Mutex;

        let topology = topology(3);
        let frames = (1..=3)
            .map(|i| frame(i, &topology, &[0.0, 4.0, 8.0]))
            .collect();
        let source = InMemoryTrajectory::from_frames(Arc::clone(&topology), frames);
        let config = config(&[Metric::Degree], FailurePolicy::Abort);

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::FrameStart { index, total } = event {
                events.lock().unwrap().push((index, total));
            }
        }));
        let mut driver = FrameDriver::new(&config, &reporter);
        driver.run(source).unwrap();
        let output = driver.finish().unwrap();
        drop(reporter);

        assert_eq!(output.frames_recorded, 3);
        assert_eq!(
            events.into_inner().unwrap(),
            vec![(1, Some(3)), (2, Some(3)), (3, Some(3))]
        );
    }
}
