use super::error::EngineError;
use crate::core::metrics::Metric;
use std::collections::BTreeMap;

/// Centrality vectors keyed by metric, then by 1-based frame index.
///
/// The dataset is append-only: a (metric, frame) pair can be recorded once.
/// Iteration is always in [`Metric`] order and ascending frame order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    series: BTreeMap<Metric, BTreeMap<usize, Vec<f64>>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dataset that already lists `metrics`, with no frames recorded.
    pub fn with_metrics(metrics: impl IntoIterator<Item = Metric>) -> Self {
        Self {
            series: metrics
                .into_iter()
                .map(|metric| (metric, BTreeMap::new()))
                .collect(),
        }
    }

    /// Records the vector of one metric for one frame.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Internal`] if the pair was already recorded.
    pub fn insert(
        &mut self,
        metric: Metric,
        frame: usize,
        values: Vec<f64>,
    ) -> Result<(), EngineError> {
        let frames = self.series.entry(metric).or_default();
        if frames.contains_key(&frame) {
            return Err(EngineError::Internal(format!(
                "{metric} already recorded for frame {frame}"
            )));
        }
        frames.insert(frame, values);
        Ok(())
    }

    pub fn get(&self, metric: Metric, frame: usize) -> Option<&[f64]> {
        self.series
            .get(&metric)
            .and_then(|frames| frames.get(&frame))
            .map(Vec::as_slice)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.series.keys().copied()
    }

    /// The recorded vectors of a metric in ascending frame order.
    pub fn frames(&self, metric: Metric) -> impl Iterator<Item = (usize, &[f64])> + '_ {
        self.series
            .get(&metric)
            .into_iter()
            .flat_map(|frames| frames.iter().map(|(&frame, v)| (frame, v.as_slice())))
    }

    pub fn frame_indices(&self, metric: Metric) -> Vec<usize> {
        self.frames(metric).map(|(frame, _)| frame).collect()
    }

    /// Whether no vector has been recorded for any metric.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut dataset = Dataset::new();
        assert!(dataset.is_empty());
        dataset.insert(Metric::Degree, 2, vec![0.5, 0.5]).unwrap();
        dataset.insert(Metric::Degree, 1, vec![1.0, 0.0]).unwrap();

        assert!(!dataset.is_empty());
        assert_eq!(dataset.get(Metric::Degree, 1), Some(&[1.0, 0.0][..]));
        assert_eq!(dataset.get(Metric::Katz, 1), None);
        assert_eq!(dataset.frame_indices(Metric::Degree), vec![1, 2]);
    }

    #[test]
    fn duplicate_insertion_is_an_internal_error() {
        let mut dataset = Dataset::new();
        dataset.insert(Metric::Katz, 1, vec![1.0]).unwrap();
        let err = dataset.insert(Metric::Katz, 1, vec![2.0]).unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
        assert_eq!(dataset.get(Metric::Katz, 1), Some(&[1.0][..]));
    }

    #[test]
    fn preseeded_metrics_are_listed_in_metric_order() {
        let dataset = Dataset::with_metrics([Metric::AveragePathLength, Metric::Degree]);
        assert!(dataset.is_empty());
        assert_eq!(
            dataset.metrics().collect::<Vec<_>>(),
            vec![Metric::Degree, Metric::AveragePathLength]
        );
        assert_eq!(dataset.frames(Metric::Degree).count(), 0);
        assert_eq!(dataset.frames(Metric::Betweenness).count(), 0);
    }
}
