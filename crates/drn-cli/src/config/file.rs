use crate::error::{CliError, Result};
use drnkit::core::metrics::{CentralityParams, Metric};
use drnkit::engine::aggregate::Statistic;
use drnkit::engine::config::FailurePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The `[output]` table of a configuration file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub frame_data: Option<bool>,
    pub generate_plots: Option<bool>,
    pub save_graphs: Option<bool>,
}

/// A configuration file as written by the user. Every field is optional;
/// anything left out falls back to the defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub threshold: Option<f64>,
    pub step: Option<usize>,
    pub ligands: Option<String>,
    pub metrics: Option<Vec<Metric>>,
    pub drnstat: Option<Statistic>,
    pub on_failure: Option<FailurePolicy>,
    pub lazy_load: Option<bool>,
    pub output: Option<FileOutputConfig>,
    pub centrality: Option<CentralityParams>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration file {:?}", path);
        let text = std::fs::read_to_string(path).map_err(CliError::Io)?;
        Self::from_toml(&text).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_parses() {
        let config = FileConfig::from_toml(
            r#"
            threshold = 7.0
            step = 5
            ligands = "ATP:PG,MG:MG"
            metrics = ["BC", "katz", "L"]
            drnstat = "median"
            on-failure = "skip-frame"
            lazy-load = true

            [output]
            directory = "results"
            frame-data = false
            generate-plots = true

            [centrality]
            katz-alpha = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold, Some(7.0));
        assert_eq!(config.step, Some(5));
        assert_eq!(
            config.metrics,
            Some(vec![Metric::Betweenness, Metric::Katz, Metric::AveragePathLength])
        );
        assert_eq!(config.drnstat, Some(Statistic::Median));
        assert_eq!(config.on_failure, Some(FailurePolicy::SkipFrame));
        let output = config.output.unwrap();
        assert_eq!(output.directory, Some(PathBuf::from("results")));
        assert_eq!(output.frame_data, Some(false));
        assert_eq!(output.save_graphs, None);
        let centrality = config.centrality.unwrap();
        assert_eq!(centrality.katz_alpha, 0.05);
        assert_eq!(centrality.katz_beta, CentralityParams::default().katz_beta);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("cutoff = 6.7").is_err());
        assert!(FileConfig::from_toml("[centrality]\ndamping = 0.9").is_err());
    }

    #[test]
    fn from_file_reports_the_path_on_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drn.toml");
        std::fs::write(&path, "threshold = \"far\"").unwrap();
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));
    }
}
