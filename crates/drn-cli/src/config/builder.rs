use super::AppConfig;
use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::NetworkArgs;
use crate::error::{CliError, Result};
use drnkit::core::metrics::Metric;
use drnkit::core::selection::{AtomSelection, parse_ligand_list};
use drnkit::engine::config::{NetworkConfigBuilder, OutputConfig};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Merges defaults, the optional configuration file, `--set` overrides and
/// explicit flags, in that order of increasing precedence.
///
/// Fails before any trajectory data is touched, including when no metric
/// ends up selected.
pub fn build_config(args: &NetworkArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Configuration after --set overrides: {:?}", file_config);

    let threshold = args
        .threshold
        .or(file_config.threshold)
        .unwrap_or(defaults.threshold);
    let step = args.step.or(file_config.step).unwrap_or(defaults.step);
    let statistic = args
        .drnstat
        .or(file_config.drnstat)
        .unwrap_or(defaults.statistic);
    let failure_policy = args
        .on_failure
        .or(file_config.on_failure)
        .unwrap_or(defaults.failure_policy);
    let lazy_load = args.lazy_load || file_config.lazy_load.unwrap_or(defaults.lazy_load);

    let mut metrics = args.metrics.selected();
    if metrics.is_empty() {
        metrics = file_config.metrics.take().unwrap_or_default();
    }

    let mut selection = AtomSelection::residue_representatives();
    if let Some(ligands) = args.ligands.as_deref().or(file_config.ligands.as_deref()) {
        let ligands =
            parse_ligand_list(ligands).map_err(|e| CliError::Argument(e.to_string()))?;
        selection = selection.with_ligands(ligands);
    }

    let output_file = file_config.output.take().unwrap_or_default();
    let directory = args
        .output_dir
        .clone()
        .or(output_file.directory)
        .unwrap_or(defaults.output_dir);
    let mut output = OutputConfig::new(directory, basename_of(&args.trajectory)?);
    output.write_frame_data = !args.no_frame_data
        && output_file
            .frame_data
            .unwrap_or(defaults.write_frame_data);
    output.generate_plots =
        args.generate_plots || output_file.generate_plots.unwrap_or(defaults.generate_plots);
    output.save_graphs =
        args.save_graphs || output_file.save_graphs.unwrap_or(defaults.save_graphs);

    let network = NetworkConfigBuilder::new()
        .threshold(threshold)
        .stride(step)
        .selection(selection)
        .metrics(metrics)
        .centrality(file_config.centrality.take().unwrap_or_default())
        .failure_policy(failure_policy)
        .statistic(statistic)
        .output(output)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        trajectory: args.trajectory.clone(),
        topology: args.topology.clone(),
        lazy_load,
        network,
    })
}

/// Output files are named after the trajectory without its extension.
fn basename_of(trajectory: &Path) -> Result<String> {
    trajectory
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::Argument(format!(
                "Cannot derive an output name from trajectory path {:?}",
                trajectory
            ))
        })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "threshold" => config.threshold = Some(parse_value(key, value_str, "float")?),
            "step" => config.step = Some(parse_value(key, value_str, "integer")?),
            "ligands" => config.ligands = Some(value_str.to_string()),
            "drnstat" => config.drnstat = Some(parse_value(key, value_str, "statistic")?),
            "on-failure" => config.on_failure = Some(parse_value(key, value_str, "policy")?),
            "lazy-load" => config.lazy_load = Some(parse_value(key, value_str, "boolean")?),
            "metrics" => {
                let metrics = value_str
                    .split(',')
                    .filter(|m| !m.trim().is_empty())
                    .map(|m| Metric::from_str(m).map_err(|e| CliError::Config(e.to_string())))
                    .collect::<Result<Vec<_>>>()?;
                config.metrics = Some(metrics);
            }
            "output.directory" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .directory = Some(value_str.into());
            }
            "output.frame-data" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .frame_data = Some(parse_value(key, value_str, "boolean")?);
            }
            "output.generate-plots" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .generate_plots = Some(parse_value(key, value_str, "boolean")?);
            }
            "output.save-graphs" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .save_graphs = Some(parse_value(key, value_str, "boolean")?);
            }
            _ if key.starts_with("centrality.") => {
                let params = config.centrality.get_or_insert_with(Default::default);
                match &key["centrality.".len()..] {
                    "pagerank-damping" => {
                        params.pagerank_damping = parse_value(key, value_str, "float")?
                    }
                    "pagerank-max-iterations" => {
                        params.pagerank_max_iterations = parse_value(key, value_str, "integer")?
                    }
                    "katz-alpha" => params.katz_alpha = parse_value(key, value_str, "float")?,
                    "katz-beta" => params.katz_beta = parse_value(key, value_str, "float")?,
                    "katz-max-iterations" => {
                        params.katz_max_iterations = parse_value(key, value_str, "integer")?
                    }
                    "eigen-max-iterations" => {
                        params.eigen_max_iterations = parse_value(key, value_str, "integer")?
                    }
                    "tolerance" => params.tolerance = parse_value(key, value_str, "float")?,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                }
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
