use clap::{Args, Parser, Subcommand};
use drnkit::core::metrics::Metric;
use drnkit::engine::aggregate::Statistic;
use drnkit::engine::config::FailurePolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "David Brown, Olivier Sheik Amamuddy",
    version,
    about = "DRN++ CLI - Dynamic Residue Network analysis of molecular dynamics trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a contact network per frame, compute residue centralities and aggregate them.
    Network(NetworkArgs),
    /// List the centrality metrics that can be computed.
    Metrics,
}

/// Arguments for the `network` subcommand.
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    // --- Input ---
    /// Multi-model PDB trajectory.
    #[arg(required = true, value_name = "TRAJECTORY")]
    pub trajectory: PathBuf,

    /// Topology PDB file. Its first model defines the atoms and is the
    /// structure the aggregate statistics are mapped onto.
    #[arg(long, value_name = "PATH")]
    pub topology: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Network construction ---
    /// Maximum distance in Angstroms between two node atoms in contact (default: 6.7).
    #[arg(long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Use every n-th frame of the trajectory (default: 1).
    #[arg(long, value_name = "INT")]
    pub step: Option<usize>,

    /// Ligand atoms to include as nodes, e.g. 'ATP:PG,MG:MG'.
    #[arg(long, value_name = "RES:ATOM,...")]
    pub ligands: Option<String>,

    // --- Metrics ---
    #[command(flatten)]
    pub metrics: MetricFlags,

    /// The statistic to aggregate frames with (default: mean).
    #[arg(long, value_name = "STAT")]
    pub drnstat: Option<Statistic>,

    /// What to do when a metric cannot be computed for a frame (default: abort).
    #[arg(long = "on-failure", value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    // --- Outputs ---
    /// Directory for every output file (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Render an SVG plot of every metric of every frame.
    #[arg(long)]
    pub generate_plots: bool,

    /// Save each frame's network in GML and GraphML formats.
    #[arg(long)]
    pub save_graphs: bool,

    /// Do not write the per-frame .dat vectors.
    #[arg(long)]
    pub no_frame_data: bool,

    /// Stream frames from disk instead of loading the whole trajectory.
    #[arg(long)]
    pub lazy_load: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S centrality.katz-alpha=0.05
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// One switch per centrality metric.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MetricFlags {
    /// Compute betweenness centrality.
    #[arg(long = "calc-bc", alias = "calc-BC")]
    pub calc_bc: bool,
    /// Compute closeness centrality.
    #[arg(long = "calc-cc", alias = "calc-CC")]
    pub calc_cc: bool,
    /// Compute degree centrality.
    #[arg(long = "calc-dc", alias = "calc-DC")]
    pub calc_dc: bool,
    /// Compute eigenvector centrality.
    #[arg(long = "calc-ec", alias = "calc-EC")]
    pub calc_ec: bool,
    /// Compute eccentricity.
    #[arg(long = "calc-ecc", alias = "calc-ECC")]
    pub calc_ecc: bool,
    /// Compute average shortest path length.
    #[arg(long = "calc-l", alias = "calc-L")]
    pub calc_l: bool,
    /// Compute PageRank.
    #[arg(long = "calc-pr", alias = "calc-PR")]
    pub calc_pr: bool,
    /// Compute Katz centrality.
    #[arg(long = "calc-katz")]
    pub calc_katz: bool,
    /// Compute every metric.
    #[arg(long)]
    pub all_metrics: bool,
}

impl MetricFlags {
    /// The metrics switched on, in [`Metric`] order.
    pub fn selected(&self) -> Vec<Metric> {
        if self.all_metrics {
            return Metric::ALL.to_vec();
        }
        [
            (self.calc_bc, Metric::Betweenness),
            (self.calc_cc, Metric::Closeness),
            (self.calc_dc, Metric::Degree),
            (self.calc_ec, Metric::Eigenvector),
            (self.calc_ecc, Metric::Eccentricity),
            (self.calc_l, Metric::AveragePathLength),
            (self.calc_pr, Metric::PageRank),
            (self.calc_katz, Metric::Katz),
        ]
        .into_iter()
        .filter_map(|(on, metric)| on.then_some(metric))
        .collect()
    }
}
