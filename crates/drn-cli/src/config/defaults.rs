use drnkit::engine::aggregate::Statistic;
use drnkit::engine::config::FailurePolicy;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub threshold: f64,
    pub step: usize,
    pub statistic: Statistic,
    pub failure_policy: FailurePolicy,
    pub output_dir: PathBuf,
    pub write_frame_data: bool,
    pub generate_plots: bool,
    pub save_graphs: bool,
    pub lazy_load: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            threshold: 6.7,
            step: 1,
            statistic: Statistic::Mean,
            failure_policy: FailurePolicy::Abort,
            output_dir: PathBuf::from("."),
            write_frame_data: true,
            generate_plots: false,
            save_graphs: false,
            lazy_load: false,
        }
    }
}
