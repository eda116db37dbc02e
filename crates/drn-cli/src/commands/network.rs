use crate::cli::NetworkArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use drnkit::{
    core::io::{pdb, trajectory::open_trajectory},
    core::models::frame::Frame,
    engine::{error::EngineError, progress::ProgressReporter},
    workflows::{mapping::StructureMapper, network},
};
use std::sync::Arc;
use tracing::{info, warn};

pub fn run(args: NetworkArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app = build_config(&args)?;
    let config = &app.network;
    let Some(output) = config.output.as_ref() else {
        return Err(CliError::Config("no output location configured".to_string()));
    };

    info!("Opening trajectory {:?}", &app.trajectory);
    let source = open_trajectory(
        &app.trajectory,
        app.topology.as_deref(),
        config.stride,
        app.lazy_load,
    )
    .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting dynamic residue network analysis...");
    let result = network::run(source, config, &reporter)?;

    if !result.frames_skipped.is_empty() {
        warn!(
            "{} frame(s) were skipped: {:?}",
            result.frames_skipped.len(),
            result.frames_skipped
        );
    }
    println!(
        "Analysed {} frame(s) of {} residue(s).",
        result.frames_recorded,
        result.table.residue_count()
    );

    // === Structure mapping ===
    let reference_path = app.reference_structure();
    info!("Loading reference structure from {:?}", reference_path);
    let (topology, positions) =
        pdb::read_structure(reference_path).map_err(|e| CliError::FileParsing {
            path: reference_path.to_path_buf(),
            source: e.into(),
        })?;
    let reference = Frame::new(1, Arc::new(topology), positions).map_err(|e| {
        CliError::FileParsing {
            path: reference_path.to_path_buf(),
            source: e.into(),
        }
    })?;

    let mapped = StructureMapper::new(&reference, &config.selection).write(
        &result.table,
        &output.directory,
        &output.basename,
    )?;

    let table_path = output.directory.join(result.table.file_name(&output.basename));
    println!(
        "✓ {} statistics written to: {}",
        result.table.statistic(),
        table_path.display()
    );
    for path in &mapped {
        println!("  Structure with mapped values written to: {}", path.display());
    }
    if mapped.is_empty() {
        println!("  No metric had non-zero values to map onto the structure.");
    }

    Ok(())
}
