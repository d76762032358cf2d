use crate::cli::AnimateArgs;
use crate::config::builder;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use phonanim::core::io::mesh::MeshDocument;
use phonanim::core::io::traits::PhononInput;
use phonanim::engine::progress::ProgressReporter;
use phonanim::workflows::animate;
use tracing::{info, instrument};

#[instrument(skip_all, name = "animate_command")]
pub fn run(args: AnimateArgs) -> Result<()> {
    let config = builder::build_config(&args)?;

    info!("Reading phonon data from {:?}", config.input_path);
    let document =
        MeshDocument::read_from_path(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    info!(
        atoms = document.crystal.num_atoms(),
        modes = document.modes.len(),
        "Gamma-point phonon data loaded"
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let report = animate::run(&document.crystal, &document.modes, &config.core, &reporter)?;

    println!(
        "\nAnimated {} mode(s) over {} expanded atoms.",
        report.modes.len(),
        report.expanded_atoms
    );
    println!("  Expanded structure: {}", report.expansion_path.display());
    println!("  Animation archive:  {}", report.archive_path.display());
    println!("  Merged animation:   {}", report.merged_path.display());

    Ok(())
}
