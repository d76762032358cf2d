use crate::cli::GifArgs;
use crate::error::{CliError, Result};
use crate::render::GifAssembler;
use phonanim::core::io::traits::PhononInput;
use phonanim::core::io::xyz::AnimationIndex;
use std::path::PathBuf;
use tracing::{info, instrument};

#[instrument(skip_all, name = "gif_command")]
pub fn run(args: GifArgs) -> Result<()> {
    info!("Reading animation metadata from {:?}", args.merged);
    let index = AnimationIndex::read_from_path(&args.merged).map_err(|e| CliError::FileParsing {
        path: args.merged.clone(),
        source: e.into(),
    })?;
    info!(
        modes = index.modes().len(),
        frames = index.total_frames(),
        "animation index loaded"
    );

    let assembler = GifAssembler {
        frame_dir: args.frame_dir,
        frame_prefix: args.frame_prefix.clone(),
        frame_ext: args.frame_ext,
        output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        output_prefix: args.prefix.unwrap_or(args.frame_prefix),
        delay_cs: args.delay,
        overwrite: args.overwrite,
        convert_bin: args.convert,
    };

    let outputs = assembler.assemble(&index)?;

    println!("\nAssembled {} GIF(s):", outputs.len());
    for path in &outputs {
        println!("  {}", path.display());
    }

    Ok(())
}
