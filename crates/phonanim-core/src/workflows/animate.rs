use crate::core::expansion::expand;
use crate::core::io::xyz::{self, XyzFrame};
use crate::core::models::mode::ModeSet;
use crate::core::models::structure::Crystal;
use crate::engine::config::AnimationConfig;
use crate::engine::error::EngineError;
use crate::engine::modulation::{animate_mode, modulation_amplitudes};
use crate::engine::progress::{Progress, ProgressReporter};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Summary of one animated mode in an [`AnimationReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedMode {
    /// The 1-based mode number.
    pub mode_number: usize,
    pub frequency_thz: f64,
    pub num_frames: usize,
}

/// The output artefacts produced by a completed animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationReport {
    /// The expanded structure, as a single-frame XYZ file.
    pub expansion_path: PathBuf,
    /// Per-mode animation XYZ files, archived as `Animations/Mode-NNN.xyz`.
    pub archive_path: PathBuf,
    /// All animation frames merged into one XYZ file with metadata comments.
    pub merged_path: PathBuf,
    pub expanded_atoms: usize,
    pub modes: Vec<AnimatedMode>,
}

/// Runs the full animation workflow.
///
/// Expands the crystal across its unit-cell boundaries, resolves the mode
/// selection, generates the modulated frames of every selected mode, and
/// writes three artefacts into the configured output directory: the expanded
/// structure (`<prefix>_StructureExpansion.xyz`), a gzipped tar archive of
/// per-mode animations (`<prefix>_Animations.tar.gz`), and the merged
/// animation file (`<prefix>_Animations-Merged.xyz`) whose comment lines
/// carry the metadata the GIF-assembly step reads back.
#[instrument(skip_all, name = "animation_workflow")]
pub fn run(
    crystal: &Crystal,
    modes: &ModeSet,
    config: &AnimationConfig,
    reporter: &ProgressReporter,
) -> Result<AnimationReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Structure expansion",
    });

    let expanded = expand::expand(
        crystal,
        &config.bond_table,
        &config.expansion_limits,
        config.supercell,
    );
    info!(
        atoms = expanded.num_atoms(),
        cycles = expanded.cycles,
        "structure expansion complete"
    );

    std::fs::create_dir_all(&config.output_dir)?;

    let expansion_path = config
        .output_dir
        .join(format!("{}_StructureExpansion.xyz", config.output_prefix));
    xyz::write_frames_to_path(
        &expanded.symbols,
        &[XyzFrame {
            comment: "Expanded Structure".to_string(),
            positions: expanded.positions.clone(),
        }],
        &expansion_path,
    )?;
    reporter.report(Progress::PhaseFinish);

    let selected = match &config.mode_selection {
        Some(selection) => selection.resolve(modes)?,
        None => 0..modes.len(),
    };
    if selected.is_empty() {
        return Err(EngineError::EmptySelection);
    }

    reporter.report(Progress::PhaseStart {
        name: "Mode animation",
    });
    reporter.report(Progress::ModesStart {
        total: selected.len() as u64,
    });

    let base_amplitudes = modulation_amplitudes(config.modulation_steps, config.max_amplitude);

    let archive_path = config
        .output_dir
        .join(format!("{}_Animations.tar.gz", config.output_prefix));
    let encoder = GzEncoder::new(
        BufWriter::new(File::create(&archive_path)?),
        Compression::default(),
    );
    let mut archive = tar::Builder::new(encoder);

    let merged_path = config
        .output_dir
        .join(format!("{}_Animations-Merged.xyz", config.output_prefix));
    let mut merged_writer = BufWriter::new(File::create(&merged_path)?);

    let mut summaries = Vec::with_capacity(selected.len());

    for (index, mode) in modes
        .iter()
        .enumerate()
        .skip(selected.start)
        .take(selected.len())
    {
        let mode_number = index + 1;
        let animation = animate_mode(
            &expanded,
            mode,
            mode_number,
            &base_amplitudes,
            config.scale_displacements,
        )?;

        let archive_frames: Vec<XyzFrame> = animation
            .amplitudes
            .iter()
            .zip(&animation.frames)
            .map(|(&amplitude, positions)| XyzFrame {
                comment: xyz::frame_comment(mode.frequency_thz, amplitude),
                positions: positions.clone(),
            })
            .collect();

        let mut entry = Vec::new();
        xyz::write_frames(&expanded.symbols, &archive_frames, &mut entry)?;

        let mut header = tar::Header::new_gnu();
        header.set_size(entry.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        archive.append_data(
            &mut header,
            format!("Animations/Mode-{:03}.xyz", mode_number),
            entry.as_slice(),
        )?;

        let merged_frames: Vec<XyzFrame> = animation
            .amplitudes
            .iter()
            .zip(animation.frames)
            .map(|(&amplitude, positions)| XyzFrame {
                comment: xyz::mode_comment(mode_number, mode.frequency_thz, amplitude),
                positions,
            })
            .collect();
        xyz::write_frames(&expanded.symbols, &merged_frames, &mut merged_writer)?;

        info!(
            mode = mode_number,
            frequency_thz = mode.frequency_thz,
            "mode animation written"
        );
        reporter.report(Progress::ModeFinished {
            mode_number,
            frequency_thz: mode.frequency_thz,
        });

        summaries.push(AnimatedMode {
            mode_number,
            frequency_thz: mode.frequency_thz,
            num_frames: base_amplitudes.len(),
        });
    }

    let encoder = archive.into_inner()?;
    let mut archive_writer = encoder.finish()?;
    archive_writer.flush()?;
    merged_writer.flush()?;

    reporter.report(Progress::PhaseFinish);

    Ok(AnimationReport {
        expansion_path,
        archive_path,
        merged_path,
        expanded_atoms: expanded.num_atoms(),
        modes: summaries,
    })
}
