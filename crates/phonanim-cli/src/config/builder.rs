use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileModeSelection};
use crate::cli::AnimateArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use phonanim::core::expansion::bonds::BondTable;
use phonanim::engine::config::AnimationConfig;
use phonanim::engine::selection::{FrequencyUnit, ModeSelection};
use std::path::PathBuf;

/// The fully merged configuration for an `animate` run.
pub struct AppConfig {
    pub input_path: PathBuf,
    pub core: AnimationConfig,
}

/// Merges CLI flags, the config file and built-in defaults, in that order of
/// precedence, into a validated core configuration.
pub fn build_config(args: &AnimateArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let supercell = match &args.supercell {
        Some(value) => parser::parse_supercell(value)?,
        None => file_config
            .supercell
            .map(|[a, b, c]| (a, b, c))
            .unwrap_or(defaults.supercell),
    };

    let bond_table = match &file_config.bond_distances {
        Some(distances) => {
            BondTable::from_pairs(distances.iter().map(|(key, value)| (key.as_str(), *value)))
                .map_err(|e| CliError::Config(e.to_string()))?
        }
        None => BondTable::default(),
    };

    let scale_displacements = match (
        args.scale.scale_displacements,
        args.scale.no_scale_displacements,
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => file_config
            .scale_displacements
            .unwrap_or(defaults.scale_displacements),
    };

    let max_amplitude = args
        .max_amplitude
        .or(file_config.max_amplitude)
        .unwrap_or(defaults.max_amplitude);
    let modulation_steps = args
        .steps
        .or(file_config.modulation_steps)
        .unwrap_or(defaults.modulation_steps);

    let mode_selection = match &args.mode_selection {
        Some(value) => Some(parser::parse_mode_selection(value)?),
        None => file_config
            .mode_selection
            .as_ref()
            .map(selection_from_file)
            .transpose()?,
    };

    let output_prefix = args
        .prefix
        .clone()
        .or_else(|| file_config.output_prefix.clone())
        .unwrap_or(defaults.output_prefix);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let core = AnimationConfig::builder()
        .supercell(supercell)
        .bond_table(bond_table)
        .expansion_limits(file_config.expansion_limits.clone().unwrap_or_default())
        .scale_displacements(scale_displacements)
        .max_amplitude(max_amplitude)
        .modulation_steps(modulation_steps)
        .mode_selection(mode_selection)
        .output_prefix(output_prefix)
        .output_dir(output_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        core,
    })
}

fn index_bound(value: f64, end: &str) -> Result<usize> {
    if value < 1.0 || value.fract() != 0.0 {
        return Err(CliError::Config(format!(
            "mode-selection {} must be a positive whole number for 'index', got {}",
            end, value
        )));
    }
    Ok(value as usize)
}

fn selection_from_file(selection: &FileModeSelection) -> Result<ModeSelection> {
    match selection.select.as_str() {
        "index" => Ok(ModeSelection::Index {
            min: selection.min.map(|value| index_bound(value, "min")).transpose()?,
            max: selection.max.map(|value| index_bound(value, "max")).transpose()?,
        }),
        "freq-thz" => Ok(ModeSelection::Frequency {
            unit: FrequencyUnit::Thz,
            min: selection.min,
            max: selection.max,
        }),
        "freq-invcm" => Ok(ModeSelection::Frequency {
            unit: FrequencyUnit::InvCm,
            min: selection.min,
            max: selection.max,
        }),
        other => Err(CliError::Config(format!(
            "Unknown mode-selection select value '{}'; expected 'index', 'freq-thz' or 'freq-invcm'",
            other
        ))),
    }
}
