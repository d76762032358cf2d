use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Mode-selection section of the config file.
///
/// `select` is one of `index`, `freq-thz` or `freq-invcm`; `min`/`max` bound
/// the selection and may be omitted to leave an end open. Index bounds must be
/// whole numbers.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileModeSelection {
    pub select: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// The TOML configuration file for the `animate` command.
///
/// All fields are optional; unset values fall back to CLI flags and then to
/// built-in defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Supercell padding along a, b and c.
    pub supercell: Option<[usize; 3]>,

    /// Reference bond distances in Angstroms, keyed as "A-B" pairs. Either
    /// element may be the wildcard "X".
    #[serde(rename = "bond-distances")]
    pub bond_distances: Option<HashMap<String, f64>>,

    /// Per-element fractional overhang limits for the structure expansion.
    #[serde(rename = "expansion-limits")]
    pub expansion_limits: Option<HashMap<String, f64>>,

    #[serde(rename = "scale-displacements")]
    pub scale_displacements: Option<bool>,

    #[serde(rename = "max-amplitude")]
    pub max_amplitude: Option<f64>,

    #[serde(rename = "modulation-steps")]
    pub modulation_steps: Option<usize>,

    #[serde(rename = "mode-selection")]
    pub mode_selection: Option<FileModeSelection>,

    #[serde(rename = "output-prefix")]
    pub output_prefix: Option<String>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!("Loaded configuration file from {:?}", path);
        Ok(config)
    }
}
