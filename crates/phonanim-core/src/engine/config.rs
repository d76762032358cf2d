use crate::core::expansion::bonds::BondTable;
use crate::core::expansion::expand::ExpansionLimits;
use crate::engine::selection::ModeSelection;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

/// Complete, validated parameters for one animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Number of padding cells along +/- a, b and c for the structure expansion.
    pub supercell: (usize, usize, usize),
    /// Reference bond distances driving the expansion.
    pub bond_table: BondTable,
    /// Per-element fractional overhang limits for the expansion.
    pub expansion_limits: ExpansionLimits,
    /// When set, amplitudes are rescaled per mode so `max_amplitude` is the
    /// maximum Cartesian displacement in Angstroms; otherwise `max_amplitude`
    /// is a normal-mode amplitude in amu^1/2 A.
    pub scale_displacements: bool,
    pub max_amplitude: f64,
    /// Number of frames per animation loop.
    pub modulation_steps: usize,
    /// Subset of modes to animate; `None` animates all modes.
    pub mode_selection: Option<ModeSelection>,
    /// Prefix for all output file names.
    pub output_prefix: String,
    /// Directory the output files are written into.
    pub output_dir: PathBuf,
}

impl AnimationConfig {
    pub fn builder() -> AnimationConfigBuilder {
        AnimationConfigBuilder::default()
    }
}

/// Builder for [`AnimationConfig`] with validation at `build` time.
#[derive(Debug, Clone, Default)]
pub struct AnimationConfigBuilder {
    supercell: Option<(usize, usize, usize)>,
    bond_table: Option<BondTable>,
    expansion_limits: Option<ExpansionLimits>,
    scale_displacements: Option<bool>,
    max_amplitude: Option<f64>,
    modulation_steps: Option<usize>,
    mode_selection: Option<ModeSelection>,
    output_prefix: Option<String>,
    output_dir: Option<PathBuf>,
}

impl AnimationConfigBuilder {
    pub fn supercell(mut self, dims: (usize, usize, usize)) -> Self {
        self.supercell = Some(dims);
        self
    }

    pub fn bond_table(mut self, table: BondTable) -> Self {
        self.bond_table = Some(table);
        self
    }

    pub fn expansion_limits(mut self, limits: ExpansionLimits) -> Self {
        self.expansion_limits = Some(limits);
        self
    }

    pub fn scale_displacements(mut self, scale: bool) -> Self {
        self.scale_displacements = Some(scale);
        self
    }

    pub fn max_amplitude(mut self, amplitude: f64) -> Self {
        self.max_amplitude = Some(amplitude);
        self
    }

    pub fn modulation_steps(mut self, steps: usize) -> Self {
        self.modulation_steps = Some(steps);
        self
    }

    pub fn mode_selection(mut self, selection: Option<ModeSelection>) -> Self {
        self.mode_selection = selection;
        self
    }

    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Validates the collected parameters and produces the config.
    ///
    /// # Errors
    ///
    /// Returns an error if a required parameter is missing or a value is out
    /// of range (non-positive amplitude, fewer than two modulation steps).
    pub fn build(self) -> Result<AnimationConfig, ConfigError> {
        let max_amplitude = self
            .max_amplitude
            .ok_or(ConfigError::MissingParameter("max-amplitude"))?;
        if max_amplitude <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "max-amplitude",
                reason: format!("must be positive, got {}", max_amplitude),
            });
        }

        let modulation_steps = self
            .modulation_steps
            .ok_or(ConfigError::MissingParameter("modulation-steps"))?;
        if modulation_steps < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "modulation-steps",
                reason: format!("need at least 2 frames per loop, got {}", modulation_steps),
            });
        }

        Ok(AnimationConfig {
            supercell: self.supercell.unwrap_or((1, 1, 1)),
            bond_table: self.bond_table.unwrap_or_default(),
            expansion_limits: self.expansion_limits.unwrap_or_default(),
            scale_displacements: self.scale_displacements.unwrap_or(true),
            max_amplitude,
            modulation_steps,
            mode_selection: self.mode_selection,
            output_prefix: self.output_prefix.unwrap_or_else(|| "Crystal".to_string()),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let config = AnimationConfig::builder()
            .max_amplitude(0.25)
            .modulation_steps(32)
            .build()
            .unwrap();

        assert_eq!(config.supercell, (1, 1, 1));
        assert!(config.scale_displacements);
        assert!(config.bond_table.is_empty());
        assert_eq!(config.output_prefix, "Crystal");
        assert!(config.mode_selection.is_none());
    }

    #[test]
    fn missing_amplitude_is_reported() {
        let result = AnimationConfig::builder().modulation_steps(32).build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("max-amplitude")
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let result = AnimationConfig::builder()
            .max_amplitude(-1.0)
            .modulation_steps(32)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "max-amplitude",
                ..
            })
        ));

        let result = AnimationConfig::builder()
            .max_amplitude(0.25)
            .modulation_steps(1)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "modulation-steps",
                ..
            })
        ));
    }
}
