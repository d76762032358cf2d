use thiserror::Error;

use crate::core::io::xyz::XyzError;
use crate::engine::config::ConfigError;
use crate::engine::modulation::ModulationError;
use crate::engine::selection::SelectionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mode selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("Modulation failed: {0}")]
    Modulation(#[from] ModulationError),

    #[error("XYZ output failed: {0}")]
    Xyz(#[from] XyzError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No modes matched the selection")]
    EmptySelection,
}
