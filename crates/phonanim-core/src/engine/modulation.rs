use crate::core::expansion::expand::ExpandedStructure;
use crate::core::models::mode::PhononMode;
use nalgebra::Point3;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModulationError {
    #[error("Mode {mode_number} has a zero eigendisplacement and cannot be amplitude-scaled")]
    ZeroDisplacement { mode_number: usize },
}

/// All animation frames of a single phonon mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAnimation {
    /// The 1-based mode number.
    pub mode_number: usize,
    pub frequency_thz: f64,
    /// Normal-mode amplitude of each frame, in amu^1/2 A.
    pub amplitudes: Vec<f64>,
    /// Displaced Cartesian positions of the expanded structure, one set per frame.
    pub frames: Vec<Vec<Point3<f64>>>,
}

/// Computes the per-frame modulation amplitudes for one animation loop.
///
/// The modulation is a cosine oscillation between +/- `max_amplitude` with a
/// phase offset of pi/2 so the loop starts at amplitude zero, and a step size
/// chosen so that a looped playback does not repeat the zero frame.
pub fn modulation_amplitudes(steps: usize, max_amplitude: f64) -> Vec<f64> {
    let step = (2.0 * PI) / steps as f64;
    (0..steps)
        .map(|i| max_amplitude * (i as f64 * step + PI / 2.0).cos())
        .collect()
}

/// Generates the animation frames of one mode over the expanded structure.
///
/// Each frame displaces every expanded atom along the eigendisplacement of its
/// source atom in the unit cell, scaled by the frame amplitude. When
/// `scale_displacements` is set, amplitudes are divided by the mode's largest
/// eigendisplacement norm so the base amplitudes become maximum Cartesian
/// displacements in Angstroms.
///
/// # Errors
///
/// Returns an error when scaling is requested for a mode whose
/// eigendisplacement is identically zero.
pub fn animate_mode(
    expanded: &ExpandedStructure,
    mode: &PhononMode,
    mode_number: usize,
    base_amplitudes: &[f64],
    scale_displacements: bool,
) -> Result<ModeAnimation, ModulationError> {
    let scale = if scale_displacements {
        let norm = mode.max_displacement_norm();
        if norm == 0.0 {
            return Err(ModulationError::ZeroDisplacement { mode_number });
        }
        1.0 / norm
    } else {
        1.0
    };

    let mut amplitudes = Vec::with_capacity(base_amplitudes.len());
    let mut frames = Vec::with_capacity(base_amplitudes.len());

    for &base_amplitude in base_amplitudes {
        let amplitude = base_amplitude * scale;

        let frame: Vec<Point3<f64>> = expanded
            .positions
            .iter()
            .zip(&expanded.source_atoms)
            .map(|(position, &source)| position + amplitude * mode.eigendisplacement[source])
            .collect();

        amplitudes.push(amplitude);
        frames.push(frame);
    }

    Ok(ModeAnimation {
        mode_number,
        frequency_thz: mode.frequency_thz,
        amplitudes,
        frames,
    })
}
