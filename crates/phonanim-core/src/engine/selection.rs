use crate::core::models::mode::{ModeSet, THZ_TO_INV_CM};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("Selection minimum must be below the maximum")]
    InvalidRange,
    #[error("Mode index {value} is out of range 1..={num_modes}")]
    IndexOutOfBounds { value: usize, num_modes: usize },
    #[error("Selection minimum {min} lies above the highest mode frequency")]
    MinAboveSpectrum { min: f64 },
}

/// Frequency unit for frequency-based mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyUnit {
    Thz,
    InvCm,
}

/// Selects the subset of phonon modes to animate.
///
/// Index selection uses 1-based inclusive band numbers (the numbering used in
/// output file names and comment lines). Frequency selection spans from the
/// first band at or above `min` up to, but not including, the first band at or
/// above `max`; band frequencies are assumed to be in ascending order, which
/// is how phonon codes emit them.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSelection {
    Index {
        min: Option<usize>,
        max: Option<usize>,
    },
    Frequency {
        unit: FrequencyUnit,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl ModeSelection {
    /// Resolves the selection to a zero-based band range over `modes`.
    ///
    /// # Errors
    ///
    /// Returns an error for inverted ranges, out-of-bounds indices, or a
    /// frequency minimum above the whole spectrum.
    pub fn resolve(&self, modes: &ModeSet) -> Result<Range<usize>, SelectionError> {
        let num_modes = modes.len();

        match self {
            ModeSelection::Index { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min >= max {
                        return Err(SelectionError::InvalidRange);
                    }
                }
                for value in [min, max].into_iter().flatten() {
                    if *value < 1 || *value > num_modes {
                        return Err(SelectionError::IndexOutOfBounds {
                            value: *value,
                            num_modes,
                        });
                    }
                }

                let start = min.map(|value| value - 1).unwrap_or(0);
                let end = max.unwrap_or(num_modes);
                Ok(start..end)
            }
            ModeSelection::Frequency { unit, min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min >= max {
                        return Err(SelectionError::InvalidRange);
                    }
                }

                let factor = match unit {
                    FrequencyUnit::Thz => 1.0,
                    FrequencyUnit::InvCm => THZ_TO_INV_CM,
                };
                let frequencies: Vec<f64> = modes
                    .iter()
                    .map(|mode| mode.frequency_thz * factor)
                    .collect();

                let start = match min {
                    Some(min) => frequencies
                        .iter()
                        .position(|frequency| *frequency >= *min)
                        .ok_or(SelectionError::MinAboveSpectrum { min: *min })?,
                    None => 0,
                };

                let end = match max {
                    Some(max) => {
                        let mut end = start + 1;
                        while end < num_modes && frequencies[end] < *max {
                            end += 1;
                        }
                        end
                    }
                    None => num_modes,
                };

                Ok(start..end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::mode::PhononMode;

    fn modes_with_frequencies(frequencies: &[f64]) -> ModeSet {
        ModeSet::new(
            frequencies
                .iter()
                .map(|&frequency_thz| PhononMode {
                    frequency_thz,
                    eigenvector: vec![],
                    eigendisplacement: vec![],
                })
                .collect(),
        )
    }

    #[test]
    fn index_selection_is_one_based_and_inclusive() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let selection = ModeSelection::Index {
            min: Some(4),
            max: Some(5),
        };
        assert_eq!(selection.resolve(&modes).unwrap(), 3..5);
    }

    #[test]
    fn open_ended_index_selection_spans_all_modes() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0]);
        let selection = ModeSelection::Index {
            min: None,
            max: None,
        };
        assert_eq!(selection.resolve(&modes).unwrap(), 0..3);
    }

    #[test]
    fn index_bounds_are_checked() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0]);
        let selection = ModeSelection::Index {
            min: Some(1),
            max: Some(4),
        };
        assert_eq!(
            selection.resolve(&modes),
            Err(SelectionError::IndexOutOfBounds {
                value: 4,
                num_modes: 3
            })
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0]);
        let selection = ModeSelection::Index {
            min: Some(2),
            max: Some(2),
        };
        assert_eq!(selection.resolve(&modes), Err(SelectionError::InvalidRange));
    }

    #[test]
    fn frequency_selection_brackets_the_band_range() {
        let modes = modes_with_frequencies(&[-0.5, 0.1, 1.0, 2.0, 5.0]);
        let selection = ModeSelection::Frequency {
            unit: FrequencyUnit::Thz,
            min: Some(0.5),
            max: Some(3.0),
        };
        // First band >= 0.5 THz is index 2; bands below 3.0 THz run to index 3.
        assert_eq!(selection.resolve(&modes).unwrap(), 2..4);
    }

    #[test]
    fn frequency_selection_in_inverse_cm() {
        let modes = modes_with_frequencies(&[-0.5, 0.1, 1.0, 2.0, 5.0]);
        let selection = ModeSelection::Frequency {
            unit: FrequencyUnit::InvCm,
            min: Some(30.0),
            max: None,
        };
        // 1 THz = 33.36 cm^-1, so 30 cm^-1 falls just below the 1 THz band.
        assert_eq!(selection.resolve(&modes).unwrap(), 2..5);
    }

    #[test]
    fn frequency_minimum_above_spectrum_is_an_error() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0]);
        let selection = ModeSelection::Frequency {
            unit: FrequencyUnit::Thz,
            min: Some(10.0),
            max: None,
        };
        assert_eq!(
            selection.resolve(&modes),
            Err(SelectionError::MinAboveSpectrum { min: 10.0 })
        );
    }

    #[test]
    fn frequency_maximum_above_spectrum_selects_to_the_end() {
        let modes = modes_with_frequencies(&[0.0, 1.0, 2.0]);
        let selection = ModeSelection::Frequency {
            unit: FrequencyUnit::Thz,
            min: None,
            max: Some(100.0),
        };
        assert_eq!(selection.resolve(&modes).unwrap(), 0..3);
    }
}
