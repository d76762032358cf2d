use nalgebra::Vector3;

/// Conversion factor from THz to inverse centimetres.
///
/// Value taken from http://halas.rice.edu/conversions (accessed 3/4/2017).
pub const THZ_TO_INV_CM: f64 = 33.35641;

/// A single Gamma-point phonon mode.
///
/// Gamma-point eigenvectors of a real dynamical matrix are real, so only the
/// real parts of the eigenvector components are stored. The eigendisplacement
/// of atom `i` is the eigenvector component divided by `sqrt(mass_i)`; it is
/// the Cartesian direction the atom moves in when the mode is excited, and the
/// associated normal-mode amplitude carries units of amu^1/2 A.
#[derive(Debug, Clone, PartialEq)]
pub struct PhononMode {
    /// The harmonic frequency in THz.
    pub frequency_thz: f64,
    /// Per-atom eigenvector components, in unit-cell atom order.
    pub eigenvector: Vec<Vector3<f64>>,
    /// Per-atom mass-weighted eigendisplacements, in unit-cell atom order.
    pub eigendisplacement: Vec<Vector3<f64>>,
}

impl PhononMode {
    /// Returns the mode frequency in inverse centimetres.
    pub fn frequency_inv_cm(&self) -> f64 {
        self.frequency_thz * THZ_TO_INV_CM
    }

    /// Returns the largest Cartesian norm over the per-atom eigendisplacements.
    ///
    /// Used to rescale normal-mode amplitudes so that an amplitude of 1 moves
    /// the most-displaced atom by exactly 1 A.
    pub fn max_displacement_norm(&self) -> f64 {
        self.eigendisplacement
            .iter()
            .map(|vector| vector.norm())
            .fold(0.0, f64::max)
    }
}

/// The full set of Gamma-point modes of a crystal, in band order.
///
/// A crystal with N atoms in the unit cell has 3N modes. Band order follows
/// the phonon calculation output, which sorts by ascending frequency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeSet {
    modes: Vec<PhononMode>,
}

impl ModeSet {
    pub fn new(modes: Vec<PhononMode>) -> Self {
        Self { modes }
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhononMode> {
        self.modes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhononMode> {
        self.modes.iter()
    }

    /// Returns the band frequencies in THz, in band order.
    pub fn frequencies_thz(&self) -> Vec<f64> {
        self.modes.iter().map(|mode| mode.frequency_thz).collect()
    }
}
