use nalgebra::Point3;

/// Represents a single atom of the crystal unit cell.
///
/// Positions are stored in fractional coordinates of the unit cell; Cartesian
/// coordinates are derived on demand through the parent [`Lattice`].
///
/// [`Lattice`]: super::lattice::Lattice
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g. "C", "Pb").
    pub symbol: String,
    /// Fractional coordinates within the unit cell.
    pub position: Point3<f64>,
    /// The atomic mass in amu, as listed in the phonon calculation input.
    pub mass: f64,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol, fractional position and mass.
    pub fn new(symbol: &str, position: Point3<f64>, mass: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
            mass,
        }
    }
}
