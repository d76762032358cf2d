use super::atom::Atom;
use super::lattice::Lattice;
use nalgebra::Point3;

/// A molecular crystal: a unit cell lattice plus its atomic basis.
///
/// This is the central input data structure of the library. Atom order is
/// significant: phonon eigenvector components are indexed by position in the
/// atom list, in the order they appear in the phonon calculation output.
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    lattice: Lattice,
    atoms: Vec<Atom>,
}

impl Crystal {
    pub fn new(lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Self { lattice, atoms }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the element symbols of the basis atoms, in atom order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|atom| atom.symbol.as_str())
    }

    /// Returns the Cartesian positions of the basis atoms in Angstroms.
    pub fn cartesian_positions(&self) -> Vec<Point3<f64>> {
        self.atoms
            .iter()
            .map(|atom| self.lattice.to_cartesian(&atom.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_positions_follow_atom_order() {
        let lattice = Lattice::from_rows([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        let crystal = Crystal::new(
            lattice,
            vec![
                Atom::new("C", Point3::new(0.0, 0.0, 0.0), 12.011),
                Atom::new("H", Point3::new(0.5, 0.5, 0.5), 1.008),
            ],
        );

        let positions = crystal.cartesian_positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(positions[1], Point3::new(1.0, 1.0, 1.0));

        let symbols: Vec<_> = crystal.symbols().collect();
        assert_eq!(symbols, vec!["C", "H"]);
    }
}
