use nalgebra::{Point3, Vector3};

/// The three lattice vectors of a crystal unit cell, in Angstroms.
///
/// Fractional coordinates are mapped to Cartesian space as
/// `x = f_a * a + f_b * b + f_c * c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    vectors: [Vector3<f64>; 3],
}

impl Lattice {
    /// Creates a lattice from three row vectors `a`, `b` and `c`.
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self {
            vectors: [a, b, c],
        }
    }

    /// Creates a lattice from a 3x3 row-major matrix of components, as stored
    /// in Phonopy output files.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self::new(
            Vector3::from(rows[0]),
            Vector3::from(rows[1]),
            Vector3::from(rows[2]),
        )
    }

    pub fn a(&self) -> &Vector3<f64> {
        &self.vectors[0]
    }

    pub fn b(&self) -> &Vector3<f64> {
        &self.vectors[1]
    }

    pub fn c(&self) -> &Vector3<f64> {
        &self.vectors[2]
    }

    /// Converts a fractional coordinate to a Cartesian position in Angstroms.
    pub fn to_cartesian(&self, fractional: &Point3<f64>) -> Point3<f64> {
        Point3::from(
            self.vectors[0] * fractional.x
                + self.vectors[1] * fractional.y
                + self.vectors[2] * fractional.z,
        )
    }
}
