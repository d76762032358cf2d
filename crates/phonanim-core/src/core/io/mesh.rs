use crate::core::io::traits::PhononInput;
use crate::core::models::atom::Atom;
use crate::core::models::lattice::Lattice;
use crate::core::models::mode::{ModeSet, PhononMode};
use crate::core::models::structure::Crystal;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("No Gamma-point (q = 0, 0, 0) entry found in the mesh file")]
    GammaPointNotFound,
    #[error("Band {band} has no eigenvector; the mesh must be generated with eigenvectors enabled")]
    MissingEigenvector { band: usize },
    #[error("Band {band} eigenvector has {found} atom entries, expected {expected}")]
    EigenvectorLength {
        band: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Deserialize)]
struct RawMesh {
    lattice: [[f64; 3]; 3],
    atoms: Vec<RawAtom>,
    phonon: Vec<RawQPoint>,
}

#[derive(Debug, Deserialize)]
struct RawAtom {
    symbol: String,
    position: [f64; 3],
    mass: f64,
}

#[derive(Debug, Deserialize)]
struct RawQPoint {
    #[serde(rename = "q-position")]
    q_position: [f64; 3],
    band: Vec<RawBand>,
}

#[derive(Debug, Deserialize)]
struct RawBand {
    frequency: f64,
    // Per atom, three complex components stored as [real, imaginary].
    eigenvector: Option<Vec<[[f64; 2]; 3]>>,
}

/// A parsed Phonopy `mesh.yaml` file reduced to its Gamma-point content.
///
/// The file may contain bands at many q-points; only the entry at
/// q = (0, 0, 0) is kept, since only Gamma-point modes preserve the unit-cell
/// periodicity an XYZ animation can show. Gamma-point eigenvectors are real,
/// so the imaginary parts are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    pub crystal: Crystal,
    pub modes: ModeSet,
}

impl PhononInput for MeshDocument {
    type Error = MeshError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let raw: RawMesh = serde_yaml::from_reader(reader)?;

        let lattice = Lattice::from_rows(raw.lattice);
        let atoms: Vec<Atom> = raw
            .atoms
            .iter()
            .map(|atom| Atom::new(&atom.symbol, Point3::from(atom.position), atom.mass))
            .collect();
        let crystal = Crystal::new(lattice, atoms);

        let gamma = raw
            .phonon
            .iter()
            .find(|qpoint| qpoint.q_position.iter().all(|q| *q == 0.0))
            .ok_or(MeshError::GammaPointNotFound)?;

        let sqrt_masses: Vec<f64> = crystal.atoms().iter().map(|atom| atom.mass.sqrt()).collect();

        let mut modes = Vec::with_capacity(gamma.band.len());
        for (band_index, band) in gamma.band.iter().enumerate() {
            let band_number = band_index + 1;
            let raw_eigenvector = band
                .eigenvector
                .as_ref()
                .ok_or(MeshError::MissingEigenvector { band: band_number })?;

            if raw_eigenvector.len() != crystal.num_atoms() {
                return Err(MeshError::EigenvectorLength {
                    band: band_number,
                    expected: crystal.num_atoms(),
                    found: raw_eigenvector.len(),
                });
            }

            let eigenvector: Vec<Vector3<f64>> = raw_eigenvector
                .iter()
                .map(|components| {
                    Vector3::new(components[0][0], components[1][0], components[2][0])
                })
                .collect();

            let eigendisplacement: Vec<Vector3<f64>> = eigenvector
                .iter()
                .zip(&sqrt_masses)
                .map(|(component, sqrt_mass)| component / *sqrt_mass)
                .collect();

            modes.push(PhononMode {
                frequency_thz: band.frequency,
                eigenvector,
                eigendisplacement,
            });
        }

        Ok(MeshDocument {
            crystal,
            modes: ModeSet::new(modes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESH_WITH_GAMMA: &str = r#"
lattice:
- [4.0, 0.0, 0.0]
- [0.0, 4.0, 0.0]
- [0.0, 0.0, 4.0]
atoms:
- symbol: C
  position: [0.0, 0.0, 0.0]
  mass: 12.011
- symbol: H
  position: [0.25, 0.25, 0.25]
  mass: 1.008
phonon:
- q-position: [0.5, 0.0, 0.0]
  band:
  - frequency: 9.9
    eigenvector:
    - [[0.9, 0.1], [0.0, 0.0], [0.0, 0.0]]
    - [[0.0, 0.0], [0.9, 0.1], [0.0, 0.0]]
- q-position: [0.0, 0.0, 0.0]
  band:
  - frequency: 1.5
    eigenvector:
    - [[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]
    - [[0.0, 0.0], [0.5, 0.0], [0.0, 0.0]]
"#;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_gamma_point_and_ignores_other_qpoints() {
        let mut reader = MESH_WITH_GAMMA.as_bytes();
        let document = MeshDocument::read_from(&mut reader).unwrap();

        assert_eq!(document.crystal.num_atoms(), 2);
        assert_eq!(document.modes.len(), 1);

        let mode = document.modes.get(0).unwrap();
        assert!(f64_approx_equal(mode.frequency_thz, 1.5));
        // Real parts only.
        assert!(f64_approx_equal(mode.eigenvector[0].x, 1.0));
        assert!(f64_approx_equal(mode.eigenvector[1].y, 0.5));
    }

    #[test]
    fn eigendisplacements_are_mass_weighted() {
        let mut reader = MESH_WITH_GAMMA.as_bytes();
        let document = MeshDocument::read_from(&mut reader).unwrap();

        let mode = document.modes.get(0).unwrap();
        assert!(f64_approx_equal(
            mode.eigendisplacement[0].x,
            1.0 / 12.011f64.sqrt()
        ));
        assert!(f64_approx_equal(
            mode.eigendisplacement[1].y,
            0.5 / 1.008f64.sqrt()
        ));
    }

    #[test]
    fn missing_gamma_point_is_an_error() {
        let yaml = r#"
lattice:
- [4.0, 0.0, 0.0]
- [0.0, 4.0, 0.0]
- [0.0, 0.0, 4.0]
atoms:
- symbol: C
  position: [0.0, 0.0, 0.0]
  mass: 12.011
phonon:
- q-position: [0.5, 0.5, 0.5]
  band:
  - frequency: 3.0
    eigenvector:
    - [[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]
"#;
        let result = MeshDocument::read_from(&mut yaml.as_bytes());
        assert!(matches!(result, Err(MeshError::GammaPointNotFound)));
    }

    #[test]
    fn band_without_eigenvector_is_an_error() {
        let yaml = r#"
lattice:
- [4.0, 0.0, 0.0]
- [0.0, 4.0, 0.0]
- [0.0, 0.0, 4.0]
atoms:
- symbol: C
  position: [0.0, 0.0, 0.0]
  mass: 12.011
phonon:
- q-position: [0.0, 0.0, 0.0]
  band:
  - frequency: 3.0
"#;
        let result = MeshDocument::read_from(&mut yaml.as_bytes());
        assert!(matches!(
            result,
            Err(MeshError::MissingEigenvector { band: 1 })
        ));
    }

    #[test]
    fn eigenvector_length_mismatch_is_an_error() {
        let yaml = r#"
lattice:
- [4.0, 0.0, 0.0]
- [0.0, 4.0, 0.0]
- [0.0, 0.0, 4.0]
atoms:
- symbol: C
  position: [0.0, 0.0, 0.0]
  mass: 12.011
- symbol: H
  position: [0.5, 0.5, 0.5]
  mass: 1.008
phonon:
- q-position: [0.0, 0.0, 0.0]
  band:
  - frequency: 3.0
    eigenvector:
    - [[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]
"#;
        let result = MeshDocument::read_from(&mut yaml.as_bytes());
        assert!(matches!(
            result,
            Err(MeshError::EigenvectorLength {
                band: 1,
                expected: 2,
                found: 1
            })
        ));
    }
}
