use crate::core::models::structure::Crystal;
use nalgebra::{Point3, Vector3};

/// A periodic image of a unit-cell atom inside the padded supercell.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAtom {
    /// Index of the source atom in the unit cell.
    pub source: usize,
    /// Fractional coordinates relative to the central unit cell. Values
    /// outside [0, 1) belong to image cells.
    pub fractional: Point3<f64>,
}

/// Generates the periodic images of all unit-cell atoms in a supercell padded
/// by `dims` cells along the +/- a, b and c directions.
///
/// Images are ordered cell-by-cell with the c-axis shift varying slowest, so
/// the central unit cell starts at [`central_cell_start`] and every cell holds
/// `crystal.num_atoms()` consecutive entries.
pub fn build_images(crystal: &Crystal, dims: (usize, usize, usize)) -> Vec<ImageAtom> {
    let (na, nb, nc) = (dims.0 as isize, dims.1 as isize, dims.2 as isize);
    let num_cells = (2 * na + 1) * (2 * nb + 1) * (2 * nc + 1);
    let mut images = Vec::with_capacity(num_cells as usize * crystal.num_atoms());

    for shift_c in -nc..=nc {
        for shift_b in -nb..=nb {
            for shift_a in -na..=na {
                let shift = Vector3::new(shift_a as f64, shift_b as f64, shift_c as f64);
                for (source, atom) in crystal.atoms().iter().enumerate() {
                    images.push(ImageAtom {
                        source,
                        fractional: atom.position + shift,
                    });
                }
            }
        }
    }

    images
}

/// Returns the index of the first atom of the central (unshifted) unit cell
/// within the image list produced by [`build_images`].
pub fn central_cell_start(num_images: usize, num_atoms: usize) -> usize {
    (num_images - num_atoms) / 2
}
