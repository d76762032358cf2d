use super::bonds::BondTable;
use super::supercell::{build_images, central_cell_start};
use crate::core::models::structure::Crystal;
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Per-element limits on how far outside the unit cell an atom may sit and
/// still be included in the expansion, in fractional units along any lattice
/// vector. Used to stop extended frameworks (perovskite octahedra, MOF nodes)
/// from growing without bound.
pub type ExpansionLimits = HashMap<String, f64>;

/// The unit cell expanded with the periodic images needed to complete the
/// molecules that straddle cell boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedStructure {
    /// Element symbols, one per expanded atom.
    pub symbols: Vec<String>,
    /// Cartesian positions in Angstroms.
    pub positions: Vec<Point3<f64>>,
    /// For each expanded atom, the index of its source atom in the unit cell.
    /// Eigendisplacements are indexed through this mapping.
    pub source_atoms: Vec<usize>,
    /// Number of growth cycles run, including the final empty one.
    pub cycles: usize,
}

impl ExpandedStructure {
    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }
}

fn exceeds_limit(fractional: &Point3<f64>, limit: f64) -> bool {
    fractional.coords.iter().any(|&f| {
        if f < 0.0 || f >= 1.0 {
            // Coordinates just past the far face wrap back for comparison.
            let overhang = if f >= 1.0 { f - 1.0 } else { f };
            overhang.abs() > limit
        } else {
            false
        }
    })
}

/// Expands a crystal structure across its unit-cell boundaries.
///
/// Seeds the result with the atoms of the central unit cell, then repeatedly
/// sweeps the supercell images and includes every image atom that lies within
/// the reference bond distance of an atom already included, until a full sweep
/// adds nothing. Element pairs without a reference distance (including via
/// wildcards) are treated as unbonded and reported once via a warning.
pub fn expand(
    crystal: &Crystal,
    bonds: &BondTable,
    limits: &ExpansionLimits,
    dims: (usize, usize, usize),
) -> ExpandedStructure {
    let num_atoms = crystal.num_atoms();
    let images = build_images(crystal, dims);

    // Candidate pool; entries are cleared as atoms move into the expansion.
    let mut candidates: Vec<Option<Point3<f64>>> = images
        .iter()
        .map(|image| Some(crystal.lattice().to_cartesian(&image.fractional)))
        .collect();

    let start = central_cell_start(images.len(), num_atoms);

    let mut symbols: Vec<String> = Vec::with_capacity(num_atoms);
    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(num_atoms);
    let mut source_atoms: Vec<usize> = Vec::with_capacity(num_atoms);

    for index in start..start + num_atoms {
        let source = images[index].source;
        symbols.push(crystal.atoms()[source].symbol.clone());
        positions.push(
            candidates[index]
                .take()
                .unwrap_or_else(|| crystal.lattice().to_cartesian(&images[index].fractional)),
        );
        source_atoms.push(source);
    }

    let mut missing_pairs: HashSet<(String, String)> = HashSet::new();
    let mut cycles = 0;

    loop {
        cycles += 1;
        let mut added = 0;

        for index in 0..images.len() {
            let Some(candidate_position) = candidates[index] else {
                continue;
            };
            let source = images[index].source;
            let symbol = &crystal.atoms()[source].symbol;

            if let Some(&limit) = limits.get(symbol) {
                if exceeds_limit(&images[index].fractional, limit) {
                    continue;
                }
            }

            let mut bonded = false;
            for included in 0..positions.len() {
                let other_symbol = &symbols[included];

                let Some(distance) = bonds.lookup(symbol, other_symbol) else {
                    let pair = if symbol <= other_symbol {
                        (symbol.clone(), other_symbol.clone())
                    } else {
                        (other_symbol.clone(), symbol.clone())
                    };
                    if missing_pairs.insert(pair) {
                        warn!(
                            "No reference bond distance for atom pair '{}', '{}' (including wildcards)",
                            symbol, other_symbol
                        );
                    }
                    continue;
                };

                if (candidate_position - positions[included]).norm() <= distance {
                    bonded = true;
                    break;
                }
            }

            if bonded {
                symbols.push(symbol.clone());
                positions.push(candidate_position);
                source_atoms.push(source);
                candidates[index] = None;
                added += 1;
            }
        }

        debug!(cycle = cycles, added, "expansion cycle complete");

        if added == 0 {
            break;
        }
    }

    ExpandedStructure {
        symbols,
        positions,
        source_atoms,
        cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::lattice::Lattice;

    // A "diatomic molecule" split across the cell boundary along a: the C-H
    // distance within the cell is 9 A, across the boundary it is 1 A.
    fn boundary_molecule() -> Crystal {
        let lattice =
            Lattice::from_rows([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]);
        Crystal::new(
            lattice,
            vec![
                Atom::new("C", Point3::new(0.05, 0.5, 0.5), 12.011),
                Atom::new("H", Point3::new(0.95, 0.5, 0.5), 1.008),
            ],
        )
    }

    #[test]
    fn pulls_in_bonded_images_across_the_boundary() {
        let crystal = boundary_molecule();
        let bonds = BondTable::from_pairs([("C-H", 1.2)]).unwrap();

        let expanded = expand(&crystal, &bonds, &ExpansionLimits::new(), (1, 1, 1));

        // Unit cell + the H image bonded to the base C + the C image bonded
        // to the base H.
        assert_eq!(expanded.num_atoms(), 4);
        assert_eq!(expanded.source_atoms[..2], [0, 1]);

        let image_h = expanded
            .positions
            .iter()
            .zip(&expanded.symbols)
            .find(|(position, symbol)| *symbol == "H" && position.x < 0.0)
            .map(|(position, _)| *position)
            .unwrap();
        assert!((image_h.x + 0.5).abs() < 1e-9);

        // Growth stops after one productive cycle plus the empty closing one.
        assert_eq!(expanded.cycles, 2);
    }

    #[test]
    fn expansion_limits_suppress_restricted_elements() {
        let crystal = boundary_molecule();
        let bonds = BondTable::from_pairs([("C-H", 1.2)]).unwrap();
        let limits = ExpansionLimits::from([("H".to_string(), 0.01)]);

        let expanded = expand(&crystal, &bonds, &limits, (1, 1, 1));

        // The H image at fractional -0.05 exceeds its 0.01 overhang limit;
        // the unrestricted C image is still included.
        assert_eq!(expanded.num_atoms(), 3);
        assert_eq!(
            expanded
                .symbols
                .iter()
                .filter(|symbol| symbol.as_str() == "H")
                .count(),
            1
        );
    }

    #[test]
    fn empty_bond_table_keeps_only_the_unit_cell() {
        let crystal = boundary_molecule();
        let bonds = BondTable::default();

        let expanded = expand(&crystal, &bonds, &ExpansionLimits::new(), (1, 1, 1));

        assert_eq!(expanded.num_atoms(), 2);
        assert_eq!(expanded.source_atoms, vec![0, 1]);
        assert_eq!(expanded.cycles, 1);
    }

    #[test]
    fn mapping_indexes_unit_cell_atoms() {
        let crystal = boundary_molecule();
        let bonds = BondTable::from_pairs([("X-X", 1.2)]).unwrap();

        let expanded = expand(&crystal, &bonds, &ExpansionLimits::new(), (1, 1, 1));

        for (&source, symbol) in expanded.source_atoms.iter().zip(&expanded.symbols) {
            assert_eq!(&crystal.atoms()[source].symbol, symbol);
        }
    }
}
