//! Expansion of molecules across unit-cell boundaries.
//!
//! An XYZ animation of a bare unit cell cuts molecules that straddle the cell
//! boundary in half. This module rebuilds whole molecules by padding the unit
//! cell with periodic images and pulling in every image atom that is within a
//! reference bond distance of an atom already included, repeating until the
//! set stops growing. Each included atom remembers its source atom in the unit
//! cell so eigendisplacements can be applied to the expanded structure.

pub mod bonds;
pub mod expand;
pub mod supercell;
