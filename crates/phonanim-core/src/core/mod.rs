//! # Core Module
//!
//! Fundamental building blocks for phonon-mode animation: crystal and phonon
//! data models, file I/O, and the unit-cell expansion algorithm.
//!
//! ## Architecture
//!
//! - **Crystal Representation** ([`models`]) - Lattice, atoms, structures and phonon modes
//! - **File I/O** ([`io`]) - Phonopy `mesh.yaml` input and XYZ trajectory output
//! - **Structure Expansion** ([`expansion`]) - Bond-driven expansion of molecules
//!   across unit-cell boundaries

pub mod expansion;
pub mod io;
pub mod models;
