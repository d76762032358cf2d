//! Data structures describing a molecular crystal and its Gamma-point phonons.

pub mod atom;
pub mod lattice;
pub mod mode;
pub mod structure;
