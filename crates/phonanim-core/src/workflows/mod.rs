//! High-level, user-facing procedures.
//!
//! The [`animate`] workflow is the library's main entry point: it expands the
//! structure, generates the modulated frames for every selected mode and
//! writes all XYZ output artefacts.

pub mod animate;
