//! # Phonanim Core Library
//!
//! A library for turning Gamma-point phonon data of molecular crystals into
//! animation inputs for external renderers (e.g. VMD).
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Crystal`,
//!   `PhononMode`), file I/O for Phonopy mesh files and the XYZ trajectory
//!   format, and the bond-driven structure-expansion algorithm.
//!
//! - **[`engine`]: The Logic Core.** Configuration, phonon-mode selection and
//!   the modulation step that displaces the expanded structure along a mode
//!   eigenvector frame by frame.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into
//!   the end-to-end animation procedure that produces the XYZ trajectory files
//!   consumed by external rendering tools.

pub mod core;
pub mod engine;
pub mod workflows;
