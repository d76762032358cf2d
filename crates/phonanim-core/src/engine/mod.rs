//! # Engine Module
//!
//! Orchestration layer for phonon-mode animation: typed configuration, mode
//! selection, and the modulation step that turns a static expanded structure
//! into per-frame displaced geometries.
//!
//! - **Configuration** ([`config`]) - animation parameters and validation
//! - **Mode Selection** ([`selection`]) - choosing bands by index or frequency
//! - **Modulation** ([`modulation`]) - cosine amplitude sweep and frame generation
//! - **Progress Monitoring** ([`progress`]) - callback-based progress reporting
//! - **Error Handling** ([`error`]) - engine-level error aggregation

pub mod config;
pub mod error;
pub mod modulation;
pub mod progress;
pub mod selection;
