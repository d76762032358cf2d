//! Input/output for the file formats the animation pipeline touches.
//!
//! Input is a Phonopy `mesh.yaml` file carrying frequencies and eigenvectors;
//! output is the multi-frame XYZ trajectory format consumed by external
//! renderers such as VMD. The XYZ comment lines double as a metadata channel
//! that the GIF-assembly step reads back.

pub mod mesh;
pub mod traits;
pub mod xyz;
