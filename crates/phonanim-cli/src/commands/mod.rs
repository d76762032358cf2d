pub mod animate;
pub mod gif;
