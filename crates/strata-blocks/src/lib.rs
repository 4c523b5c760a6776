//! Block materials and layer assignment.
#![forbid(unsafe_code)]

pub mod material;

pub use material::{LayerMaterials, Material, MaterialError};
