//! Sparse hash-set Conway's Game of Life engine (B3/S23).

pub mod error;
pub mod loader;
pub mod organism;
pub use error::LoadError;
pub use organism::{BirthScan, Cell, Organism, OrganismConfig};
