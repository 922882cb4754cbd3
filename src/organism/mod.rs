//! Sparse live-cell organism and its generation stepper.

mod cell;
mod cell_set;
mod engine;

pub use cell::{Cell, CellCoord, CellKey, NEIGHBOR_OFFSETS};
pub use cell_set::CellSet;
pub use engine::{BirthScan, DeadNeighbors, Organism, OrganismConfig};
