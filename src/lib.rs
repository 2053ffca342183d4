//! Snake Cube Solver Library
//!
//! Finds the ways a chain of unit cubes joined by straight and elbow hinges
//! folds into a solid cube.

pub mod chain;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hinge;
pub mod partial;
pub mod persistence;
pub mod solver;
pub mod symmetry;

pub use chain::ChainSpec;
pub use error::{ChainError, FoldError};
pub use geometry::{Axis, Position};
pub use hinge::HingeKind;
pub use partial::PartialSolution;
pub use solver::{solve_all, solve_first, Search, SearchConfig, SearchMode, SearchOutcome};

/// Cube positions of a complete folding, in chain order.
pub type Folding = Vec<Position>;

/// Receives every folding the search accepts.
///
/// The search hands over its own copy, so the sink may keep it after the
/// search moves on.
pub trait ResultSink {
    fn accept(&mut self, folding: Folding);
}

impl ResultSink for Vec<Folding> {
    fn accept(&mut self, folding: Folding) {
        self.push(folding);
    }
}
