//! Error types for chain configuration and search driving.

use crate::geometry::Position;

/// Programming-error states of the folding model.
///
/// None of these occur when the search drives the model correctly. They exist
/// so that a broken invariant fails loudly instead of silently corrupting the
/// search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FoldError {
    #[display("{from} and {to} are not unit-adjacent")]
    InvalidAdjacency { from: Position, to: Position },
    #[display("an end hinge cannot generate candidates")]
    NotASteppableHinge,
    #[display("hinge index {index} is outside a chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[display("cannot undo past the seed cubes")]
    EmptyHistory,
    #[display("candidate generation needs two placed cubes, found {placed}")]
    InsufficientHistory { placed: usize },
    #[display("{position} lies outside the occupancy grid")]
    OutOfGrid { position: Position },
}

/// Errors raised while building a [`ChainSpec`](crate::chain::ChainSpec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ChainError {
    #[display("a chain needs at least two cubes, got {len}")]
    TooShort { len: usize },
    #[display("a chain must start and end with an end hinge")]
    MissingEnd,
    #[display("end hinge at interior index {index}")]
    InteriorEnd { index: usize },
    #[display("unknown hinge symbol {symbol:?} (expected E, S or L)")]
    UnknownSymbol { symbol: char },
}
