//! Hinge kinds and the candidate positions each one allows.

use tinyvec::ArrayVec;

use crate::error::FoldError;
use crate::geometry::{Axis, Position};

/// Candidate next positions for one hinge, stored inline.
///
/// An elbow yields at most four candidates, so the search never allocates here.
pub type Candidates = ArrayVec<[Position; 4]>;

/// How the cube at a hinge relates its predecessor and successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum HingeKind {
    /// The cube is an end of the chain.
    #[display("END")]
    End,
    /// The cube continues the previous step in a straight line: `OOO`.
    #[display("STRAIGHT")]
    Straight,
    /// The cube turns the chain by 90 degrees.
    #[display("ELBOW")]
    Elbow,
}

impl HingeKind {
    /// Returns the one-letter configuration symbol for this hinge.
    pub const fn symbol(self) -> char {
        match self {
            HingeKind::End => 'E',
            HingeKind::Straight => 'S',
            HingeKind::Elbow => 'L',
        }
    }

    /// Parses a configuration symbol (case-insensitive).
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'E' => Some(HingeKind::End),
            'S' => Some(HingeKind::Straight),
            'L' => Some(HingeKind::Elbow),
            _ => None,
        }
    }

    /// Lists the positions the cube after this hinge may take.
    ///
    /// `previous` and `current` are the two most recently placed cubes;
    /// `current` is the cube at this hinge. Occupancy and bounds are not
    /// considered. Elbow candidates come lower axis first, `+1` before `-1`,
    /// so the search order is reproducible.
    pub fn next_candidates(
        self,
        previous: Position,
        current: Position,
    ) -> Result<Candidates, FoldError> {
        let mut candidates = Candidates::new();
        match self {
            HingeKind::End => return Err(FoldError::NotASteppableHinge),
            HingeKind::Straight => {
                let (axis, sign) = previous.unit_direction_to(current)?;
                candidates.push(current.offset(axis, sign));
            }
            HingeKind::Elbow => {
                let (incoming, _) = previous.unit_direction_to(current)?;
                for axis in Axis::ALL.into_iter().filter(|&axis| axis != incoming) {
                    candidates.push(current.offset(axis, 1));
                    candidates.push(current.offset(axis, -1));
                }
            }
        }
        Ok(candidates)
    }
}
