//! Chain definitions.
//!
//! A chain is the ordered list of hinges of a snake cube, one per cube.
//! Entry `i` describes how cube `i` joins cubes `i - 1` and `i + 1`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChainError, FoldError};
use crate::hinge::HingeKind;

use crate::hinge::HingeKind::{Elbow as L, End as E, Straight as S};

/// The 27-cube chain of the classic 3x3x3 snake cube.
pub const STANDARD_HINGES: [HingeKind; 27] = [
    E, S, L, L, L, S, L, L, S, L, L, L, S, L, S, L, L, L, L, S, L, S, L, S, L, S, E,
];

/// An immutable hinge sequence describing one puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    hinges: Box<[HingeKind]>,
}

impl ChainSpec {
    /// Builds a chain, checking that it has two ends and no end in between.
    pub fn new(hinges: impl Into<Box<[HingeKind]>>) -> Result<Self, ChainError> {
        let hinges = hinges.into();
        if hinges.len() < 2 {
            return Err(ChainError::TooShort { len: hinges.len() });
        }
        if !hinges[0].is_end() || !hinges[hinges.len() - 1].is_end() {
            return Err(ChainError::MissingEnd);
        }
        if let Some(index) = (1..hinges.len() - 1).find(|&i| hinges[i].is_end()) {
            return Err(ChainError::InteriorEnd { index });
        }
        Ok(Self { hinges })
    }

    /// The classic 27-cube snake cube.
    pub fn standard() -> Self {
        Self {
            hinges: STANDARD_HINGES.into(),
        }
    }

    /// Returns the hinge at cube `index`.
    pub fn hinge_at(&self, index: usize) -> Result<HingeKind, FoldError> {
        self.hinges
            .get(index)
            .copied()
            .ok_or(FoldError::IndexOutOfRange {
                index,
                len: self.hinges.len(),
            })
    }

    /// Number of cubes in the chain.
    pub fn len(&self) -> usize {
        self.hinges.len()
    }

    /// Always `false`: a valid chain has at least two cubes.
    pub fn is_empty(&self) -> bool {
        self.hinges.is_empty()
    }

    pub fn hinges(&self) -> &[HingeKind] {
        &self.hinges
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for ChainSpec {
    type Err = ChainError;

    /// Parses a chain from hinge symbols (`E`, `S`, `L`), ignoring whitespace,
    /// commas and dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hinges = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '-')
            .map(|symbol| {
                HingeKind::from_symbol(symbol).ok_or(ChainError::UnknownSymbol { symbol })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(hinges)
    }
}

impl fmt::Display for ChainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hinge in self.hinges.iter() {
            write!(f, "{}", hinge.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_chain_shape() {
        let chain = ChainSpec::standard();
        assert_eq!(chain.len(), 27);
        assert_eq!(chain.hinge_at(0), Ok(HingeKind::End));
        assert_eq!(chain.hinge_at(1), Ok(HingeKind::Straight));
        assert_eq!(chain.hinge_at(2), Ok(HingeKind::Elbow));
        assert_eq!(chain.hinge_at(26), Ok(HingeKind::End));
        assert_eq!(
            chain.hinge_at(27),
            Err(FoldError::IndexOutOfRange { index: 27, len: 27 })
        );
    }

    #[test]
    fn test_parse_matches_standard() {
        let parsed: ChainSpec = "ESLLLSLLSLLLSLSLLLLSLSLSLSE".parse().unwrap();
        assert_eq!(parsed, ChainSpec::standard());
        assert_eq!(parsed.to_string(), "ESLLLSLLSLLLSLSLLLLSLSLSLSE");

        let spaced: ChainSpec = "E S-L, l e".parse().unwrap();
        assert_eq!(spaced.hinges(), &[E, S, L, L, E]);
    }

    #[test]
    fn test_invalid_chains_are_rejected() {
        assert_eq!(ChainSpec::new(vec![E]), Err(ChainError::TooShort { len: 1 }));
        assert_eq!(ChainSpec::new(vec![E, S, L]), Err(ChainError::MissingEnd));
        assert_eq!(
            ChainSpec::new(vec![E, S, E, L, E]),
            Err(ChainError::InteriorEnd { index: 2 })
        );
        assert_eq!(
            "ESXE".parse::<ChainSpec>(),
            Err(ChainError::UnknownSymbol { symbol: 'X' })
        );
    }

    #[test]
    fn test_two_cube_chain_is_valid() {
        let chain = ChainSpec::new(vec![E, E]).unwrap();
        assert_eq!(chain.len(), 2);
    }
}
