//! Partially folded chains.
//!
//! A [`PartialSolution`] is the list of cubes placed so far, together with the
//! derived state the search needs on every step: an occupancy grid to detect
//! overlaps and the per-axis bounding box of the placed cubes.

use crate::chain::ChainSpec;
use crate::error::FoldError;
use crate::geometry::{Axis, Position};
use crate::grid::OccupancyGrid;
use crate::hinge::Candidates;
use crate::solver::SearchConfig;

/// The first two cubes of every folding.
///
/// Fixing the first link along +x removes a rotational degree of freedom
/// without losing solutions: any folding can be rotated into this start.
pub const SEED_CUBES: [Position; 2] = [Position::ORIGIN, Position::new(1, 0, 0)];

/// Why a partial solution cannot be part of a valid folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Infeasibility {
    #[display("overshoot - axis {axis}: [{min}, {max}]")]
    Overshoot { axis: Axis, min: i32, max: i32 },
    #[display("overlap in {position}")]
    Overlap { position: Position },
}

/// Cubes placed so far, with incrementally maintained occupancy and bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSolution {
    sequence: Vec<Position>,
    occupancy: OccupancyGrid,
    bounds_min: [i32; 3],
    bounds_max: [i32; 3],
    /// Side length of the cube the folding must fit in.
    side: i32,
}

impl PartialSolution {
    /// Creates a partial solution holding only the seed cubes.
    pub fn seeded(config: &SearchConfig) -> Result<Self, FoldError> {
        Self::from_positions(SEED_CUBES, config)
    }

    /// Rebuilds a partial solution by appending `positions` in order.
    ///
    /// At least two positions are required, since the last two cubes drive
    /// candidate generation.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Position>,
        config: &SearchConfig,
    ) -> Result<Self, FoldError> {
        let positions: Vec<Position> = positions.into_iter().collect();
        if positions.len() < SEED_CUBES.len() {
            return Err(FoldError::InsufficientHistory {
                placed: positions.len(),
            });
        }

        // feasible cubes stay within `side - 1` of the first cube, so their
        // candidates stay within `side`
        let half_extent = config.grid_half_extent.max(config.side.max(0) as usize);
        let mut partial = Self {
            sequence: Vec::with_capacity(positions.len()),
            occupancy: OccupancyGrid::new(half_extent),
            bounds_min: positions[0].coords(),
            bounds_max: positions[0].coords(),
            side: config.side,
        };
        for position in positions {
            partial.append(position)?;
        }
        Ok(partial)
    }

    /// Places `position` after the last cube.
    ///
    /// Feasibility is not checked here; call [`is_feasible`](Self::is_feasible)
    /// afterwards. Fails only if `position` lies outside the occupancy grid.
    pub fn append(&mut self, position: Position) -> Result<(), FoldError> {
        self.occupancy.increment(position)?;
        for (axis, coord) in position.coords().into_iter().enumerate() {
            self.bounds_min[axis] = self.bounds_min[axis].min(coord);
            self.bounds_max[axis] = self.bounds_max[axis].max(coord);
        }
        self.sequence.push(position);
        Ok(())
    }

    /// Removes the last placed cube and returns it.
    ///
    /// The seed cubes cannot be removed. Bounds are rescanned only if the
    /// removed cube sat on one of them.
    pub fn undo_last(&mut self) -> Result<Position, FoldError> {
        if self.sequence.len() <= SEED_CUBES.len() {
            return Err(FoldError::EmptyHistory);
        }
        let position = self.sequence.pop().ok_or(FoldError::EmptyHistory)?;
        self.occupancy.decrement(position)?;

        let on_edge = position
            .coords()
            .into_iter()
            .enumerate()
            .any(|(axis, coord)| {
                coord == self.bounds_min[axis] || coord == self.bounds_max[axis]
            });
        if on_edge {
            self.recompute_bounds();
        }
        Ok(position)
    }

    fn recompute_bounds(&mut self) {
        let Some(first) = self.sequence.first() else {
            return;
        };
        self.bounds_min = first.coords();
        self.bounds_max = first.coords();
        for position in &self.sequence[1..] {
            for (axis, coord) in position.coords().into_iter().enumerate() {
                self.bounds_min[axis] = self.bounds_min[axis].min(coord);
                self.bounds_max[axis] = self.bounds_max[axis].max(coord);
            }
        }
    }

    /// Returns the first reason this partial solution is infeasible, if any.
    ///
    /// Bounding-box overshoot is reported before overlaps.
    pub fn infeasibility(&self) -> Option<Infeasibility> {
        for axis in Axis::ALL {
            let (min, max) = (self.bounds_min[axis.index()], self.bounds_max[axis.index()]);
            if max - min > self.side - 1 {
                return Some(Infeasibility::Overshoot { axis, min, max });
            }
        }
        if self.occupancy.has_overlap() {
            return self
                .sequence
                .iter()
                .find(|&&position| self.occupancy.count(position) > 1)
                .map(|&position| Infeasibility::Overlap { position });
        }
        None
    }

    /// Returns `true` if the cubes fit in the target cube without overlapping.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.infeasibility().is_none()
    }

    /// Returns `true` once every cube of `chain` has been placed.
    #[inline]
    pub fn is_complete(&self, chain: &ChainSpec) -> bool {
        self.sequence.len() == chain.len()
    }

    /// Lists the positions allowed for the next cube by the chain's hinges.
    ///
    /// The hinge consulted is the one at the most recently placed cube,
    /// which links the last two cubes to the next one.
    pub fn next_candidate_positions(
        &self,
        chain: &ChainSpec,
    ) -> Result<Candidates, FoldError> {
        let placed = self.sequence.len();
        if placed < 2 {
            return Err(FoldError::InsufficientHistory { placed });
        }
        chain
            .hinge_at(placed - 1)?
            .next_candidates(self.sequence[placed - 2], self.sequence[placed - 1])
    }

    pub fn sequence(&self) -> &[Position] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always `false`: the seed cubes are never removed.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn bounds_min(&self) -> [i32; 3] {
        self.bounds_min
    }

    pub fn bounds_max(&self) -> [i32; 3] {
        self.bounds_max
    }

    /// Number of placed cubes at `position`.
    pub fn occupancy(&self, position: Position) -> u16 {
        self.occupancy.count(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hinge::HingeKind;
    use proptest::prelude::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    fn build(positions: &[(i32, i32, i32)]) -> PartialSolution {
        let positions = positions.iter().map(|&(x, y, z)| Position::new(x, y, z));
        PartialSolution::from_positions(positions, &config()).unwrap()
    }

    /// Full-rescan reference for bounds.
    fn reference_bounds(sequence: &[Position]) -> ([i32; 3], [i32; 3]) {
        let min = [0, 1, 2].map(|axis| sequence.iter().map(|p| p.coords()[axis]).min().unwrap());
        let max = [0, 1, 2].map(|axis| sequence.iter().map(|p| p.coords()[axis]).max().unwrap());
        (min, max)
    }

    fn reference_feasible(sequence: &[Position]) -> bool {
        let (min, max) = reference_bounds(sequence);
        let fits = (0..3).all(|axis| max[axis] - min[axis] <= 2);
        let mut sorted = sequence.to_vec();
        sorted.sort();
        sorted.dedup();
        fits && sorted.len() == sequence.len()
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(Position),
        Undo,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-3..=3i32, -3..=3i32, -3..=3i32)
                .prop_map(|(x, y, z)| Op::Append(Position::new(x, y, z))),
            Just(Op::Undo),
        ]
    }

    proptest! {
        #[test]
        fn append_undo_matches_reference(ops in prop::collection::vec(op(), 0..60)) {
            let mut partial = PartialSolution::seeded(&config()).unwrap();
            let mut reference = SEED_CUBES.to_vec();

            for op in ops {
                match op {
                    Op::Append(position) => {
                        let before = partial.clone();
                        partial.append(position).unwrap();
                        reference.push(position);
                        prop_assert_eq!(partial.occupancy(position) as usize,
                            reference.iter().filter(|&&p| p == position).count());

                        // round trip restores the exact previous state
                        let mut undone = partial.clone();
                        prop_assert_eq!(undone.undo_last(), Ok(position));
                        prop_assert_eq!(&undone, &before);
                    }
                    Op::Undo => {
                        if reference.len() > SEED_CUBES.len() {
                            let expected = reference.pop().unwrap();
                            prop_assert_eq!(partial.undo_last(), Ok(expected));
                            prop_assert_eq!(partial.occupancy(expected) as usize,
                                reference.iter().filter(|&&p| p == expected).count());
                        } else {
                            prop_assert_eq!(partial.undo_last(), Err(FoldError::EmptyHistory));
                        }
                    }
                }

                prop_assert_eq!(partial.sequence(), reference.as_slice());
                let (min, max) = reference_bounds(&reference);
                prop_assert_eq!(partial.bounds_min(), min);
                prop_assert_eq!(partial.bounds_max(), max);
                prop_assert_eq!(partial.is_feasible(), reference_feasible(&reference));
            }
        }
    }

    #[test]
    fn test_seeded_state() {
        let partial = PartialSolution::seeded(&config()).unwrap();
        assert_eq!(partial.sequence(), &SEED_CUBES);
        assert_eq!(partial.bounds_min(), [0, 0, 0]);
        assert_eq!(partial.bounds_max(), [1, 0, 0]);
        assert!(partial.is_feasible());
        assert_eq!(partial.occupancy(Position::ORIGIN), 1);
    }

    #[test]
    fn test_cannot_undo_seed_cubes() {
        let mut partial = PartialSolution::seeded(&config()).unwrap();
        partial.append(Position::new(2, 0, 0)).unwrap();
        assert_eq!(partial.undo_last(), Ok(Position::new(2, 0, 0)));
        assert_eq!(partial.undo_last(), Err(FoldError::EmptyHistory));
        assert_eq!(partial.len(), 2);
    }

    #[test]
    fn test_overshoot_is_reported() {
        let partial = build(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        assert!(!partial.is_feasible());
        assert_eq!(
            partial.infeasibility(),
            Some(Infeasibility::Overshoot {
                axis: Axis::X,
                min: 0,
                max: 3
            })
        );
        assert_eq!(
            partial.infeasibility().unwrap().to_string(),
            "overshoot - axis x: [0, 3]"
        );
    }

    #[test]
    fn test_overlap_is_reported() {
        let partial = build(&[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0), (0, 0, 0)]);
        assert!(!partial.is_feasible());
        assert_eq!(
            partial.infeasibility(),
            Some(Infeasibility::Overlap {
                position: Position::ORIGIN
            })
        );
        assert_eq!(partial.occupancy(Position::ORIGIN), 2);
    }

    #[test]
    fn test_undo_on_edge_rescans_bounds() {
        let mut partial = build(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0), (1, 1, 0)]);
        assert_eq!(partial.undo_last(), Ok(Position::new(1, 1, 0)));
        assert_eq!(partial.bounds_min(), [0, 0, 0]);
        assert_eq!(partial.bounds_max(), [2, 1, 0]);
        assert_eq!(partial.undo_last(), Ok(Position::new(2, 1, 0)));
        assert_eq!(partial.bounds_max(), [2, 0, 0]);
    }

    #[test]
    fn test_candidates_use_hinge_at_last_cube() {
        let chain = ChainSpec::standard();
        let mut partial = PartialSolution::seeded(&config()).unwrap();

        // cube 1 is straight
        assert_eq!(chain.hinge_at(1), Ok(HingeKind::Straight));
        let candidates = partial.next_candidate_positions(&chain).unwrap();
        assert_eq!(candidates.as_slice(), &[Position::new(2, 0, 0)]);

        // cube 2 is an elbow
        partial.append(candidates[0]).unwrap();
        let candidates = partial.next_candidate_positions(&chain).unwrap();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0], Position::new(2, 1, 0));
    }

    #[test]
    fn test_candidate_errors() {
        let short = ChainSpec::new(vec![HingeKind::End, HingeKind::End]).unwrap();
        let partial = PartialSolution::seeded(&config()).unwrap();
        assert!(partial.is_complete(&short));
        assert_eq!(
            partial.next_candidate_positions(&short),
            Err(FoldError::NotASteppableHinge)
        );

        let overlong = build(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        assert_eq!(
            overlong.next_candidate_positions(&short),
            Err(FoldError::IndexOutOfRange { index: 2, len: 2 })
        );

        assert_eq!(
            PartialSolution::from_positions([Position::ORIGIN], &config()),
            Err(FoldError::InsufficientHistory { placed: 1 })
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut partial = PartialSolution::seeded(&config()).unwrap();
        let snapshot = partial.clone();
        partial.append(Position::new(2, 0, 0)).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.occupancy(Position::new(2, 0, 0)), 0);
    }
}
