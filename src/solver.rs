//! Backtracking search over chain foldings.
//!
//! The search keeps a single [`PartialSolution`] and mutates it in place:
//! every cube appended while descending is undone exactly once when the
//! branch is abandoned. Recursion is replaced by an explicit stack of choice
//! points, one per placed cube, each holding the candidates still to try.
//!
//! Pruning is purely local: a branch is rejected as soon as the placed cubes
//! overlap or no longer fit in the target cube.

use crate::chain::ChainSpec;
use crate::error::FoldError;
use crate::grid::DEFAULT_HALF_EXTENT;
use crate::hinge::Candidates;
use crate::partial::PartialSolution;
use crate::{Folding, ResultSink};

/// Whether the search stops at the first folding or enumerates them all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    First,
    All,
}

/// Parameters of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Side length of the cube the chain must fold into.
    pub side: i32,
    /// Half extent of the occupancy grid around the first cube.
    ///
    /// Raised to `side` when smaller, so the grid always covers every
    /// candidate of a feasible partial solution.
    pub grid_half_extent: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::First,
            side: 3,
            grid_half_extent: DEFAULT_HALF_EXTENT,
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchOutcome {
    /// First-solution mode found a folding; it is left in the partial solution.
    Solved,
    /// Every branch was explored.
    Exhausted,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cubes appended, excluding the seed cubes.
    pub placements: usize,
    /// Branches pruned for overlap or overshoot.
    pub rejections: usize,
    /// Complete feasible foldings accepted.
    pub solutions: usize,
}

/// Result of examining the current partial solution.
enum Visit {
    Reject,
    Done,
    Expand(Candidates),
}

/// A choice point on the search stack.
struct ChoicePoint {
    candidates: Candidates,
    /// Index of the next candidate to try.
    next: usize,
}

impl ChoicePoint {
    fn new(candidates: Candidates) -> Self {
        Self {
            candidates,
            next: 0,
        }
    }
}

/// Depth-first search for foldings of one chain.
pub struct Search<'a> {
    chain: &'a ChainSpec,
    mode: SearchMode,
    partial: PartialSolution,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Prepares a search starting from the seed cubes.
    pub fn new(chain: &'a ChainSpec, config: SearchConfig) -> Result<Self, FoldError> {
        Ok(Self {
            chain,
            mode: config.mode,
            partial: PartialSolution::seeded(&config)?,
            stats: SearchStats::default(),
        })
    }

    /// Runs the search, handing every accepted folding to `sink`.
    ///
    /// In [`SearchMode::First`] the search stops at the first folding and
    /// leaves it in [`partial`](Self::partial). Otherwise every branch is
    /// explored and the partial solution ends back at the seed cubes.
    pub fn run<S: ResultSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SearchOutcome, FoldError> {
        let mut stack = match self.visit(sink)? {
            Visit::Done => return Ok(SearchOutcome::Solved),
            Visit::Reject => return Ok(SearchOutcome::Exhausted),
            Visit::Expand(candidates) => vec![ChoicePoint::new(candidates)],
        };

        while let Some(choice) = stack.last_mut() {
            let Some(&candidate) = choice.candidates.get(choice.next) else {
                // all candidates tried; undo the cube that opened this choice point
                stack.pop();
                if !stack.is_empty() {
                    self.undo()?;
                }
                continue;
            };
            choice.next += 1;

            log::trace!("trying {candidate}");
            self.partial.append(candidate)?;
            self.stats.placements += 1;

            match self.visit(sink)? {
                // the winning cubes stay placed
                Visit::Done => return Ok(SearchOutcome::Solved),
                Visit::Reject => self.undo()?,
                Visit::Expand(candidates) => stack.push(ChoicePoint::new(candidates)),
            }
        }

        Ok(SearchOutcome::Exhausted)
    }

    /// Decides what to do with the current partial solution.
    fn visit<S: ResultSink + ?Sized>(&mut self, sink: &mut S) -> Result<Visit, FoldError> {
        if let Some(reason) = self.partial.infeasibility() {
            log::debug!("   {reason}");
            self.stats.rejections += 1;
            return Ok(Visit::Reject);
        }

        if self.partial.is_complete(self.chain) {
            self.stats.solutions += 1;
            log::debug!("accepted folding #{}", self.stats.solutions);
            sink.accept(self.partial.sequence().to_vec());
            return Ok(match self.mode {
                SearchMode::First => Visit::Done,
                // keep backtracking: siblings may fold differently
                SearchMode::All => Visit::Reject,
            });
        }

        let candidates = self.partial.next_candidate_positions(self.chain)?;
        Ok(Visit::Expand(candidates))
    }

    fn undo(&mut self) -> Result<(), FoldError> {
        let removed = self.partial.undo_last()?;
        log::trace!("removed {removed}");
        Ok(())
    }

    pub fn partial(&self) -> &PartialSolution {
        &self.partial
    }

    pub fn into_partial(self) -> PartialSolution {
        self.partial
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Finds the first folding of `chain`, in candidate order.
///
/// Returns the completed partial solution, or `None` if the chain cannot be
/// folded into the target cube. The mode in `config` is ignored.
pub fn solve_first(
    chain: &ChainSpec,
    config: SearchConfig,
) -> Result<Option<PartialSolution>, FoldError> {
    let mut search = Search::new(
        chain,
        SearchConfig {
            mode: SearchMode::First,
            ..config
        },
    )?;
    let mut accepted: Vec<Folding> = Vec::with_capacity(1);
    let outcome = search.run(&mut accepted)?;
    log::info!(
        "first-solution search: {} placements, {} rejections",
        search.stats().placements,
        search.stats().rejections
    );
    Ok(outcome.is_solved().then(|| search.into_partial()))
}

/// Finds every folding of `chain` reachable from the seed cubes.
///
/// The mode in `config` is ignored.
pub fn solve_all(chain: &ChainSpec, config: SearchConfig) -> Result<Vec<Folding>, FoldError> {
    let mut search = Search::new(
        chain,
        SearchConfig {
            mode: SearchMode::All,
            ..config
        },
    )?;
    let mut foldings: Vec<Folding> = Vec::new();
    search.run(&mut foldings)?;
    log::info!(
        "all-solutions search: {} foldings, {} placements, {} rejections",
        foldings.len(),
        search.stats().placements,
        search.stats().rejections
    );
    Ok(foldings)
}
