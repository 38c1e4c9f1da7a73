//! Search Engine: heuristic-ordered backtracking over partial [`Assignment`]s.
//!
//! At each step the engine picks the unassigned slot with the fewest remaining candidates
//! (ties: most crossings, then lowest id), tries its candidates least-constraining first, and
//! recurses on every extension that keeps the whole assignment consistent. A single
//! `Assignment` is mutated in place and each insertion is undone on backtrack.
//!
//! The [`DomainStore`] handed to [`SearchEngine::run`] is never mutated. With inference enabled,
//! each tentative value is propagated on a private snapshot of the store instead, which is simply
//! dropped when the branch fails.

use std::cmp::Reverse;
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;
use rustc_hash::FxHashSet;

use crate::assignment::Assignment;
use crate::consistency::{ac3_with_arcs, Propagation};
use crate::domain::DomainStore;
use crate::puzzle::Puzzle;
use crate::slot::SlotId;

/// Simple helper to enforce an optional wall-clock time limit.
///
/// Usage:
/// ```ignore
///  let budget = TimeBudget::new(Some(Duration::from_secs(30)));
///  while !budget.expired() {
///    // do some work
///  }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,           // when the budget began
    limit: Option<Duration>,  // maximum allowed elapsed time, if any
}

impl TimeBudget {
    /// Start a budget now. `None` never expires.
    #[must_use]
    pub fn new(limit: Option<Duration>) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// How long this budget has been running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns true if the allowed time has fully elapsed.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The assignment is complete and consistent.
    Found,
    /// Every branch was tried; no complete assignment exists within the given domains.
    Exhausted,
    /// The time budget ran out before the search finished.
    TimedOut,
}

/// Wall-clock time spent in each phase of a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    pub node_consistency: Duration,
    pub arc_consistency: Duration,
    pub search: Duration,
}

/// Counters describing how much work a solve did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Consistent partial assignments the search descended into.
    pub states_visited: u64,
    /// Consistent values whose whole subtree failed.
    pub backtracks: u64,
    /// Values rejected because propagating them emptied some domain.
    pub inference_wipeouts: u64,
    pub timings: PhaseTimings,
}

/// Choose the next slot to fill: fewest remaining candidates, then highest degree, then lowest
/// id. Returns `None` when every slot is assigned.
#[must_use]
pub fn select_unassigned(
    puzzle: &Puzzle,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<SlotId> {
    // min_by_key keeps the first of equal keys, i.e. the lowest id
    puzzle
        .slot_ids()
        .filter(|&slot| !assignment.is_assigned(slot))
        .min_by_key(|&slot| (domains.len(slot), Reverse(puzzle.degree(slot))))
}

/// Candidates for `slot`, least constraining first.
///
/// A candidate's cost is how many values it would rule out across the domains of `slot`'s
/// unassigned neighbors: every neighbor value that disagrees on the shared cell, or that is the
/// candidate word itself. The sort is stable, so equal costs keep domain order.
#[must_use]
pub fn order_domain_values(
    puzzle: &Puzzle,
    domains: &DomainStore,
    assignment: &Assignment,
    slot: SlotId,
) -> Vec<Rc<str>> {
    let profiles: Vec<NeighborProfile> = puzzle
        .neighbors(slot)
        .iter()
        .filter(|&&n| !assignment.is_assigned(n))
        .filter_map(|&n| {
            let (i, j) = puzzle.overlap(slot, n)?;
            Some(NeighborProfile::new(domains.get(n), i, j))
        })
        .collect();

    let mut scored: Vec<(usize, Rc<str>)> = domains
        .get(slot)
        .iter()
        .map(|word| {
            let cost = profiles.iter().map(|p| p.eliminated_by(word)).sum();
            (cost, Rc::clone(word))
        })
        .collect();
    scored.sort_by_key(|&(cost, _)| cost);

    scored.into_iter().map(|(_, word)| word).collect()
}

/// Letter histogram of one neighbor's domain at the shared cell.
struct NeighborProfile<'d> {
    /// Offset of the shared cell in the slot being ordered.
    here: usize,
    /// Offset of the shared cell in the neighbor.
    there: usize,
    size: usize,
    letters: [usize; 256],
    words: FxHashSet<&'d str>,
}

impl<'d> NeighborProfile<'d> {
    fn new(domain: &'d [Rc<str>], here: usize, there: usize) -> Self {
        let mut letters = [0usize; 256];
        for word in domain {
            if let Some(&b) = word.as_bytes().get(there) {
                letters[usize::from(b)] += 1;
            }
        }
        let words = domain.iter().map(|w| &**w).collect();
        NeighborProfile { here, there, size: domain.len(), letters, words }
    }

    fn eliminated_by(&self, word: &str) -> usize {
        let bytes = word.as_bytes();
        let Some(&letter) = bytes.get(self.here) else {
            return self.size;
        };
        let disagreeing = self.size - self.letters[usize::from(letter)];
        // the word itself agrees on the shared cell only if it repeats its own letter there
        let itself = self.words.contains(word) && bytes.get(self.there) == Some(&letter);
        disagreeing + usize::from(itself)
    }
}

/// Backtracking search over one puzzle.
pub struct SearchEngine<'a> {
    puzzle: &'a Puzzle,
    inference: bool,
    budget: &'a TimeBudget,
    stats: SearchStats,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(puzzle: &'a Puzzle, inference: bool, budget: &'a TimeBudget) -> Self {
        SearchEngine { puzzle, inference, budget, stats: SearchStats::default() }
    }

    /// Search from the empty assignment. On [`SearchOutcome::Found`] the returned assignment is
    /// complete; otherwise it is empty.
    pub fn run(&mut self, domains: &DomainStore) -> (SearchOutcome, Assignment) {
        debug_assert_eq!(
            domains.num_slots(),
            self.puzzle.len(),
            "domains built for another puzzle"
        );

        let mut assignment = Assignment::new(self.puzzle.len());
        let outcome = self.backtrack(domains, &mut assignment);

        debug_assert!(
            outcome != SearchOutcome::Found
                || (assignment.is_complete() && assignment.is_consistent(self.puzzle)),
            "search reported success on an invalid assignment"
        );
        debug_assert!(outcome == SearchOutcome::Found || assignment.is_empty());
        (outcome, assignment)
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn backtrack(&mut self, domains: &DomainStore, assignment: &mut Assignment) -> SearchOutcome {
        // Invariant: the assignment passed in is already consistent.
        let Some(slot) = select_unassigned(self.puzzle, domains, assignment) else {
            return SearchOutcome::Found;
        };

        for word in order_domain_values(self.puzzle, domains, assignment, slot) {
            assignment.insert(slot, Rc::clone(&word));

            if assignment.is_consistent(self.puzzle) {
                if self.budget.expired() {
                    assignment.remove(slot);
                    return SearchOutcome::TimedOut;
                }
                self.stats.states_visited += 1;

                match self.descend(domains, assignment, slot, &word) {
                    SearchOutcome::Found => return SearchOutcome::Found,
                    SearchOutcome::TimedOut => {
                        assignment.remove(slot);
                        return SearchOutcome::TimedOut;
                    }
                    SearchOutcome::Exhausted => self.stats.backtracks += 1,
                }
            }

            assignment.remove(slot);
        }

        SearchOutcome::Exhausted
    }

    fn descend(
        &mut self,
        domains: &DomainStore,
        assignment: &mut Assignment,
        slot: SlotId,
        word: &str,
    ) -> SearchOutcome {
        if !self.inference {
            return self.backtrack(domains, assignment);
        }

        let mut narrowed = domains.clone();
        narrowed.restrict(slot, word);
        let arcs = self.puzzle.neighbors(slot).iter().map(|&z| (z, slot));
        match ac3_with_arcs(self.puzzle, &mut narrowed, arcs) {
            Propagation::Consistent => self.backtrack(&narrowed, assignment),
            Propagation::Wipeout { .. } => {
                self.stats.inference_wipeouts += 1;
                SearchOutcome::Exhausted
            }
        }
    }
}
