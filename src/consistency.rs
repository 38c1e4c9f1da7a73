//! Consistency Engine: node consistency and AC-3 arc consistency over a [`DomainStore`].
//!
//! Both passes only ever remove candidates. A pass that leaves some slot with no candidates
//! reports [`Propagation::Wipeout`]: the puzzle is unsatisfiable as given and there is no point
//! searching.

use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashSet;

use crate::domain::DomainStore;
use crate::puzzle::Puzzle;
use crate::slot::SlotId;

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Every domain is still non-empty.
    Consistent,
    /// `slot` lost its last candidate.
    Wipeout { slot: SlotId },
}

impl Propagation {
    #[must_use]
    pub fn is_consistent(self) -> bool {
        self == Propagation::Consistent
    }
}

/// Remove every candidate whose length differs from its slot's length.
///
/// Unary constraint, so a single pass suffices.
pub fn enforce_node_consistency(puzzle: &Puzzle, domains: &mut DomainStore) -> Propagation {
    for slot in puzzle.slot_ids() {
        let length = puzzle.slot(slot).length;
        domains.prune(slot, |word| word.len() == length);
    }

    match domains.first_empty() {
        Some(slot) => {
            debug!("node consistency emptied slot {}", puzzle.slot(slot));
            Propagation::Wipeout { slot }
        }
        None => Propagation::Consistent,
    }
}

/// Make `x` arc consistent with `y`: drop every candidate of `x` with no supporting candidate
/// in `y`. Returns whether `x`'s domain changed.
///
/// With an overlap `(i, j)`, a candidate `X` is supported iff some `Y` has `Y[j] == X[i]`.
/// Without one, the only pairwise constraint is distinctness, so `X` needs some `Y != X`.
pub fn revise(puzzle: &Puzzle, domains: &mut DomainStore, x: SlotId, y: SlotId) -> bool {
    match puzzle.overlap(x, y) {
        Some((i, j)) => {
            // letters appearing at offset j among y's candidates
            let mut supported = [false; 256];
            for word in domains.get(y) {
                if let Some(&b) = word.as_bytes().get(j) {
                    supported[usize::from(b)] = true;
                }
            }
            domains.prune(x, |word| {
                word.as_bytes().get(i).is_some_and(|&b| supported[usize::from(b)])
            })
        }
        None => {
            let others = domains.get(y);
            let Some(first) = others.first().map(Rc::clone) else {
                return domains.prune(x, |_| false);
            };
            if others.iter().any(|w| *w != first) {
                // at least two distinct words: every X has a distinct partner
                return false;
            }
            domains.prune(x, |word| word != &*first)
        }
    }
}

/// Enforce arc consistency over every constraining arc of the puzzle.
pub fn ac3(puzzle: &Puzzle, domains: &mut DomainStore) -> Propagation {
    ac3_with_arcs(puzzle, domains, puzzle.arcs())
}

/// Enforce arc consistency starting from the given worklist.
///
/// Arcs are processed FIFO and never queued twice at once. Whenever revising `(x, y)` narrows
/// `x`, every `(z, x)` for a neighbor `z != y` is queued again. Stops at a fixed point, or as
/// soon as a domain empties.
pub fn ac3_with_arcs<I>(puzzle: &Puzzle, domains: &mut DomainStore, arcs: I) -> Propagation
where
    I: IntoIterator<Item = (SlotId, SlotId)>,
{
    let mut queue: VecDeque<(SlotId, SlotId)> = VecDeque::new();
    let mut queued: FxHashSet<(SlotId, SlotId)> = FxHashSet::default();
    for arc in arcs {
        if queued.insert(arc) {
            queue.push_back(arc);
        }
    }

    let mut revisions = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        queued.remove(&(x, y));
        if !revise(puzzle, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            debug!("AC-3 emptied slot {} after {revisions} revisions", puzzle.slot(x));
            return Propagation::Wipeout { slot: x };
        }

        for &z in puzzle.neighbors(x) {
            if z != y && queued.insert((z, x)) {
                queue.push_back((z, x));
            }
        }
    }

    debug!("AC-3 reached a fixed point after {revisions} narrowing revisions");
    Propagation::Consistent
}

/// Check the arc-consistency fixed point directly: for every arc `(x, y)` with overlap `(i, j)`,
/// every candidate `X` of `x` has some candidate `Y` of `y` with `X[i] == Y[j]`.
///
/// Quadratic in domain size; intended for tests and diagnostics.
#[must_use]
pub fn is_arc_consistent(puzzle: &Puzzle, domains: &DomainStore) -> bool {
    puzzle.arcs().into_iter().all(|(x, y)| {
        let Some((i, j)) = puzzle.overlap(x, y) else {
            return true;
        };
        domains.get(x).iter().all(|wx| {
            let Some(letter) = wx.as_bytes().get(i) else {
                return false;
            };
            domains.get(y).iter().any(|wy| wy.as_bytes().get(j) == Some(letter))
        })
    })
}
