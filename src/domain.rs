//! Domain Store: the per-slot candidate words still considered feasible.
//!
//! Domains only ever shrink. They are seeded with the full word list, narrowed by
//! [`crate::consistency`], and then read (never written) by the search engine. When search-time
//! inference is enabled the search works on a cloned snapshot instead.

use std::rc::Rc;

use crate::puzzle::Puzzle;
use crate::slot::SlotId;

/// Candidate words per slot, indexed by [`SlotId`].
///
/// Candidates keep the order of the word list they were seeded from, so iteration (and therefore
/// search) is deterministic for a fixed input. Words are `Rc<str>` so snapshots are cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<Vec<Rc<str>>>,
}

impl DomainStore {
    /// Seed every slot of `puzzle` with the entire word list.
    #[must_use]
    pub fn initialize(puzzle: &Puzzle, words: &[Rc<str>]) -> DomainStore {
        DomainStore {
            domains: puzzle.slot_ids().map(|_| words.to_vec()).collect(),
        }
    }

    /// Number of slots this store covers.
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.domains.len()
    }

    /// Candidates for `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is not in the store; callers only hold ids from the same puzzle.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> &[Rc<str>] {
        self.check_slot(slot);
        &self.domains[slot]
    }

    #[must_use]
    pub fn len(&self, slot: SlotId) -> usize {
        self.get(slot).len()
    }

    #[must_use]
    pub fn is_empty(&self, slot: SlotId) -> bool {
        self.get(slot).is_empty()
    }

    #[must_use]
    pub fn contains(&self, slot: SlotId, word: &str) -> bool {
        self.get(slot).iter().any(|w| &**w == word)
    }

    /// Sum of all domain sizes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.domains.iter().map(Vec::len).sum()
    }

    /// Domain size per slot, in id order.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.domains.iter().map(Vec::len).collect()
    }

    /// First slot whose domain is empty, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<SlotId> {
        self.domains.iter().position(Vec::is_empty)
    }

    /// Remove every candidate of `slot` failing `keep`; returns whether anything was removed.
    ///
    /// # Panics
    /// Panics if `slot` is not in the store.
    pub fn prune<F>(&mut self, slot: SlotId, mut keep: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        self.check_slot(slot);
        let domain = &mut self.domains[slot];
        let before = domain.len();
        domain.retain(|w| keep(&**w));
        debug_assert!(domain.len() <= before, "pruning must never grow a domain");
        domain.len() != before
    }

    /// Narrow `slot` to exactly `word` (or to nothing, if `word` was not a candidate).
    pub fn restrict(&mut self, slot: SlotId, word: &str) -> bool {
        self.prune(slot, |w| w == word)
    }

    fn check_slot(&self, slot: SlotId) {
        assert!(
            slot < self.domains.len(),
            "slot {slot} is not in the domain store ({} slots)",
            self.domains.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Rc<str>> {
        list.iter().map(|&w| Rc::from(w)).collect()
    }

    fn two_slot_puzzle() -> Puzzle {
        Puzzle::from_structure("___\n_##\n_##").unwrap()
    }

    #[test]
    fn test_initialize_seeds_every_slot() {
        let puzzle = two_slot_puzzle();
        let store = DomainStore::initialize(&puzzle, &words(&["CAT", "DOGS", "A"]));

        assert_eq!(store.num_slots(), 2);
        for slot in puzzle.slot_ids() {
            assert_eq!(store.len(slot), 3);
        }
        assert_eq!(store.total_size(), 6);
        assert_eq!(store.first_empty(), None);
    }

    #[test]
    fn test_prune_reports_removal() {
        let puzzle = two_slot_puzzle();
        let mut store = DomainStore::initialize(&puzzle, &words(&["CAT", "DOGS", "A"]));

        assert!(store.prune(0, |w| w.len() == 3));
        assert_eq!(store.get(0), &words(&["CAT"])[..]);
        // second pass removes nothing
        assert!(!store.prune(0, |w| w.len() == 3));
        // the other slot is untouched
        assert_eq!(store.len(1), 3);
    }

    #[test]
    fn test_prune_preserves_order() {
        let puzzle = two_slot_puzzle();
        let mut store = DomainStore::initialize(&puzzle, &words(&["ZZZ", "B", "AAA", "MMM"]));
        store.prune(1, |w| w.len() == 3);
        assert_eq!(store.get(1), &words(&["ZZZ", "AAA", "MMM"])[..]);
    }

    #[test]
    fn test_restrict() {
        let puzzle = two_slot_puzzle();
        let mut store = DomainStore::initialize(&puzzle, &words(&["CAT", "COT"]));

        assert!(store.restrict(0, "COT"));
        assert_eq!(store.sizes(), vec![1, 2]);
        assert!(store.contains(0, "COT"));
        assert!(!store.contains(0, "CAT"));

        assert!(store.restrict(1, "NOPE"));
        assert!(store.is_empty(1));
        assert_eq!(store.first_empty(), Some(1));
    }

    #[test]
    #[should_panic(expected = "not in the domain store")]
    fn test_prune_unknown_slot_panics() {
        let puzzle = two_slot_puzzle();
        let mut store = DomainStore::initialize(&puzzle, &words(&["CAT"]));
        store.prune(7, |_| true);
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let puzzle = two_slot_puzzle();
        let store = DomainStore::initialize(&puzzle, &words(&["CAT", "COT"]));
        let mut snapshot = store.clone();
        snapshot.restrict(0, "CAT");
        assert_eq!(store.len(0), 2);
        assert_eq!(snapshot.len(0), 1);
    }
}
