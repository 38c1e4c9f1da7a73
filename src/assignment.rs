use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::puzzle::Puzzle;
use crate::slot::SlotId;

/// `Assignment` maps each slot to the word placed in it, if any.
///
/// Uses `Rc<str>` for values so placing a word from a domain never copies the string.
/// Uses a dense `Vec` indexed by [`SlotId`] instead of a map since ids are `0..num_slots`.
/// The search mutates one `Assignment` in place and undoes each insertion on backtrack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<Rc<str>>>,
    /// Count of `Some` entries in `words`.
    assigned: usize,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}→{v}")).collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl Assignment {
    /// An empty assignment over `num_slots` slots.
    #[must_use]
    pub fn new(num_slots: usize) -> Assignment {
        Assignment { words: vec![None; num_slots], assigned: 0 }
    }

    /// Place `word` in `slot`, returning whatever was there before.
    ///
    /// # Panics
    /// Panics if `slot` is out of range.
    pub fn insert(&mut self, slot: SlotId, word: Rc<str>) -> Option<Rc<str>> {
        let previous = self.words[slot].replace(word);
        if previous.is_none() {
            self.assigned += 1;
        }
        previous
    }

    /// Clear `slot`, returning the word that was there.
    pub fn remove(&mut self, slot: SlotId) -> Option<Rc<str>> {
        let previous = self.words.get_mut(slot).and_then(Option::take);
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&str> {
        self.words.get(slot).and_then(|w| w.as_deref())
    }

    #[must_use]
    pub fn is_assigned(&self, slot: SlotId) -> bool {
        self.get(slot).is_some()
    }

    /// Number of slots that hold a word.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Number of slots this assignment covers, assigned or not.
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.words.len()
    }

    /// Every slot holds a word.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.words.len()
    }

    /// Assigned `(slot, word)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &str)> {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(slot, word)| word.as_deref().map(|w| (slot, w)))
    }

    /// Full validity check of the assigned part against `puzzle`:
    /// - assigned words are pairwise distinct;
    /// - each word's length equals its slot's length;
    /// - every pair of assigned crossing slots agrees on the shared cell.
    ///
    /// Unassigned slots are ignored, so a consistent partial assignment may still be
    /// impossible to complete.
    #[must_use]
    pub fn is_consistent(&self, puzzle: &Puzzle) -> bool {
        debug_assert_eq!(self.num_slots(), puzzle.len(), "assignment built for another puzzle");

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (slot, word) in self.iter() {
            if !seen.insert(word) || word.len() != puzzle.slot(slot).length {
                return false;
            }
        }

        self.iter().all(|(x, word)| {
            puzzle.neighbors(x).iter().all(|&y| {
                let (Some(other), Some((i, j))) = (self.get(y), puzzle.overlap(x, y)) else {
                    return true;
                };
                word.as_bytes().get(i) == other.as_bytes().get(j)
            })
        })
    }
}
