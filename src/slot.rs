//! Slot geometry: the CSP variables of a crossword grid.

use std::fmt;
use std::fmt::{Display, Formatter};

/// Dense index of a slot inside its [`crate::puzzle::Puzzle`].
pub type SlotId = usize;

/// Character offsets `(offset_in_x, offset_in_y)` at which two crossing slots must agree.
pub type Overlap = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Unit step `(d_row, d_col)` taken from one cell of a slot to the next.
    #[must_use]
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    #[must_use]
    pub fn crossing(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A maximal run of fillable cells in one direction.
///
/// Two slots are equal iff they share start row, start column, direction, and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self { row, col, direction, length }
    }

    /// Last cell of the slot, or `None` if the slot is empty or its end overflows `usize`.
    #[must_use]
    pub fn end(&self) -> Option<(usize, usize)> {
        let last = self.length.checked_sub(1)?;
        match self.direction {
            Direction::Across => Some((self.row, self.col.checked_add(last)?)),
            Direction::Down => Some((self.row.checked_add(last)?, self.col)),
        }
    }

    /// Grid coordinates covered by this slot, in word order.
    ///
    /// The slot must have an [`end`](Slot::end); every slot of a built puzzle does.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (d_row, d_col) = self.direction.step();
        (0..self.length).map(move |k| (self.row + k * d_row, self.col + k * d_col))
    }

    /// Offset of `(row, col)` within this slot, if the slot covers that cell.
    #[must_use]
    pub fn offset_of(&self, row: usize, col: usize) -> Option<usize> {
        let (along, fixed, start, line) = match self.direction {
            Direction::Across => (col, row, self.col, self.row),
            Direction::Down => (row, col, self.row, self.col),
        };
        if fixed == line && along >= start && along - start < self.length {
            Some(along - start)
        } else {
            None
        }
    }

    /// Where this slot crosses `other`, as `(offset_in_self, offset_in_other)`.
    ///
    /// Only perpendicular slots cross; parallel slots never produce an overlap here.
    #[must_use]
    pub fn crossing_with(&self, other: &Slot) -> Option<Overlap> {
        if self.direction == other.direction {
            return None;
        }
        let (row, col) = match self.direction {
            Direction::Across => (self.row, other.col),
            Direction::Down => (other.row, self.col),
        };
        Some((self.offset_of(row, col)?, other.offset_of(row, col)?))
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} : {}", self.row, self.col, self.direction, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_crossing() {
        assert_eq!(Direction::Across.crossing(), Direction::Down);
        assert_eq!(Direction::Down.crossing(), Direction::Across);
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn test_end() {
        assert_eq!(Slot::new(1, 2, Direction::Across, 3).end(), Some((1, 4)));
        assert_eq!(Slot::new(0, 4, Direction::Down, 2).end(), Some((1, 4)));
        assert_eq!(Slot::new(0, 0, Direction::Down, 1).end(), Some((0, 0)));
        assert_eq!(Slot::new(0, 0, Direction::Down, 0).end(), None);
        assert_eq!(Slot::new(usize::MAX, 0, Direction::Down, 2).end(), None);
        assert_eq!(Slot::new(0, 1, Direction::Across, usize::MAX).end(), None);
    }

    #[test]
    fn test_cells_across_and_down() {
        let across = Slot::new(1, 2, Direction::Across, 3);
        assert_eq!(across.cells().collect::<Vec<_>>(), vec![(1, 2), (1, 3), (1, 4)]);

        let down = Slot::new(0, 4, Direction::Down, 2);
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(0, 4), (1, 4)]);
    }

    #[test]
    fn test_offset_of() {
        let s = Slot::new(2, 1, Direction::Down, 4);
        assert_eq!(s.offset_of(2, 1), Some(0));
        assert_eq!(s.offset_of(5, 1), Some(3));
        assert_eq!(s.offset_of(6, 1), None);
        assert_eq!(s.offset_of(3, 2), None);
    }

    #[test]
    fn test_offset_of_huge_slot() {
        let s = Slot::new(0, 5, Direction::Across, usize::MAX);
        assert_eq!(s.offset_of(0, 7), Some(2));
        assert_eq!(s.offset_of(0, usize::MAX), Some(usize::MAX - 5));
        assert_eq!(s.offset_of(0, 4), None);

        let s = Slot::new(usize::MAX, 0, Direction::Down, 2);
        assert_eq!(s.offset_of(usize::MAX, 0), Some(0));
        assert_eq!(s.offset_of(0, 0), None);
    }

    #[test]
    fn test_crossing_with_is_symmetric() {
        let across = Slot::new(0, 0, Direction::Across, 3);
        let down = Slot::new(0, 1, Direction::Down, 3);
        assert_eq!(across.crossing_with(&down), Some((1, 0)));
        assert_eq!(down.crossing_with(&across), Some((0, 1)));
    }

    #[test]
    fn test_crossing_with_misses() {
        let across = Slot::new(0, 0, Direction::Across, 3);
        let far_down = Slot::new(1, 5, Direction::Down, 3);
        assert_eq!(across.crossing_with(&far_down), None);

        let parallel = Slot::new(0, 0, Direction::Across, 5);
        assert_eq!(across.crossing_with(&parallel), None);
    }

    #[test]
    fn test_slot_identity() {
        let a = Slot::new(0, 0, Direction::Across, 3);
        let b = Slot::new(0, 0, Direction::Across, 3);
        let c = Slot::new(0, 0, Direction::Down, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
