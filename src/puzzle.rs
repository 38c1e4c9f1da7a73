//! `puzzle`: the immutable Puzzle Model consumed by the solver.
//!
//! A [`Puzzle`] describes grid geometry only: which cells are fillable, which slots exist, and
//! where crossing slots overlap. It can be built two ways:
//! - [`Puzzle::from_structure`] scans a text grid (`_` = open cell, anything else = block) for
//!   maximal ACROSS and DOWN runs of length ≥ 2;
//! - [`Puzzle::from_slots`] takes explicit slot geometry and validates it.
//!
//! Either way, slots are sorted by `(row, col, direction, length)` and addressed by a dense
//! [`SlotId`]. Overlaps are computed from shared cells and stored in both orientations, and the
//! neighbor relation is derived from the overlap map alone, so every neighbor pair has an overlap.

use std::fmt;
use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

use crate::errors::ParseError;
use crate::slot::{Direction, Overlap, Slot, SlotId};

/// Character that marks an open cell in a structure file.
pub const OPEN_CELL: char = '_';
/// Character used for blocked cells when a structure is written back out.
pub const BLOCKED_CELL: char = '#';
/// Shortest run of open cells that counts as a slot in a structure file.
const MIN_STRUCTURE_SLOT_LENGTH: usize = 2;

#[derive(Debug, Clone)]
pub struct Puzzle {
    height: usize,
    width: usize,
    /// Row-major fillable flags, `height * width` long.
    cells: Vec<bool>,
    slots: Vec<Slot>,
    ids: FxHashMap<Slot, SlotId>,
    overlaps: FxHashMap<(SlotId, SlotId), Overlap>,
    /// Adjacency derived from `overlaps`, sorted by id.
    neighbors: Vec<Vec<SlotId>>,
}

impl Puzzle {
    /// Parse a structure string into a puzzle.
    ///
    /// Leading and trailing blank lines are ignored; short rows are padded with blocks up to the
    /// longest row.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyStructure`] if no rows remain.
    pub fn from_structure(contents: &str) -> Result<Puzzle, Box<ParseError>> {
        let lines: Vec<&str> = contents.lines().map(|l| l.trim_end_matches('\r')).collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(Box::new(ParseError::EmptyStructure));
        };
        let rows = &lines[first..=last];

        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut cells = vec![false; height * width];
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                cells[row * width + col] = c == OPEN_CELL;
            }
        }

        let slots = scan_slots(&cells, height, width);
        Ok(Self::build(height, width, cells, slots))
    }

    /// Build a puzzle from explicit slot geometry.
    ///
    /// Fillable cells are exactly the union of the slots' cells.
    ///
    /// # Errors
    ///
    /// - [`ParseError::GridTooLarge`] if `height * width` cells cannot be addressed;
    /// - [`ParseError::ZeroLengthSlot`] if a slot has length 0;
    /// - [`ParseError::SlotOutOfBounds`] if a slot leaves the `height` x `width` grid;
    /// - [`ParseError::CollinearSlots`] if two same-direction slots share a cell.
    pub fn from_slots(
        height: usize,
        width: usize,
        slots: Vec<Slot>,
    ) -> Result<Puzzle, Box<ParseError>> {
        let area = height
            .checked_mul(width)
            .filter(|&area| isize::try_from(area).is_ok())
            .ok_or_else(|| Box::new(ParseError::GridTooLarge { height, width }))?;

        // every slot has a checked end before any cell is visited
        for slot in &slots {
            if slot.length == 0 {
                return Err(Box::new(ParseError::ZeroLengthSlot { row: slot.row, col: slot.col }));
            }
            match slot.end() {
                Some((last_row, last_col)) if last_row < height && last_col < width => {}
                _ => {
                    let slot = slot.clone();
                    return Err(Box::new(ParseError::SlotOutOfBounds { slot, height, width }));
                }
            }
        }

        let mut cells = vec![false; area];
        let mut owner: FxHashMap<(Direction, usize, usize), usize> = FxHashMap::default();
        for (index, slot) in slots.iter().enumerate() {
            for (row, col) in slot.cells() {
                if let Some(previous) = owner.insert((slot.direction, row, col), index) {
                    return Err(Box::new(ParseError::CollinearSlots {
                        first: slots[previous].clone(),
                        second: slot.clone(),
                        row,
                        col,
                    }));
                }
                cells[row * width + col] = true;
            }
        }

        Ok(Self::build(height, width, cells, slots))
    }

    /// Native-only convenience method: read a structure file and parse it.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the file cannot be read or its contents do not parse.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Puzzle> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read structure from '{}': {}", path_ref.display(), e),
            )
        })?;
        Ok(Self::from_structure(&data)?)
    }

    fn build(height: usize, width: usize, cells: Vec<bool>, mut slots: Vec<Slot>) -> Puzzle {
        slots.sort();

        let ids: FxHashMap<Slot, SlotId> =
            slots.iter().cloned().enumerate().map(|(id, s)| (s, id)).collect();

        // which slot covers each (direction, cell)
        let mut lookup: FxHashMap<(Direction, usize, usize), SlotId> = FxHashMap::default();
        for (id, slot) in slots.iter().enumerate() {
            for (row, col) in slot.cells() {
                lookup.insert((slot.direction, row, col), id);
            }
        }

        let mut overlaps = FxHashMap::default();
        for (id, slot) in slots.iter().enumerate() {
            for (row, col) in slot.cells() {
                let Some(&other) = lookup.get(&(slot.direction.crossing(), row, col)) else {
                    continue;
                };
                if let Some(overlap) = slot.crossing_with(&slots[other]) {
                    overlaps.insert((id, other), overlap);
                }
            }
        }

        let mut neighbors = vec![Vec::new(); slots.len()];
        for &(x, y) in overlaps.keys() {
            neighbors[x].push(y);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Puzzle { height, width, cells, slots, ids, overlaps, neighbors }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The slot with the given id.
    ///
    /// # Panics
    /// Panics if `id` is not a slot of this puzzle.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id]
    }

    #[must_use]
    pub fn slot_id(&self, slot: &Slot) -> Option<SlotId> {
        self.ids.get(slot).copied()
    }

    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> {
        0..self.slots.len()
    }

    /// `(offset_in_x, offset_in_y)` if `x` and `y` cross, `None` otherwise.
    #[must_use]
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Slots crossing `x`, in id order.
    ///
    /// # Panics
    /// Panics if `x` is not a slot of this puzzle.
    #[must_use]
    pub fn neighbors(&self, x: SlotId) -> &[SlotId] {
        &self.neighbors[x]
    }

    #[must_use]
    pub fn degree(&self, x: SlotId) -> usize {
        self.neighbors[x].len()
    }

    /// Every ordered pair `(x, y)` with an overlap, both directions, sorted.
    #[must_use]
    pub fn arcs(&self) -> Vec<(SlotId, SlotId)> {
        let mut arcs: Vec<_> = self.overlaps.keys().copied().collect();
        arcs.sort_unstable();
        arcs
    }

    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }
}

/// Find every maximal run of open cells of length ≥ 2, across then down.
fn scan_slots(cells: &[bool], height: usize, width: usize) -> Vec<Slot> {
    let mut result = vec![];

    for row in 0..height {
        let mut start: Option<usize> = None;
        for col in 0..=width {
            let open = col < width && cells[row * width + col];
            match (open, start) {
                (true, None) => start = Some(col),
                (false, Some(start_col)) => {
                    if col - start_col >= MIN_STRUCTURE_SLOT_LENGTH {
                        result.push(Slot::new(row, start_col, Direction::Across, col - start_col));
                    }
                    start = None;
                }
                _ => {}
            }
        }
    }

    for col in 0..width {
        let mut start: Option<usize> = None;
        for row in 0..=height {
            let open = row < height && cells[row * width + col];
            match (open, start) {
                (true, None) => start = Some(row),
                (false, Some(start_row)) => {
                    if row - start_row >= MIN_STRUCTURE_SLOT_LENGTH {
                        result.push(Slot::new(start_row, col, Direction::Down, row - start_row));
                    }
                    start = None;
                }
                _ => {}
            }
        }
    }

    result
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.is_fillable(row, col) { OPEN_CELL } else { BLOCKED_CELL };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
