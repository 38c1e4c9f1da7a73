//! Project an [`Assignment`] onto the grid for printing.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::assignment::Assignment;
use crate::puzzle::Puzzle;

/// Printed in place of a blocked cell.
pub const BLOCK_GLYPH: char = '█';

/// Letter in each cell, row-major. `None` for blocked cells and for open cells no assigned
/// word covers.
#[must_use]
pub fn letter_grid(puzzle: &Puzzle, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; puzzle.width()]; puzzle.height()];
    for (slot, word) in assignment.iter() {
        for (k, (row, col)) in puzzle.slot(slot).cells().enumerate() {
            if let Some(&b) = word.as_bytes().get(k) {
                letters[row][col] = Some(char::from(b));
            }
        }
    }
    letters
}

/// A puzzle with its letters filled in.
///
/// Displays one line per row: each fillable cell shows its letter (a space if nothing covers it)
/// and each blocked cell shows [`BLOCK_GLYPH`].
pub struct FilledGrid<'a> {
    puzzle: &'a Puzzle,
    letters: Vec<Vec<Option<char>>>,
}

impl<'a> FilledGrid<'a> {
    #[must_use]
    pub fn new(puzzle: &'a Puzzle, assignment: &Assignment) -> Self {
        FilledGrid { puzzle, letters: letter_grid(puzzle, assignment) }
    }

    #[must_use]
    pub fn letters(&self) -> &[Vec<Option<char>>] {
        &self.letters
    }
}

impl Display for FilledGrid<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.letters.iter().enumerate() {
            for (col, letter) in cells.iter().enumerate() {
                let c = match letter {
                    Some(c) => *c,
                    None if self.puzzle.is_fillable(row, col) => ' ',
                    None => BLOCK_GLYPH,
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
