//! Error types for building a puzzle model, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E005) for documentation lookup:
//!
//! - E001: `EmptyStructure` (Structure contains no rows)
//! - E002: `SlotOutOfBounds` (Slot extends past the grid edge)
//! - E003: `ZeroLengthSlot` (Slot declared with length 0)
//! - E004: `CollinearSlots` (Two same-direction slots share a cell)
//! - E005: `GridTooLarge` (Grid dimensions overflow the address space)
//!
//! An unsatisfiable puzzle is *not* an error: the solver reports it as "no solution".
//!
//! # Examples
//!
//! ```
//! use gridfill::errors::ParseError;
//! use gridfill::puzzle::Puzzle;
//!
//! match Puzzle::from_structure("") {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::io;

use crate::slot::Slot;

/// Custom error type for puzzle construction
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Structure contains no rows")]
    EmptyStructure,

    #[error("Slot {slot} does not fit in a {height}x{width} grid")]
    SlotOutOfBounds { slot: Slot, height: usize, width: usize },

    #[error("Slot at ({row}, {col}) has length 0")]
    ZeroLengthSlot { row: usize, col: usize },

    #[error("Slots {first} and {second} run the same direction and share cell ({row}, {col})")]
    CollinearSlots { first: Slot, second: Slot, row: usize, col: usize },

    #[error("A {height}x{width} grid is too large")]
    GridTooLarge { height: usize, width: usize },
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, pe)
    }
}

impl From<Box<ParseError>> for io::Error {
    fn from(pe: Box<ParseError>) -> Self {
        io::Error::from(*pe)
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "E001",
            ParseError::SlotOutOfBounds { .. } => "E002",
            ParseError::ZeroLengthSlot { .. } => "E003",
            ParseError::CollinearSlots { .. } => "E004",
            ParseError::GridTooLarge { .. } => "E005",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "Structure contains no rows",
            ParseError::SlotOutOfBounds { .. } => "Slot extends past the grid edge",
            ParseError::ZeroLengthSlot { .. } => "Slot declared with length 0",
            ParseError::CollinearSlots { .. } => "Two same-direction slots share a cell",
            ParseError::GridTooLarge { .. } => "Grid dimensions overflow the address space",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::EmptyStructure => "The grid structure was empty or contained only whitespace, so there is no grid to fill.",
            ParseError::SlotOutOfBounds { .. } => "An explicitly declared slot starts or ends outside the grid dimensions it was declared with.",
            ParseError::ZeroLengthSlot { .. } => "Every slot must cover at least one cell; a zero-length slot cannot hold a word.",
            ParseError::CollinearSlots { .. } => "Two ACROSS slots (or two DOWN slots) cover the same cell. Slots must be maximal runs, so parallel slots may never overlap.",
            ParseError::GridTooLarge { .. } => "The declared height times width does not fit in memory addresses, so the grid cannot be allocated.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyStructure => Some("Use one line per row with '_' for open cells, e.g. '___' over '#_#'"),
            ParseError::SlotOutOfBounds { .. } => Some("Check the slot's start cell and length against the grid height and width"),
            ParseError::ZeroLengthSlot { .. } => Some("Give the slot a positive length or remove it"),
            ParseError::CollinearSlots { .. } => Some("Merge the two slots into one maximal run, or move one of them"),
            ParseError::GridTooLarge { .. } => Some("Declare the grid with the height and width it actually uses"),
        }
    }

    /// The `ParseError` carried inside an `io::Error` built by the `From` conversion above.
    #[must_use]
    pub fn from_io(err: &io::Error) -> Option<&ParseError> {
        err.get_ref()?.downcast_ref::<ParseError>()
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Direction;

    fn all_variants() -> Vec<ParseError> {
        let slot = Slot::new(0, 0, Direction::Across, 4);
        vec![
            ParseError::EmptyStructure,
            ParseError::SlotOutOfBounds { slot: slot.clone(), height: 3, width: 3 },
            ParseError::ZeroLengthSlot { row: 1, col: 2 },
            ParseError::CollinearSlots {
                first: slot,
                second: Slot::new(0, 2, Direction::Across, 2),
                row: 0,
                col: 2,
            },
            ParseError::GridTooLarge { height: usize::MAX, width: 2 },
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::EmptyStructure;
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("'_'"));
    }

    /// Test that all `ParseError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in all_variants() {
            let code = err.code();
            assert!(code.starts_with('E'), "Error code '{}' should start with 'E'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 5);
    }

    /// Test that all error codes follow the format E0XX
    #[test]
    fn test_error_code_format() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"));
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_adds_information() {
        for err in all_variants() {
            let help_text = err.help().expect("every variant carries help");
            assert!(help_text.len() > 10, "Help text for {:?} should be substantial", err);
            assert_ne!(help_text, err.to_string());
            assert!(!err.details().is_empty());
            assert!(!err.description().is_empty());
        }
    }

    #[test]
    fn test_messages_include_geometry() {
        let err = ParseError::SlotOutOfBounds {
            slot: Slot::new(2, 1, Direction::Down, 5),
            height: 4,
            width: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("(2, 1) down : 5"), "got {msg}");
        assert!(msg.contains("4x4"));
    }

    #[test]
    fn test_into_io_error() {
        let io_err: io::Error = Box::new(ParseError::EmptyStructure).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        assert!(io_err.to_string().contains("no rows"));

        let inner = ParseError::from_io(&io_err).expect("conversion keeps the parse error");
        assert_eq!(inner.code(), "E001");

        let plain = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(ParseError::from_io(&plain).is_none());
    }
}
