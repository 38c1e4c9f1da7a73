//! Generate error code documentation from the source of truth (the error enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` implementation via its
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use gridfill::errors::ParseError;
use gridfill::slot::{Direction, Slot};

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            writeln!($out, "### {}: {}\n", error.code(), error.description())?;
            writeln!($out, "**Details:** {}\n", error.details())?;

            if let Some(help_text) = error.help() {
                writeln!($out, "**How to fix:**")?;
                writeln!($out, "```")?;
                writeln!($out, "{}", help_text)?;
                writeln!($out, "```\n")?;
            }

            writeln!($out, "**Example error message:**")?;
            writeln!($out, "```")?;
            writeln!($out, "{}", error)?;
            writeln!($out, "```\n")?;

            writeln!($out, "**Detailed format:**")?;
            writeln!($out, "```")?;
            writeln!($out, "{}", error.display_detailed())?;
            writeln!($out, "```\n")?;

            writeln!($out, "---\n")?;
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::EmptyStructure,
        ParseError::SlotOutOfBounds {
            slot: Slot::new(2, 3, Direction::Across, 4),
            height: 5,
            width: 5,
        },
        ParseError::ZeroLengthSlot { row: 1, col: 1 },
        ParseError::CollinearSlots {
            first: Slot::new(0, 0, Direction::Across, 4),
            second: Slot::new(0, 3, Direction::Across, 2),
            row: 0,
            col: 3,
        },
        ParseError::GridTooLarge { height: usize::MAX, width: 2 },
    ]
}

fn render_docs() -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let variants = all_parse_error_variants();

    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Table of Contents\n")?;
    writeln!(
        out,
        "- [Puzzle Errors (E001–E{:03})](#puzzle-errors)",
        variants.len()
    )?;
    writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n")?;

    writeln!(out, "## Puzzle Errors\n")?;
    writeln!(out, "Errors that occur when building a puzzle from a structure file or explicit slots.")?;
    writeln!(out, "An unsatisfiable puzzle is not an error: the solver prints \"No solution.\" instead.\n")?;
    generate_error_docs!(out, variants);

    writeln!(out, "\n## How to Use Error Codes\n")?;
    writeln!(out, "When you see an error like:\n")?;
    writeln!(out, "```")?;
    writeln!(out, "Error: {}", ParseError::EmptyStructure.display_detailed())?;
    writeln!(out, "```\n")?;
    writeln!(out, "1. Note the error code (e.g., `E001`)")?;
    writeln!(out, "2. Look it up in this document for detailed explanation")?;
    writeln!(out, "3. Follow the suggested resolution steps\n")?;

    writeln!(out, "## Error Display Formats\n")?;
    writeln!(out, "Errors are displayed in two formats:\n")?;
    writeln!(out, "### Simple Format")?;
    writeln!(out, "```")?;
    writeln!(out, "Error: <message>")?;
    writeln!(out, "```\n")?;
    writeln!(out, "### Detailed Format (via `display_detailed()`)")?;
    writeln!(out, "```")?;
    writeln!(out, "<message> (<code>)")?;
    writeln!(out, "<help text if available>")?;
    writeln!(out, "```")?;

    Ok(out)
}

fn main() -> Result<(), std::fmt::Error> {
    print!("{}", render_docs()?);
    Ok(())
}
