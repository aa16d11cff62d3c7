//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError`, `GridError`, `PuzzleFileError` and `LexiconError`
//! implementations via their `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use cryptogrid::errors::{GridError, LexiconError, ParseError, PuzzleFileError};
use cryptogrid::format_spec::FormatProblem;
use std::io;
use std::path::PathBuf;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            let code = error.code();
            let description = error.description();
            let details = error.details();
            let help = error.help();

            println!("### {}: {}\n", code, description);
            println!("**Details:** {}\n", details);

            if let Some(help_text) = help {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::EmptyPuzzle,
        ParseError::MissingWidthHeader { spec: "5".to_string() },
        ParseError::InvalidWidth { header: "x5".to_string() },
        ParseError::SpecificationTooShort { width: 5, cells: 3 },
        ParseError::RaggedSpecification { width: 5, cells: 23 },
        ParseError::InvalidCellSymbol { symbol: '?', position: 7 },
        ParseError::MissingContentSeparator { line_number: 2, line: "A1SPOT:4".to_string() },
        ParseError::MissingFormatSeparator { line_number: 3, line: "D2%OVERT".to_string() },
        ParseError::InvalidClueKey { key: "X1".to_string() },
        ParseError::LineError {
            line_number: 4,
            source: GridError::UnknownClue { key: "A9".to_string() },
        },
        // NomError--use a common error kind
        ParseError::NomError(nom::error::ErrorKind::Char),
        ParseError::InvalidClueKeyOnLine { line_number: 3, key: "X1".to_string() },
    ]
}

/// Helper to create all `GridError` variants for documentation
fn all_grid_error_variants() -> Vec<GridError> {
    vec![
        GridError::CellOutOfRange { x: 9, y: 2, width: 5, height: 5 },
        GridError::UnknownClue { key: "D14".to_string() },
        GridError::SizeOutOfRange { width: 3, height: 30 },
        GridError::LettersLengthMismatch { key: "A1".to_string(), expected: 5, found: 4 },
        GridError::InvalidLetter { key: "A1".to_string(), letter: '3' },
        GridError::InvalidFormat {
            key: "A1".to_string(),
            format: "5,0".to_string(),
            problem: FormatProblem::ZeroSegment,
        },
    ]
}

/// Helper to create all `PuzzleFileError` variants for documentation
fn all_puzzle_file_error_variants() -> Vec<PuzzleFileError> {
    vec![
        PuzzleFileError::Io {
            path: PathBuf::from("Crosswords/sunday.cwd"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        PuzzleFileError::Parse(Box::new(ParseError::InvalidWidth { header: "x5".to_string() })),
    ]
}

/// Helper to create all `LexiconError` variants for documentation
fn all_lexicon_error_variants() -> Vec<LexiconError> {
    vec![
        LexiconError::Io {
            path: PathBuf::from("Lists/wordlist.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        LexiconError::EmptyWord,
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Parse Errors (E001–E012)](#parse-errors)");
    println!("- [Grid Errors (G001–G006)](#grid-errors)");
    println!("- [Puzzle File Errors (F001–F002)](#puzzle-file-errors)");
    println!("- [Word List Errors (L001–L002)](#word-list-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    println!("## Parse Errors\n");
    println!("Errors that occur when reading grid specifications, clue keys or puzzle-file lines.\n");
    generate_error_docs!(all_parse_error_variants());

    println!("## Grid Errors\n");
    println!("Errors from operations on a grid: cell edits, clue lookups and clue content.\n");
    generate_error_docs!(all_grid_error_variants());

    println!("## Puzzle File Errors\n");
    println!("Errors from loading and saving `.cwd` files. Parse failures wrap an E-code.\n");
    generate_error_docs!(all_puzzle_file_error_variants());

    println!("## Word List Errors\n");
    println!("Errors from reading or updating the word list file.\n");
    generate_error_docs!(all_lexicon_error_variants());

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: Invalid grid width \"x5\" (E003)");
    println!("Example: '05' followed by 25 cell symbols describes a 5x5 grid");
    println!("```\n");
    println!("1. Note the error code (e.g., `E003`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("Errors are displayed in two formats:\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}
