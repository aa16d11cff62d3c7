//! Error types for grids, clue keys, puzzle files and the word list, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! [`ParseError`] (reading grid specifications, clue keys and puzzle-file lines):
//!
//! - E001: `EmptyPuzzle` (Puzzle text has no grid line)
//! - E002: `MissingWidthHeader` (Grid specification shorter than its width header)
//! - E003: `InvalidWidth` (Width header is not a positive number)
//! - E004: `SpecificationTooShort` (Fewer cells than one row)
//! - E005: `RaggedSpecification` (Cell count not a multiple of the width)
//! - E006: `InvalidCellSymbol` (Cell symbol other than `#`, `.` or A-Z)
//! - E007: `MissingContentSeparator` (Clue line without `%`)
//! - E008: `MissingFormatSeparator` (Clue content without `:`)
//! - E009: `InvalidClueKey` (Clue key not of the form `A12` / `D3`)
//! - E010: `LineError` (Clue content rejected by the grid (wraps a [`GridError`]))
//! - E011: `NomError` (Low-level nom parser error)
//! - E012: `InvalidClueKeyOnLine` (Puzzle-file line with a malformed clue key)
//!
//! [`GridError`] (operations on a built grid):
//!
//! - G001: `CellOutOfRange`
//! - G002: `UnknownClue`
//! - G003: `SizeOutOfRange`
//! - G004: `LettersLengthMismatch`
//! - G005: `InvalidLetter`
//! - G006: `InvalidFormat`
//!
//! [`PuzzleFileError`] (loading and saving `.cwd` files): F001 `Io`, F002 `Parse`.
//!
//! [`LexiconError`] (the file-backed word list): L001 `Io`, L002 `EmptyWord`.
//!
//! # Examples
//!
//! ```
//! use cryptogrid::grid::CrosswordGrid;
//!
//! match CrosswordGrid::from_specification("0x....") {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => println!("Success"),
//! }
//! ```

use crate::format_spec::FormatProblem;
use nom::error::{ErrorKind, ParseError as NomParseError};
use std::io;
use std::path::PathBuf;

/// Errors raised while reading a grid specification, a clue key, or a puzzle file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Puzzle text is empty (no grid specification line)")]
    EmptyPuzzle,

    #[error("Grid specification \"{spec}\" is too short to hold a width header")]
    MissingWidthHeader { spec: String },

    #[error("Invalid grid width \"{header}\"")]
    InvalidWidth { header: String },

    #[error("Grid specification has {cells} cells, fewer than one row of width {width}")]
    SpecificationTooShort { width: usize, cells: usize },

    #[error("Grid specification has {cells} cells, not a whole number of rows of width {width}")]
    RaggedSpecification { width: usize, cells: usize },

    #[error("Invalid cell symbol '{symbol}' at cell {position}")]
    InvalidCellSymbol { symbol: char, position: usize },

    #[error("Line {line_number}: missing '%' between clue key and content in \"{line}\"")]
    MissingContentSeparator { line_number: usize, line: String },

    #[error("Line {line_number}: missing ':' between letters and format in \"{line}\"")]
    MissingFormatSeparator { line_number: usize, line: String },

    #[error("Invalid clue key \"{key}\"")]
    InvalidClueKey { key: String },

    #[error("Line {line_number}: {source}")]
    LineError {
        line_number: usize,
        #[source]
        source: GridError,
    },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),

    #[error("Line {line_number}: invalid clue key \"{key}\"")]
    InvalidClueKeyOnLine { line_number: usize, key: String },
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, pe.to_string())
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyPuzzle => "E001",
            ParseError::MissingWidthHeader { .. } => "E002",
            ParseError::InvalidWidth { .. } => "E003",
            ParseError::SpecificationTooShort { .. } => "E004",
            ParseError::RaggedSpecification { .. } => "E005",
            ParseError::InvalidCellSymbol { .. } => "E006",
            ParseError::MissingContentSeparator { .. } => "E007",
            ParseError::MissingFormatSeparator { .. } => "E008",
            ParseError::InvalidClueKey { .. } => "E009",
            ParseError::LineError { .. } => "E010",
            ParseError::NomError(_) => "E011",
            ParseError::InvalidClueKeyOnLine { .. } => "E012",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::EmptyPuzzle => "Puzzle text has no grid line",
            ParseError::MissingWidthHeader { .. } => "Grid specification shorter than its width header",
            ParseError::InvalidWidth { .. } => "Width header is not a positive number",
            ParseError::SpecificationTooShort { .. } => "Fewer cells than one row",
            ParseError::RaggedSpecification { .. } => "Cell count not a multiple of the width",
            ParseError::InvalidCellSymbol { .. } => "Unknown cell symbol",
            ParseError::MissingContentSeparator { .. } => "Clue line without '%'",
            ParseError::MissingFormatSeparator { .. } => "Clue content without ':'",
            ParseError::InvalidClueKey { .. } => "Malformed clue key",
            ParseError::LineError { .. } => "Clue content rejected by the grid",
            ParseError::NomError(_) => "Low-level nom parser error",
            ParseError::InvalidClueKeyOnLine { .. } => "Malformed clue key in a puzzle file",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::EmptyPuzzle => "A puzzle file must start with a grid specification line.",
            ParseError::MissingWidthHeader { .. } => "The first two characters of a grid specification are the decimal width of the grid.",
            ParseError::InvalidWidth { .. } => "The two-character width header must be a number from 1 to 99 (zero-padded, e.g. '09').",
            ParseError::SpecificationTooShort { .. } => "After the width header there must be at least one full row of cell symbols.",
            ParseError::RaggedSpecification { .. } => "The height is deduced by dividing the cell count by the width, so the count must divide exactly.",
            ParseError::InvalidCellSymbol { .. } => "Cells are '#' (black), '.' (white, letter unknown) or an upper-case letter A-Z.",
            ParseError::MissingContentSeparator { .. } => "Every line after the grid has the form <clue key>%<letters>:<format>.",
            ParseError::MissingFormatSeparator { .. } => "Clue content has the form <letters>:<format>, e.g. 'ICE.REAM:3,5'.",
            ParseError::InvalidClueKey { .. } => "A clue key is a direction tag (A or D) followed by the clue number, e.g. 'A12'.",
            ParseError::LineError { .. } => "The line was well-formed but the grid rejected its content (see the wrapped G-code).",
            ParseError::NomError(_) => "An internal parser combinator failed. The wrapped kind says which.",
            ParseError::InvalidClueKeyOnLine { .. } => "Each content line must start with a clue key (A or D followed by the clue number) before the '%'.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::MissingWidthHeader { .. } | ParseError::InvalidWidth { .. } => Some("Example: '05' followed by 25 cell symbols describes a 5x5 grid"),
            ParseError::RaggedSpecification { .. } => Some("Check that no row has been truncated or padded"),
            ParseError::InvalidCellSymbol { .. } => Some("Use '#' for black cells, '.' for empty white cells and A-Z for letters"),
            ParseError::MissingContentSeparator { .. } => Some("Example line: 'A1%ICE.REAM:3,5'"),
            ParseError::MissingFormatSeparator { .. } => Some("Example content: 'ICE.REAM:3,5' (use the clue length alone for a single word)"),
            ParseError::InvalidClueKey { .. } | ParseError::InvalidClueKeyOnLine { .. } => Some("Clue keys look like 'A1' or 'D14'"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            ParseError::LineError { source, .. } => {
                format!("{} ({})\n  caused by: {}", self, self.code(), source.display_detailed())
            }
            _ => format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Errors raised by operations on an already-built grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfRange { x: usize, y: usize, width: usize, height: usize },

    #[error("No clue {key} in this grid")]
    UnknownClue { key: String },

    #[error("Grid size {width}x{height} is out of range")]
    SizeOutOfRange { width: usize, height: usize },

    #[error("Clue {key} has {expected} letters but {found} were given")]
    LettersLengthMismatch { key: String, expected: usize, found: usize },

    #[error("Clue {key}: '{letter}' is not a grid letter")]
    InvalidLetter { key: String, letter: char },

    #[error("Clue {key}: invalid format \"{format}\": {problem}")]
    InvalidFormat {
        key: String,
        format: String,
        #[source]
        problem: FormatProblem,
    },
}

impl GridError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::CellOutOfRange { .. } => "G001",
            GridError::UnknownClue { .. } => "G002",
            GridError::SizeOutOfRange { .. } => "G003",
            GridError::LettersLengthMismatch { .. } => "G004",
            GridError::InvalidLetter { .. } => "G005",
            GridError::InvalidFormat { .. } => "G006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GridError::CellOutOfRange { .. } => "Cell coordinates outside the grid",
            GridError::UnknownClue { .. } => "Clue key not present in the grid",
            GridError::SizeOutOfRange { .. } => "Requested grid size not supported",
            GridError::LettersLengthMismatch { .. } => "Letters do not fit the clue length",
            GridError::InvalidLetter { .. } => "Character is not a grid letter",
            GridError::InvalidFormat { .. } => "Format does not fit the clue",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GridError::CellOutOfRange { .. } => "Coordinates are zero-based (x across, y down) and must be smaller than the grid width and height.",
            GridError::UnknownClue { .. } => "Clue keys are re-derived whenever the grid's cells change; a key from an older layout may no longer exist.",
            GridError::SizeOutOfRange { .. } => "New grids must be between 4 and 26 cells on each side.",
            GridError::LettersLengthMismatch { .. } => "Clue letters are stored one per cell, with '.' for unknown cells.",
            GridError::InvalidLetter { .. } => "Clue letters are upper-case A-Z or '.' for an unknown cell.",
            GridError::InvalidFormat { .. } => "A clue format is a list of positive lengths joined by ',' or '-' that adds up to the clue length.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::UnknownClue { .. } => Some("List the clues of the puzzle to see the current keys"),
            GridError::SizeOutOfRange { .. } => Some("Choose a width and height from 4 to 26"),
            GridError::LettersLengthMismatch { .. } => Some("Pad unknown letters with '.'"),
            GridError::InvalidFormat { .. } => Some("Example: '5,3-2' for a 10-letter clue"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Errors raised while loading or saving a puzzle file.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleFileError {
    #[error("Cannot access puzzle file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] Box<ParseError>),
}

impl PuzzleFileError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleFileError::Io { .. } => "F001",
            PuzzleFileError::Parse(_) => "F002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PuzzleFileError::Io { .. } => "Puzzle file could not be read or written",
            PuzzleFileError::Parse(_) => "Puzzle file contents are malformed",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PuzzleFileError::Io { .. } => "The operating system refused to open, read, write or rename the file.",
            PuzzleFileError::Parse(_) => "The file was read but its text is not a valid puzzle (see the wrapped E-code).",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleFileError::Io { .. } => Some("Check the path and that the Crosswords folder exists"),
            PuzzleFileError::Parse(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            PuzzleFileError::Parse(inner) => {
                format!("Malformed puzzle file ({})\n  caused by: {}", self.code(), inner.display_detailed())
            }
            PuzzleFileError::Io { .. } => format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Errors raised by the file-backed word list.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Cannot access word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot add a blank word to the word list")]
    EmptyWord,
}

impl LexiconError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LexiconError::Io { .. } => "L001",
            LexiconError::EmptyWord => "L002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            LexiconError::Io { .. } => "Word list could not be read or replaced",
            LexiconError::EmptyWord => "Blank word offered for insertion",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            LexiconError::Io { .. } => "Insertion writes a temporary file beside the list and renames it over the original; either step can fail. The original list is left intact.",
            LexiconError::EmptyWord => "Words must contain at least one non-blank character.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            LexiconError::Io { .. } => Some("Use --word-list or CRYPTOGRID_DATA to point at a readable Lists/wordlist.txt"),
            LexiconError::EmptyWord => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parse_errors() -> Vec<ParseError> {
        vec![
            ParseError::EmptyPuzzle,
            ParseError::MissingWidthHeader { spec: "5".to_string() },
            ParseError::InvalidWidth { header: "x5".to_string() },
            ParseError::SpecificationTooShort { width: 5, cells: 3 },
            ParseError::RaggedSpecification { width: 5, cells: 12 },
            ParseError::InvalidCellSymbol { symbol: '?', position: 4 },
            ParseError::MissingContentSeparator { line_number: 2, line: "A1".to_string() },
            ParseError::MissingFormatSeparator { line_number: 2, line: "A1%ABC".to_string() },
            ParseError::InvalidClueKey { key: "X1".to_string() },
            ParseError::LineError {
                line_number: 3,
                source: GridError::UnknownClue { key: "A9".to_string() },
            },
            ParseError::NomError(ErrorKind::Digit),
            ParseError::InvalidClueKeyOnLine { line_number: 3, key: "X1".to_string() },
        ]
    }

    fn sample_grid_errors() -> Vec<GridError> {
        vec![
            GridError::CellOutOfRange { x: 9, y: 0, width: 5, height: 5 },
            GridError::UnknownClue { key: "A9".to_string() },
            GridError::SizeOutOfRange { width: 2, height: 40 },
            GridError::LettersLengthMismatch { key: "A1".to_string(), expected: 5, found: 4 },
            GridError::InvalidLetter { key: "A1".to_string(), letter: '3' },
            GridError::InvalidFormat {
                key: "A1".to_string(),
                format: "5,0".to_string(),
                problem: FormatProblem::ZeroSegment,
            },
        ]
    }

    fn sample_file_errors() -> Vec<PuzzleFileError> {
        vec![
            PuzzleFileError::Io {
                path: PathBuf::from("missing.cwd"),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            },
            PuzzleFileError::Parse(Box::new(ParseError::EmptyPuzzle)),
        ]
    }

    fn sample_lexicon_errors() -> Vec<LexiconError> {
        vec![
            LexiconError::Io {
                path: PathBuf::from("wordlist.txt"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            LexiconError::EmptyWord,
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::InvalidClueKey { key: "Q7".to_string() };
        assert_eq!(err.code(), "E009");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E009"));
        assert!(detailed.contains("A1"));
    }

    /// Test that all error variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in sample_parse_errors() {
            assert!(err.code().starts_with('E'));
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
        for err in sample_grid_errors() {
            assert!(err.code().starts_with('G'));
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
        for err in sample_file_errors() {
            assert!(err.code().starts_with('F'));
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
        for err in sample_lexicon_errors() {
            assert!(err.code().starts_with('L'));
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
        assert_eq!(codes.len(), 22);
    }

    /// Test that all error codes follow the format X0NN
    #[test]
    fn test_error_code_format() {
        let codes = sample_parse_errors()
            .iter()
            .map(ParseError::code)
            .chain(sample_grid_errors().iter().map(GridError::code))
            .chain(sample_file_errors().iter().map(PuzzleFileError::code))
            .chain(sample_lexicon_errors().iter().map(LexiconError::code))
            .collect::<Vec<_>>();

        for code in codes {
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_is_not_the_message() {
        for err in sample_parse_errors() {
            if let Some(help) = err.help() {
                assert!(help.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help, err.to_string());
            }
        }
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let err = GridError::SizeOutOfRange { width: 2, height: 40 };
        let detailed = err.display_detailed();
        assert!(detailed.contains(err.code()));
        assert!(detailed.contains(&err.to_string()));
        assert!(detailed.contains("4 to 26"));
    }

    /// Test error chain construction for `LineError`
    #[test]
    fn test_line_error_chain() {
        let err = ParseError::LineError {
            line_number: 7,
            source: GridError::LettersLengthMismatch { key: "D2".to_string(), expected: 5, found: 3 },
        };
        let detailed = err.display_detailed();
        assert!(detailed.contains("Line 7"));
        assert!(detailed.contains("E010"));
        assert!(detailed.contains("G004"));
    }

    #[test]
    fn test_format_problem_is_source() {
        let err = GridError::InvalidFormat {
            key: "A1".to_string(),
            format: "5,0".to_string(),
            problem: FormatProblem::ZeroSegment,
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("a format segment has zero length"));
    }

    #[test]
    fn test_puzzle_file_parse_wraps_detail() {
        let err = PuzzleFileError::from(Box::new(ParseError::InvalidClueKey { key: "Q7".to_string() }));
        assert_eq!(err.code(), "F002");
        assert_eq!(err.to_string(), "Invalid clue key \"Q7\"");
        let detailed = err.display_detailed();
        assert!(detailed.contains("F002"));
        assert!(detailed.contains("E009"));
    }

    #[test]
    fn test_io_errors_name_the_path() {
        for err in sample_file_errors().into_iter().take(1) {
            assert!(err.to_string().contains("missing.cwd"));
        }
        let err = &sample_lexicon_errors()[0];
        assert!(err.to_string().contains("wordlist.txt"));
        assert!(err.display_detailed().contains("L001"));
    }
}
