//! `puzzle_file`: reading and writing `.cwd` puzzle files.
//!
//! The format is line-oriented text:
//! - line 1 is the grid specification (see [`CrosswordGrid::from_specification`]);
//! - every further line is `<clue key>%<letters>:<format>`, one per clue whose content
//!   differs from the default (all letters unknown, single-word format).
//!
//! Parsing and rendering work on strings and are available everywhere, including WASM.
//! The path-based helpers are native-only.

use crate::clue::{ClueContent, ClueKey, PResult};
use crate::errors::ParseError;
use crate::grid::CrosswordGrid;
use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::rest,
    sequence::separated_pair,
    Parser,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::errors::PuzzleFileError;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Extension of saved puzzle files.
pub const PUZZLE_EXTENSION: &str = "cwd";

fn clue_line(input: &str) -> PResult<'_, (&str, &str)> {
    separated_pair(take_till(|c| c == '%'), char('%'), rest).parse(input)
}

/// Parse puzzle text into a grid with its saved clue content restored.
///
/// Blank lines after the grid line are ignored. An empty format on a content line stands
/// for the clue's default single-word format.
pub fn parse_puzzle(text: &str) -> Result<CrosswordGrid, Box<ParseError>> {
    let mut lines = text.lines();
    let spec = lines
        .next()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| Box::new(ParseError::EmptyPuzzle))?;

    let mut grid = CrosswordGrid::from_specification(spec)?;

    for (offset, raw_line) in lines.enumerate() {
        let line_number = offset + 2;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (_, (key_text, content_text)) = clue_line(line).map_err(|_| {
            Box::new(ParseError::MissingContentSeparator { line_number, line: line.to_string() })
        })?;

        let key = key_text.trim().parse::<ClueKey>().map_err(|_| {
            Box::new(ParseError::InvalidClueKeyOnLine { line_number, key: key_text.trim().to_string() })
        })?;
        let content = ClueContent::from_specification(content_text).ok_or_else(|| {
            Box::new(ParseError::MissingFormatSeparator { line_number, line: line.to_string() })
        })?;

        grid.clue_mut(key)
            .and_then(|clue| clue.set_content(content))
            .map_err(|source| Box::new(ParseError::LineError { line_number, source }))?;
    }

    Ok(grid)
}

/// Render a grid and its non-default clue content, clues in key order.
pub fn render_puzzle(grid: &CrosswordGrid) -> String {
    let mut text = grid.specification();
    text.push('\n');
    for clue in grid.clues().filter(|clue| !clue.content().is_default(clue.len())) {
        text.push_str(&format!("{}%{}\n", clue.key(), clue.content().specification()));
    }
    text
}

/// Native-only: read and parse a puzzle file.
///
/// # Errors
///
/// Will return an `Error` if unable to read a file at `path` or if its contents are malformed.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_puzzle<P: AsRef<Path>>(path: P) -> Result<CrosswordGrid, PuzzleFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PuzzleFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let grid = parse_puzzle(&text)?;
    let (complete, total) = grid.completion();
    log::info!(
        "Loaded {}x{} puzzle from {} ({complete}/{total} clues complete)",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

/// Native-only: write a puzzle file. The text goes to a temporary file in the same
/// directory, which then replaces `path` in one rename.
///
/// # Errors
///
/// Will return an `Error` if the temporary file cannot be written or renamed over `path`.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_puzzle<P: AsRef<Path>>(path: P, grid: &CrosswordGrid) -> Result<(), PuzzleFileError> {
    use std::io::Write;

    let path = path.as_ref();
    let io_error = |source: std::io::Error| PuzzleFileError::Io { path: path.to_path_buf(), source };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(render_puzzle(grid).as_bytes()).map_err(io_error)?;
    temp.flush().map_err(io_error)?;
    if let Ok(existing) = std::fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions()).map_err(io_error)?;
    }
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|e| io_error(e.error))?;

    log::info!("Saved puzzle to {}", path.display());
    Ok(())
}

/// Native-only: the most recently modified `*.cwd` file in `dir`, if any.
///
/// # Errors
///
/// Will return an `Error` if `dir` cannot be listed.
#[cfg(not(target_arch = "wasm32"))]
pub fn most_recently_saved<P: AsRef<Path>>(dir: P) -> Result<Option<PathBuf>, PuzzleFileError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|source| PuzzleFileError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let newest = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == PUZZLE_EXTENSION))
        .filter_map(|path| {
            let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((modified, path))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| path);

    Ok(newest)
}
