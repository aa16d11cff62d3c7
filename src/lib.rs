//! Cryptic crossword grids, clues, answer formats and word-list search.
//!
//! - [`grid`] derives numbered across/down clues from a black/white cell matrix and
//!   checks entries against their crossings;
//! - [`clue`] holds one answer slot and its letters/format content;
//! - [`format_spec`] validates and enumerates length specifications such as `5,3-2`;
//! - [`word_pattern`] normalizes words and templates and matches one against the other;
//! - [`word_list`] and [`lexicon`] search a flat, sorted word list;
//! - [`puzzle_file`] reads and writes the `.cwd` text format.

// Reusable library API, visible to both CLI and WASM builds
pub mod clue;
pub mod config;
pub mod errors;
pub mod format_spec;
pub mod grid;
pub mod log;
pub mod pattern_char;
pub mod puzzle_file;
pub mod word_list;
pub mod word_pattern;

#[cfg(not(target_arch = "wasm32"))]
pub mod lexicon;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
