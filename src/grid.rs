//! The cell matrix and the clue set derived from it.
//!
//! Cells are stored row-major (`y * width + x`). Clues are derived by run-scanning the
//! matrix with [`derive_clues`]; editing cells does not re-derive them, so callers invoke
//! [`CrosswordGrid::locate_indices`] (or its content-preserving variant) after edits.

use crate::clue::{Clue, ClueContent, ClueKey, Direction, GridPoint, PResult};
use crate::errors::{GridError, ParseError};
use crate::format_spec::render_through_format;
use crate::pattern_char::{PatternChar, BLACK_SYMBOL, UNKNOWN_LETTER};
use nom::bytes::complete::take;
use nom::Parser;
use std::collections::BTreeMap;
use std::fmt;

/// Grid sides accepted when creating a new blank grid.
pub const MIN_SIDE: usize = 4;
pub const MAX_SIDE: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Black,
    White,
    Letter(char),
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            BLACK_SYMBOL => Some(Cell::Black),
            UNKNOWN_LETTER => Some(Cell::White),
            c if c.is_grid_letter() => Some(Cell::Letter(c)),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Black => BLACK_SYMBOL,
            Cell::White => UNKNOWN_LETTER,
            Cell::Letter(c) => c,
        }
    }

    pub fn is_black(self) -> bool {
        self == Cell::Black
    }
}

/// How a candidate entry for a clue compares with what the grid already knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAssessment {
    Empty,
    WrongLength { expected: usize, found: usize },
    IllegalCharacter(char),
    ConflictsWithPattern,
    Acceptable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosswordGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    clues: BTreeMap<ClueKey, Clue>,
}

fn width_header(input: &str) -> PResult<'_, &str> {
    take(2usize).parse(input)
}

/// Run-scan a cell matrix into its numbered clues.
///
/// A cell is numbered when it starts an across run, a down run, or both; a run starts at a
/// non-black cell whose previous neighbour is black (or the edge) and whose next neighbour
/// is not. Numbers increase in row-major order and are shared by across and down clues
/// starting at the same cell.
///
/// Cells that do not form exactly `width * height` cells yield no clues.
pub fn derive_clues(width: usize, height: usize, cells: &[Cell]) -> BTreeMap<ClueKey, Clue> {
    if width.checked_mul(height) != Some(cells.len()) {
        log::warn!("Cannot number {} cells as a {width}x{height} grid", cells.len());
        return BTreeMap::new();
    }

    let is_open = |x: usize, y: usize| x < width && y < height && !cells[y * width + x].is_black();
    let run_length = |x: usize, y: usize, direction: Direction| {
        (0..)
            .take_while(|&step| match direction {
                Direction::Across => is_open(x + step, y),
                Direction::Down => is_open(x, y + step),
            })
            .count()
    };

    let mut clues = BTreeMap::new();
    let mut number = 0;
    for y in 0..height {
        for x in 0..width {
            if !is_open(x, y) {
                continue;
            }
            let starts_across = (x == 0 || !is_open(x - 1, y)) && is_open(x + 1, y);
            let starts_down = (y == 0 || !is_open(x, y - 1)) && is_open(x, y + 1);
            if !(starts_across || starts_down) {
                continue;
            }

            number += 1;
            let start = GridPoint::new(x, y);
            for (starts, direction) in [(starts_across, Direction::Across), (starts_down, Direction::Down)] {
                if starts {
                    let key = ClueKey::new(direction, number);
                    clues.insert(key, Clue::new(key, start, run_length(x, y, direction)));
                }
            }
        }
    }

    clues
}

impl CrosswordGrid {
    /// Parse a grid specification: a two-character width header followed by the cell
    /// symbols in row-major order. Clues are derived immediately.
    pub fn from_specification(spec: &str) -> Result<Self, Box<ParseError>> {
        let (body, header) = width_header(spec)
            .map_err(|_| Box::new(ParseError::MissingWidthHeader { spec: spec.to_string() }))?;

        let digits = header.trim();
        let width = Some(digits)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|d| d.parse::<usize>().ok())
            .filter(|&w| w > 0)
            .ok_or_else(|| Box::new(ParseError::InvalidWidth { header: header.to_string() }))?;

        let cells = body
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Cell::from_symbol(symbol)
                    .ok_or_else(|| Box::new(ParseError::InvalidCellSymbol { symbol, position }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.len() < width {
            return Err(Box::new(ParseError::SpecificationTooShort { width, cells: cells.len() }));
        }
        if cells.len() % width != 0 {
            return Err(Box::new(ParseError::RaggedSpecification { width, cells: cells.len() }));
        }

        let height = cells.len() / width;
        Ok(Self::from_cells(width, height, cells))
    }

    /// An all-white grid. Each side must lie in `4..=26`.
    pub fn blank(width: usize, height: usize) -> Result<Self, GridError> {
        let valid = MIN_SIDE..=MAX_SIDE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(GridError::SizeOutOfRange { width, height });
        }
        Ok(Self::from_cells(width, height, vec![Cell::White; width * height]))
    }

    fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        let mut grid = Self { width, height, cells, clues: BTreeMap::new() };
        grid.locate_indices();
        grid
    }

    /// The persisted form: zero-padded two-digit width, then every cell symbol.
    pub fn specification(&self) -> String {
        let mut spec = format!("{:02}", self.width);
        spec.extend(self.cells.iter().map(|cell| cell.symbol()));
        spec
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, point: GridPoint) -> Result<usize, GridError> {
        if point.x < self.width && point.y < self.height {
            Ok(point.y * self.width + point.x)
        } else {
            Err(GridError::CellOutOfRange {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cell(&self, point: GridPoint) -> Result<Cell, GridError> {
        self.offset(point).map(|offset| self.cells[offset])
    }

    /// Overwrite one cell. Letters are upper-cased; anything else outside A-Z is rejected.
    pub fn set_cell(&mut self, point: GridPoint, cell: Cell) -> Result<(), GridError> {
        let offset = self.offset(point)?;
        let cell = match cell {
            Cell::Letter(c) => {
                let upper = c.to_ascii_uppercase();
                if !upper.is_grid_letter() {
                    return Err(GridError::InvalidLetter {
                        key: format!("({},{})", point.x, point.y),
                        letter: c,
                    });
                }
                Cell::Letter(upper)
            }
            other => other,
        };
        self.cells[offset] = cell;
        Ok(())
    }

    /// Flip a cell between black and white. With `symmetric`, the cell at the 180-degree
    /// rotated position takes the same new state. Returns the new state.
    pub fn toggle_block(&mut self, point: GridPoint, symmetric: bool) -> Result<Cell, GridError> {
        let offset = self.offset(point)?;
        let toggled = if self.cells[offset].is_black() { Cell::White } else { Cell::Black };
        self.cells[offset] = toggled;

        if symmetric {
            let mirror = GridPoint::new(self.width - 1 - point.x, self.height - 1 - point.y);
            let mirror_offset = self.offset(mirror)?;
            self.cells[mirror_offset] = toggled;
        }

        Ok(toggled)
    }

    /// Re-derive the clue set from the cells. All clue content is reset.
    pub fn locate_indices(&mut self) {
        self.clues = derive_clues(self.width, self.height, &self.cells);
        log::debug!(
            "Located {} clues ({} across, {} down) in {}x{} grid",
            self.clues.len(),
            self.clues_across().count(),
            self.clues_down().count(),
            self.width,
            self.height
        );
    }

    /// Re-derive the clue set, then restore content for every clue whose key and
    /// length are unchanged.
    pub fn locate_indices_preserving_content(&mut self) {
        let previous: Vec<(ClueKey, usize, ClueContent)> = self
            .clues
            .values()
            .map(|clue| (clue.key(), clue.len(), clue.content().clone()))
            .collect();

        self.locate_indices();

        for (key, length, content) in previous {
            if let Some(clue) = self.clues.get_mut(&key).filter(|clue| clue.len() == length) {
                if let Err(e) = clue.set_content(content) {
                    log::warn!("Dropped content of {key}: {e}");
                }
            }
        }
    }

    /// The number printed in a cell, if it starts a clue.
    pub fn index(&self, point: GridPoint) -> Option<u32> {
        self.clues
            .values()
            .find(|clue| clue.start() == point)
            .map(Clue::number)
    }

    /// Every clue, across before down, each by number.
    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.clues.values()
    }

    pub fn clues_across(&self) -> impl Iterator<Item = &Clue> {
        self.clues.values().filter(|clue| clue.direction() == Direction::Across)
    }

    pub fn clues_down(&self) -> impl Iterator<Item = &Clue> {
        self.clues.values().filter(|clue| clue.direction() == Direction::Down)
    }

    pub fn clue(&self, key: ClueKey) -> Result<&Clue, GridError> {
        self.clues
            .get(&key)
            .ok_or_else(|| GridError::UnknownClue { key: key.to_string() })
    }

    pub fn clue_mut(&mut self, key: ClueKey) -> Result<&mut Clue, GridError> {
        self.clues
            .get_mut(&key)
            .ok_or_else(|| GridError::UnknownClue { key: key.to_string() })
    }

    /// The first clue other than `excluding` whose run covers `point`, with the letter it
    /// holds there.
    pub fn clue_sharing_cell(&self, point: GridPoint, excluding: ClueKey) -> Option<(ClueKey, char)> {
        self.clues
            .values()
            .filter(|clue| clue.key() != excluding)
            .find_map(|clue| clue.includes_cell(point).map(|letter| (clue.key(), letter)))
    }

    fn complete_crossing(&self, point: GridPoint, excluding: ClueKey) -> Option<(ClueKey, char)> {
        self.clue_sharing_cell(point, excluding)
            .filter(|(crossing, _)| self.clues.get(crossing).is_some_and(Clue::is_complete))
    }

    /// Keys of the complete crossing clues whose letter disagrees with `proposed`.
    ///
    /// A proposal that is not itself complete (wrong length, or holding unknown letters)
    /// never conflicts. Letters are compared case-insensitively.
    pub fn crossing_conflicts_detected(&self, key: ClueKey, proposed: &str) -> Result<Vec<ClueKey>, GridError> {
        let clue = self.clue(key)?;
        let proposed: Vec<char> = proposed.chars().map(|c| c.to_ascii_uppercase()).collect();
        if proposed.len() != clue.len() || proposed.contains(&UNKNOWN_LETTER) {
            return Ok(Vec::new());
        }

        let mut conflicts = Vec::new();
        for (point, &letter) in clue.included_cells().into_iter().zip(&proposed) {
            if let Some((crossing, theirs)) = self.complete_crossing(point, key) {
                if theirs != letter && !conflicts.contains(&crossing) {
                    conflicts.push(crossing);
                }
            }
        }

        Ok(conflicts)
    }

    fn letters_from_crossings(&self, clue: &Clue) -> String {
        clue.included_cells()
            .into_iter()
            .map(|point| {
                self.complete_crossing(point, clue.key())
                    .map_or(UNKNOWN_LETTER, |(_, letter)| letter)
            })
            .collect()
    }

    /// The best-known view of a clue: its own letters if complete, otherwise the letters
    /// supplied by complete crossings, laid out through its format.
    pub fn patterned_word_constrained(&self, key: ClueKey) -> Result<String, GridError> {
        let clue = self.clue(key)?;
        if clue.is_complete() {
            return Ok(clue.patterned_word_intrinsic());
        }
        Ok(render_through_format(&self.letters_from_crossings(clue), clue.format()))
    }

    /// Letters supplied by complete crossings, one per cell, without format separators.
    pub fn unpatterned_word_constrained(&self, key: ClueKey) -> Result<String, GridError> {
        let clue = self.clue(key)?;
        Ok(self.letters_from_crossings(clue))
    }

    /// Commit letters to a clue. Crossings are not checked; run
    /// [`crossing_conflicts_detected`](Self::crossing_conflicts_detected) first.
    pub fn set_clue_letters(&mut self, key: ClueKey, letters: &str) -> Result<(), GridError> {
        self.clue_mut(key)?.set_letters(letters)
    }

    pub fn set_clue_format(&mut self, key: ClueKey, format: &str) -> Result<(), GridError> {
        self.clue_mut(key)?.set_format(format)
    }

    pub fn clear_clue(&mut self, key: ClueKey) -> Result<(), GridError> {
        self.clue_mut(key)?.clear_letters();
        Ok(())
    }

    pub fn clear_all_letters(&mut self) {
        self.clues.values_mut().for_each(Clue::clear_letters);
    }

    /// Check a typed entry against the clue's length and the letters its crossings fix.
    pub fn assess_entry(&self, key: ClueKey, offered: &str) -> Result<EntryAssessment, GridError> {
        let clue = self.clue(key)?;
        let offered = offered.trim();
        if offered.is_empty() {
            return Ok(EntryAssessment::Empty);
        }

        let letters: Vec<char> = offered.chars().map(|c| c.to_ascii_uppercase()).collect();
        if let Some(&bad) = letters.iter().find(|c| !c.is_grid_letter()) {
            return Ok(EntryAssessment::IllegalCharacter(bad));
        }
        if letters.len() != clue.len() {
            return Ok(EntryAssessment::WrongLength { expected: clue.len(), found: letters.len() });
        }

        let pattern = self.letters_from_crossings(clue);
        let conflicts = pattern
            .chars()
            .zip(&letters)
            .any(|(known, &mine)| known != UNKNOWN_LETTER && known != mine);

        Ok(if conflicts {
            EntryAssessment::ConflictsWithPattern
        } else {
            EntryAssessment::Acceptable
        })
    }

    /// `(complete clues, all clues)`.
    pub fn completion(&self) -> (usize, usize) {
        let complete = self.clues.values().filter(|clue| clue.is_complete()).count();
        (complete, self.clues.len())
    }
}

impl fmt::Display for CrosswordGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
