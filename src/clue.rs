//! A single across or down answer slot.

use crate::errors::{GridError, ParseError};
use crate::format_spec::{enumeration, format_problem, render_through_format};
use crate::pattern_char::{PatternChar, UNKNOWN_LETTER};
use crate::word_pattern::stringy;
use nom::{
    character::complete::{digit1, one_of},
    IResult,
    Parser,
};
use std::fmt;
use std::str::FromStr;

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn tag(self) -> char {
        match self {
            Direction::Across => 'A',
            Direction::Down => 'D',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'A' => Some(Direction::Across),
            'D' => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Across => "Across",
            Direction::Down => "Down",
        }
    }
}

/// Identity of a clue: direction plus the number printed in its first cell.
///
/// Orders all across clues before all down clues, each by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClueKey {
    pub direction: Direction,
    pub number: u32,
}

impl ClueKey {
    pub fn new(direction: Direction, number: u32) -> Self {
        Self { direction, number }
    }
}

impl fmt::Display for ClueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.tag(), self.number)
    }
}

pub(crate) fn clue_key_parts(input: &str) -> PResult<'_, (char, &str)> {
    (one_of("AD"), digit1).parse(input)
}

impl FromStr for ClueKey {
    type Err = Box<ParseError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Box::new(ParseError::InvalidClueKey { key: s.to_string() });

        let (rest, (tag, digits)) = clue_key_parts(s).map_err(|_| invalid())?;
        if !rest.is_empty() {
            return Err(invalid());
        }
        let direction = Direction::from_tag(tag).ok_or_else(invalid)?;
        let number = digits.parse::<u32>().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        Ok(ClueKey { direction, number })
    }
}

/// Zero-based cell coordinates: `x` across, `y` down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
}

impl GridPoint {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// What has been entered for a clue: its letters (`.` where unknown) and its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueContent {
    pub letters: String,
    pub format: String,
}

impl ClueContent {
    /// All-unknown letters and a single-word format.
    pub fn blank(length: usize) -> Self {
        Self {
            letters: stringy(length, UNKNOWN_LETTER),
            format: length.to_string(),
        }
    }

    /// Read the persisted `letters:format` form. `None` when there is no `:`.
    pub fn from_specification(spec: &str) -> Option<Self> {
        let (letters, format) = spec.split_once(':')?;
        Some(Self {
            letters: letters.to_string(),
            format: format.to_string(),
        })
    }

    /// The persisted `letters:format` form.
    pub fn specification(&self) -> String {
        format!("{}:{}", self.letters, self.format)
    }

    pub fn is_default(&self, length: usize) -> bool {
        self.letters.chars().all(|c| c == UNKNOWN_LETTER) && self.format == length.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    key: ClueKey,
    start: GridPoint,
    length: usize,
    content: ClueContent,
}

impl Clue {
    pub fn new(key: ClueKey, start: GridPoint, length: usize) -> Self {
        Self {
            key,
            start,
            length,
            content: ClueContent::blank(length),
        }
    }

    pub fn key(&self) -> ClueKey {
        self.key
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    pub fn number(&self) -> u32 {
        self.key.number
    }

    pub fn start(&self) -> GridPoint {
        self.start
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn content(&self) -> &ClueContent {
        &self.content
    }

    pub fn letters(&self) -> &str {
        &self.content.letters
    }

    pub fn format(&self) -> &str {
        &self.content.format
    }

    pub fn clear_letters(&mut self) {
        self.content.letters = stringy(self.length, UNKNOWN_LETTER);
    }

    /// Replace the letters. Lower-case input is upper-cased; `.` marks an unknown cell.
    pub fn set_letters(&mut self, letters: &str) -> Result<(), GridError> {
        let letters = letters.to_ascii_uppercase();
        let found = letters.chars().count();
        if found != self.length {
            return Err(GridError::LettersLengthMismatch {
                key: self.key.to_string(),
                expected: self.length,
                found,
            });
        }
        if let Some(bad) = letters.chars().find(|c| !(c.is_grid_letter() || *c == UNKNOWN_LETTER)) {
            return Err(GridError::InvalidLetter { key: self.key.to_string(), letter: bad });
        }

        self.content.letters = letters;
        Ok(())
    }

    pub fn set_format(&mut self, format: &str) -> Result<(), GridError> {
        if let Some(problem) = format_problem(format, self.length) {
            return Err(GridError::InvalidFormat {
                key: self.key.to_string(),
                format: format.to_string(),
                problem,
            });
        }
        self.content.format = format.to_string();
        Ok(())
    }

    /// Install persisted content after checking it fits this clue.
    pub fn set_content(&mut self, content: ClueContent) -> Result<(), GridError> {
        let format = if content.format.is_empty() {
            self.length.to_string()
        } else {
            content.format
        };
        let previous = self.content.clone();
        let applied = self.set_letters(&content.letters).and_then(|()| self.set_format(&format));
        if applied.is_err() {
            self.content = previous;
        }
        applied
    }

    pub fn is_complete(&self) -> bool {
        self.content.letters.chars().count() == self.length
            && !self.content.letters.contains(UNKNOWN_LETTER)
    }

    fn offset_of(&self, point: GridPoint) -> Option<usize> {
        let (along, across, start_along, start_across) = match self.key.direction {
            Direction::Across => (point.x, point.y, self.start.x, self.start.y),
            Direction::Down => (point.y, point.x, self.start.y, self.start.x),
        };
        if across != start_across {
            return None;
        }
        along
            .checked_sub(start_along)
            .filter(|&offset| offset < self.length)
    }

    /// The letter this clue holds at `point`, or `None` if the point is not on its run.
    pub fn includes_cell(&self, point: GridPoint) -> Option<char> {
        self.offset_of(point)
            .map(|offset| self.content.letters.chars().nth(offset).unwrap_or(UNKNOWN_LETTER))
    }

    /// The run's coordinates, in clue order.
    pub fn included_cells(&self) -> Vec<GridPoint> {
        (0..self.length)
            .map(|offset| match self.key.direction {
                Direction::Across => GridPoint::new(self.start.x + offset, self.start.y),
                Direction::Down => GridPoint::new(self.start.x, self.start.y + offset),
            })
            .collect()
    }

    /// The stored letters laid out through the stored format, ignoring crossings.
    pub fn patterned_word_intrinsic(&self) -> String {
        render_through_format(&self.content.letters, &self.content.format)
    }

    /// E.g. `(5,3-2)`.
    pub fn enumeration(&self) -> String {
        enumeration(&self.content.format)
    }
}
