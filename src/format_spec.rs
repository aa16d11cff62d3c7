//! Clue length specifications such as `5,3-2`.
//!
//! A format is a run of positive segment lengths joined by `,` (a word break, shown as a
//! space) or `-` (a hyphen). It must sum to the number of cells in the clue.
//!
//! This module validates formats, walks them segment by segment, and enumerates every
//! multi-word breakdown of a given length for a picker.

use crate::pattern_char::{HYPHEN, WORD_SEPARATOR};

/// Upper bound on the number of words offered when enumerating break patterns.
pub const DEFAULT_MAX_PIECES: usize = 6;

const FIRST_SEGMENT: char = '#';
const COMMA: char = ',';

/// Why a format string is not acceptable for a clue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatProblem {
    #[error("'{0}' is not allowed in a format (only digits, ',' and '-')")]
    IllegalCharacter(char),

    #[error("a format segment is missing its length")]
    EmptySegment,

    #[error("a format segment has zero length")]
    ZeroSegment,

    #[error("a format segment length is too large")]
    SegmentTooLarge,

    #[error("format adds up to {found} but the clue has {expected} letters")]
    WrongTotal { expected: usize, found: usize },
}

/// The separator that introduces a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Hyphen,
}

impl Separator {
    /// The glyph this separator contributes to a rendered answer.
    pub fn rendered(self) -> char {
        match self {
            Separator::Comma => WORD_SEPARATOR,
            Separator::Hyphen => HYPHEN,
        }
    }
}

/// One `(separator, length)` step of a format; the first segment has no separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub separator: Option<Separator>,
    pub length: usize,
}

/// Explain what, if anything, is wrong with `spec` as a format for `total` letters.
pub fn format_problem(spec: &str, total: usize) -> Option<FormatProblem> {
    if let Some(bad) = spec.chars().find(|&c| !(c.is_ascii_digit() || c == COMMA || c == HYPHEN)) {
        return Some(FormatProblem::IllegalCharacter(bad));
    }

    let mut sum: usize = 0;
    for part in spec.split([COMMA, HYPHEN]) {
        if part.is_empty() {
            return Some(FormatProblem::EmptySegment);
        }
        let Ok(length) = part.parse::<usize>() else {
            return Some(FormatProblem::SegmentTooLarge);
        };
        if length == 0 {
            return Some(FormatProblem::ZeroSegment);
        }
        match sum.checked_add(length) {
            Some(s) => sum = s,
            None => return Some(FormatProblem::SegmentTooLarge),
        }
    }

    (sum != total).then_some(FormatProblem::WrongTotal { expected: total, found: sum })
}

/// True iff `spec` uses only digits, commas and hyphens, every segment is a positive
/// integer, and the segments add up to `total`.
pub fn is_valid_specification(spec: &str, total: usize) -> bool {
    format_problem(spec, total).is_none()
}

/// Split a format into strings that each start with `#` (first segment), `,` or `-`,
/// followed by that segment's digits: `"5,3-2"` gives `["#5", ",3", "-2"]`.
pub fn segment_list(spec: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::from(FIRST_SEGMENT);

    for c in spec.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else {
            segments.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    segments.push(current);
    segments
}

/// Typed view of [`segment_list`]. Segments without a readable length count as zero.
pub fn segments(spec: &str) -> Vec<Segment> {
    segment_list(spec)
        .iter()
        .map(|raw| {
            let mut chars = raw.chars();
            let separator = match chars.next() {
                Some(COMMA) => Some(Separator::Comma),
                Some(HYPHEN) => Some(Separator::Hyphen),
                _ => None,
            };
            let length = chars.as_str().parse().unwrap_or(0);
            Segment { separator, length }
        })
        .collect()
}

/// Lay `letters` out through `format`: a comma segment emits a space, a hyphen segment
/// emits `-`, then the segment consumes that many letters.
pub fn render_through_format(letters: &str, format: &str) -> String {
    let mut source = letters.chars();
    let mut rendered = String::with_capacity(letters.len() + format.len());

    for segment in segments(format) {
        if let Some(separator) = segment.separator {
            rendered.push(separator.rendered());
        }
        rendered.extend(source.by_ref().take(segment.length));
    }
    rendered
}

/// Every strictly increasing list of break positions in `1..length`, with at most
/// `max_pieces - 1` breaks. The unbroken word (no breaks) is not included.
///
/// Ordered by number of breaks, then lexicographically by position.
pub fn enumerate_break_patterns(length: usize, max_pieces: usize) -> Vec<Vec<usize>> {
    let max_breaks = max_pieces.saturating_sub(1);
    let mut results: Vec<Vec<usize>> = Vec::new();
    let mut frontier: Vec<Vec<usize>> = vec![Vec::new()];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for breaks in frontier.iter().filter(|b| b.len() < max_breaks) {
            let first = breaks.last().map_or(1, |&last| last + 1);
            for position in first..length {
                let mut extended = Vec::with_capacity(breaks.len() + 1);
                extended.extend_from_slice(breaks);
                extended.push(position);
                next.push(extended);
            }
        }
        results.extend(next.iter().cloned());
        frontier = next;
    }

    results.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    results
}

fn segment_lengths(length: usize, breaks: &[usize]) -> Vec<usize> {
    let mut lengths = Vec::with_capacity(breaks.len() + 1);
    let mut previous = 0;
    for &position in breaks.iter().chain(std::iter::once(&length)) {
        lengths.push(position.saturating_sub(previous));
        previous = position;
    }
    lengths
}

/// Comma-joined segment lengths: breaks `[5, 8]` on 10 letters give `"5,3,2"`.
pub fn render_lengths(length: usize, breaks: &[usize]) -> String {
    segment_lengths(length, breaks)
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Like [`render_lengths`] with each length right-aligned in two columns: `" 5, 3, 2"`.
pub fn render_lengths_spaced(length: usize, breaks: &[usize]) -> String {
    segment_lengths(length, breaks)
        .iter()
        .map(|n| format!("{n:>2}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// All multi-word formats for a clue of `length` letters, as offered in a picker.
pub fn letter_patterns(length: usize, max_pieces: usize) -> Vec<String> {
    enumerate_break_patterns(length, max_pieces)
        .iter()
        .map(|breaks| render_lengths(length, breaks))
        .collect()
}

/// Every rendering of `spec` in which each comma independently stays a comma or becomes
/// a hyphen. Hyphens already present are left alone.
///
/// The all-comma form comes first; the last comma varies fastest.
pub fn comma_hyphen_permutations(spec: &str) -> Vec<String> {
    let chars: Vec<char> = spec.chars().collect();
    let commas: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| (c == COMMA).then_some(i))
        .collect();
    let k = commas.len();
    if k >= usize::BITS as usize {
        return vec![spec.to_string()];
    }

    (0..1usize << k)
        .map(|mask| {
            let mut variant = chars.clone();
            for (nth, &index) in commas.iter().enumerate() {
                if (mask >> (k - 1 - nth)) & 1 == 1 {
                    variant[index] = HYPHEN;
                }
            }
            variant.into_iter().collect()
        })
        .collect()
}

/// The conventional printed enumeration of a clue, e.g. `(5,3-2)`.
pub fn enumeration(format: &str) -> String {
    format!("({format})")
}
