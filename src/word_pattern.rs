//! Normalized word shapes and template matching.
//!
//! A [`WordPattern`] reduces a raw word or search template to two comparable parts:
//! - `letters`: the letters and `.` wildcards, in order;
//! - `gaps`: the positions of word breaks (space or hyphen) in the stream of kept
//!   characters, so `"ice cream"` and `"ice-cream"` share a shape but `"icecream"` does not.
//!
//! Characters that are neither letters, wildcards nor separators (apostrophes, digits,
//! punctuation) are dropped before either part is computed.
//!
//! Matching is directional: the word-list entry is `self`, the search template is `other`.

use crate::pattern_char::{PatternChar, WILDCARD};
use std::collections::HashMap;
use std::fmt;

/// A normalized word or search template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPattern {
    formatted: String,
    letters: Vec<char>,
    gaps: Vec<usize>,
}

impl WordPattern {
    pub fn new(raw: &str) -> Self {
        let formatted = raw.trim().to_lowercase();
        let mut letters = Vec::with_capacity(formatted.len());
        let mut gaps = Vec::new();

        for (position, c) in formatted.chars().filter(|c| c.is_pattern_kept()).enumerate() {
            if c.is_separator() {
                gaps.push(position);
            } else {
                letters.push(c);
            }
        }

        Self { formatted, letters, gaps }
    }

    /// Trimmed, lower-cased source text.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn letters(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    /// Gap positions rendered as concatenated two-digit numbers, e.g. `"0307"`.
    pub fn gap_signature(&self) -> String {
        self.gaps.iter().map(|g| format!("{g:02}")).collect()
    }

    pub fn is_all_wildcards(&self) -> bool {
        self.letters.iter().all(|c| c.is_wildcard())
    }

    fn same_shape(&self, other: &WordPattern) -> bool {
        self.letters.len() == other.letters.len() && self.gaps == other.gaps
    }

    /// True if this word fits `template`: same letter count, same gap positions, and
    /// every non-wildcard template letter equal (after accent folding) to the letter here.
    pub fn matches_template(&self, template: &WordPattern) -> bool {
        if self.formatted == template.formatted {
            return true;
        }
        if !self.same_shape(template) {
            return false;
        }
        if template.is_all_wildcards() {
            return true;
        }

        self.letters
            .iter()
            .zip(&template.letters)
            .all(|(mine, theirs)| theirs.is_wildcard() || mine.unaccented() == theirs.unaccented())
    }

    /// Like [`matches_template`](Self::matches_template), but additionally every character
    /// of `extras` must be accounted for by a distinct letter of this word that sits under
    /// a wildcard of `template`.
    ///
    /// Letters under wildcards that `extras` does not claim are allowed to remain.
    pub fn matches_template_with_extras(&self, template: &WordPattern, extras: &str) -> bool {
        if !self.same_shape(template) {
            return false;
        }

        let mut unused: HashMap<char, usize> = HashMap::new();
        for (mine, theirs) in self.letters.iter().zip(&template.letters) {
            if theirs.is_wildcard() {
                *unused.entry(fold_upper(*mine)).or_insert(0) += 1;
            } else if mine.unaccented() != theirs.unaccented() {
                return false;
            }
        }

        extras
            .chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| match unused.get_mut(&fold_upper(c)) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            })
    }
}

impl fmt::Display for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

fn fold_upper(c: char) -> char {
    // multi-char uppercase forms (e.g. 'ß') keep their first char; only equality matters
    c.unaccented().to_uppercase().next().unwrap_or(c)
}

/// `n` copies of `c`, e.g. an all-wildcard template of a given length.
pub fn stringy(n: usize, c: char) -> String {
    std::iter::repeat(c).take(n).collect()
}

/// Ordering key for the word list: accent-fold, keep letters only, lower-case.
pub fn sorting_key(word: &str) -> String {
    word.chars()
        .map(|c| c.unaccented())
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// [`sorting_key`] with its characters sorted; equal for exactly the anagrams of a word.
pub fn anagram_key(word: &str) -> String {
    let mut chars: Vec<char> = sorting_key(word).chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Letters only, accent-folded and upper-cased: the form a word takes in the grid.
pub fn constrain(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.unaccented())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn reversed(word: &str) -> String {
    word.chars().rev().collect()
}

/// An all-wildcard template of `n` letters.
pub fn wildcards(n: usize) -> String {
    stringy(n, WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(s: &str) -> WordPattern {
        WordPattern::new(s)
    }

    #[test]
    fn test_normalization() {
        let p = wp("  Ice Cream ");
        assert_eq!(p.formatted(), "ice cream");
        assert_eq!(p.letters(), "icecream");
        assert_eq!(p.gaps(), &[3]);
        assert_eq!(p.gap_signature(), "03");
    }

    #[test]
    fn test_hyphen_and_space_share_shape() {
        assert_eq!(wp("ice-cream").gaps(), wp("ice cream").gaps());
        assert!(wp("ice-cream").matches_template(&wp("ice cream")));
    }

    #[test]
    fn test_apostrophes_dropped() {
        let p = wp("o'clock");
        assert_eq!(p.letters(), "oclock");
        assert!(p.gaps().is_empty());
        assert!(p.matches_template(&wp("oclock")));
    }

    #[test]
    fn test_multiple_gaps() {
        let p = wp("end-to-end");
        assert_eq!(p.gaps(), &[3, 6]);
        assert_eq!(p.gap_signature(), "0306");
        assert_eq!(p.letter_count(), 8);
    }

    #[test]
    fn test_exact_match() {
        assert!(wp("steam").matches_template(&wp("steam")));
        assert!(wp("STEAM").matches_template(&wp("steam")));
        assert!(!wp("steam").matches_template(&wp("stems")));
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wp("steam").matches_template(&wp("s.e.m")));
        assert!(wp("steam").matches_template(&wp(".....")));
        assert!(!wp("steam").matches_template(&wp("s.a.m")));
        assert!(!wp("steam").matches_template(&wp("....")));
    }

    #[test]
    fn test_gap_mismatch() {
        assert!(!wp("ice cream").matches_template(&wp("icecream")));
        assert!(!wp("icecream").matches_template(&wp("ice cream")));
        assert!(!wp("ice cream").matches_template(&wp("........")));
        assert!(wp("ice cream").matches_template(&wp("... .....")));
    }

    #[test]
    fn test_accent_folding() {
        assert!(wp("café").matches_template(&wp("cafe")));
        assert!(wp("cafe").matches_template(&wp("caf.")));
        assert!(wp("naïve").matches_template(&wp("n.ive")));
    }

    #[test]
    fn test_empty_patterns() {
        assert_eq!(wp("").letters(), "");
        assert!(wp("").matches_template(&wp("")));
        assert!(!wp("a").matches_template(&wp("")));
    }

    #[test]
    fn test_extras_leftover_permitted() {
        assert!(wp("ABLE").matches_template_with_extras(&wp("...."), "LEA"));
    }

    #[test]
    fn test_extras_unavailable_letter() {
        assert!(!wp("ABLE").matches_template_with_extras(&wp("...."), "LEAZ"));
    }

    #[test]
    fn test_extras_literal_mismatch() {
        assert!(!wp("ABLE").matches_template_with_extras(&wp("x..."), "B"));
        assert!(wp("ABLE").matches_template_with_extras(&wp("a..."), "BLE"));
    }

    #[test]
    fn test_extras_letters_under_literals_not_available() {
        // the 'a' is fixed by the template, so it cannot also satisfy the bank
        assert!(!wp("able").matches_template_with_extras(&wp("a..."), "A"));
    }

    #[test]
    fn test_extras_counts_multiplicity() {
        assert!(wp("llama").matches_template_with_extras(&wp("....."), "LL"));
        assert!(!wp("lame").matches_template_with_extras(&wp("...."), "LL"));
    }

    #[test]
    fn test_extras_accents_and_case() {
        assert!(wp("café").matches_template_with_extras(&wp("ca.."), "ef"));
    }

    #[test]
    fn test_extras_shape_must_agree() {
        assert!(!wp("ice cream").matches_template_with_extras(&wp("........"), "ICE"));
        assert!(wp("ice cream").matches_template_with_extras(&wp("... ....."), "ICE"));
    }

    #[test]
    fn test_stringy() {
        assert_eq!(stringy(3, '.'), "...");
        assert_eq!(stringy(0, 'x'), "");
        assert_eq!(wildcards(4), "....");
    }

    #[test]
    fn test_sorting_key() {
        assert_eq!(sorting_key("Ice-Cream"), "icecream");
        assert_eq!(sorting_key("Crème brûlée"), "cremebrulee");
        assert_eq!(sorting_key("o'clock"), "oclock");
    }

    #[test]
    fn test_anagram_key() {
        assert_eq!(anagram_key("listen"), anagram_key("Silent"));
        assert_eq!(anagram_key("dormitory"), anagram_key("dirty room"));
        assert_ne!(anagram_key("abc"), anagram_key("abd"));
        assert_eq!(anagram_key("cab"), "abc");
    }

    #[test]
    fn test_constrain() {
        assert_eq!(constrain("crème brûlée"), "CREMEBRULEE");
        assert_eq!(constrain("o'clock"), "OCLOCK");
    }

    #[test]
    fn test_reversed() {
        assert_eq!(reversed("stressed"), "desserts");
        assert_eq!(reversed(""), "");
    }
}
