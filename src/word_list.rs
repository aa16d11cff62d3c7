//! `word_list`: in-memory word list and the scans run over it.
//!
//! A word list is a flat sequence of words and phrases, one per line, expected (but not
//! required) to be sorted by [`sorting_key`]. Every query is a linear scan in file order.
//!
//! This module never touches the filesystem, so it works in WebAssembly builds where the
//! list arrives as a string. The file-backed wrapper lives in [`crate::lexicon`].

use crate::word_pattern::{anagram_key, reversed, sorting_key, WordPattern};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Counting stops here; the UI shows "1,000+ matches".
pub const MATCH_COUNT_CAP: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<String>,
}

/// Result of [`WordList::source_health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// The first adjacent pair whose sort keys are out of order.
    pub first_order_error: Option<(String, String)>,
    pub count: usize,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.first_order_error.is_none()
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.first_order_error {
            None => write!(f, "No order errors ({} words)", self.count),
            Some((before, after)) => write!(f, "{before} / {after} ({} words)", self.count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchOutcome {
    NotFound,
    FoundExact,
    FoundDifferentlyCased,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchOutcome::NotFound => "Not found",
            SearchOutcome::FoundExact => "Found exact string",
            SearchOutcome::FoundDifferentlyCased => "Found string differently cased",
        })
    }
}

/// Result of [`WordList::search_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub count: usize,
}

/// Filters applied on top of template matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    /// Keep only entries starting with an upper-case letter (proper nouns).
    pub only_capitalized: bool,
    /// Replace the matches by those whose reversal is also a match.
    pub only_reversible: bool,
    /// Letters that must all be found under the template's wildcards.
    pub extras: String,
}

/// A match count, exact below the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchCount {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for MatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MatchCount::Exact(0) => f.write_str("No matches"),
            MatchCount::Exact(1) => f.write_str("1 match"),
            MatchCount::Exact(n) => write!(f, "{} matches", with_thousands(n)),
            MatchCount::AtLeast(n) => write!(f, "{}+ matches", with_thousands(n)),
        }
    }
}

fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn entry_matches(entry: &WordPattern, template: &WordPattern, extras: &str) -> bool {
    if extras.trim().is_empty() {
        entry.matches_template(template)
    } else {
        entry.matches_template_with_extras(template, extras)
    }
}

fn passes_case_filter(entry: &str, query: &TemplateQuery) -> bool {
    !query.only_capitalized || entry.chars().next().is_some_and(char::is_uppercase)
}

/// Apply the reversible filter to the direct matches, which are in file order.
fn finish_matches(matches: Vec<&str>, query: &TemplateQuery) -> Vec<String> {
    if !query.only_reversible {
        return matches.into_iter().map(String::from).collect();
    }

    let present: HashSet<&str> = matches.iter().copied().collect();
    let mut retained: Vec<String> = matches
        .iter()
        .map(|m| reversed(m))
        .filter(|back| present.contains(back.as_str()))
        .collect();
    retained.sort();
    retained
}

impl WordList {
    /// Build from file contents: one entry per line, trimmed, blank lines skipped.
    /// Order and duplicates are kept as found.
    pub fn parse_from_str(contents: &str) -> WordList {
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        WordList { entries }
    }

    pub fn from_entries(entries: Vec<String>) -> WordList {
        WordList { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report the first adjacent pair out of [`sorting_key`] order, without repairing it.
    pub fn source_health(&self) -> HealthReport {
        let first_order_error = self
            .entries
            .windows(2)
            .find(|pair| sorting_key(&pair[1]) < sorting_key(&pair[0]))
            .map(|pair| (pair[0].clone(), pair[1].clone()));

        if let Some((before, after)) = &first_order_error {
            log::warn!("Word list out of order at \"{before}\" / \"{after}\"");
        }

        HealthReport { first_order_error, count: self.entries.len() }
    }

    /// Whether `sought` is present verbatim, or only with different letter case.
    pub fn search_report(&self, sought: &str) -> SearchReport {
        let sought = sought.trim();
        let sought_lower = sought.to_lowercase();

        let mut outcome = SearchOutcome::NotFound;
        for entry in &self.entries {
            if entry == sought {
                outcome = SearchOutcome::FoundExact;
                break;
            }
            if entry.to_lowercase() == sought_lower {
                outcome = SearchOutcome::FoundDifferentlyCased;
            }
        }

        SearchReport { outcome, count: self.entries.len() }
    }

    /// True if some entry matches the template built from `word`.
    pub fn contains(&self, word: &str) -> bool {
        let template = WordPattern::new(word);
        self.entries
            .iter()
            .any(|entry| WordPattern::new(entry).matches_template(&template))
    }

    pub fn anagrams_of(&self, word: &str) -> Vec<String> {
        let key = anagram_key(word);
        if key.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| anagram_key(entry) == key)
            .cloned()
            .collect()
    }

    fn direct_matches<'a>(&'a self, template: &WordPattern, query: &TemplateQuery) -> impl Iterator<Item = &'a str> {
        let template = template.clone();
        let query = query.clone();
        self.entries
            .iter()
            .map(String::as_str)
            .filter(move |entry| {
                passes_case_filter(entry, &query)
                    && entry_matches(&WordPattern::new(entry), &template, &query.extras)
            })
    }

    /// Entries fitting `pattern`, in file order (sorted when `only_reversible`).
    pub fn template_matches(&self, pattern: &str, query: &TemplateQuery) -> Vec<String> {
        let template = WordPattern::new(pattern);
        finish_matches(self.direct_matches(&template, query).collect(), query)
    }

    /// Count matches, stopping once `cap` is reached.
    pub fn template_match_count(&self, pattern: &str, query: &TemplateQuery, cap: usize) -> MatchCount {
        let found = if query.only_reversible {
            self.template_matches(pattern, query).len()
        } else {
            let template = WordPattern::new(pattern);
            self.direct_matches(&template, query).take(cap).count()
        };

        if found >= cap {
            MatchCount::AtLeast(cap)
        } else {
            MatchCount::Exact(found)
        }
    }

    /// For a multi-word pattern, search each word on its own and splice every hit back
    /// into the phrase. Hyphens count as word breaks. A single word yields nothing.
    pub fn individual_word_matches(&self, pattern: &str) -> Vec<String> {
        let spaced = pattern.trim().replace('-', " ");
        let words: Vec<&str> = spaced.split_whitespace().collect();
        if words.len() < 2 {
            return Vec::new();
        }

        let query = TemplateQuery::default();
        let mut finds = Vec::new();
        for (position, word) in words.iter().enumerate() {
            for hit in self.template_matches(word, &query) {
                let phrase: Vec<&str> = words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| if i == position { hit.as_str() } else { w })
                    .collect();
                finds.push(phrase.join(" "));
            }
        }
        finds
    }

    /// Search the pattern as one run of letters, ignoring its word breaks.
    pub fn unspaced_matches(&self, pattern: &str) -> Vec<String> {
        let unspaced: String = pattern.chars().filter(|&c| c != ' ' && c != '-').collect();
        self.template_matches(&unspaced, &TemplateQuery::default())
    }

    /// Where sorted insertion would put `word`: before the first entry whose sort key is
    /// greater, or at the end.
    pub fn insertion_index(&self, word: &str) -> usize {
        let key = sorting_key(word);
        self.entries
            .iter()
            .position(|entry| sorting_key(entry) > key)
            .unwrap_or(self.entries.len())
    }

    /// Insert at [`insertion_index`](Self::insertion_index); returns the index used.
    pub fn insert_sorted(&mut self, word: &str) -> usize {
        let index = self.insertion_index(word);
        self.entries.insert(index, word.to_string());
        index
    }
}

/// Entries bucketed by letter count and gap positions.
///
/// Two words can only match when they share both, so a template query only needs to
/// scan one bucket. Results are identical to [`WordList::template_matches`].
#[derive(Debug, Clone, Default)]
pub struct ShapeIndex {
    buckets: HashMap<(usize, Vec<usize>), Vec<String>>,
}

impl ShapeIndex {
    pub fn build(list: &WordList) -> ShapeIndex {
        let mut buckets: HashMap<(usize, Vec<usize>), Vec<String>> = HashMap::new();
        for entry in list.entries() {
            let pattern = WordPattern::new(entry);
            buckets
                .entry((pattern.letter_count(), pattern.gaps().to_vec()))
                .or_default()
                .push(entry.clone());
        }
        log::debug!("Indexed {} words into {} shapes", list.len(), buckets.len());
        ShapeIndex { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn template_matches(&self, pattern: &str, query: &TemplateQuery) -> Vec<String> {
        let template = WordPattern::new(pattern);
        let shape = (template.letter_count(), template.gaps().to_vec());
        let Some(bucket) = self.buckets.get(&shape) else {
            return Vec::new();
        };

        let matches = bucket
            .iter()
            .map(String::as_str)
            .filter(|entry| {
                passes_case_filter(entry, query)
                    && entry_matches(&WordPattern::new(entry), &template, &query.extras)
            })
            .collect();
        finish_matches(matches, query)
    }
}
