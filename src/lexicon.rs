//! `lexicon`: the word list file on disk.
//!
//! Every query reads the file afresh and scans it through [`WordList`], so edits made
//! by other tools are always seen. Insertion rewrites the whole file: the new contents are
//! written to a temporary file in the same directory, which is then renamed over the list.
//! Until that rename succeeds the original file is untouched.
//!
//! Native-only; WASM callers build a [`WordList`] from a string instead.

use crate::errors::LexiconError;
use crate::word_list::{HealthReport, MatchCount, SearchReport, TemplateQuery, WordList};
use crate::word_pattern::sorting_key;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    path: PathBuf,
}

impl Lexicon {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LexiconError {
        LexiconError::Io { path: self.path.clone(), source }
    }

    /// Read and parse the whole list.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read the file.
    pub fn load(&self) -> Result<WordList, LexiconError> {
        let started = Instant::now();
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let list = WordList::parse_from_str(&contents);
        log::debug!(
            "Read {} words from {} in {:?}",
            list.len(),
            self.path.display(),
            started.elapsed()
        );
        Ok(list)
    }

    pub fn source_health(&self) -> Result<HealthReport, LexiconError> {
        Ok(self.load()?.source_health())
    }

    pub fn search_report(&self, sought: &str) -> Result<SearchReport, LexiconError> {
        Ok(self.load()?.search_report(sought))
    }

    pub fn contains(&self, word: &str) -> Result<bool, LexiconError> {
        Ok(self.load()?.contains(word))
    }

    pub fn anagrams_of(&self, word: &str) -> Result<Vec<String>, LexiconError> {
        Ok(self.load()?.anagrams_of(word))
    }

    pub fn template_matches(&self, pattern: &str, query: &TemplateQuery) -> Result<Vec<String>, LexiconError> {
        let list = self.load()?;
        let started = Instant::now();
        let matches = list.template_matches(pattern, query);
        log::debug!("{} matches for \"{pattern}\" in {:?}", matches.len(), started.elapsed());
        Ok(matches)
    }

    pub fn template_match_count(
        &self,
        pattern: &str,
        query: &TemplateQuery,
        cap: usize,
    ) -> Result<MatchCount, LexiconError> {
        Ok(self.load()?.template_match_count(pattern, query, cap))
    }

    pub fn individual_word_matches(&self, pattern: &str) -> Result<Vec<String>, LexiconError> {
        Ok(self.load()?.individual_word_matches(pattern))
    }

    pub fn unspaced_matches(&self, pattern: &str) -> Result<Vec<String>, LexiconError> {
        Ok(self.load()?.unspaced_matches(pattern))
    }

    /// Insert `word` before the first entry with a greater sort key (at the end if there
    /// is none) and replace the file. Returns the new number of entries.
    ///
    /// Every existing line is written back byte for byte, blank and padded lines included.
    /// The new line uses the file's own line ending.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if `word` is blank or if the list cannot be read, written
    /// or replaced. On failure the original file is left as it was.
    pub fn insert_sorted(&self, word: &str) -> Result<usize, LexiconError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LexiconError::EmptyWord);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let splice = splice_sorted(&contents, word);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        temp.write_all(splice.text.as_bytes()).map_err(|e| self.io_error(e))?;
        temp.flush().map_err(|e| self.io_error(e))?;
        let permissions = std::fs::metadata(&self.path)
            .map_err(|e| self.io_error(e))?
            .permissions();
        temp.as_file().set_permissions(permissions).map_err(|e| self.io_error(e))?;
        temp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        log::info!(
            "Added \"{word}\" (key \"{}\") at line {} of {}",
            sorting_key(word),
            splice.line + 1,
            self.path.display()
        );
        Ok(splice.entries)
    }
}

/// File text with one line added, plus where it went.
struct Splice {
    text: String,
    /// 0-based line index of the new word.
    line: usize,
    /// Non-blank lines after insertion.
    entries: usize,
}

fn splice_sorted(contents: &str, word: &str) -> Splice {
    let ending = if contents.contains("\r\n") { "\r\n" } else { "\n" };
    let key = sorting_key(word);
    let lines: Vec<&str> = contents.split_inclusive('\n').collect();

    let line = lines
        .iter()
        .position(|raw| {
            let entry = raw.trim();
            !entry.is_empty() && sorting_key(entry) > key
        })
        .unwrap_or(lines.len());
    let entries = lines.iter().filter(|raw| !raw.trim().is_empty()).count() + 1;

    let mut text = String::with_capacity(contents.len() + word.len() + 2 * ending.len());
    lines[..line].iter().for_each(|raw| text.push_str(raw));
    // only the last line can lack a terminator
    if !text.is_empty() && !text.ends_with('\n') {
        text.push_str(ending);
    }
    text.push_str(word);
    text.push_str(ending);
    lines[line..].iter().for_each(|raw| text.push_str(raw));

    Splice { text, line, entries }
}
