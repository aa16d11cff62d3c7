//! Where the word list and saved puzzles live.
//!
//! All paths hang off one data root:
//! - `<root>/Lists/wordlist.txt`
//! - `<root>/Crosswords/*.cwd`
//!
//! The root is passed around explicitly as a [`DataPaths`] value; nothing is stored globally.

use std::path::{Path, PathBuf};

/// Environment variable naming the data root.
pub const DATA_DIR_ENV: &str = "CRYPTOGRID_DATA";

const LISTS_DIR: &str = "Lists";
const WORD_LIST_FILE: &str = "wordlist.txt";
const PUZZLES_DIR: &str = "Crosswords";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
    word_list: Option<PathBuf>,
}

impl DataPaths {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), word_list: None }
    }

    /// Root from `CRYPTOGRID_DATA`, or the current directory when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::new("."),
        }
    }

    /// Use `path` as the word list instead of the one under the root.
    #[must_use]
    pub fn with_word_list<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.word_list = Some(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn word_list(&self) -> PathBuf {
        self.word_list
            .clone()
            .unwrap_or_else(|| self.root.join(LISTS_DIR).join(WORD_LIST_FILE))
    }

    pub fn puzzles_dir(&self) -> PathBuf {
        self.root.join(PUZZLES_DIR)
    }

    /// A bare puzzle name (`"sunday"`) resolves into the puzzles directory with the
    /// `.cwd` extension; anything containing a path separator or extension is used as given.
    pub fn puzzle(&self, name: &str) -> PathBuf {
        let given = Path::new(name);
        if given.components().count() > 1 || given.extension().is_some() {
            given.to_path_buf()
        } else {
            self.puzzles_dir()
                .join(name)
                .with_extension(crate::puzzle_file::PUZZLE_EXTENSION)
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = DataPaths::new("/data");
        assert_eq!(paths.word_list(), Path::new("/data/Lists/wordlist.txt"));
        assert_eq!(paths.puzzles_dir(), Path::new("/data/Crosswords"));
    }

    #[test]
    fn test_word_list_override() {
        let paths = DataPaths::new("/data").with_word_list("/tmp/words.txt");
        assert_eq!(paths.word_list(), Path::new("/tmp/words.txt"));
        assert_eq!(paths.puzzles_dir(), Path::new("/data/Crosswords"));
    }

    #[test]
    fn test_puzzle_names() {
        let paths = DataPaths::new("/data");
        assert_eq!(paths.puzzle("sunday"), Path::new("/data/Crosswords/sunday.cwd"));
        assert_eq!(paths.puzzle("sunday.cwd"), Path::new("sunday.cwd"));
        assert_eq!(paths.puzzle("elsewhere/sunday"), Path::new("elsewhere/sunday"));
    }

    #[test]
    fn test_default_is_current_dir() {
        assert_eq!(DataPaths::default().root(), Path::new("."));
    }
}
