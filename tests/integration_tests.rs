//! Integration tests for cryptogrid.
//!
//! These tests drive the library the way the editor does: load a saved puzzle, derive
//! constrained patterns from its crossings, search a word list with them, and write
//! the results back to disk.

use std::fs;
use std::path::{Path, PathBuf};

use cryptogrid::clue::{ClueKey, Direction, GridPoint};
use cryptogrid::config::DataPaths;
use cryptogrid::errors::ParseError;
use cryptogrid::format_spec::{
    comma_hyphen_permutations, enumerate_break_patterns, is_valid_specification, letter_patterns,
    DEFAULT_MAX_PIECES,
};
use cryptogrid::grid::{CrosswordGrid, EntryAssessment};
use cryptogrid::lexicon::Lexicon;
use cryptogrid::puzzle_file::{load_puzzle, most_recently_saved, parse_puzzle, render_puzzle, save_puzzle};
use cryptogrid::word_list::{MatchCount, SearchOutcome, ShapeIndex, TemplateQuery, WordList, MATCH_COUNT_CAP};
use tempfile::TempDir;

const SAMPLE_PUZZLE: &str = "tests/fixtures/sample.cwd";
const TEST_WORD_LIST: &str = "tests/fixtures/test_word_list.txt";

fn a(n: u32) -> ClueKey {
    ClueKey::new(Direction::Across, n)
}

fn d(n: u32) -> ClueKey {
    ClueKey::new(Direction::Down, n)
}

fn sample_text() -> String {
    fs::read_to_string(SAMPLE_PUZZLE).expect("Failed to read sample puzzle")
}

fn sample_grid() -> CrosswordGrid {
    parse_puzzle(&sample_text()).expect("Sample puzzle should parse")
}

fn test_word_list() -> WordList {
    WordList::parse_from_str(&fs::read_to_string(TEST_WORD_LIST).expect("Failed to read test word list"))
}

/// Copy the fixtures into a fresh data root laid out as `DataPaths` expects
fn data_root() -> (TempDir, DataPaths) {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    fs::create_dir_all(paths.word_list().parent().unwrap()).unwrap();
    fs::create_dir_all(paths.puzzles_dir()).unwrap();
    fs::copy(TEST_WORD_LIST, paths.word_list()).unwrap();
    fs::copy(SAMPLE_PUZZLE, paths.puzzle("sample")).unwrap();
    (dir, paths)
}

#[cfg(test)]
mod puzzle_files {
    use super::*;

    #[test]
    fn test_sample_round_trip() {
        let text = sample_text();
        let grid = sample_grid();
        assert_eq!(render_puzzle(&grid), text);
        assert_eq!(parse_puzzle(&render_puzzle(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_sample_contents() {
        let grid = sample_grid();
        assert_eq!((grid.width(), grid.height()), (5, 5));
        assert_eq!(grid.completion(), (5, 6));
        assert_eq!(grid.clue(a(5)).unwrap().format(), "2,2");
        assert_eq!(grid.clue(d(2)).unwrap().letters(), "ORBIT");
    }

    #[test]
    fn test_save_load_and_find_newest() {
        let (_dir, paths) = data_root();
        let path = paths.puzzle("sample");

        let mut grid = load_puzzle(&path).unwrap();
        grid.clear_clue(a(1)).unwrap();
        let copy = paths.puzzle("copy");
        save_puzzle(&copy, &grid).unwrap();

        assert_eq!(load_puzzle(&copy).unwrap(), grid);
        let newest = most_recently_saved(paths.puzzles_dir()).unwrap().unwrap();
        assert!(newest == copy || newest == path, "unexpected newest puzzle {}", newest.display());
    }

    #[test]
    fn test_truncated_file_fails_fast() {
        let text = sample_text().replacen("#....", "#..", 1);
        let err = parse_puzzle(&text).unwrap_err();
        assert!(matches!(*err, ParseError::RaggedSpecification { width: 5, cells: 23 }));
    }

    #[test]
    fn test_error_carries_line_number() {
        let text = sample_text().replace("D1%SOAP:4", "D1%SOAP");
        let err = parse_puzzle(&text).unwrap_err();
        assert!(matches!(*err, ParseError::MissingFormatSeparator { line_number: 5, .. }));
        assert!(err.display_detailed().contains("E008"));
    }
}

#[cfg(test)]
mod crossings {
    use super::*;

    #[test]
    fn test_complete_grid_has_no_conflicts() {
        let grid = sample_grid();
        for clue in grid.clues().filter(|clue| clue.is_complete()) {
            let conflicts = grid.crossing_conflicts_detected(clue.key(), clue.letters()).unwrap();
            assert!(conflicts.is_empty(), "{} conflicts with {conflicts:?}", clue.key());
        }
    }

    #[test]
    fn test_conflicting_proposal() {
        let grid = sample_grid();
        assert_eq!(grid.crossing_conflicts_detected(a(4), "EMBER").unwrap(), vec![d(1)]);
        assert_eq!(grid.crossing_conflicts_detected(d(2), "XXXXX").unwrap(), vec![a(1), a(4)]);
    }

    #[test]
    fn test_partial_clue_pattern() {
        let grid = sample_grid();
        assert_eq!(grid.unpatterned_word_constrained(a(5)).unwrap(), ".T.S");
        assert_eq!(grid.patterned_word_constrained(a(5)).unwrap(), ".T .S");
        assert_eq!(grid.assess_entry(a(5), "atms").unwrap(), EntryAssessment::Acceptable);
        assert_eq!(grid.assess_entry(a(5), "STIR").unwrap(), EntryAssessment::ConflictsWithPattern);
    }

    #[test]
    fn test_editing_cells_then_renumbering() {
        let mut grid = sample_grid();
        grid.toggle_block(GridPoint::new(3, 0), false).unwrap();
        grid.locate_indices_preserving_content();

        // A1 shrinks and loses its letters; numbering is unchanged
        assert_eq!(grid.clue(a(1)).unwrap().len(), 3);
        assert_eq!(grid.clue(a(1)).unwrap().letters(), "...");
        assert_eq!(grid.clue(d(1)).unwrap().letters(), "SOAP");
        assert_eq!(grid.clue(a(4)).unwrap().letters(), "AMBER");
        assert_eq!(grid.index(GridPoint::new(2, 0)), Some(2));
        assert_eq!(grid.index(GridPoint::new(3, 0)), None);
    }
}

#[cfg(test)]
mod word_search {
    use super::*;

    #[test]
    fn test_fixture_is_sorted() {
        let report = test_word_list().source_health();
        assert!(report.is_healthy(), "{report}");
        assert_eq!(report.count, 18);
    }

    #[test]
    fn test_search_with_grid_pattern() {
        let mut grid = sample_grid();
        grid.clear_clue(a(1)).unwrap();
        let pattern = grid.patterned_word_constrained(a(1)).unwrap();
        assert_eq!(pattern, "S.O.");

        let list = test_word_list();
        let matches = list.template_matches(&pattern, &TemplateQuery::default());
        assert_eq!(matches, vec!["spot", "stop"]);
        for word in &matches {
            let letters = cryptogrid::word_pattern::constrain(word);
            assert_eq!(grid.assess_entry(a(1), &letters).unwrap(), EntryAssessment::Acceptable);
        }
    }

    #[test]
    fn test_anagrams_include_self() {
        let list = test_word_list();
        for word in list.entries() {
            assert!(list.anagrams_of(word).contains(word), "{word} missing from its own anagrams");
        }
    }

    #[test]
    fn test_reversible_and_capitalized() {
        let list = test_word_list();
        let reversible = TemplateQuery { only_reversible: true, ..TemplateQuery::default() };
        assert_eq!(list.template_matches("....", &reversible), vec!["evil", "live", "pots", "spot", "stop", "tops"]);

        let capitals = TemplateQuery { only_capitalized: true, ..TemplateQuery::default() };
        assert_eq!(list.template_matches("....", &capitals), vec!["Alan", "Moon", "Nice"]);
    }

    #[test]
    fn test_counts() {
        let list = test_word_list();
        let query = TemplateQuery::default();
        assert_eq!(list.template_match_count("....", &query, MATCH_COUNT_CAP), MatchCount::Exact(13));
        assert_eq!(list.template_match_count("....", &query, 10).to_string(), "10+ matches");
    }

    #[test]
    fn test_shape_index_matches_scan() {
        let list = test_word_list();
        let index = ShapeIndex::build(&list);
        let query = TemplateQuery { extras: "O".to_string(), ..TemplateQuery::default() };
        for pattern in ["....", "s.o.", "... .....", "....."] {
            assert_eq!(index.template_matches(pattern, &query), list.template_matches(pattern, &query));
        }
    }
}

#[cfg(test)]
mod lexicon_file {
    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn test_insertion_keeps_order_and_counts() {
        let (_dir, paths) = data_root();
        let lexicon = Lexicon::new(paths.word_list());

        let before = lexicon.source_health().unwrap();
        for word in ["orbit", "Amber", "zebra", "aardvark", "ice lolly"] {
            lexicon.insert_sorted(word).unwrap();
        }
        let after = lexicon.source_health().unwrap();

        assert!(before.is_healthy());
        assert!(after.is_healthy(), "{after}");
        assert_eq!(after.count, before.count + 5);

        let lines = read_lines(lexicon.path());
        assert_eq!(lines.first().map(String::as_str), Some("aardvark"));
        assert_eq!(lines.last().map(String::as_str), Some("zebra"));
    }

    #[test]
    fn test_found_reports() {
        let (_dir, paths) = data_root();
        let lexicon = Lexicon::new(paths.word_list());
        assert_eq!(lexicon.search_report("Moon").unwrap().outcome, SearchOutcome::FoundExact);
        assert_eq!(lexicon.search_report("moon").unwrap().outcome, SearchOutcome::FoundDifferentlyCased);
        assert_eq!(lexicon.search_report("sun").unwrap().outcome, SearchOutcome::NotFound);
        assert!(lexicon.contains("ICE CREAM").unwrap());
    }

    #[test]
    fn test_phrase_searches() {
        let (_dir, paths) = data_root();
        let lexicon = Lexicon::new(paths.word_list());
        assert_eq!(lexicon.individual_word_matches("l.ve-e.il").unwrap(), vec!["live e.il", "l.ve evil"]);
        assert!(lexicon.unspaced_matches("ice cr.am").unwrap().is_empty());
        assert_eq!(lexicon.template_matches("ice-cr.am", &TemplateQuery::default()).unwrap(), vec!["ice cream", "ice-cream"]);
    }

    #[test]
    fn test_missing_word_list() {
        let dir = TempDir::new().unwrap();
        let lexicon = Lexicon::new(PathBuf::from(dir.path()).join("Lists").join("wordlist.txt"));
        assert_eq!(lexicon.source_health().unwrap_err().code(), "L001");
    }
}

#[cfg(test)]
mod formats {
    use super::*;

    #[test]
    fn test_validity_examples() {
        assert!(is_valid_specification("5,3-2", 10));
        assert!(!is_valid_specification("5,3-2", 9));
        assert!(!is_valid_specification("5,0-3", 8));
    }

    #[test]
    fn test_four_letter_breakdowns() {
        let patterns = enumerate_break_patterns(4, DEFAULT_MAX_PIECES);
        assert_eq!(patterns.len(), 7);
        assert_eq!(patterns.iter().filter(|p| p.len() == 1).count(), 3);
        assert_eq!(patterns.iter().filter(|p| p.len() == 2).count(), 3);
        assert_eq!(patterns.iter().filter(|p| p.len() == 3).count(), 1);
        assert_eq!(letter_patterns(4, DEFAULT_MAX_PIECES)[0], "1,3");
    }

    #[test]
    fn test_every_breakdown_is_valid() {
        for length in 2..=12 {
            for spec in letter_patterns(length, DEFAULT_MAX_PIECES) {
                for variant in comma_hyphen_permutations(&spec) {
                    assert!(is_valid_specification(&variant, length), "{variant} for {length}");
                }
            }
        }
    }

    #[test]
    fn test_format_applied_to_grid() {
        let mut grid = sample_grid();
        grid.set_clue_format(a(4), "2-3").unwrap();
        assert_eq!(grid.patterned_word_constrained(a(4)).unwrap(), "AM-BER");
        assert!(grid.set_clue_format(a(4), "2-2").is_err());
    }
}
