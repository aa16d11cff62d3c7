use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use cryptogrid::clue::{ClueKey, GridPoint};
use cryptogrid::config::DataPaths;
use cryptogrid::errors::{GridError, LexiconError, ParseError, PuzzleFileError};
use cryptogrid::format_spec::{
    comma_hyphen_permutations, enumerate_break_patterns, render_lengths, render_lengths_spaced,
    DEFAULT_MAX_PIECES,
};
use cryptogrid::grid::CrosswordGrid;
use cryptogrid::lexicon::Lexicon;
use cryptogrid::puzzle_file::{load_puzzle, most_recently_saved, save_puzzle};
use cryptogrid::word_list::{SearchOutcome, TemplateQuery, WordList, MATCH_COUNT_CAP};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Cryptic crossword grid editor and word-list search
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Data root holding Lists/wordlist.txt and Crosswords/*.cwd [default: $CRYPTOGRID_DATA or .]
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Word list to use instead of <data-dir>/Lists/wordlist.txt
    #[arg(long, global = true, value_name = "FILE")]
    word_list: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a puzzle's grid and clue listing (the newest saved puzzle if none is named)
    Show {
        puzzle: Option<String>,
        /// Mark whether each complete answer is in the word list
        #[arg(long)]
        check: bool,
    },
    /// Create an empty puzzle
    New {
        puzzle: String,
        width: usize,
        height: usize,
    },
    /// Flip a cell between black and white, then renumber
    Toggle {
        puzzle: String,
        x: usize,
        y: usize,
        /// Also flip the cell at the rotationally symmetric position
        #[arg(short, long)]
        symmetric: bool,
    },
    /// Enter letters for a clue ('.' for unknown)
    Fill {
        puzzle: String,
        clue: ClueKey,
        letters: String,
        /// Commit even if complete crossing clues disagree
        #[arg(short, long)]
        force: bool,
    },
    /// Set a clue's format, e.g. 5,3-2
    Format {
        puzzle: String,
        clue: ClueKey,
        spec: String,
    },
    /// Clear one clue's letters, or every clue's
    Clear {
        puzzle: String,
        clue: Option<ClueKey>,
    },
    /// List word-list entries matching a pattern ('.' for an unknown letter)
    Search(SearchArgs),
    /// List word-list entries that are anagrams of the given letters
    Anagrams { letters: String },
    /// Check that the word list is in sorted order
    Health,
    /// Report whether a word is in the word list
    Find { word: String },
    /// Add a word to the word list at its sorted position
    Add { word: String },
    /// List the ways to break a clue length into words
    Formats {
        length: usize,
        #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_PIECES)]
        max_pieces: usize,
        /// Also list every comma/hyphen rendering of each breakdown
        #[arg(long)]
        variants: bool,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    pattern: String,
    /// Only proper nouns (entries starting with a capital)
    #[arg(short, long)]
    capitalized: bool,
    /// Only entries whose reversal also matches
    #[arg(short, long)]
    reversible: bool,
    /// Letters that must appear among the unknown positions
    #[arg(short, long, default_value = "")]
    extras: String,
    /// Print only the number of matches
    #[arg(long)]
    count: bool,
    /// Search each word of a multi-word pattern separately
    #[arg(long, conflicts_with = "whole")]
    each: bool,
    /// Search a multi-word pattern as one unbroken word
    #[arg(long)]
    whole: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Letters for {key} conflict with {conflicts}")]
    CrossingConflict { key: ClueKey, conflicts: String },

    #[error("No saved puzzles in {}", dir.display())]
    NoSavedPuzzle { dir: PathBuf },

    #[error("{} already exists", path.display())]
    PuzzleExists { path: PathBuf },

    #[error("\"{word}\" is already in the word list")]
    AlreadyPresent { word: String },
}

/// Entry point of the cryptogrid CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    cryptogrid::log::init_logger(cryptogrid::log::debug_requested());

    if let Err(e) = try_main() {
        eprintln!("Error: {}", detailed(e.as_ref()));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prefer the coded, detailed rendering of our own error types.
fn detailed(e: &(dyn std::error::Error + 'static)) -> String {
    if let Some(err) = e.downcast_ref::<PuzzleFileError>() {
        err.display_detailed()
    } else if let Some(err) = e.downcast_ref::<LexiconError>() {
        err.display_detailed()
    } else if let Some(err) = e.downcast_ref::<GridError>() {
        err.display_detailed()
    } else if let Some(err) = e.downcast_ref::<ParseError>() {
        err.display_detailed()
    } else {
        e.to_string()
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut paths = cli.data_dir.map_or_else(DataPaths::from_env, DataPaths::new);
    if let Some(word_list) = cli.word_list {
        paths = paths.with_word_list(word_list);
    }
    let lexicon = Lexicon::new(paths.word_list());

    match cli.command {
        Command::Show { puzzle, check } => {
            let path = match puzzle {
                Some(name) => paths.puzzle(&name),
                None => newest_puzzle(&paths)?,
            };
            let grid = load_puzzle(&path)?;
            let words = if check { Some(lexicon.load()?) } else { None };
            show(&grid, words.as_ref())?;
        }
        Command::New { puzzle, width, height } => {
            let path = paths.puzzle(&puzzle);
            if path.exists() {
                return Err(CliError::PuzzleExists { path }.into());
            }
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let grid = CrosswordGrid::blank(width, height)?;
            save_puzzle(&path, &grid)?;
            print!("{grid}");
        }
        Command::Toggle { puzzle, x, y, symmetric } => {
            let path = paths.puzzle(&puzzle);
            let mut grid = load_puzzle(&path)?;
            grid.toggle_block(GridPoint::new(x, y), symmetric)?;
            grid.locate_indices_preserving_content();
            save_puzzle(&path, &grid)?;
            print!("{grid}");
        }
        Command::Fill { puzzle, clue, letters, force } => {
            let path = paths.puzzle(&puzzle);
            let mut grid = load_puzzle(&path)?;
            let conflicts = grid.crossing_conflicts_detected(clue, &letters)?;
            if !conflicts.is_empty() {
                let listed = conflicts.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                if !force {
                    return Err(CliError::CrossingConflict { key: clue, conflicts: listed }.into());
                }
                eprintln!("⚠️  Overriding crossings: {listed}");
            }
            grid.set_clue_letters(clue, &letters)?;
            save_puzzle(&path, &grid)?;
            println!("{clue}: {}", grid.patterned_word_constrained(clue)?);
        }
        Command::Format { puzzle, clue, spec } => {
            let path = paths.puzzle(&puzzle);
            let mut grid = load_puzzle(&path)?;
            grid.set_clue_format(clue, &spec)?;
            save_puzzle(&path, &grid)?;
            println!("{clue}: {} {}", grid.patterned_word_constrained(clue)?, grid.clue(clue)?.enumeration());
        }
        Command::Clear { puzzle, clue } => {
            let path = paths.puzzle(&puzzle);
            let mut grid = load_puzzle(&path)?;
            match clue {
                Some(key) => grid.clear_clue(key)?,
                None => grid.clear_all_letters(),
            }
            save_puzzle(&path, &grid)?;
        }
        Command::Search(args) => search(&lexicon, &args)?,
        Command::Anagrams { letters } => {
            for word in lexicon.anagrams_of(&letters)? {
                println!("{word}");
            }
        }
        Command::Health => {
            let report = lexicon.source_health()?;
            println!("{report}");
        }
        Command::Find { word } => {
            let report = lexicon.search_report(&word)?;
            println!("{} ({} words searched)", report.outcome, report.count);
        }
        Command::Add { word } => {
            if lexicon.search_report(&word)?.outcome == SearchOutcome::FoundExact {
                return Err(CliError::AlreadyPresent { word }.into());
            }
            let count = lexicon.insert_sorted(&word)?;
            println!("Added \"{}\"; the list now holds {count} words", word.trim());
        }
        Command::Formats { length, max_pieces, variants } => {
            for breaks in enumerate_break_patterns(length, max_pieces) {
                if variants {
                    for rendering in comma_hyphen_permutations(&render_lengths(length, &breaks)) {
                        println!("{rendering}");
                    }
                } else {
                    println!("{}", render_lengths_spaced(length, &breaks));
                }
            }
        }
    }

    Ok(())
}

fn newest_puzzle(paths: &DataPaths) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = paths.puzzles_dir();
    match most_recently_saved(&dir)? {
        Some(path) => Ok(path),
        None => Err(CliError::NoSavedPuzzle { dir }.into()),
    }
}

fn show(grid: &CrosswordGrid, words: Option<&WordList>) -> Result<(), GridError> {
    print!("{grid}");

    let sections = [("Across", grid.clues_across().collect::<Vec<_>>()), ("Down", grid.clues_down().collect())];
    for (heading, clues) in sections {
        println!("\n{heading}");
        for clue in clues {
            let pattern = grid.patterned_word_constrained(clue.key())?;
            let mark = match (words, clue.is_complete()) {
                (Some(list), true) if list.contains(&pattern) => " ✓",
                (Some(_), true) => " ✗ not in word list",
                (_, true) => " *",
                (_, false) => "",
            };
            println!("{:>3}. {pattern} {}{mark}", clue.number(), clue.enumeration());
        }
    }

    let (complete, total) = grid.completion();
    eprintln!("\n{complete}/{total} clues complete");
    Ok(())
}

fn search(lexicon: &Lexicon, args: &SearchArgs) -> Result<(), LexiconError> {
    let query = TemplateQuery {
        only_capitalized: args.capitalized,
        only_reversible: args.reversible,
        extras: args.extras.clone(),
    };

    if args.count {
        println!("{}", lexicon.template_match_count(&args.pattern, &query, MATCH_COUNT_CAP)?);
        return Ok(());
    }

    let matches = if args.each {
        lexicon.individual_word_matches(&args.pattern)?
    } else if args.whole {
        lexicon.unspaced_matches(&args.pattern)?
    } else {
        lexicon.template_matches(&args.pattern, &query)?
    };

    for word in &matches {
        println!("{word}");
    }
    eprintln!("Matches {}", matches.len());
    Ok(())
}
