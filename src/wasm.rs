use crate::errors::ParseError;
use crate::format_spec::{letter_patterns, DEFAULT_MAX_PIECES};
use crate::grid::CrosswordGrid;
use crate::log::init_logger;
use crate::word_list::{TemplateQuery, WordList};
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E003", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<Box<ParseError>> for WasmError {
    fn from(e: Box<ParseError>) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(e: serde_wasm_bindgen::Error) -> JsValue {
    WasmError {
        code: "WASM002".to_string(),
        message: format!("serialization failed: {e}"),
        description: "Failed to serialize result".to_string(),
        details: "The result could not be converted to JavaScript format.".to_string(),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

fn words_from_js(words: JsValue) -> Result<WordList, JsValue> {
    let entries: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word-list format".to_string(),
        details: "The words parameter must be a JavaScript array of strings.".to_string(),
        help: Some("Pass the word list as an array, e.g. ['able', 'bale', 'steam']".to_string()),
    })?;
    Ok(WordList::from_entries(entries))
}

/// Initialize cryptogrid logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct ClueSummary {
    key: String,
    number: u32,
    direction: &'static str,
    x: usize,
    y: usize,
    length: usize,
    pattern: String,
    enumeration: String,
    complete: bool,
}

#[derive(serde::Serialize)]
struct GridSummary {
    width: usize,
    height: usize,
    rows: Vec<String>,
    clues: Vec<ClueSummary>,
}

/// JS entry: (spec: string) -> { width, height, rows, clues }
#[wasm_bindgen]
pub fn describe_grid(spec: &str) -> Result<JsValue, JsValue> {
    let grid = CrosswordGrid::from_specification(spec).map_err(WasmError::from)?;

    let clues = grid
        .clues()
        .map(|clue| ClueSummary {
            key: clue.key().to_string(),
            number: clue.number(),
            direction: clue.direction().name(),
            x: clue.start().x,
            y: clue.start().y,
            length: clue.len(),
            pattern: clue.patterned_word_intrinsic(),
            enumeration: clue.enumeration(),
            complete: clue.is_complete(),
        })
        .collect();

    let summary = GridSummary {
        width: grid.width(),
        height: grid.height(),
        rows: grid.to_string().lines().map(String::from).collect(),
        clues,
    };

    to_value(&summary).map_err(serialization_error)
}

/// JS entry: (words: string[], pattern, onlyCapitalized, onlyReversible, extras) -> string[]
#[wasm_bindgen]
pub fn template_matches_wasm(
    words: JsValue,
    pattern: &str,
    only_capitalized: bool,
    only_reversible: bool,
    extras: &str,
) -> Result<JsValue, JsValue> {
    let list = words_from_js(words)?;
    let query = TemplateQuery {
        only_capitalized,
        only_reversible,
        extras: extras.to_string(),
    };
    to_value(&list.template_matches(pattern, &query)).map_err(serialization_error)
}

/// JS entry: (words: string[], letters: string) -> string[]
#[wasm_bindgen]
pub fn anagrams_wasm(words: JsValue, letters: &str) -> Result<JsValue, JsValue> {
    let list = words_from_js(words)?;
    to_value(&list.anagrams_of(letters)).map_err(serialization_error)
}

/// JS entry: (length: number) -> string[] of comma-separated word lengths
#[wasm_bindgen]
pub fn letter_patterns_wasm(length: usize) -> Result<JsValue, JsValue> {
    to_value(&letter_patterns(length, DEFAULT_MAX_PIECES)).map_err(serialization_error)
}
