//! Text cleaning applied to every cell of the cleaned stage.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Cell;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Normalizes one cell. Only text is changed; every other cell passes through.
#[must_use]
pub fn normalize(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => Cell::Text(normalize_text(&s)),
        other => other,
    }
}

/// Lowercases `s`, drops ASCII punctuation other than `_`, then drops any
/// remaining character that is neither a word character nor whitespace.
///
/// Whitespace runs, digits, and underscores are kept as-is.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    let lowered: String = s
        .to_lowercase()
        .chars()
        .filter(|c| *c == '_' || !c.is_ascii_punctuation())
        .collect();
    NON_WORD.replace_all(&lowered, "").into_owned()
}
