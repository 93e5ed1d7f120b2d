//! Cell values and ordered records.

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Text form of [`Cell::Timestamp`] in stage files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One table cell. `Empty` is a gap: the column exists but the row has no value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Re-types one column of raw fields read back from a stage file.
    ///
    /// The column takes the first of integer, float, bool, or timestamp that
    /// every non-empty field parses as; otherwise every field stays text.
    /// Numbers and timestamps only match their canonical rendering, so a typed
    /// field writes back byte for byte and `"007"` or `"123e4"` stay text.
    /// Empty fields are gaps.
    #[must_use]
    pub fn infer_column(raw: &[&str]) -> Vec<Cell> {
        let kind = ColumnKind::TYPED.into_iter().find(|kind| {
            raw.iter()
                .filter(|field| !field.is_empty())
                .all(|field| kind.parse(field).is_some())
        });

        raw.iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    kind.and_then(|kind| kind.parse(field))
                        .unwrap_or_else(|| Cell::Text((*field).to_string()))
                }
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Timestamp,
}

impl ColumnKind {
    const TYPED: [ColumnKind; 4] = [
        ColumnKind::Integer,
        ColumnKind::Float,
        ColumnKind::Bool,
        ColumnKind::Timestamp,
    ];

    fn parse(self, raw: &str) -> Option<Cell> {
        let cell = match self {
            ColumnKind::Integer => Cell::Integer(raw.parse().ok()?),
            ColumnKind::Float => Cell::Float(raw.parse().ok().filter(|_| looks_like_float(raw))?),
            // Any case, as other tools write them.
            ColumnKind::Bool => return parse_bool(raw).map(Cell::Bool),
            ColumnKind::Timestamp => {
                Cell::Timestamp(NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?)
            }
        };
        (cell.to_string() == raw).then_some(cell)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// `str::parse::<f64>` also accepts "inf" and "NaN"; those stay text.
fn looks_like_float(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" so whole floats reload as floats.
            Cell::Float(v) => write!(f, "{v:?}"),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Integer(v) => serializer.serialize_i64(*v),
            Cell::Float(v) => serializer.serialize_f64(*v),
            Cell::Bool(v) => serializer.serialize_bool(*v),
            Cell::Timestamp(ts) => ts.serialize(serializer),
        }
    }
}

/// An ordered set of named cells; keys keep their first insertion position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Cell) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Extend<(String, Cell)> for Record {
    fn extend<I: IntoIterator<Item = (String, Cell)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Cell);
    type IntoIter = std::vec::IntoIter<(String, Cell)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 24)
            .and_then(|d| d.and_hms_opt(10, 37, 3))
            .expect("valid timestamp")
    }

    fn column(raw: &[&str]) -> Vec<Cell> {
        Cell::infer_column(raw)
    }

    #[test]
    fn uniform_columns_recover_their_type() {
        assert_eq!(
            column(&["42", "", "-7"]),
            vec![Cell::Integer(42), Cell::Empty, Cell::Integer(-7)]
        );
        assert_eq!(
            column(&["0.95", "1.0"]),
            vec![Cell::Float(0.95), Cell::Float(1.0)]
        );
        assert_eq!(
            column(&["True", "false"]),
            vec![Cell::Bool(true), Cell::Bool(false)]
        );
        assert_eq!(column(&["2021-03-24 10:37:03"]), vec![Cell::Timestamp(ts())]);
        assert_eq!(column(&["Test Post"]), vec![Cell::Text("Test Post".into())]);
        assert_eq!(column(&["", ""]), vec![Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn mixed_column_stays_text() {
        assert_eq!(
            column(&["123e4", "abc123", "42"]),
            vec![
                Cell::Text("123e4".into()),
                Cell::Text("abc123".into()),
                Cell::Text("42".into()),
            ]
        );
    }

    #[test]
    fn non_canonical_numbers_stay_text() {
        assert_eq!(column(&["007"]), vec![Cell::Text("007".into())]);
        assert_eq!(column(&["123e4"]), vec![Cell::Text("123e4".into())]);
        assert_eq!(column(&["+5"]), vec![Cell::Text("+5".into())]);
        assert_eq!(
            column(&["10", "0.5"]),
            vec![Cell::Text("10".into()), Cell::Text("0.5".into())]
        );
    }

    #[test]
    fn special_float_words_stay_text() {
        assert_eq!(column(&["inf"]), vec![Cell::Text("inf".into())]);
        assert_eq!(column(&["NaN"]), vec![Cell::Text("NaN".into())]);
        assert_eq!(column(&["e"]), vec![Cell::Text("e".into())]);
    }

    #[test]
    fn display_round_trips_through_infer_column() {
        let cells = [
            Cell::Integer(10),
            Cell::Float(1.0),
            Cell::Bool(true),
            Cell::Timestamp(ts()),
            Cell::Text("hello world".into()),
        ];
        for cell in cells {
            assert_eq!(column(&[&cell.to_string(), ""]), vec![cell, Cell::Empty]);
        }
    }

    #[test]
    fn insert_replaces_without_moving_key() {
        let mut record = Record::new();
        record.insert("a", Cell::Integer(1));
        record.insert("b", Cell::Integer(2));
        record.insert("a", Cell::Integer(3));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Cell::Integer(3)));
    }

    #[test]
    fn record_serializes_as_ordered_object() {
        let mut record = Record::new();
        record.insert("source_group", Cell::Text("testsub".into()));
        record.insert("score", Cell::Integer(10));
        record.insert("author", Cell::Empty);
        record.insert("created_at", Cell::Timestamp(ts()));
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"source_group":"testsub","score":10,"author":null,"created_at":"2021-03-24T10:37:03"}"#
        );
    }
}
