use std::fs;

use tempfile::TempDir;

use super::*;

fn record(pairs: &[(&str, Cell)]) -> Record {
    let mut record = Record::new();
    for (key, value) in pairs {
        record.insert(*key, value.clone());
    }
    record
}

fn sample() -> Vec<Record> {
    vec![
        record(&[
            ("source_group", Cell::Text("testsub".into())),
            ("Title", Cell::Text("First Post!".into())),
            ("score", Cell::Integer(10)),
            ("author", Cell::Text("alice".into())),
        ]),
        record(&[
            ("source_group", Cell::Text("testsub".into())),
            ("Title", Cell::Text("Second, post".into())),
            ("score", Cell::Integer(3)),
        ]),
    ]
}

#[test]
fn columns_are_union_in_first_appearance_order() {
    let records = vec![
        record(&[("a", Cell::Integer(1))]),
        record(&[("b", Cell::Integer(2)), ("a", Cell::Integer(3))]),
    ];
    let table = Table::from_records(&records);
    assert_eq!(table.columns(), ["a", "b"]);
    assert_eq!(table.rows()[0], vec![Cell::Integer(1), Cell::Empty]);
    assert_eq!(table.rows()[1], vec![Cell::Integer(3), Cell::Integer(2)]);
}

#[test]
fn save_writes_header_and_gaps_as_empty_fields() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("raw.csv");

    let written = save_records(&sample(), &path).expect("save");

    assert_eq!(written, 2);
    let text = fs::read_to_string(&path).expect("read back");
    assert_eq!(
        text,
        "source_group,Title,score,author\n\
         testsub,First Post!,10,alice\n\
         testsub,\"Second, post\",3,\n"
    );
}

#[test]
fn gap_round_trips_as_empty_cell() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("raw.csv");
    save_records(&sample(), &path).expect("save");

    let table = Table::load(&path).expect("load");

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1][3], Cell::Empty);
    assert_eq!(table.rows()[0][2], Cell::Integer(10));
    let records = table.to_records();
    assert!(!records[1].contains_key("author"));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested/data/raw.csv");
    save_records(&sample(), &path).expect("save");
    assert!(path.exists());
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("raw.csv");
    save_records(&sample(), &path).expect("first save");
    save_records(&sample()[..1], &path).expect("second save");

    let table = Table::load(&path).expect("load");
    assert_eq!(table.len(), 1);
}

#[test]
fn empty_table_saves_as_empty_file_and_loads_empty() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("empty.csv");

    assert_eq!(save_records(&[], &path).expect("save"), 0);
    assert_eq!(fs::read_to_string(&path).expect("read back"), "");

    let table = Table::load(&path).expect("load");
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
}

#[test]
fn load_missing_file_is_persistence_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.csv");

    let err = Table::load(&path).unwrap_err();
    assert!(matches!(err, PipelineError::Persistence { path: ref p, .. } if *p == path));
}

#[test]
fn load_ragged_rows_is_persistence_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "a,b\n1,2,3\n").expect("write");

    assert!(matches!(
        Table::load(&path),
        Err(PipelineError::Persistence { .. })
    ));
}

#[test]
fn map_columns_lowercases_headers_and_maps_cells() {
    let dir = TempDir::new().expect("tempdir");
    let src = dir.path().join("raw.csv");
    let dest = dir.path().join("cleaned.csv");
    save_records(&sample(), &src).expect("save");

    let rows = map_columns(&src, &dest, crate::normalize::normalize).expect("map");

    assert_eq!(rows, 2);
    let cleaned = Table::load(&dest).expect("load cleaned");
    assert_eq!(cleaned.columns(), ["source_group", "title", "score", "author"]);
    assert_eq!(cleaned.rows()[0][1], Cell::Text("first post".into()));
    assert_eq!(cleaned.rows()[1][1], Cell::Text("second post".into()));
    assert_eq!(cleaned.rows()[0][2], Cell::Integer(10));

    let raw = Table::load(&src).expect("raw untouched");
    assert_eq!(raw.columns()[1], "Title");
}

#[test]
fn cleaning_keeps_number_like_text_verbatim() {
    let dir = TempDir::new().expect("tempdir");
    let src = dir.path().join("raw.csv");
    let dest = dir.path().join("cleaned.csv");
    let records = vec![
        record(&[
            ("external_id", Cell::Text("123e4".into())),
            ("title", Cell::Text("007".into())),
        ]),
        record(&[
            ("external_id", Cell::Text("abc123".into())),
            ("title", Cell::Text("Hello".into())),
        ]),
    ];
    save_records(&records, &src).expect("save");

    map_columns(&src, &dest, crate::normalize::normalize).expect("map");

    let text = fs::read_to_string(&dest).expect("read cleaned");
    assert_eq!(text, "external_id,title\n123e4,007\nabc123,hello\n");
}

#[test]
fn lone_number_like_text_is_not_reformatted() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("raw.csv");
    save_records(
        &[record(&[
            ("external_id", Cell::Text("123e4".into())),
            ("title", Cell::Text("007".into())),
        ])],
        &path,
    )
    .expect("save");

    let table = Table::load(&path).expect("load");

    assert_eq!(
        table.rows()[0],
        vec![Cell::Text("123e4".into()), Cell::Text("007".into())]
    );
}

#[test]
fn save_load_save_is_byte_identical() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let created = chrono::NaiveDate::from_ymd_opt(2021, 3, 24)
        .and_then(|d| d.and_hms_opt(10, 37, 3))
        .expect("valid timestamp");
    let records = vec![
        record(&[
            ("title", Cell::Text("007".into())),
            ("score", Cell::Integer(10)),
            ("upvote_ratio", Cell::Float(1.0)),
            ("over_18", Cell::Bool(false)),
            ("created_at", Cell::Timestamp(created)),
        ]),
        record(&[
            ("title", Cell::Text("2.50".into())),
            ("score", Cell::Integer(-3)),
            ("upvote_ratio", Cell::Float(0.95)),
        ]),
    ];
    save_records(&records, &first).expect("first save");

    Table::load(&first)
        .expect("load")
        .save(&second)
        .expect("second save");

    assert_eq!(
        fs::read_to_string(&first).expect("read first"),
        fs::read_to_string(&second).expect("read second")
    );
    let reloaded = Table::load(&second).expect("reload");
    assert_eq!(reloaded.rows()[0][1], Cell::Integer(10));
    assert_eq!(reloaded.rows()[1][2], Cell::Float(0.95));
    assert_eq!(reloaded.rows()[0][4], Cell::Timestamp(created));
}
