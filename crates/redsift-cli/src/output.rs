use redsift_pipeline::Record;

const SEPARATOR_WIDTH: usize = 50;

/// One `key: value` line per field followed by a separator line.
pub(crate) fn format_record(record: &Record) -> String {
    let mut out = String::new();
    for (key, cell) in record.iter() {
        out.push_str(&format!("{key}: {cell}\n"));
    }
    out.push('\n');
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push_str("\n\n");
    out
}
