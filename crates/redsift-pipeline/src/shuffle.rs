use std::path::Path;

use rand::seq::SliceRandom;

use crate::error::PipelineError;
use crate::table::Table;

/// Returns a copy of `table` with its rows in uniformly random order.
#[must_use]
pub fn shuffle_rows(table: &Table) -> Table {
    let mut rows = table.rows.clone();
    rows.shuffle(&mut rand::rng());
    Table {
        columns: table.columns.clone(),
        rows,
    }
}

/// Loads `src`, shuffles its rows, and writes them to `dest`.
///
/// # Errors
///
/// Returns [`PipelineError::Persistence`] if `src` cannot be read or `dest`
/// cannot be written.
pub fn shuffle_file(src: &Path, dest: &Path) -> Result<usize, PipelineError> {
    let shuffled = shuffle_rows(&Table::load(src)?);
    shuffled.save(dest)?;
    Ok(shuffled.len())
}
