//! Row-oriented stage files.

use std::fs;
use std::path::Path;

use crate::error::PipelineError;
use crate::record::{Cell, Record};

/// A fully materialized table with a fixed column order.
///
/// Every row has exactly one cell per column; a record lacking a column holds
/// [`Cell::Empty`] there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table whose columns are the union of record keys in order of
    /// first appearance.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as records, skipping gaps.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Record::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    if !cell.is_empty() {
                        record.insert(column.clone(), cell.clone());
                    }
                }
                record
            })
            .collect()
    }

    pub fn lowercase_columns(&mut self) {
        for column in &mut self.columns {
            *column = column.to_lowercase();
        }
    }

    pub fn map_cells<F: FnMut(Cell) -> Cell>(&mut self, mut f: F) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                *cell = f(std::mem::replace(cell, Cell::Empty));
            }
        }
    }

    /// Overwrites `path` with a header row and one row per table row.
    ///
    /// A table without columns is written as an empty file. Parent directories
    /// are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Persistence`] on any I/O or encoding failure.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PipelineError::persistence(path, e))?;
        }

        let mut writer =
            csv::Writer::from_path(path).map_err(|e| PipelineError::persistence(path, e))?;
        if !self.columns.is_empty() {
            writer
                .write_record(&self.columns)
                .map_err(|e| PipelineError::persistence(path, e))?;
            for row in &self.rows {
                writer
                    .write_record(row.iter().map(ToString::to_string))
                    .map_err(|e| PipelineError::persistence(path, e))?;
            }
        }
        writer.flush().map_err(|e| PipelineError::persistence(path, e))?;

        tracing::debug!(path = %path.display(), rows = self.rows.len(), "table saved");
        Ok(())
    }

    /// Reads a stage file written by [`Table::save`], re-typing each column
    /// with [`Cell::infer_column`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Persistence`] if the file is missing,
    /// unreadable, or has rows whose width differs from the header.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| PipelineError::persistence(path, e))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| PipelineError::persistence(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let raw = reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, _>>()
            .map_err(|e| PipelineError::persistence(path, e))?;

        let mut rows: Vec<Vec<Cell>> = vec![Vec::with_capacity(columns.len()); raw.len()];
        for index in 0..columns.len() {
            let fields: Vec<&str> = raw
                .iter()
                .map(|record| record.get(index).unwrap_or_default())
                .collect();
            for (row, cell) in rows.iter_mut().zip(Cell::infer_column(&fields)) {
                row.push(cell);
            }
        }

        Ok(Self { columns, rows })
    }
}

/// Saves `records` as a table at `path`, returning the number of rows written.
///
/// # Errors
///
/// Returns [`PipelineError::Persistence`] if the file cannot be written.
pub fn save_records(records: &[Record], path: &Path) -> Result<usize, PipelineError> {
    let table = Table::from_records(records);
    table.save(path)?;
    Ok(table.len())
}

/// Loads `src`, lowercases every column name, applies `f` to every cell, and
/// writes the result to `dest`. Returns the number of rows written.
///
/// # Errors
///
/// Returns [`PipelineError::Persistence`] if `src` cannot be read or `dest`
/// cannot be written.
pub fn map_columns<F: FnMut(Cell) -> Cell>(
    src: &Path,
    dest: &Path,
    f: F,
) -> Result<usize, PipelineError> {
    let mut table = Table::load(src)?;
    table.lowercase_columns();
    table.map_cells(f);
    table.save(dest)?;
    Ok(table.len())
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
