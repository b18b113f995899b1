//! Text-only tabular data: an ordered header plus ordered rows of cells.
//!
//! Cells are never type-coerced. Dates and floating point parameters pass
//! through byte for byte.

use std::collections::{HashMap, HashSet};
use std::io;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: expected {expected} fields, saw {found}")]
    RaggedRow { line: u64, expected: usize, found: usize },
    #[error("cannot insert {name}, already exists")]
    DuplicateColumn { name: String },
    #[error("cannot insert at column {index}, table has {len} columns")]
    InsertOutOfBounds { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Every row must be exactly as wide as the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(TableError::RaggedRow {
                line: i as u64 + 2,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Table { columns, rows })
    }

    /// A table holding exactly one row.
    pub fn single_row<C: Into<String>, V: Into<String>>(cells: impl IntoIterator<Item = (C, V)>) -> Self {
        let (columns, row): (Vec<String>, Vec<String>) =
            cells.into_iter().map(|(c, v)| (c.into(), v.into())).unzip();
        Table { columns, rows: vec![row] }
    }

    /// Parse delimited text with a header row.
    ///
    /// Repeated header names get `.1`, `.2`, ... appended to the later
    /// occurrences, again if the numbered name is already taken. Short rows
    /// are padded with empty cells; long rows are an error.
    pub fn read_delimited<R: io::Read>(reader: R, delimiter: u8) -> Result<Table, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = mangle_duplicates(rdr.headers()?.iter().map(String::from).collect());
        let width = columns.len();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if record.len() > width {
                return Err(TableError::RaggedRow {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    expected: width,
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        trace!(columns = width, rows = rows.len(), "parsed table");
        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the first column named `name`, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(move |r| r[idx].as_str()))
    }

    pub fn rename_columns(mut self, f: impl Fn(&str) -> String) -> Self {
        self.columns = self.columns.iter().map(|c| f(c.as_str())).collect();
        self
    }

    /// Copy of this table with constant-valued columns placed at `index`.
    ///
    /// The new header is `columns[..index]`, then `inserted` in order, then
    /// `columns[index..]`.
    pub fn with_columns_at(&self, index: usize, inserted: &[(&str, &str)]) -> Result<Table, TableError> {
        if index > self.columns.len() {
            return Err(TableError::InsertOutOfBounds { index, len: self.columns.len() });
        }
        let mut seen: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        for (name, _) in inserted {
            if !seen.insert(*name) {
                return Err(TableError::DuplicateColumn { name: name.to_string() });
            }
        }

        let splice = |head: &[String], tail: &[String], mid: Vec<String>| {
            let mut out = Vec::with_capacity(head.len() + mid.len() + tail.len());
            out.extend_from_slice(head);
            out.extend(mid);
            out.extend_from_slice(tail);
            out
        };
        let columns = splice(
            &self.columns[..index],
            &self.columns[index..],
            inserted.iter().map(|(n, _)| n.to_string()).collect(),
        );
        let values: Vec<String> = inserted.iter().map(|(_, v)| v.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| splice(&r[..index], &r[index..], values.clone()))
            .collect();
        Ok(Table { columns, rows })
    }

    /// Tab-separated output: header first, `\n` line endings, fields quoted
    /// only when they contain a tab, quote or line break.
    pub fn write_tsv<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn mangle_duplicates(columns: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(columns.len());
    for mut name in columns {
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{}.{}", name, count);
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        out.push(name);
    }
    out
}

/// Cell text read as a missing value: blank, or one of the usual NA spellings.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_VALUES.iter().any(|na| *na == cell)
}

pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
