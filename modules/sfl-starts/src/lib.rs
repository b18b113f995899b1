//! Cruise start dates from curated SFL files.
//!
//! Every `<root>/curated/<cruise>_<suffix>.sfl` file is a tab-separated log
//! with a `DATE` column. The earliest date in the file is the cruise start.

use filter_import_core::{is_missing, CruiseId, Table, TableError};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CURATED_DIR: &str = "curated";
pub const SFL_EXTENSION: &str = "sfl";
pub const DATE_COLUMN: &str = "DATE";

pub type StartDates = BTreeMap<CruiseId, String>;

#[derive(Debug, Error)]
pub enum StartsError {
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Walk(#[from] glob::GlobError),
    #[error("{}: file name is not <cruise>_<suffix>.sfl", .path.display())]
    BadFileName { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: TableError },
    #[error("{}: no DATE column", .path.display())]
    MissingDateColumn { path: PathBuf },
    #[error("{}: no data rows", .path.display())]
    NoDates { path: PathBuf },
}

/// Cruise part of an SFL file name: everything before the last underscore.
pub fn cruise_from_file_name(name: &str) -> Option<&str> {
    name.rfind('_').map(|i| &name[..i])
}

/// Smallest `DATE` value that is not missing (blank or an NA spelling).
/// `None` without a `DATE` column, `Some(None)` when every cell is missing.
pub fn earliest_date(table: &Table) -> Option<Option<&str>> {
    let dates = table.column(DATE_COLUMN)?;
    Some(dates.filter(|d| !is_missing(d)).min())
}

/// Read the start date of the cruise recorded in one SFL file.
pub fn read_start_date(path: &Path) -> Result<(CruiseId, String), StartsError> {
    let cruise = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(cruise_from_file_name)
        .ok_or_else(|| StartsError::BadFileName { path: path.to_path_buf() })?;

    let file = File::open(path).map_err(|source| StartsError::Open { path: path.to_path_buf(), source })?;
    let table = Table::read_delimited(BufReader::new(file), b'\t')
        .map_err(|source| StartsError::Parse { path: path.to_path_buf(), source })?;

    let start = match earliest_date(&table) {
        None => return Err(StartsError::MissingDateColumn { path: path.to_path_buf() }),
        Some(_) if table.is_empty() => return Err(StartsError::NoDates { path: path.to_path_buf() }),
        Some(None) => {
            warn!(file = %path.display(), cruise, "every DATE value is missing, start date left empty");
            String::new()
        }
        Some(Some(d)) => d.to_string(),
    };
    debug!(file = %path.display(), cruise, rows = table.len(), start = %start, "read sfl");
    Ok((cruise.into(), start))
}

/// Scan `<root>/curated/*.sfl` and collect one start date per cruise.
///
/// Files are visited in path order. When two files map to the same cruise
/// the later one wins.
pub fn read_starts(root: &Path) -> Result<StartDates, StartsError> {
    let pattern = format!(
        "{}/{}/*.{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        CURATED_DIR,
        SFL_EXTENSION
    );
    let mut starts = StartDates::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let (cruise, start) = read_start_date(&path)?;
        if let Some(prev) = starts.insert(cruise.clone(), start) {
            debug!(%cruise, replaced = %prev, "cruise seen in more than one sfl file");
        }
    }
    info!(cruises = starts.len(), root = %root.display(), "read cruise start dates");
    Ok(starts)
}
