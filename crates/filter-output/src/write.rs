use crate::{filter_params_table, format_timestamp, FilterId, FilterPlan, OutputLayout, WriteError};
use filter_import_core::{CruiseId, Table};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Write one table to a file that must not exist yet.
pub fn write_table_new(path: &Path, table: &Table) -> Result<(), WriteError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::AlreadyExists => WriteError::AlreadyExists { path: path.to_path_buf() },
            _ => WriteError::Io { path: path.to_path_buf(), source },
        })?;
    table
        .write_tsv(BufWriter::new(file))
        .map_err(|source| WriteError::Table { path: path.to_path_buf(), source })
}

/// Write filter parameters and a filter plan for every cruise in `params`,
/// stamped with the current time. Returns the number of cruises written.
pub fn write_params(
    starts: &BTreeMap<CruiseId, String>,
    params: &BTreeMap<CruiseId, Table>,
    out_dir: &Path,
) -> Result<usize, WriteError> {
    write_params_at(starts, params, out_dir, OffsetDateTime::now_utc())
}

/// Same as [`write_params`] with an explicit run timestamp.
///
/// Cruises are written in map order. A failure stops the run and leaves the
/// cruises already written on disk.
pub fn write_params_at(
    starts: &BTreeMap<CruiseId, String>,
    params: &BTreeMap<CruiseId, Table>,
    out_dir: &Path,
    now: OffsetDateTime,
) -> Result<usize, WriteError> {
    let layout = OutputLayout::create(out_dir)?;
    let date = format_timestamp(now)?;
    debug!(dir = %layout.cruises_dir().display(), %date, "created output directory");

    let mut count = 0;
    for (cruise, table) in params {
        layout.create_cruise_dir(cruise)?;
        let filter_id = FilterId::new();

        let filter = filter_params_table(table, filter_id, &date)
            .map_err(|source| WriteError::Params { cruise: cruise.clone(), source })?;
        write_table_new(&layout.params_path(cruise), &filter)?;

        let start_date = starts
            .get(cruise)
            .ok_or_else(|| WriteError::MissingStartDate(cruise.clone()))?;
        let plan = FilterPlan { start_date: start_date.clone(), filter_id };
        write_table_new(&layout.plan_path(cruise), &plan.to_table())?;

        info!(%cruise, %filter_id, start_date = %start_date, rows = filter.len(), "wrote filter parameters");
        count += 1;
    }
    Ok(count)
}
