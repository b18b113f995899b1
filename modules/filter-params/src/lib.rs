//! Per-cruise filter parameter tables from a seaflow-filter checkout.

use filter_import_core::{CruiseId, Table, TableError};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const PARAMS_FILE: &str = "filterparams.csv";

pub type ParamSets = BTreeMap<CruiseId, Table>;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: TableError },
    #[error("{}: cruise directory name is not valid UTF-8", .path.display())]
    BadDirName { path: PathBuf },
}

/// Parameter column names use `_` as the word separator.
pub fn normalize_column_name(name: &str) -> String {
    name.replace('.', "_")
}

pub fn read_param_file(path: &Path) -> Result<Table, ParamsError> {
    let file = File::open(path).map_err(|source| ParamsError::Io { path: path.to_path_buf(), source })?;
    let table = Table::read_delimited(BufReader::new(file), b',')
        .map_err(|source| ParamsError::Parse { path: path.to_path_buf(), source })?;
    Ok(table.rename_columns(normalize_column_name))
}

/// Load `<root>/<cruise>/filterparams.csv` for every cruise directory.
///
/// Directories without a parameter file are skipped. Cruises come back in
/// name order.
pub fn read_params(root: &Path) -> Result<ParamSets, ParamsError> {
    let io_err = |source: io::Error| ParamsError::Io { path: root.to_path_buf(), source };
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name(), path));
        }
    }
    dirs.sort();

    let mut params = ParamSets::new();
    for (name, dir) in dirs {
        let param_file = dir.join(PARAMS_FILE);
        if !param_file.exists() {
            debug!(dir = %dir.display(), "no filter parameters, skipping");
            continue;
        }
        let cruise = name
            .to_str()
            .map(CruiseId::from)
            .ok_or_else(|| ParamsError::BadDirName { path: dir.clone() })?;
        let table = read_param_file(&param_file)?;
        debug!(%cruise, rows = table.len(), columns = table.columns().len(), "read filter parameters");
        params.insert(cruise, table);
    }
    info!(cruises = params.len(), root = %root.display(), "read filter parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_params(root: &Path, cruise: &str, body: &str) {
        let dir = root.join(cruise);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PARAMS_FILE), body).unwrap();
    }

    #[test]
    fn dots_become_underscores() {
        assert_eq!(normalize_column_name("a.b.c"), "a_b_c");
        assert_eq!(normalize_column_name("width"), "width");
    }

    #[test]
    fn loads_each_cruise_directory() {
        let tmp = tempdir().unwrap();
        write_params(tmp.path(), "TN397", "instrument,quantile,beads.fsc.small,notch.small.D1\n740,2.5,1.25,0.5\n740,50,1.5,0.6\n");
        write_params(tmp.path(), "KM1906", "instrument,quantile,width\n751,50,5000\n");
        fs::create_dir(tmp.path().join("empty")).unwrap();
        fs::write(tmp.path().join("README.md"), "not a cruise").unwrap();

        let params = read_params(tmp.path()).unwrap();
        let cruises: Vec<&str> = params.keys().map(CruiseId::as_str).collect();
        assert_eq!(cruises, vec!["KM1906", "TN397"]);

        let tn = &params[&CruiseId::from("TN397")];
        assert_eq!(tn.columns(), ["instrument", "quantile", "beads_fsc_small", "notch_small_D1"]);
        assert_eq!(tn.len(), 2);
        assert_eq!(tn.rows()[0][2], "1.25");
    }

    #[test]
    fn repeated_columns_are_numbered_then_normalized() {
        let tmp = tempdir().unwrap();
        write_params(tmp.path(), "A", "x,y,x\n1,2,3\n");
        let params = read_params(tmp.path()).unwrap();
        assert_eq!(params[&CruiseId::from("A")].columns(), ["x", "y", "x_1"]);
    }

    #[test]
    fn malformed_csv_fails() {
        let tmp = tempdir().unwrap();
        write_params(tmp.path(), "A", "x,y\n1,2,3\n");
        let err = read_params(tmp.path()).unwrap_err();
        assert!(matches!(err, ParamsError::Parse { .. }));
        assert!(err.to_string().contains(PARAMS_FILE));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_cruise_dir_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let name = OsStr::from_bytes(b"TN\xff397");
        write_params(tmp.path(), "A", "x,y\n1,2\n");
        let dir = tmp.path().join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(PARAMS_FILE), "x,y\n1,2\n").unwrap();

        let err = read_params(tmp.path()).unwrap_err();
        assert!(matches!(err, ParamsError::BadDirName { ref path } if path == &dir));
    }

    #[test]
    fn missing_root_fails() {
        let tmp = tempdir().unwrap();
        assert!(matches!(read_params(&tmp.path().join("nope")), Err(ParamsError::Io { .. })));
    }
}
