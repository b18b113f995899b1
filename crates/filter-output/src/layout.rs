use crate::WriteError;
use filter_import_core::CruiseId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CRUISES_DIR: &str = "cruises";
pub const PARAMS_FILE_SUFFIX: &str = "filter_params.filter.tsv";
pub const PLAN_FILE_SUFFIX: &str = "filter_params.filter_plan.tsv";

/// The `<out>/cruises/` directory created for one migration run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    cruises: PathBuf,
}

impl OutputLayout {
    /// Create `out_dir` (and parents) if needed, then `out_dir/cruises`.
    /// Fails if `cruises` is already there.
    pub fn create(out_dir: &Path) -> Result<Self, WriteError> {
        fs::create_dir_all(out_dir).map_err(WriteError::io(out_dir))?;
        let cruises = out_dir.join(CRUISES_DIR);
        create_dir_exclusive(&cruises)?;
        Ok(OutputLayout { cruises })
    }

    pub fn cruises_dir(&self) -> &Path {
        &self.cruises
    }

    pub fn cruise_dir(&self, cruise: &CruiseId) -> PathBuf {
        self.cruises.join(cruise.as_str())
    }

    pub fn create_cruise_dir(&self, cruise: &CruiseId) -> Result<PathBuf, WriteError> {
        let dir = self.cruise_dir(cruise);
        create_dir_exclusive(&dir)?;
        Ok(dir)
    }

    pub fn params_path(&self, cruise: &CruiseId) -> PathBuf {
        self.cruise_dir(cruise).join(format!("{}.{}", cruise, PARAMS_FILE_SUFFIX))
    }

    pub fn plan_path(&self, cruise: &CruiseId) -> PathBuf {
        self.cruise_dir(cruise).join(format!("{}.{}", cruise, PLAN_FILE_SUFFIX))
    }
}

/// Single `mkdir`; an existing directory is reported, never reused.
pub fn create_dir_exclusive(path: &Path) -> Result<(), WriteError> {
    fs::create_dir(path).map_err(|source| match source.kind() {
        ErrorKind::AlreadyExists => WriteError::AlreadyExists { path: path.to_path_buf() },
        _ => WriteError::Io { path: path.to_path_buf(), source },
    })
}
