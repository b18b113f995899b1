use filter_import_core::{CruiseId, TableError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Table { path: PathBuf, source: TableError },
    #[error("cruise {cruise}: {source}")]
    Params { cruise: CruiseId, source: TableError },
    #[error("no start date for cruise {0}")]
    MissingStartDate(CruiseId),
    #[error("formatting timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> WriteError {
        let path = path.into();
        move |source| WriteError::Io { path, source }
    }
}
