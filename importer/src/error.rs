use filter_output::WriteError;
use filter_params::ParamsError;
use sfl_starts::StartsError;
use thiserror::Error;

/// A failed migration, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Reading cruise start dates failed with: {0}")]
    ReadStarts(StartsError),
    #[error("Reading filter parameters failed with: {0}")]
    ReadParams(ParamsError),
    #[error("Writing filter parameters failed with: {0}")]
    Write(WriteError),
}
