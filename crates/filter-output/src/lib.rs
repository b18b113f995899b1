//! Output side of the migration: the `cruises/` tree of filter parameter and
//! filter plan TSV files.

mod error;
mod layout;
mod models;
mod write;

pub use error::WriteError;
pub use layout::*;
pub use models::*;
pub use write::*;
