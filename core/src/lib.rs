//! Core types shared by the filter-import stages.

pub mod table;

pub use table::{is_missing, Table, TableError, NA_VALUES};

use std::fmt;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Name of a cruise, the join key between the start-date and parameter trees.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CruiseId(pub String);

impl CruiseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CruiseId {
    fn from(s: &str) -> Self {
        CruiseId(s.to_string())
    }
}

impl fmt::Display for CruiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }

    #[test]
    fn cruise_ids_order_by_name() {
        let mut ids: Vec<CruiseId> = vec!["TN397".into(), "KM1906".into(), "Gradients_3".into()];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(CruiseId::as_str).collect();
        assert_eq!(names, vec!["Gradients_3", "KM1906", "TN397"]);
    }
}
