use filter_import_core::{Table, TableError};
use std::fmt;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

/// Column position where `id` and `date` go in a filter parameters table.
pub const INSERT_AT: usize = 2;
pub const ID_COLUMN: &str = "id";
pub const DATE_COLUMN: &str = "date";
pub const START_DATE_COLUMN: &str = "start_date";
pub const FILTER_ID_COLUMN: &str = "filter_id";

/// Identifier tying a cruise's filter parameters to its filter plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(pub Uuid);

impl FilterId {
    pub fn new() -> Self {
        FilterId(Uuid::new_v4())
    }
}

impl Default for FilterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// UTC, whole seconds, explicit `+00:00` offset.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]+00:00"))
}

/// Source parameters with `id` and `date` spliced in after the first two columns.
pub fn filter_params_table(params: &Table, id: FilterId, date: &str) -> Result<Table, TableError> {
    let id = id.to_string();
    params.with_columns_at(INSERT_AT, &[(ID_COLUMN, id.as_str()), (DATE_COLUMN, date)])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPlan {
    pub start_date: String,
    pub filter_id: FilterId,
}

impl FilterPlan {
    pub fn to_table(&self) -> Table {
        Table::single_row([
            (START_DATE_COLUMN, self.start_date.clone()),
            (FILTER_ID_COLUMN, self.filter_id.to_string()),
        ])
    }
}
