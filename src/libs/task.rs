use chrono::{NaiveDate, NaiveDateTime};

/// A single to-do item as stored in the task table.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum TaskFilter {
    All,
    Completed(bool),
}

/// Supported board orderings.
///
/// The enum is closed on purpose: each variant maps to a fixed SQL fragment
/// in the store, so the `sort` query parameter can only ever select one of
/// these, never inject query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    CreatedNew,
    CreatedOld,
    DueNear,
    DueFar,
    /// Implementation-defined order (insertion order in practice).
    #[default]
    Unsorted,
}

impl SortOrder {
    /// Maps a `sort` query key to an order; unknown or absent keys keep the
    /// board unsorted.
    pub fn from_key(key: Option<&str>) -> SortOrder {
        match key {
            Some("created_new") => SortOrder::CreatedNew,
            Some("created_old") => SortOrder::CreatedOld,
            Some("due_near") => SortOrder::DueNear,
            Some("due_far") => SortOrder::DueFar,
            _ => SortOrder::Unsorted,
        }
    }

    /// The query key for this order, used when rendering sort links.
    pub fn as_key(self) -> Option<&'static str> {
        match self {
            SortOrder::CreatedNew => Some("created_new"),
            SortOrder::CreatedOld => Some("created_old"),
            SortOrder::DueNear => Some("due_near"),
            SortOrder::DueFar => Some("due_far"),
            SortOrder::Unsorted => None,
        }
    }
}
