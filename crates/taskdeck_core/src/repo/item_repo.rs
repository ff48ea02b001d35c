//! Item store: record mapping, deadline windows and completion toggle.
//!
//! # Invariants
//! - Upcoming window (`deadline_date >= today`) lists earliest deadline first.
//! - Expired window (`deadline_date < today`) lists most recently expired
//!   first.
//! - Ties on the same date are broken by ascending id.
//! - The two windows are disjoint and together cover every active item.

use crate::model::item::{Item, ItemFields};
use crate::model::record::RecordId;
use crate::repo::record_repo::{
    bool_to_int, date_to_db, parse_date, parse_flag, parse_priority, priority_to_db, ListClause,
    Record, RecordRepository, RepoResult, SqliteRecordStore,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;

const ITEMS_TABLE: &str = "items";

/// SQLite-backed item store.
pub type SqliteItemRepository<'conn> = SqliteRecordStore<'conn, Item>;

/// Deadline partition relative to a fixed "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineWindow {
    /// `deadline_date >= today`, ascending.
    Upcoming { today: NaiveDate },
    /// `deadline_date < today`, descending.
    Expired { today: NaiveDate },
}

impl DeadlineWindow {
    /// Picks the window for a `list_by_deadline(include_past)` call.
    pub fn for_listing(include_past: bool, today: NaiveDate) -> Self {
        if include_past {
            Self::Expired { today }
        } else {
            Self::Upcoming { today }
        }
    }
}

/// Query options for listing items.
///
/// Without a window every active item is returned, earliest deadline first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemListQuery {
    pub window: Option<DeadlineWindow>,
}

/// Item store contract: the generic record contract plus item-only queries.
pub trait ItemRepository: RecordRepository<Item> {
    /// Flips `completed` on an active item. `false` when missing or inactive.
    fn toggle_completed(&self, id: RecordId) -> RepoResult<bool>;

    /// Lists active items on one side of `today`.
    fn list_by_deadline(&self, include_past: bool, today: NaiveDate) -> RepoResult<Vec<Item>> {
        self.list_active(&ItemListQuery {
            window: Some(DeadlineWindow::for_listing(include_past, today)),
        })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn toggle_completed(&self, id: RecordId) -> RepoResult<bool> {
        self.flip_flag(id, "is_completed")
    }
}

impl Record for Item {
    type Fields = ItemFields;
    type Query = ItemListQuery;

    const TABLE: &'static str = ITEMS_TABLE;
    const FIELD_COLUMNS: &'static [&'static str] =
        &["description", "priority", "deadline_date", "is_completed"];

    fn field_values(fields: &ItemFields) -> RepoResult<Vec<Value>> {
        fields.validate()?;
        Ok(vec![
            Value::Text(fields.description.clone()),
            Value::Text(priority_to_db(fields.priority).to_string()),
            Value::Text(date_to_db(fields.deadline_date)),
            Value::Integer(bool_to_int(fields.completed)),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Item {
            id: row.get("id")?,
            description: row.get("description")?,
            priority: parse_priority(row, ITEMS_TABLE)?,
            deadline_date: parse_date(row, ITEMS_TABLE, "deadline_date")?,
            completed: parse_flag(row, ITEMS_TABLE, "is_completed")?,
            is_active: parse_flag(row, ITEMS_TABLE, "is_active")?,
        })
    }

    fn list_clause(query: &ItemListQuery) -> ListClause {
        match query.window {
            None => ListClause {
                predicate: None,
                bind_values: Vec::new(),
                order_by: "deadline_date ASC, id ASC",
            },
            Some(DeadlineWindow::Upcoming { today }) => ListClause {
                predicate: Some("deadline_date >= ?".to_string()),
                bind_values: vec![Value::Text(date_to_db(today))],
                order_by: "deadline_date ASC, id ASC",
            },
            Some(DeadlineWindow::Expired { today }) => ListClause {
                predicate: Some("deadline_date < ?".to_string()),
                bind_values: vec![Value::Text(date_to_db(today))],
                order_by: "deadline_date DESC, id ASC",
            },
        }
    }
}
