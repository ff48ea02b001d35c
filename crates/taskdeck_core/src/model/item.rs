//! Item domain model.
//!
//! # Responsibility
//! - Define the deadline-bound task record and its updatable field set.
//!
//! # Invariants
//! - `id` and `is_active` are owned by the store and never part of
//!   `ItemFields`.
//! - `completed` starts as `false` for newly drafted items.

use crate::model::priority::Priority;
use crate::model::record::{days_between, validate_deadline, RecordId, RecordValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted item record as returned by the item store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    pub description: String,
    pub priority: Priority,
    pub deadline_date: NaiveDate,
    pub completed: bool,
    /// Soft-delete marker. Always `true` on records handed out by the store.
    pub is_active: bool,
}

impl Item {
    /// Copies the updatable fields out of this record.
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            description: self.description.clone(),
            priority: self.priority,
            deadline_date: self.deadline_date,
            completed: self.completed,
        }
    }

    /// Signed whole days from `today` until this item's deadline.
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        days_between(today, self.deadline_date)
    }
}

/// Updatable item fields, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub description: String,
    pub priority: Priority,
    pub deadline_date: NaiveDate,
    pub completed: bool,
}

impl ItemFields {
    /// Drafts an open (not completed) item.
    pub fn new(description: impl Into<String>, priority: Priority, deadline_date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            priority,
            deadline_date,
            completed: false,
        }
    }

    /// Validates fields before they reach storage.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_deadline(self.deadline_date)
    }
}
