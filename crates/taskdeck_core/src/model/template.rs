//! Template domain model and template-to-item expansion.
//!
//! # Invariants
//! - Expansion is pure: it reads one template and a date, and touches no store.
//! - An expanded item copies description and priority verbatim and is never
//!   pre-completed.

use crate::model::item::ItemFields;
use crate::model::priority::Priority;
use crate::model::record::{shift_date, RecordId, RecordValidationError, MAX_DAYS_TO_ADD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted template record as returned by the template store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub priority: Priority,
    /// Offset from "today" applied when the template is instantiated.
    pub days_to_add: i64,
    pub is_active: bool,
}

impl Template {
    /// Copies the updatable fields out of this record.
    pub fn fields(&self) -> TemplateFields {
        TemplateFields {
            name: self.name.clone(),
            description: self.description.clone(),
            priority: self.priority,
            days_to_add: self.days_to_add,
        }
    }

    /// Produces the fields of a new item due `days_to_add` days after `today`.
    ///
    /// # Errors
    /// - `DeadlineOverflow` when the shifted date does not exist.
    /// - `DeadlineOutOfRange` when the shifted date cannot be persisted.
    pub fn instantiate(&self, today: NaiveDate) -> Result<ItemFields, RecordValidationError> {
        let deadline_date = shift_date(today, self.days_to_add)?;
        let fields = ItemFields::new(self.description.clone(), self.priority, deadline_date);
        fields.validate()?;
        Ok(fields)
    }
}

/// Updatable template fields, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFields {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub days_to_add: i64,
}

impl TemplateFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        days_to_add: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            days_to_add,
        }
    }

    /// Validates fields before they reach storage.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.days_to_add.unsigned_abs() > MAX_DAYS_TO_ADD.unsigned_abs() {
            return Err(RecordValidationError::DaysToAddOutOfRange(self.days_to_add));
        }
        Ok(())
    }
}
