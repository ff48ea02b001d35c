//! Core domain logic for Taskdeck.
//! This crate is the single source of truth for record store invariants:
//! identity assignment, soft-delete visibility and deadline query semantics.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemFields};
pub use model::priority::Priority;
pub use model::record::{shift_date, RecordId, RecordValidationError};
pub use model::template::{Template, TemplateFields};
pub use repo::item_repo::{DeadlineWindow, ItemListQuery, ItemRepository, SqliteItemRepository};
pub use repo::record_repo::{Record, RecordRepository, RepoError, RepoResult, SqliteRecordStore};
pub use repo::template_repo::{SqliteTemplateRepository, TemplateRepository};
pub use service::histogram::{PriorityCounts, WorkloadHistogram, HISTOGRAM_BUCKETS};
pub use service::item_service::ItemService;
pub use service::template_service::TemplateService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
