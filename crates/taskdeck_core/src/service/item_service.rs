//! Item use-case service.
//!
//! # Responsibility
//! - Provide item CRUD, deadline listing and completion toggle entry points.
//! - Expand templates into new items.
//! - Build the upcoming-workload histogram.
//!
//! # Invariants
//! - "Today" is read from the clock once per call.
//! - Template expansion reads the template store and writes the item store as
//!   two independent steps; a missing template creates nothing.
//! - Log events carry ids and outcomes only, never record text.

use crate::clock::{Clock, SystemClock};
use crate::model::item::{Item, ItemFields};
use crate::model::record::RecordId;
use crate::repo::item_repo::ItemRepository;
use crate::repo::record_repo::RepoResult;
use crate::repo::template_repo::TemplateRepository;
use crate::service::histogram::WorkloadHistogram;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Use-case service wrapper for the item store.
pub struct ItemService<R: ItemRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a service that evaluates "today" from the local calendar.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: ItemRepository, C: Clock> ItemService<R, C> {
    /// Creates a service using an explicit date source.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Current calendar date as seen by this service.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Creates a new active item and returns its id.
    pub fn create_item(&self, fields: &ItemFields) -> RepoResult<RecordId> {
        let id = self.repo.create(fields)?;
        info!("event=item_create module=item_service status=ok id={id}");
        Ok(id)
    }

    /// Gets one active item.
    pub fn get_item(&self, id: RecordId) -> RepoResult<Option<Item>> {
        self.repo.get(id)
    }

    /// Lists upcoming (`include_past = false`) or expired items.
    ///
    /// # Contract
    /// - Upcoming: `deadline_date >= today`, earliest first.
    /// - Expired: `deadline_date < today`, most recently expired first.
    pub fn list_by_deadline(&self, include_past: bool) -> RepoResult<Vec<Item>> {
        let today = self.clock.today();
        let items = self.repo.list_by_deadline(include_past, today)?;
        debug!(
            "event=item_list module=item_service status=ok include_past={include_past} today={today} count={}",
            items.len()
        );
        Ok(items)
    }

    /// Overwrites all item fields. `false` when missing or deleted.
    pub fn update_item(&self, id: RecordId, fields: &ItemFields) -> RepoResult<bool> {
        let updated = self.repo.update(id, fields)?;
        log_mutation("item_update", id, updated);
        Ok(updated)
    }

    /// Flips completion status. `false` when missing or deleted.
    pub fn toggle_completed(&self, id: RecordId) -> RepoResult<bool> {
        let toggled = self.repo.toggle_completed(id)?;
        log_mutation("item_toggle", id, toggled);
        Ok(toggled)
    }

    /// Soft-deletes an item. `false` when missing or already deleted.
    pub fn delete_item(&self, id: RecordId) -> RepoResult<bool> {
        let deleted = self.repo.soft_delete(id)?;
        log_mutation("item_delete", id, deleted);
        Ok(deleted)
    }

    /// Creates an item from an active template.
    ///
    /// Returns `Ok(None)` when the template is missing or deleted; no item is
    /// created in that case.
    pub fn create_from_template<T: TemplateRepository>(
        &self,
        templates: &T,
        template_id: RecordId,
    ) -> RepoResult<Option<RecordId>> {
        let Some(template) = templates.get(template_id)? else {
            warn!(
                "event=item_from_template module=item_service status=not_found template_id={template_id}"
            );
            return Ok(None);
        };

        let fields = template.instantiate(self.clock.today())?;
        let id = self.repo.create(&fields)?;
        info!(
            "event=item_from_template module=item_service status=ok template_id={template_id} id={id}"
        );
        Ok(Some(id))
    }

    /// Aggregates upcoming items into day/priority buckets.
    pub fn upcoming_histogram(&self) -> RepoResult<WorkloadHistogram> {
        let today = self.clock.today();
        let items = self.repo.list_by_deadline(false, today)?;
        Ok(WorkloadHistogram::from_items(today, &items))
    }
}

fn log_mutation(event: &str, id: RecordId, applied: bool) {
    if applied {
        info!("event={event} module=item_service status=ok id={id}");
    } else {
        warn!("event={event} module=item_service status=not_found id={id}");
    }
}
