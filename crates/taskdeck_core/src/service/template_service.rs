//! Template use-case service.
//!
//! Thin wrapper over the template store; expansion into items lives in
//! `ItemService::create_from_template`.

use crate::model::record::RecordId;
use crate::model::template::{Template, TemplateFields};
use crate::repo::record_repo::RepoResult;
use crate::repo::template_repo::TemplateRepository;
use log::{info, warn};

/// Use-case service wrapper for the template store.
pub struct TemplateService<R: TemplateRepository> {
    repo: R,
}

impl<R: TemplateRepository> TemplateService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying store, e.g. for template expansion.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_template(&self, fields: &TemplateFields) -> RepoResult<RecordId> {
        let id = self.repo.create(fields)?;
        info!("event=template_create module=template_service status=ok id={id}");
        Ok(id)
    }

    pub fn get_template(&self, id: RecordId) -> RepoResult<Option<Template>> {
        self.repo.get(id)
    }

    /// Lists active templates in creation order.
    pub fn list_templates(&self) -> RepoResult<Vec<Template>> {
        self.repo.list_templates()
    }

    /// Overwrites all template fields. `false` when missing or deleted.
    pub fn update_template(&self, id: RecordId, fields: &TemplateFields) -> RepoResult<bool> {
        let updated = self.repo.update(id, fields)?;
        log_mutation("template_update", id, updated);
        Ok(updated)
    }

    /// Soft-deletes a template. `false` when missing or already deleted.
    pub fn delete_template(&self, id: RecordId) -> RepoResult<bool> {
        let deleted = self.repo.soft_delete(id)?;
        log_mutation("template_delete", id, deleted);
        Ok(deleted)
    }
}

fn log_mutation(event: &str, id: RecordId, applied: bool) {
    if applied {
        info!("event={event} module=template_service status=ok id={id}");
    } else {
        warn!("event={event} module=template_service status=not_found id={id}");
    }
}
