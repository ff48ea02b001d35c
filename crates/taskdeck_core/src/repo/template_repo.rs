//! Template store: record mapping for reusable item blueprints.
//!
//! Templates have no deadline; active templates list in id order.

use crate::model::template::{Template, TemplateFields};
use crate::repo::record_repo::{
    parse_flag, parse_priority, priority_to_db, ListClause, Record, RecordRepository, RepoResult,
    SqliteRecordStore,
};
use rusqlite::types::Value;
use rusqlite::Row;

const TEMPLATES_TABLE: &str = "templates";

/// SQLite-backed template store.
pub type SqliteTemplateRepository<'conn> = SqliteRecordStore<'conn, Template>;

/// Template store contract.
pub trait TemplateRepository: RecordRepository<Template> {
    /// Lists every active template.
    fn list_templates(&self) -> RepoResult<Vec<Template>> {
        self.list_active(&())
    }
}

impl TemplateRepository for SqliteTemplateRepository<'_> {}

impl Record for Template {
    type Fields = TemplateFields;
    type Query = ();

    const TABLE: &'static str = TEMPLATES_TABLE;
    const FIELD_COLUMNS: &'static [&'static str] =
        &["name", "description", "priority", "days_to_add"];

    fn field_values(fields: &TemplateFields) -> RepoResult<Vec<Value>> {
        fields.validate()?;
        Ok(vec![
            Value::Text(fields.name.clone()),
            Value::Text(fields.description.clone()),
            Value::Text(priority_to_db(fields.priority).to_string()),
            Value::Integer(fields.days_to_add),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Template {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            priority: parse_priority(row, TEMPLATES_TABLE)?,
            days_to_add: row.get("days_to_add")?,
            is_active: parse_flag(row, TEMPLATES_TABLE, "is_active")?,
        })
    }

    fn list_clause(_query: &()) -> ListClause {
        ListClause {
            predicate: None,
            bind_values: Vec::new(),
            order_by: "id ASC",
        }
    }
}
