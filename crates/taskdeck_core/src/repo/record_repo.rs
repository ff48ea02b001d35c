//! Generic soft-deletable record store and its SQLite implementation.
//!
//! # Responsibility
//! - Define the identity/visibility contract shared by every record shape.
//! - Implement it once over SQLite; record shapes only describe their table,
//!   columns, row decoding and list clause.
//!
//! # Invariants
//! - Ids come from the per-table `record_counters` row, bumped in the same
//!   transaction as the insert. They never decrease and are never reused.
//! - Every read and every mutation is guarded on `is_active = 1`; inactive
//!   rows behave exactly like missing rows.
//! - `is_active` only ever goes from 1 to 0.
//! - Missing/inactive targets are reported as `None`/`false`, never as errors.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::priority::Priority;
use crate::model::record::{RecordId, RecordValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

const COUNTER_TABLE: &str = "record_counters";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TOUCH_UPDATED_AT: &str = "updated_at = (strftime('%s', 'now') * 1000)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
///
/// Absence is not an error: lookups return `None` and mutations return
/// `false` for missing or inactive records.
#[derive(Debug)]
pub enum RepoError {
    /// Fields were rejected before reaching storage.
    Validation(RecordValidationError),
    /// Storage fault reported by SQLite.
    Db(DbError),
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "record store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter and ordering a record shape contributes to `list_active`.
#[derive(Debug, Clone)]
pub struct ListClause {
    /// Extra condition AND-ed after `is_active = 1`, using anonymous `?` binds.
    pub predicate: Option<String>,
    pub bind_values: Vec<Value>,
    /// `ORDER BY` body. Must be total so results are stable within a call.
    pub order_by: &'static str,
}

/// Persistence mapping for one record shape.
///
/// Implementors never deal with `id` or `is_active`; the store owns both.
pub trait Record: Sized {
    /// Updatable field set, used by create and update.
    type Fields;
    /// Shape-specific list query.
    type Query;

    const TABLE: &'static str;
    /// Updatable columns, in the order `field_values` produces them.
    const FIELD_COLUMNS: &'static [&'static str];

    /// Validates `fields` and converts them to bind values.
    fn field_values(fields: &Self::Fields) -> RepoResult<Vec<Value>>;
    /// Decodes one row selected with `id`, `FIELD_COLUMNS` and `is_active`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
    fn list_clause(query: &Self::Query) -> ListClause;
}

/// Identity-keyed, soft-deletable record store contract.
pub trait RecordRepository<R: Record> {
    /// Stores a new active record and returns its freshly allocated id.
    fn create(&self, fields: &R::Fields) -> RepoResult<RecordId>;
    /// Returns the record only when it exists and is active.
    fn get(&self, id: RecordId) -> RepoResult<Option<R>>;
    /// Lists active records matching `query` in the shape's ordering.
    fn list_active(&self, query: &R::Query) -> RepoResult<Vec<R>>;
    /// Overwrites all updatable fields. `false` when missing or inactive.
    fn update(&self, id: RecordId, fields: &R::Fields) -> RepoResult<bool>;
    /// Tombstones the record. `false` when missing or already inactive.
    fn soft_delete(&self, id: RecordId) -> RepoResult<bool>;
}

/// SQLite-backed record store for shape `R`.
pub struct SqliteRecordStore<'conn, R> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: Record> SqliteRecordStore<'conn, R> {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema does
    ///   not carry what this shape needs.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_connection_ready::<R>(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    /// Flips a 0/1 column on an active record.
    pub(crate) fn flip_flag(&self, id: RecordId, column: &'static str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE {table}
                 SET {column} = 1 - {column}, {TOUCH_UPDATED_AT}
                 WHERE id = ?1 AND is_active = 1;",
                table = R::TABLE
            ),
            [id],
        )?;
        Ok(changed == 1)
    }

    fn select_sql() -> String {
        format!(
            "SELECT id, {columns}, is_active FROM {table}",
            columns = R::FIELD_COLUMNS.join(", "),
            table = R::TABLE
        )
    }
}

impl<R: Record> RecordRepository<R> for SqliteRecordStore<'_, R> {
    fn create(&self, fields: &R::Fields) -> RepoResult<RecordId> {
        let values = checked_field_values::<R>(fields)?;

        let tx = self.conn.unchecked_transaction()?;
        let id = allocate_id(&tx, R::TABLE)?;

        let placeholders = (2..=R::FIELD_COLUMNS.len() + 1)
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut bind_values = Vec::with_capacity(values.len() + 1);
        bind_values.push(Value::Integer(id));
        bind_values.extend(values);

        tx.execute(
            &format!(
                "INSERT INTO {table} (id, {columns}, is_active) VALUES (?1, {placeholders}, 1);",
                table = R::TABLE,
                columns = R::FIELD_COLUMNS.join(", ")
            ),
            params_from_iter(bind_values),
        )?;
        tx.commit()?;

        Ok(id)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<R>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE id = ?1 AND is_active = 1;",
            Self::select_sql()
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(R::from_row(row)?));
        }

        Ok(None)
    }

    fn list_active(&self, query: &R::Query) -> RepoResult<Vec<R>> {
        let clause = R::list_clause(query);
        let mut sql = format!("{} WHERE is_active = 1", Self::select_sql());
        if let Some(predicate) = clause.predicate.as_deref() {
            sql.push_str(" AND ");
            sql.push_str(predicate);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(clause.order_by);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(clause.bind_values))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }

        Ok(records)
    }

    fn update(&self, id: RecordId, fields: &R::Fields) -> RepoResult<bool> {
        let values = checked_field_values::<R>(fields)?;

        let assignments = R::FIELD_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let mut bind_values = Vec::with_capacity(values.len() + 1);
        bind_values.push(Value::Integer(id));
        bind_values.extend(values);

        // One statement: either every column changes or none does.
        let changed = self.conn.execute(
            &format!(
                "UPDATE {table}
                 SET {assignments}, {TOUCH_UPDATED_AT}
                 WHERE id = ?1 AND is_active = 1;",
                table = R::TABLE
            ),
            params_from_iter(bind_values),
        )?;

        Ok(changed == 1)
    }

    fn soft_delete(&self, id: RecordId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE {table}
                 SET is_active = 0, {TOUCH_UPDATED_AT}
                 WHERE id = ?1 AND is_active = 1;",
                table = R::TABLE
            ),
            [id],
        )?;

        Ok(changed == 1)
    }
}

fn checked_field_values<R: Record>(fields: &R::Fields) -> RepoResult<Vec<Value>> {
    let values = R::field_values(fields)?;
    if values.len() != R::FIELD_COLUMNS.len() {
        return Err(RepoError::InvalidData(format!(
            "{} field binding produced {} values for {} columns",
            R::TABLE,
            values.len(),
            R::FIELD_COLUMNS.len()
        )));
    }
    Ok(values)
}

/// Bumps and returns the table's id counter.
///
/// The counter never falls behind the largest stored id, so rows written by
/// older tooling cannot cause a collision.
fn allocate_id(tx: &Transaction<'_>, table: &'static str) -> RepoResult<RecordId> {
    let changed = tx.execute(
        &format!(
            "UPDATE {COUNTER_TABLE}
             SET last_id = MAX(last_id, (SELECT COALESCE(MAX(id), 0) FROM {table})) + 1
             WHERE table_name = ?1;"
        ),
        [table],
    )?;
    if changed == 0 {
        return Err(RepoError::InvalidData(format!(
            "missing id counter row for table `{table}`"
        )));
    }

    let id = tx.query_row(
        &format!("SELECT last_id FROM {COUNTER_TABLE} WHERE table_name = ?1;"),
        [table],
        |row| row.get::<_, RecordId>(0),
    )?;
    Ok(id)
}

fn ensure_store_connection_ready<R: Record>(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in [COUNTER_TABLE, R::TABLE] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["table_name", "last_id"] {
        if !table_has_column(conn, COUNTER_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: COUNTER_TABLE,
                column,
            });
        }
    }

    let store_columns = ["id", "is_active", "updated_at"];
    for column in store_columns
        .iter()
        .chain(R::FIELD_COLUMNS.iter())
        .copied()
    {
        if !table_has_column(conn, R::TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: R::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

pub(crate) fn parse_priority(row: &Row<'_>, table: &str) -> RepoResult<Priority> {
    let value: String = row.get("priority")?;
    match value.as_str() {
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        _ => Err(RepoError::InvalidData(format!(
            "invalid priority `{value}` in {table}.priority"
        ))),
    }
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(row: &Row<'_>, table: &str, column: &str) -> RepoResult<NaiveDate> {
    let value: String = row.get(column)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in {table}.{column}"))
    })
}

pub(crate) fn parse_flag(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
