//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic soft-deletable record contract (`record_repo`).
//! - Instantiate it for items and templates.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate fields before persistence.
//! - Missing or inactive records are ordinary `None`/`false` results; only
//!   storage faults, corrupt rows and schema problems are `RepoError`s.

pub mod item_repo;
pub mod record_repo;
pub mod template_repo;
