//! Domain model for deadline-bound items and reusable templates.
//!
//! # Responsibility
//! - Define the record shapes persisted by the item and template stores.
//! - Hold the pure transformations on those shapes (template expansion,
//!   deadline arithmetic, write-side validation).
//!
//! # Invariants
//! - Every record is identified by a store-assigned `RecordId` that is never
//!   reused, even after soft deletion.
//! - Deletion is represented by an `is_active = false` tombstone, never by
//!   physical removal.

pub mod item;
pub mod priority;
pub mod record;
pub mod template;
