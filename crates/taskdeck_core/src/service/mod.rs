//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own "today" evaluation and template expansion so callers never touch
//!   storage details.

pub mod histogram;
pub mod item_service;
pub mod template_service;
