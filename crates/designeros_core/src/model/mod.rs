//! Domain model for the quick tool panel.
//!
//! # Responsibility
//! - Define the tool identities and the entities each tool owns.
//! - Keep persisted shapes (`Note`, `Reminder`) separate from the purely
//!   in-memory invoice document.
//!
//! # Invariants
//! - Entity ids are opaque strings, unique within their collection.
//! - Ids are never derived from wall-clock time.

pub mod entity;
pub mod invoice;
pub mod note;
pub mod reminder;
pub mod tool;
