//! Use-case services for the quick tool panel.
//!
//! # Responsibility
//! - Own live entity collections and keep them in sync with storage.
//! - Bundle stores, invoice and controller behind one view-facing facade.

pub mod entity_store;
pub mod tool_panel;
