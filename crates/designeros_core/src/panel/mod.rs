//! Hover/focus state machine of the quick tool panel.
//!
//! # Responsibility
//! - Track the hovered tool and the typing lock.
//! - Derive the single expanded tool the view renders.
//!
//! # Invariants
//! - At most one tool is expanded at any instant.
//! - A typing lock always names its tool; an unlocked state names none.
//! - The controller owns no persisted data.

pub mod controller;
pub mod state;
