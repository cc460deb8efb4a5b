//! View-facing facade of the quick tool panel.
//!
//! # Responsibility
//! - Own the controller, both entity stores and the invoice document.
//! - Route interaction events to the controller; expose content owners for
//!   edits.
//!
//! # Invariants
//! - Notes and reminders use distinct storage keys on the same backend.
//! - Visibility state and content state never depend on each other.

use crate::model::invoice::InvoiceDocument;
use crate::model::tool::ToolId;
use crate::panel::controller::{PanelEvent, ToolPanelController};
use crate::panel::state::PanelState;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::entity_store::{NoteStore, ReminderStore};
use log::info;

/// Quick tool panel session.
pub struct QuickToolPanel<S> {
    controller: ToolPanelController,
    notes: NoteStore<S>,
    reminders: ReminderStore<S>,
    invoice: InvoiceDocument,
}

impl<S: KeyValueStore + Clone> QuickToolPanel<S> {
    /// Opens both stores on `storage` and starts with an idle panel and a
    /// fresh invoice.
    pub fn open(storage: S) -> Self {
        let notes = NoteStore::open(storage.clone());
        let reminders = ReminderStore::open(storage);
        info!(
            "event=panel_open module=service status=ok notes={} reminders={}",
            notes.len(),
            reminders.len()
        );
        Self {
            controller: ToolPanelController::new(),
            notes,
            reminders,
            invoice: InvoiceDocument::new(),
        }
    }
}

impl<S: KeyValueStore> QuickToolPanel<S> {
    /// Forwards an interaction event and returns the expanded tool.
    pub fn apply(&mut self, event: PanelEvent) -> Option<ToolId> {
        self.controller.apply(event)
    }

    pub fn expanded_tool(&self) -> Option<ToolId> {
        self.controller.expanded_tool()
    }

    pub fn panel_state(&self) -> PanelState {
        self.controller.state()
    }

    pub fn controller_mut(&mut self) -> &mut ToolPanelController {
        &mut self.controller
    }

    pub fn notes(&self) -> &NoteStore<S> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<S> {
        &mut self.notes
    }

    pub fn reminders(&self) -> &ReminderStore<S> {
        &self.reminders
    }

    pub fn reminders_mut(&mut self) -> &mut ReminderStore<S> {
        &mut self.reminders
    }

    pub fn invoice(&self) -> &InvoiceDocument {
        &self.invoice
    }

    pub fn invoice_mut(&mut self) -> &mut InvoiceDocument {
        &mut self.invoice
    }

    /// Discards the current invoice and starts a new one.
    pub fn reset_invoice(&mut self) {
        self.invoice = InvoiceDocument::new();
    }
}
