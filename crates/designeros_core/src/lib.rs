//! Core engine of the DesignersOS quick tool panel.
//! Owns panel visibility rules, note/reminder persistence and invoice math.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod panel;
pub mod proxy;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{EntityId, StoredEntity};
pub use model::invoice::{
    InvoiceDocument, InvoiceHeader, InvoiceLineItem, InvoiceTotals, LineItemField,
    INVOICE_TAX_RATE, MAX_LINE_ITEM_RATE,
};
pub use model::note::{Note, NoteDraft, NotePatch, DEFAULT_NOTE_COLOR};
pub use model::reminder::{Reminder, ReminderDraft, ReminderPatch};
pub use model::tool::ToolId;
pub use panel::controller::{PanelEvent, ToolPanelController};
pub use panel::state::PanelState;
pub use repo::collection_gateway::{
    CollectionGateway, CollectionOrigin, GatewayError, GatewayResult, SeedReason,
    COLLECTION_SCHEMA_VERSION,
};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use service::entity_store::{EntityStore, NoteStore, ReminderStore, StoreWrite};
pub use service::tool_panel::QuickToolPanel;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
