//! Reminder entity.

use crate::model::entity::{EntityId, StoredEntity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A to-do style reminder shown in the reminders tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: EntityId,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Creation fields for a reminder. New reminders start incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderDraft {
    pub text: String,
    pub due_date: Option<NaiveDate>,
}

impl ReminderDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            due_date: None,
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }
}

/// Partial update for a reminder.
///
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl ReminderPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

impl StoredEntity for Reminder {
    type Draft = ReminderDraft;
    type Patch = ReminderPatch;

    const STORAGE_KEY: &'static str = "designeros.reminders";
    const KIND: &'static str = "reminder";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: EntityId, draft: ReminderDraft) -> Self {
        Self {
            id,
            text: draft.text,
            completed: false,
            due_date: draft.due_date,
        }
    }

    fn apply_patch(&mut self, patch: ReminderPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    fn seed_collection() -> Vec<Self> {
        vec![
            Reminder {
                id: "seed-reminder-1".to_string(),
                text: "Send invoice to client".to_string(),
                completed: false,
                due_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            },
            Reminder {
                id: "seed-reminder-2".to_string(),
                text: "Update portfolio case study".to_string(),
                completed: true,
                due_date: None,
            },
        ]
    }
}
