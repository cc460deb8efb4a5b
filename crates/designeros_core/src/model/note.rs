//! Quick note entity.

use crate::model::entity::{EntityId, StoredEntity};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Colors offered by the notes tool. Stored tags outside this list are kept.
pub const NOTE_PALETTE: [&str; 5] = ["yellow", "blue", "green", "pink", "purple"];

/// Color tag applied to new notes when none is chosen.
pub const DEFAULT_NOTE_COLOR: &str = NOTE_PALETTE[0];

const CREATED_AT_FORMAT: &str = "%b %-d, %Y";

/// A sticky note shown in the notes tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub content: String,
    pub color: String,
    /// Human-readable creation date. Fixed at creation.
    pub created_at: String,
}

/// Creation fields for a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub content: String,
    pub color: String,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: DEFAULT_NOTE_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self::new("")
    }
}

/// Partial update for a note; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub content: Option<String>,
    pub color: Option<String>,
}

impl NotePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

impl StoredEntity for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const STORAGE_KEY: &'static str = "designeros.quicknotes";
    const KIND: &'static str = "note";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: EntityId, draft: NoteDraft) -> Self {
        let color = if draft.color.trim().is_empty() {
            DEFAULT_NOTE_COLOR.to_string()
        } else {
            draft.color
        };
        Self {
            id,
            content: draft.content,
            color,
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }

    fn apply_patch(&mut self, patch: NotePatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        // An empty color would make the stored collection fail validation.
        if let Some(color) = patch.color.filter(|value| !value.trim().is_empty()) {
            self.color = color;
        }
    }

    fn seed_collection() -> Vec<Self> {
        vec![
            Note {
                id: "seed-note-1".to_string(),
                content: "Welcome to Quick Notes! Hover a tool to peek, click inside to keep it open."
                    .to_string(),
                color: NOTE_PALETTE[0].to_string(),
                created_at: "Jan 1, 2025".to_string(),
            },
            Note {
                id: "seed-note-2".to_string(),
                content: "Collect client feedback before the next design review.".to_string(),
                color: NOTE_PALETTE[1].to_string(),
                created_at: "Jan 1, 2025".to_string(),
            },
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("note with empty id".to_string());
        }
        if self.color.trim().is_empty() {
            return Err(format!("note `{}` has an empty color tag", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteDraft, NotePatch, DEFAULT_NOTE_COLOR, NOTE_PALETTE};
    use crate::model::entity::StoredEntity;

    #[test]
    fn blank_draft_color_falls_back_to_default() {
        let note = Note::from_draft("n1".to_string(), NoteDraft::new("hi").with_color("  "));
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
        assert!(!note.created_at.is_empty());
    }

    #[test]
    fn default_and_seed_colors_come_from_palette() {
        assert!(NOTE_PALETTE.contains(&DEFAULT_NOTE_COLOR));
        assert!(Note::seed_collection()
            .iter()
            .all(|note| NOTE_PALETTE.contains(&note.color.as_str())));
    }

    #[test]
    fn patch_keeps_id_and_created_at() {
        let mut note = Note::from_draft("n1".to_string(), NoteDraft::new("before"));
        let created_at = note.created_at.clone();
        note.apply_patch(NotePatch {
            content: Some("after".to_string()),
            color: Some("green".to_string()),
        });
        assert_eq!(note.id, "n1");
        assert_eq!(note.created_at, created_at);
        assert_eq!(note.content, "after");
        assert_eq!(note.color, "green");
    }

    #[test]
    fn serializes_created_at_in_camel_case() {
        let note = Note::seed_collection().remove(0);
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
    }
}
