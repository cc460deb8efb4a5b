//! Pure panel state and its transitions.

use crate::model::tool::ToolId;

/// Interaction state of the tool panel.
///
/// The typing lock is stored as the locked tool itself, so a lock without a
/// tool cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    hovered_tool: Option<ToolId>,
    locked_tool: Option<ToolId>,
}

impl PanelState {
    /// Panel at rest: nothing hovered, nothing locked.
    pub const fn idle() -> Self {
        Self {
            hovered_tool: None,
            locked_tool: None,
        }
    }

    pub fn hovered_tool(&self) -> Option<ToolId> {
        self.hovered_tool
    }

    pub fn locked_tool(&self) -> Option<ToolId> {
        self.locked_tool
    }

    pub fn typing_locked(&self) -> bool {
        self.locked_tool.is_some()
    }

    /// The locked tool while typing, otherwise the hovered tool.
    pub fn expanded_tool(&self) -> Option<ToolId> {
        self.locked_tool.or(self.hovered_tool)
    }

    pub fn is_expanded(&self, tool: ToolId) -> bool {
        self.expanded_tool() == Some(tool)
    }

    #[must_use]
    pub fn hover_enter(self, tool: ToolId) -> Self {
        Self {
            hovered_tool: Some(tool),
            ..self
        }
    }

    /// Clears the hover only when `tool` is the current hover target, so a
    /// late leave from a previous tool cannot close the new one.
    #[must_use]
    pub fn hover_leave(self, tool: ToolId) -> Self {
        if self.hovered_tool != Some(tool) {
            return self;
        }
        Self {
            hovered_tool: None,
            ..self
        }
    }

    /// Focus implies the pointer is over the tool's input.
    #[must_use]
    pub fn focus_in(self, tool: ToolId) -> Self {
        Self {
            hovered_tool: Some(tool),
            locked_tool: Some(tool),
        }
    }

    /// Releases the lock held by `tool`; hover is left untouched.
    #[must_use]
    pub fn focus_out(self, tool: ToolId) -> Self {
        if self.locked_tool != Some(tool) {
            return self;
        }
        Self {
            locked_tool: None,
            ..self
        }
    }
}
