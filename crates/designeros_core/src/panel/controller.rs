//! Stateful wrapper applying panel transitions.

use crate::model::tool::ToolId;
use crate::panel::state::PanelState;
use log::debug;

/// Raw interaction event forwarded by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    HoverEnter(ToolId),
    HoverLeave(ToolId),
    FocusIn(ToolId),
    FocusOut(ToolId),
}

impl PanelEvent {
    pub fn tool(self) -> ToolId {
        match self {
            Self::HoverEnter(tool)
            | Self::HoverLeave(tool)
            | Self::FocusIn(tool)
            | Self::FocusOut(tool) => tool,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::HoverEnter(_) => "hover_enter",
            Self::HoverLeave(_) => "hover_leave",
            Self::FocusIn(_) => "focus_in",
            Self::FocusOut(_) => "focus_out",
        }
    }
}

/// Holds the current `PanelState` and decides which tool is expanded.
#[derive(Debug, Default)]
pub struct ToolPanelController {
    state: PanelState,
}

impl ToolPanelController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn expanded_tool(&self) -> Option<ToolId> {
        self.state.expanded_tool()
    }

    pub fn is_expanded(&self, tool: ToolId) -> bool {
        self.state.is_expanded(tool)
    }

    pub fn on_hover_enter(&mut self, tool: ToolId) {
        self.apply(PanelEvent::HoverEnter(tool));
    }

    pub fn on_hover_leave(&mut self, tool: ToolId) {
        self.apply(PanelEvent::HoverLeave(tool));
    }

    pub fn on_focus_in(&mut self, tool: ToolId) {
        self.apply(PanelEvent::FocusIn(tool));
    }

    pub fn on_focus_out(&mut self, tool: ToolId) {
        self.apply(PanelEvent::FocusOut(tool));
    }

    /// Applies one event and returns the expanded tool afterwards.
    pub fn apply(&mut self, event: PanelEvent) -> Option<ToolId> {
        let previous = self.state.expanded_tool();
        self.state = match event {
            PanelEvent::HoverEnter(tool) => self.state.hover_enter(tool),
            PanelEvent::HoverLeave(tool) => self.state.hover_leave(tool),
            PanelEvent::FocusIn(tool) => self.state.focus_in(tool),
            PanelEvent::FocusOut(tool) => self.state.focus_out(tool),
        };

        let expanded = self.state.expanded_tool();
        if expanded != previous {
            debug!(
                "event=panel_expand module=panel status=changed trigger={} tool={} expanded={}",
                event.name(),
                event.tool(),
                expanded.map_or("none", ToolId::as_str)
            );
        }
        expanded
    }
}
