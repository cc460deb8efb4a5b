//! Tool slot identities.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One addressable widget slot of the quick tool panel.
///
/// New tools may be added; callers matching on this enum must keep a
/// fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ToolId {
    Notes,
    Reminders,
    Invoice,
}

impl ToolId {
    /// All tools in panel order.
    pub const ALL: [ToolId; 3] = [ToolId::Notes, ToolId::Reminders, ToolId::Invoice];

    /// Stable lowercase name used in logs and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Reminders => "reminders",
            Self::Invoice => "invoice",
        }
    }
}

impl Display for ToolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tool name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToolError(pub String);

impl Display for UnknownToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown tool `{}`", self.0)
    }
}

impl std::error::Error for UnknownToolError {}

impl FromStr for ToolId {
    type Err = UnknownToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ToolId::ALL
            .into_iter()
            .find(|tool| tool.as_str() == normalized)
            .ok_or_else(|| UnknownToolError(value.trim().to_string()))
    }
}
