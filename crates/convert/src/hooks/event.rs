//! Canonical lifecycle events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A tool-agnostic moment at which hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Event {
    BeforeFileRead,
    AfterFileRead,
    BeforeFileWrite,
    AfterFileWrite,
    BeforeCommand,
    AfterCommand,
    BeforeMcp,
    AfterMcp,
    BeforePrompt,
    OnStop,
    OnSessionStart,
    OnSessionEnd,
    AfterResponse,
    AfterThought,
    OnPermission,
    OnNotification,
    BeforeCompact,
    OnSubagentStop,
    BeforeTabRead,
    AfterTabEdit,
}

/// Which tools can express an event natively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolSupport {
    pub claude: bool,
    pub cursor: bool,
    pub windsurf: bool,
}

impl ToolSupport {
    /// Looks up support by tool name; unknown tools support nothing.
    pub fn supports(&self, tool: &str) -> bool {
        match tool {
            "claude" => self.claude,
            "cursor" => self.cursor,
            "windsurf" => self.windsurf,
            _ => false,
        }
    }
}

const fn support(claude: bool, cursor: bool, windsurf: bool) -> ToolSupport {
    ToolSupport {
        claude,
        cursor,
        windsurf,
    }
}

impl Event {
    /// Every event, in declaration order.
    pub const ALL: [Event; 20] = [
        Event::BeforeFileRead,
        Event::AfterFileRead,
        Event::BeforeFileWrite,
        Event::AfterFileWrite,
        Event::BeforeCommand,
        Event::AfterCommand,
        Event::BeforeMcp,
        Event::AfterMcp,
        Event::BeforePrompt,
        Event::OnStop,
        Event::OnSessionStart,
        Event::OnSessionEnd,
        Event::AfterResponse,
        Event::AfterThought,
        Event::OnPermission,
        Event::OnNotification,
        Event::BeforeCompact,
        Event::OnSubagentStop,
        Event::BeforeTabRead,
        Event::AfterTabEdit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Event::BeforeFileRead => "before_file_read",
            Event::AfterFileRead => "after_file_read",
            Event::BeforeFileWrite => "before_file_write",
            Event::AfterFileWrite => "after_file_write",
            Event::BeforeCommand => "before_command",
            Event::AfterCommand => "after_command",
            Event::BeforeMcp => "before_mcp",
            Event::AfterMcp => "after_mcp",
            Event::BeforePrompt => "before_prompt",
            Event::OnStop => "on_stop",
            Event::OnSessionStart => "on_session_start",
            Event::OnSessionEnd => "on_session_end",
            Event::AfterResponse => "after_response",
            Event::AfterThought => "after_thought",
            Event::OnPermission => "on_permission",
            Event::OnNotification => "on_notification",
            Event::BeforeCompact => "before_compact",
            Event::OnSubagentStop => "on_subagent_stop",
            Event::BeforeTabRead => "before_tab_read",
            Event::AfterTabEdit => "after_tab_edit",
        }
    }

    /// Fires before an action takes place.
    pub fn is_before(self) -> bool {
        matches!(
            self,
            Event::BeforeFileRead
                | Event::BeforeFileWrite
                | Event::BeforeCommand
                | Event::BeforeMcp
                | Event::BeforePrompt
                | Event::BeforeCompact
                | Event::BeforeTabRead
        )
    }

    /// Fires after an action has taken place.
    pub fn is_after(self) -> bool {
        matches!(
            self,
            Event::AfterFileRead
                | Event::AfterFileWrite
                | Event::AfterCommand
                | Event::AfterMcp
                | Event::AfterResponse
                | Event::AfterThought
                | Event::AfterTabEdit
        )
    }

    /// A hook on this event may stop the action from happening.
    pub fn can_block(self) -> bool {
        self.is_before() || self == Event::OnPermission
    }

    pub fn tool_support(self) -> ToolSupport {
        match self {
            Event::BeforeFileRead => support(true, true, true),
            Event::AfterFileRead => support(true, false, true),
            Event::BeforeFileWrite => support(true, false, true),
            Event::AfterFileWrite => support(true, true, true),
            Event::BeforeCommand | Event::AfterCommand => support(true, true, true),
            Event::BeforeMcp | Event::AfterMcp => support(true, true, true),
            Event::BeforePrompt => support(true, true, true),
            Event::OnStop => support(true, true, false),
            Event::OnSessionStart | Event::OnSessionEnd => support(true, false, false),
            Event::AfterResponse | Event::AfterThought => support(false, true, false),
            Event::OnPermission | Event::OnNotification => support(true, false, false),
            Event::BeforeCompact | Event::OnSubagentStop => support(true, false, false),
            Event::BeforeTabRead | Event::AfterTabEdit => support(false, true, false),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event '{0}'")]
pub struct UnknownEvent(pub String);

impl FromStr for Event {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn before_and_after_are_disjoint() {
        for event in Event::ALL {
            assert!(
                !(event.is_before() && event.is_after()),
                "{event} is both before and after"
            );
        }
    }

    #[test]
    fn can_block_is_before_or_permission() {
        for event in Event::ALL {
            assert_eq!(
                event.can_block(),
                event.is_before() || event == Event::OnPermission,
                "{event}"
            );
        }
        assert!(Event::OnPermission.can_block());
        assert!(!Event::OnStop.can_block());
        assert!(!Event::AfterCommand.can_block());
    }

    #[test]
    fn classification_examples() {
        assert!(Event::BeforeCompact.is_before());
        assert!(Event::AfterThought.is_after());
        assert!(!Event::OnSessionStart.is_before());
        assert!(!Event::OnSessionStart.is_after());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for event in Event::ALL {
            assert_eq!(event.to_string().parse::<Event>().unwrap(), event);
        }
        assert_eq!(
            "before_lunch".parse::<Event>().unwrap_err(),
            UnknownEvent("before_lunch".into())
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Event::BeforeMcp).unwrap();
        assert_eq!(json, "\"before_mcp\"");
        for event in Event::ALL {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event.as_str()));
        }
    }

    #[test]
    fn tool_support_table() {
        let s = Event::AfterFileRead.tool_support();
        assert!(s.claude && !s.cursor && s.windsurf);
        assert!(s.supports("claude"));
        assert!(!s.supports("cursor"));
        assert!(!s.supports("vim"));

        assert_eq!(Event::AfterTabEdit.tool_support(), support(false, true, false));
        assert_eq!(Event::OnStop.tool_support(), support(true, true, false));
    }

    #[test]
    fn every_event_supported_somewhere() {
        for event in Event::ALL {
            let s = event.tool_support();
            assert!(s.claude || s.cursor || s.windsurf, "{event}");
        }
    }
}
