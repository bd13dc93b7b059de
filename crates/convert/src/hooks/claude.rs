//! Claude Code hooks, stored in the `hooks` section of `settings.json`.
//!
//! Claude has two generic gate events, `PreToolUse` and `PostToolUse`,
//! whose meaning depends on the entry's tool matcher. The remaining events
//! map one to one.

use super::config::Config;
use super::event::Event;
use super::hook::{Hook, HookEntry, HookType};
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const ADAPTER_NAME: &str = "claude";
pub const PROJECT_CONFIG_DIR: &str = ".claude";
pub const SETTINGS_FILE: &str = "settings.json";
pub const SETTINGS_LOCAL_FILE: &str = "settings.local.json";
pub const MANAGED_SETTINGS_FILE: &str = "managed-settings.json";

/// Native Claude event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaudeEvent {
    PreToolUse,
    PostToolUse,
    PermissionRequest,
    UserPromptSubmit,
    Stop,
    SessionStart,
    SessionEnd,
    Notification,
    PreCompact,
    SubagentStop,
}

impl ClaudeEvent {
    pub const ALL: [ClaudeEvent; 10] = [
        ClaudeEvent::PreToolUse,
        ClaudeEvent::PostToolUse,
        ClaudeEvent::PermissionRequest,
        ClaudeEvent::UserPromptSubmit,
        ClaudeEvent::Stop,
        ClaudeEvent::SessionStart,
        ClaudeEvent::SessionEnd,
        ClaudeEvent::Notification,
        ClaudeEvent::PreCompact,
        ClaudeEvent::SubagentStop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClaudeEvent::PreToolUse => "PreToolUse",
            ClaudeEvent::PostToolUse => "PostToolUse",
            ClaudeEvent::PermissionRequest => "PermissionRequest",
            ClaudeEvent::UserPromptSubmit => "UserPromptSubmit",
            ClaudeEvent::Stop => "Stop",
            ClaudeEvent::SessionStart => "SessionStart",
            ClaudeEvent::SessionEnd => "SessionEnd",
            ClaudeEvent::Notification => "Notification",
            ClaudeEvent::PreCompact => "PreCompact",
            ClaudeEvent::SubagentStop => "SubagentStop",
        }
    }

    pub fn from_native(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

/// Phase of a generic tool gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    After,
}

/// Tool families a gate matcher can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolMatcher {
    FileRead,
    FileWrite,
    Command,
    /// Any other tool name, including MCP tools and an absent matcher.
    External,
}

impl ToolMatcher {
    fn classify(matcher: Option<&str>) -> Self {
        match matcher.unwrap_or_default() {
            "Read" => ToolMatcher::FileRead,
            "Write" | "Edit" | "Write|Edit" => ToolMatcher::FileWrite,
            "Bash" => ToolMatcher::Command,
            _ => ToolMatcher::External,
        }
    }

    fn event(self, phase: Phase) -> Event {
        match (self, phase) {
            (ToolMatcher::FileRead, Phase::Before) => Event::BeforeFileRead,
            (ToolMatcher::FileRead, Phase::After) => Event::AfterFileRead,
            (ToolMatcher::FileWrite, Phase::Before) => Event::BeforeFileWrite,
            (ToolMatcher::FileWrite, Phase::After) => Event::AfterFileWrite,
            (ToolMatcher::Command, Phase::Before) => Event::BeforeCommand,
            (ToolMatcher::Command, Phase::After) => Event::AfterCommand,
            (ToolMatcher::External, Phase::Before) => Event::BeforeMcp,
            (ToolMatcher::External, Phase::After) => Event::AfterMcp,
        }
    }
}

/// Canonical event for a native event and matcher.
pub fn canonical_event(event: ClaudeEvent, matcher: Option<&str>) -> Event {
    match event {
        ClaudeEvent::PreToolUse => ToolMatcher::classify(matcher).event(Phase::Before),
        ClaudeEvent::PostToolUse => ToolMatcher::classify(matcher).event(Phase::After),
        ClaudeEvent::PermissionRequest => Event::OnPermission,
        ClaudeEvent::UserPromptSubmit => Event::BeforePrompt,
        ClaudeEvent::Stop => Event::OnStop,
        ClaudeEvent::SessionStart => Event::OnSessionStart,
        ClaudeEvent::SessionEnd => Event::OnSessionEnd,
        ClaudeEvent::Notification => Event::OnNotification,
        ClaudeEvent::PreCompact => Event::BeforeCompact,
        ClaudeEvent::SubagentStop => Event::OnSubagentStop,
    }
}

/// Native event and default matcher for a canonical event, if Claude has one.
pub fn native_event(event: Event) -> Option<(ClaudeEvent, Option<&'static str>)> {
    let mapped = match event {
        Event::BeforeFileRead => (ClaudeEvent::PreToolUse, Some("Read")),
        Event::AfterFileRead => (ClaudeEvent::PostToolUse, Some("Read")),
        Event::BeforeFileWrite => (ClaudeEvent::PreToolUse, Some("Write|Edit")),
        Event::AfterFileWrite => (ClaudeEvent::PostToolUse, Some("Write|Edit")),
        Event::BeforeCommand => (ClaudeEvent::PreToolUse, Some("Bash")),
        Event::AfterCommand => (ClaudeEvent::PostToolUse, Some("Bash")),
        Event::BeforeMcp => (ClaudeEvent::PreToolUse, None),
        Event::AfterMcp => (ClaudeEvent::PostToolUse, None),
        Event::BeforePrompt => (ClaudeEvent::UserPromptSubmit, None),
        Event::OnStop => (ClaudeEvent::Stop, None),
        Event::OnSessionStart => (ClaudeEvent::SessionStart, None),
        Event::OnSessionEnd => (ClaudeEvent::SessionEnd, None),
        Event::OnPermission => (ClaudeEvent::PermissionRequest, None),
        Event::OnNotification => (ClaudeEvent::Notification, None),
        Event::BeforeCompact => (ClaudeEvent::PreCompact, None),
        Event::OnSubagentStop => (ClaudeEvent::SubagentStop, None),
        Event::AfterResponse | Event::AfterThought | Event::BeforeTabRead | Event::AfterTabEdit => {
            return None
        }
    };
    Some(mapped)
}

/// The hooks section of a Claude settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeHooksConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hooks: BTreeMap<String, Vec<ClaudeHookEntry>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_all_hooks: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_managed_hooks_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeHookEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    #[serde(default)]
    pub hooks: Vec<ClaudeHook>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeHook {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub hook_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Adapter for Claude Code hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeHooksAdapter;

impl ClaudeHooksAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_events(&self) -> Vec<Event> {
        Event::ALL
            .into_iter()
            .filter(|e| native_event(*e).is_some())
            .collect()
    }

    /// Project, local, user and managed settings paths, in that order.
    pub fn default_paths(&self) -> Vec<PathBuf> {
        let project = PathBuf::from(PROJECT_CONFIG_DIR);
        let mut paths = vec![project.join(SETTINGS_FILE), project.join(SETTINGS_LOCAL_FILE)];

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(PROJECT_CONFIG_DIR).join(SETTINGS_FILE));
        }

        if cfg!(target_os = "macos") {
            paths.push(PathBuf::from("/Library/Application Support/ClaudeCode").join(MANAGED_SETTINGS_FILE));
        } else if cfg!(target_os = "linux") {
            paths.push(PathBuf::from("/etc/claude-code").join(MANAGED_SETTINGS_FILE));
        } else if cfg!(target_os = "windows") {
            paths.push(PathBuf::from(r"C:\Program Files\ClaudeCode").join(MANAGED_SETTINGS_FILE));
        }

        paths
    }

    pub fn to_core(&self, native: &ClaudeHooksConfig) -> Config {
        let mut cfg = Config {
            disable_all_hooks: native.disable_all_hooks,
            allow_managed_hooks_only: native.allow_managed_hooks_only,
            ..Config::default()
        };

        for (name, entries) in &native.hooks {
            let Some(native_event) = ClaudeEvent::from_native(name) else {
                tracing::debug!(event = %name, "skipping unrecognized claude hook event");
                continue;
            };
            for entry in entries {
                let matcher = entry.matcher.as_deref().filter(|m| !m.is_empty());
                let event = canonical_event(native_event, matcher);
                let hooks = entry.hooks.iter().map(hook_to_core).collect();
                cfg.add_entry(event, HookEntry::new(matcher.map(String::from), hooks));
            }
        }
        cfg
    }

    pub fn from_core(&self, cfg: &Config) -> ClaudeHooksConfig {
        let mut native = ClaudeHooksConfig {
            disable_all_hooks: cfg.disable_all_hooks,
            allow_managed_hooks_only: cfg.allow_managed_hooks_only,
            ..ClaudeHooksConfig::default()
        };

        for (event, entries) in &cfg.hooks {
            let Some((native_event, default_matcher)) = native_event(*event) else {
                tracing::debug!(event = %event, "event not supported by claude, dropping");
                continue;
            };
            for entry in entries {
                let matcher = entry.matcher().or(default_matcher).map(String::from);
                native
                    .hooks
                    .entry(native_event.as_str().to_string())
                    .or_default()
                    .push(ClaudeHookEntry {
                        matcher,
                        hooks: entry.hooks.iter().map(hook_from_core).collect(),
                    });
            }
        }
        native
    }
}

fn hook_to_core(hook: &ClaudeHook) -> Hook {
    Hook {
        hook_type: HookType::from_tag(&hook.hook_type),
        command: hook.command.clone().filter(|c| !c.is_empty()),
        prompt: hook.prompt.clone().filter(|p| !p.is_empty()),
        timeout: hook.timeout.filter(|t| *t > 0),
        ..Hook::default()
    }
    .with_inferred_type()
}

fn hook_from_core(hook: &Hook) -> ClaudeHook {
    ClaudeHook {
        hook_type: hook
            .effective_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        command: hook.command_text().map(String::from),
        prompt: hook.prompt_text().map(String::from),
        // Zero means "no timeout" on both sides.
        timeout: hook.timeout.filter(|t| *t > 0),
    }
}

impl Adapter for ClaudeHooksAdapter {
    type Item = Config;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Config, ParseError> {
        let native: ClaudeHooksConfig =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, cfg: &Config) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(cfg)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistkit_test_utils::samples;
    use proptest::prelude::*;

    fn adapter() -> ClaudeHooksAdapter {
        ClaudeHooksAdapter::new()
    }

    #[test]
    fn name() {
        assert_eq!(Adapter::name(&adapter()), "claude");
    }

    #[test]
    fn parse_settings_file() {
        let cfg = adapter().parse(samples::CLAUDE_SETTINGS.as_bytes()).unwrap();

        assert_eq!(cfg.hook_count(), 5);
        assert_eq!(cfg.hooks_for_event(Event::BeforeCommand).len(), 1);
        assert_eq!(cfg.hooks_for_event(Event::AfterFileWrite).len(), 1);
        assert_eq!(cfg.hooks_for_event(Event::BeforeMcp).len(), 1);
        assert_eq!(cfg.hooks_for_event(Event::BeforePrompt).len(), 1);
        assert!(cfg.hooks_for_event(Event::OnStop)[0].is_prompt());
        assert_eq!(cfg.entries(Event::BeforeMcp)[0].matcher(), Some("mcp__github__.*"));
        assert!(cfg.disable_all_hooks);
    }

    #[test]
    fn parse_ignores_unrelated_settings_and_unknown_events() {
        let data = br#"{
            "model": "opus",
            "permissions": {"allow": ["Bash(ls)"]},
            "hooks": {
                "Stop": [{"hooks": [{"type": "command", "command": "a"}]}],
                "FutureEvent": [{"hooks": [{"type": "command", "command": "b"}]}]
            }
        }"#;
        let cfg = adapter().parse(data).unwrap();
        assert_eq!(cfg.hook_count(), 1);
        assert_eq!(cfg.events(), vec![Event::OnStop]);
    }

    #[test]
    fn parse_invalid_json() {
        let err = adapter().parse(b"{ not json").unwrap_err();
        assert_eq!(err.format, "claude");
        assert!(err.path.is_none());
    }

    #[test]
    fn matcher_disambiguation() {
        let cases = [
            (ClaudeEvent::PreToolUse, Some("Read"), Event::BeforeFileRead),
            (ClaudeEvent::PreToolUse, Some("Write"), Event::BeforeFileWrite),
            (ClaudeEvent::PreToolUse, Some("Edit"), Event::BeforeFileWrite),
            (ClaudeEvent::PreToolUse, Some("Write|Edit"), Event::BeforeFileWrite),
            (ClaudeEvent::PreToolUse, Some("Bash"), Event::BeforeCommand),
            (ClaudeEvent::PreToolUse, Some("mcp__db__query"), Event::BeforeMcp),
            (ClaudeEvent::PreToolUse, None, Event::BeforeMcp),
            (ClaudeEvent::PostToolUse, Some("Read"), Event::AfterFileRead),
            (ClaudeEvent::PostToolUse, Some("Edit"), Event::AfterFileWrite),
            (ClaudeEvent::PostToolUse, Some("Bash"), Event::AfterCommand),
            (ClaudeEvent::PostToolUse, Some("Glob"), Event::AfterMcp),
        ];
        for (native, matcher, expected) in cases {
            assert_eq!(canonical_event(native, matcher), expected, "{native:?} {matcher:?}");
        }
    }

    #[test]
    fn direct_events_ignore_matcher() {
        assert_eq!(
            canonical_event(ClaudeEvent::Stop, Some("Bash")),
            Event::OnStop
        );
        assert_eq!(
            canonical_event(ClaudeEvent::PermissionRequest, None),
            Event::OnPermission
        );
        assert_eq!(
            canonical_event(ClaudeEvent::PreCompact, None),
            Event::BeforeCompact
        );
    }

    #[test]
    fn native_table_agrees_with_tool_support() {
        for event in Event::ALL {
            assert_eq!(
                native_event(event).is_some(),
                event.tool_support().claude,
                "{event}"
            );
        }
    }

    #[test]
    fn native_events_resolve_back() {
        for event in adapter().supported_events() {
            let (native, matcher) = native_event(event).unwrap();
            assert_eq!(canonical_event(native, matcher), event);
        }
    }

    #[test]
    fn marshal_uses_default_matchers() {
        let mut cfg = Config::new();
        cfg.add(Event::BeforeCommand, Hook::command("check.sh"));
        cfg.add(Event::AfterFileWrite, Hook::command("fmt.sh"));
        cfg.add(Event::BeforeFileRead, Hook::command("scan.sh"));
        cfg.add(Event::BeforeMcp, Hook::command("mcp.sh"));

        let native = adapter().from_core(&cfg);
        let pre = &native.hooks["PreToolUse"];
        let matchers: Vec<Option<&str>> = pre.iter().map(|e| e.matcher.as_deref()).collect();
        assert_eq!(matchers, vec![Some("Read"), Some("Bash"), None]);
        assert_eq!(
            native.hooks["PostToolUse"][0].matcher.as_deref(),
            Some("Write|Edit")
        );
    }

    #[test]
    fn marshal_keeps_explicit_matcher() {
        let mut cfg = Config::new();
        cfg.add_with_matcher(Event::BeforeFileWrite, "Edit", Hook::command("guard.sh"));
        let native = adapter().from_core(&cfg);
        assert_eq!(native.hooks["PreToolUse"][0].matcher.as_deref(), Some("Edit"));
    }

    #[test]
    fn marshal_drops_unsupported_events() {
        let mut cfg = Config::new();
        cfg.add(Event::AfterThought, Hook::command("t.sh"));
        cfg.add(Event::BeforeTabRead, Hook::command("tab.sh"));
        cfg.add(Event::OnStop, Hook::command("stop.sh"));

        let out = adapter().marshal(&cfg).unwrap();
        let back = adapter().parse(&out).unwrap();
        assert_eq!(back.hook_count(), 1);
        assert_eq!(back.events(), vec![Event::OnStop]);
    }

    #[test]
    fn type_inference_both_directions() {
        let mut cfg = Config::new();
        cfg.add(
            Event::OnStop,
            Hook {
                command: Some("echo done".into()),
                ..Hook::default()
            },
        );
        cfg.add(
            Event::BeforePrompt,
            Hook {
                prompt: Some("is this allowed?".into()),
                ..Hook::default()
            },
        );

        let out = adapter().marshal(&cfg).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["hooks"]["Stop"][0]["hooks"][0]["type"], "command");
        assert_eq!(json["hooks"]["UserPromptSubmit"][0]["hooks"][0]["type"], "prompt");

        let back = adapter().parse(&out).unwrap();
        assert_eq!(
            back.hooks_for_event(Event::OnStop)[0].hook_type,
            Some(HookType::Command)
        );
        assert_eq!(
            back.hooks_for_event(Event::BeforePrompt)[0].hook_type,
            Some(HookType::Prompt)
        );

        // A native hook with no type tag is inferred on the way in too.
        let untagged = br#"{"hooks": {"Stop": [{"hooks": [{"command": "x"}]}]}}"#;
        let cfg = adapter().parse(untagged).unwrap();
        assert_eq!(
            cfg.hooks_for_event(Event::OnStop)[0].hook_type,
            Some(HookType::Command)
        );
    }

    #[test]
    fn round_trip_preserves_hooks_per_event_and_matcher() {
        let mut cfg = Config::new();
        cfg.add_with_matcher(Event::BeforeCommand, "Bash", Hook::command("a").with_timeout(10));
        cfg.add_with_matcher(Event::BeforeCommand, "Bash", Hook::prompt("b"));
        cfg.add_with_matcher(Event::BeforeFileWrite, "Write", Hook::command("c"));
        cfg.add_with_matcher(Event::BeforeFileWrite, "Edit", Hook::command("d"));
        cfg.add_with_matcher(Event::AfterMcp, "mcp__fs__write", Hook::command("e"));
        cfg.add(Event::OnSessionStart, Hook::command("f"));
        cfg.add(Event::OnSubagentStop, Hook::prompt("g"));
        cfg.allow_managed_hooks_only = true;

        let back = adapter().parse(&adapter().marshal(&cfg).unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn zero_timeout_is_treated_as_unset() {
        let mut cfg = Config::new();
        cfg.add_with_matcher(Event::BeforeCommand, "Bash", Hook::command("x").with_timeout(0));

        let out = adapter().marshal(&cfg).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json["hooks"]["PreToolUse"][0]["hooks"][0].get("timeout").is_none());

        let back = adapter().parse(&out).unwrap();
        assert_eq!(back.hooks_for_event(Event::BeforeCommand)[0].timeout, None);
        assert_eq!(adapter().marshal(&back).unwrap(), out);

        let parsed = adapter()
            .parse(br#"{"hooks": {"Stop": [{"hooks": [{"type": "command", "command": "n", "timeout": 0}]}]}}"#)
            .unwrap();
        assert_eq!(parsed.hooks_for_event(Event::OnStop)[0].timeout, None);
    }

    #[test]
    fn flags_survive_without_hooks() {
        let cfg = Config {
            disable_all_hooks: true,
            ..Config::default()
        };
        let out = adapter().marshal(&cfg).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json, serde_json::json!({"disableAllHooks": true}));
    }

    #[test]
    fn default_paths_include_project_and_user() {
        let _lock = assistkit_test_utils::env_guard();
        let fixture = assistkit_test_utils::TestFixture::new().unwrap();
        let _home = fixture.home_guard();

        let paths = adapter().default_paths();
        assert_eq!(paths[0], PathBuf::from(".claude/settings.json"));
        assert_eq!(paths[1], PathBuf::from(".claude/settings.local.json"));
        assert_eq!(paths[2], fixture.claude_dir.join("settings.json"));
    }

    #[test]
    fn read_file_sets_path_on_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let err = adapter().read_file(&path).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
        assert_eq!(err.format, "claude");
    }

    #[test]
    fn write_then_read_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".claude/settings.json");
        let mut cfg = Config::new();
        cfg.add_with_matcher(Event::AfterCommand, "Bash", Hook::command("log.sh"));

        adapter().write_file(&cfg, &path).unwrap();
        assert_eq!(adapter().read_file(&path).unwrap(), cfg);
    }

    proptest! {
        #[test]
        fn unknown_matchers_fall_back_to_mcp(matcher in "[A-Za-z_|.*]{1,24}") {
            prop_assume!(!matches!(matcher.as_str(), "Read" | "Write" | "Edit" | "Write|Edit" | "Bash"));
            prop_assert_eq!(
                canonical_event(ClaudeEvent::PreToolUse, Some(&matcher)),
                Event::BeforeMcp
            );
            prop_assert_eq!(
                canonical_event(ClaudeEvent::PostToolUse, Some(&matcher)),
                Event::AfterMcp
            );
        }
    }
}
