//! Lifecycle hooks: the canonical model and per-tool adapters.
//!
//! ```
//! use assistkit_convert::hooks;
//!
//! let registry = hooks::builtin_registry();
//! let claude = br#"{"hooks": {"PreToolUse": [
//!     {"matcher": "Bash", "hooks": [{"type": "command", "command": "check.sh"}]}
//! ]}}"#;
//! let cursor = registry.convert(claude, "claude", "cursor").unwrap();
//! let text = String::from_utf8(cursor).unwrap();
//! assert!(text.contains("beforeShellExecution"));
//! ```

pub mod claude;
mod config;
pub mod cursor;
mod event;
mod hook;
pub mod windsurf;

pub use claude::ClaudeHooksAdapter;
pub use config::{Config, CANONICAL_FORMAT};
pub use cursor::CursorHooksAdapter;
pub use event::{Event, ToolSupport, UnknownEvent};
pub use hook::{Hook, HookEntry, HookType};
pub use windsurf::WindsurfHooksAdapter;

use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use crate::registry::Registry;
use std::sync::Arc;

/// Registry of hooks adapters.
pub type HookRegistry = Registry<dyn Adapter<Item = Config>>;

/// A registry holding the canonical, claude, cursor and windsurf adapters.
pub fn builtin_registry() -> HookRegistry {
    let registry = HookRegistry::new();
    registry.register(Arc::new(CanonicalHooksAdapter));
    registry.register(Arc::new(ClaudeHooksAdapter::new()));
    registry.register(Arc::new(CursorHooksAdapter::new()));
    registry.register(Arc::new(WindsurfHooksAdapter::new()));
    registry
}

/// The canonical JSON form exposed as an adapter, for converting to and
/// from it through a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalHooksAdapter;

impl Adapter for CanonicalHooksAdapter {
    type Item = Config;

    fn name(&self) -> &str {
        CANONICAL_FORMAT
    }

    fn parse(&self, data: &[u8]) -> Result<Config, ParseError> {
        Config::from_json(data)
    }

    fn marshal(&self, cfg: &Config) -> Result<Vec<u8>, MarshalError> {
        cfg.to_json()
    }
}

/// Command hooks across `entries`, paired with the hook they came from.
///
/// Prompt hooks and hooks without a command are skipped for tools that
/// only run shell commands.
pub(crate) fn command_hooks_with<'a>(
    tool: &'static str,
    event: Event,
    entries: &'a [HookEntry],
) -> impl Iterator<Item = (&'a str, &'a Hook)> + 'a {
    entries
        .iter()
        .flat_map(|entry| entry.hooks.iter())
        .filter_map(move |hook| match (hook.effective_type(), hook.command_text()) {
            (Some(HookType::Command), Some(command)) => Some((command, hook)),
            (hook_type, _) => {
                tracing::debug!(
                    tool,
                    event = %event,
                    hook_type = ?hook_type,
                    "tool only runs command hooks, dropping hook"
                );
                None
            }
        })
}

pub(crate) fn command_hooks<'a>(
    tool: &'static str,
    event: Event,
    entries: &'a [HookEntry],
) -> impl Iterator<Item = &'a str> + 'a {
    command_hooks_with(tool, event, entries).map(|(command, _)| command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_names() {
        let registry = builtin_registry();
        assert_eq!(
            registry.names(),
            vec!["canonical", "claude", "cursor", "windsurf"]
        );
    }

    #[test]
    fn command_hooks_skip_prompts() {
        let entries = vec![HookEntry::new(
            None,
            vec![
                Hook::command("a"),
                Hook::prompt("b"),
                Hook {
                    command: Some("c".into()),
                    ..Hook::default()
                },
                Hook::command(""),
            ],
        )];
        let commands: Vec<&str> = command_hooks("cursor", Event::OnStop, &entries).collect();
        assert_eq!(commands, vec!["a", "c"]);
    }

    #[test]
    fn convert_claude_to_windsurf_and_back() {
        let registry = builtin_registry();
        let claude = br#"{"hooks": {
            "PreToolUse": [{"matcher": "Read", "hooks": [{"type": "command", "command": "scan.sh"}]}],
            "SessionStart": [{"hooks": [{"type": "command", "command": "hello.sh"}]}]
        }}"#;

        let windsurf = registry.convert(claude, "claude", "windsurf").unwrap();
        let cfg = registry.get("windsurf").unwrap().parse(&windsurf).unwrap();
        // SessionStart has no windsurf counterpart.
        assert_eq!(cfg.hook_count(), 1);
        assert_eq!(cfg.events(), vec![Event::BeforeFileRead]);

        let back = registry.convert(&windsurf, "windsurf", "claude").unwrap();
        let json: serde_json::Value = serde_json::from_slice(&back).unwrap();
        assert_eq!(json["hooks"]["PreToolUse"][0]["matcher"], "Read");
    }

    #[test]
    fn canonical_adapter_round_trip() {
        let registry = builtin_registry();
        let mut cfg = Config::new();
        cfg.add(Event::AfterTabEdit, Hook::command("tab.sh"));
        let json = cfg.to_json().unwrap();

        let cursor = registry.convert(&json, "canonical", "cursor").unwrap();
        let back = registry.convert(&cursor, "cursor", "canonical").unwrap();
        let back = Config::from_json(&back).unwrap();
        assert_eq!(back.hooks_for_event(Event::AfterTabEdit).len(), 1);
    }
}
