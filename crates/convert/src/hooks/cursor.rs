//! Cursor hooks, stored in `.cursor/hooks.json`.
//!
//! Cursor keys command lists directly by event name and has no matchers
//! or prompt hooks.

use super::config::Config;
use super::event::Event;
use super::hook::{Hook, HookEntry};
use super::command_hooks;
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const ADAPTER_NAME: &str = "cursor";
pub const PROJECT_CONFIG_DIR: &str = ".cursor";
pub const CONFIG_FILE: &str = "hooks.json";
/// Version written when the canonical config does not carry one.
pub const DEFAULT_VERSION: u32 = 1;

/// Native event name for a canonical event.
pub fn native_event(event: Event) -> Option<&'static str> {
    let name = match event {
        Event::BeforeFileRead => "beforeReadFile",
        Event::AfterFileWrite => "afterFileEdit",
        Event::BeforeCommand => "beforeShellExecution",
        Event::AfterCommand => "afterShellExecution",
        Event::BeforeMcp => "beforeMCPExecution",
        Event::AfterMcp => "afterMCPExecution",
        Event::BeforePrompt => "beforeSubmitPrompt",
        Event::OnStop => "stop",
        Event::AfterResponse => "afterAgentResponse",
        Event::AfterThought => "afterAgentThought",
        Event::BeforeTabRead => "beforeTabFileRead",
        Event::AfterTabEdit => "afterTabFileEdit",
        Event::AfterFileRead
        | Event::BeforeFileWrite
        | Event::OnSessionStart
        | Event::OnSessionEnd
        | Event::OnPermission
        | Event::OnNotification
        | Event::BeforeCompact
        | Event::OnSubagentStop => return None,
    };
    Some(name)
}

/// Canonical event for a native event name.
pub fn canonical_event(name: &str) -> Option<Event> {
    let event = match name {
        "beforeReadFile" => Event::BeforeFileRead,
        "afterFileEdit" => Event::AfterFileWrite,
        "beforeShellExecution" => Event::BeforeCommand,
        "afterShellExecution" => Event::AfterCommand,
        "beforeMCPExecution" => Event::BeforeMcp,
        "afterMCPExecution" => Event::AfterMcp,
        "beforeSubmitPrompt" => Event::BeforePrompt,
        "stop" => Event::OnStop,
        "afterAgentResponse" => Event::AfterResponse,
        "afterAgentThought" => Event::AfterThought,
        "beforeTabFileRead" => Event::BeforeTabRead,
        "afterTabFileEdit" => Event::AfterTabEdit,
        _ => return None,
    };
    Some(event)
}

/// Cursor's `hooks.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorHooksConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<CursorHook>>,
}

impl Default for CursorHooksConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            hooks: BTreeMap::new(),
        }
    }
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorHook {
    pub command: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CursorHooksAdapter;

impl CursorHooksAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_events(&self) -> Vec<Event> {
        Event::ALL
            .into_iter()
            .filter(|e| native_event(*e).is_some())
            .collect()
    }

    /// Project, user and system paths, in that order.
    pub fn default_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(PROJECT_CONFIG_DIR).join(CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE));
        }
        if cfg!(target_os = "macos") {
            paths.push(PathBuf::from("/Library/Application Support/Cursor").join(CONFIG_FILE));
        } else if cfg!(target_os = "linux") {
            paths.push(PathBuf::from("/etc/cursor").join(CONFIG_FILE));
        } else if cfg!(target_os = "windows") {
            paths.push(PathBuf::from(r"C:\ProgramData\Cursor").join(CONFIG_FILE));
        }
        paths
    }

    pub fn to_core(&self, native: &CursorHooksConfig) -> Config {
        let mut cfg = Config {
            version: Some(native.version),
            ..Config::default()
        };
        for (name, hooks) in &native.hooks {
            let Some(event) = canonical_event(name) else {
                tracing::debug!(event = %name, "skipping unrecognized cursor hook event");
                continue;
            };
            let hooks = hooks.iter().map(|h| Hook::command(h.command.clone())).collect();
            cfg.add_entry(event, HookEntry::new(None, hooks));
        }
        cfg
    }

    pub fn from_core(&self, cfg: &Config) -> CursorHooksConfig {
        let mut native = CursorHooksConfig {
            version: cfg.version.filter(|v| *v > 0).unwrap_or(DEFAULT_VERSION),
            hooks: BTreeMap::new(),
        };
        for (event, entries) in &cfg.hooks {
            let Some(name) = native_event(*event) else {
                tracing::debug!(event = %event, "event not supported by cursor, dropping");
                continue;
            };
            let hooks: Vec<CursorHook> = command_hooks(ADAPTER_NAME, *event, entries)
                .map(|command| CursorHook {
                    command: command.to_string(),
                })
                .collect();
            if !hooks.is_empty() {
                native.hooks.entry(name.to_string()).or_default().extend(hooks);
            }
        }
        native
    }
}

impl Adapter for CursorHooksAdapter {
    type Item = Config;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Config, ParseError> {
        let native: CursorHooksConfig =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, cfg: &Config) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(cfg)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }
}
