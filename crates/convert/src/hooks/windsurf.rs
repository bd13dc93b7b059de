//! Windsurf (Codeium Cascade) hooks.
//!
//! Workspace hooks live in `.windsurf/hooks.json`, user hooks in
//! `~/.codeium/windsurf/hooks.json`.

use super::command_hooks_with;
use super::config::Config;
use super::event::Event;
use super::hook::{Hook, HookEntry};
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const ADAPTER_NAME: &str = "windsurf";
pub const WORKSPACE_CONFIG_DIR: &str = ".windsurf";
pub const USER_CONFIG_DIR: &str = ".codeium/windsurf";
pub const CONFIG_FILE: &str = "hooks.json";

pub fn native_event(event: Event) -> Option<&'static str> {
    let name = match event {
        Event::BeforeFileRead => "pre_read_code",
        Event::AfterFileRead => "post_read_code",
        Event::BeforeFileWrite => "pre_write_code",
        Event::AfterFileWrite => "post_write_code",
        Event::BeforeCommand => "pre_run_command",
        Event::AfterCommand => "post_run_command",
        Event::BeforeMcp => "pre_mcp_tool_use",
        Event::AfterMcp => "post_mcp_tool_use",
        Event::BeforePrompt => "pre_user_prompt",
        Event::OnStop
        | Event::OnSessionStart
        | Event::OnSessionEnd
        | Event::AfterResponse
        | Event::AfterThought
        | Event::OnPermission
        | Event::OnNotification
        | Event::BeforeCompact
        | Event::OnSubagentStop
        | Event::BeforeTabRead
        | Event::AfterTabEdit => return None,
    };
    Some(name)
}

pub fn canonical_event(name: &str) -> Option<Event> {
    let event = match name {
        "pre_read_code" => Event::BeforeFileRead,
        "post_read_code" => Event::AfterFileRead,
        "pre_write_code" => Event::BeforeFileWrite,
        "post_write_code" => Event::AfterFileWrite,
        "pre_run_command" => Event::BeforeCommand,
        "post_run_command" => Event::AfterCommand,
        "pre_mcp_tool_use" => Event::BeforeMcp,
        "post_mcp_tool_use" => Event::AfterMcp,
        "pre_user_prompt" => Event::BeforePrompt,
        _ => return None,
    };
    Some(event)
}

/// Windsurf's `hooks.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindsurfHooksConfig {
    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<WindsurfHook>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindsurfHook {
    pub command: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindsurfHooksAdapter;

impl WindsurfHooksAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_events(&self) -> Vec<Event> {
        Event::ALL
            .into_iter()
            .filter(|e| native_event(*e).is_some())
            .collect()
    }

    /// Workspace, user and system paths, in that order.
    pub fn default_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(WORKSPACE_CONFIG_DIR).join(CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(USER_CONFIG_DIR).join(CONFIG_FILE));
        }
        if cfg!(target_os = "macos") {
            paths.push(PathBuf::from("/Library/Application Support/Windsurf").join(CONFIG_FILE));
        } else if cfg!(target_os = "linux") {
            paths.push(PathBuf::from("/etc/windsurf").join(CONFIG_FILE));
        } else if cfg!(target_os = "windows") {
            paths.push(PathBuf::from(r"C:\ProgramData\Windsurf").join(CONFIG_FILE));
        }
        paths
    }

    pub fn to_core(&self, native: &WindsurfHooksConfig) -> Config {
        let mut cfg = Config::new();
        for (name, hooks) in &native.hooks {
            let Some(event) = canonical_event(name) else {
                tracing::debug!(event = %name, "skipping unrecognized windsurf hook event");
                continue;
            };
            let hooks = hooks
                .iter()
                .map(|h| {
                    let mut hook = Hook::command(h.command.clone()).with_show_output(h.show_output);
                    hook.working_dir = h.working_directory.clone().filter(|d| !d.is_empty());
                    hook
                })
                .collect();
            cfg.add_entry(event, HookEntry::new(None, hooks));
        }
        cfg
    }

    pub fn from_core(&self, cfg: &Config) -> WindsurfHooksConfig {
        let mut native = WindsurfHooksConfig::default();
        for (event, entries) in &cfg.hooks {
            let Some(name) = native_event(*event) else {
                tracing::debug!(event = %event, "event not supported by windsurf, dropping");
                continue;
            };
            let hooks: Vec<WindsurfHook> = command_hooks_with(ADAPTER_NAME, *event, entries)
                .map(|(command, hook)| WindsurfHook {
                    command: command.to_string(),
                    show_output: hook.show_output,
                    working_directory: hook.working_dir.clone(),
                })
                .collect();
            if !hooks.is_empty() {
                native.hooks.entry(name.to_string()).or_default().extend(hooks);
            }
        }
        native
    }
}

impl Adapter for WindsurfHooksAdapter {
    type Item = Config;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Config, ParseError> {
        let native: WindsurfHooksConfig =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, cfg: &Config) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(cfg)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }
}
