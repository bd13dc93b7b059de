//! The canonical hooks configuration.

use super::event::Event;
use super::hook::{Hook, HookEntry};
use crate::error::{HookValidationError, MarshalError, ParseError, WriteError};
use crate::fs::write_private;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Format name used in errors for the canonical JSON form.
pub const CANONICAL_FORMAT: &str = "canonical";

/// Tool-agnostic hooks configuration.
///
/// Events are kept in a sorted map so encoded output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File format version, carried by formats that version their file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub hooks: BTreeMap<Event, Vec<HookEntry>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_all_hooks: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_managed_hooks_only: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook without a matcher.
    pub fn add(&mut self, event: Event, hook: Hook) {
        self.add_with_matcher(event, "", hook);
    }

    /// Add a hook, joining the existing entry with the same matcher if there is one.
    pub fn add_with_matcher(&mut self, event: Event, matcher: &str, hook: Hook) {
        let matcher = (!matcher.is_empty()).then(|| matcher.to_string());
        self.add_entry(event, HookEntry::new(matcher, vec![hook]));
    }

    /// Add a whole entry. Hooks are appended to an entry with an identical
    /// matcher; otherwise the entry is appended as is.
    pub fn add_entry(&mut self, event: Event, entry: HookEntry) {
        let entries = self.hooks.entry(event).or_default();
        match entries.iter_mut().find(|e| e.matcher() == entry.matcher()) {
            Some(existing) => existing.hooks.extend(entry.hooks),
            None => entries.push(entry),
        }
    }

    /// Entries configured for `event`.
    pub fn entries(&self, event: Event) -> &[HookEntry] {
        self.hooks.get(&event).map(Vec::as_slice).unwrap_or_default()
    }

    /// All hooks for `event`, flattened across entries.
    pub fn hooks_for_event(&self, event: Event) -> Vec<&Hook> {
        self.entries(event)
            .iter()
            .flat_map(|entry| entry.hooks.iter())
            .collect()
    }

    /// Remove every entry for `event`, returning them.
    pub fn remove(&mut self, event: Event) -> Option<Vec<HookEntry>> {
        self.hooks.remove(&event)
    }

    /// Events with at least one entry, in sorted order.
    pub fn events(&self) -> Vec<Event> {
        self.hooks
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(event, _)| *event)
            .collect()
    }

    pub fn has_hooks(&self) -> bool {
        self.hook_count() > 0
    }

    pub fn hook_count(&self) -> usize {
        self.hooks
            .values()
            .flat_map(|entries| entries.iter())
            .map(|entry| entry.hooks.len())
            .sum()
    }

    /// Append the other config's entries. Policy flags keep the more restrictive value.
    pub fn merge(&mut self, other: &Config) {
        for (event, entries) in &other.hooks {
            self.hooks
                .entry(*event)
                .or_default()
                .extend(entries.iter().cloned());
        }
        self.disable_all_hooks |= other.disable_all_hooks;
        self.allow_managed_hooks_only |= other.allow_managed_hooks_only;
        if self.version.is_none() {
            self.version = other.version;
        }
    }

    /// A copy holding only the events `tool` can express.
    pub fn filter_by_tool(&self, tool: &str) -> Config {
        Config {
            version: self.version,
            hooks: self
                .hooks
                .iter()
                .filter(|(event, _)| event.tool_support().supports(tool))
                .map(|(event, entries)| (*event, entries.clone()))
                .collect(),
            disable_all_hooks: self.disable_all_hooks,
            allow_managed_hooks_only: self.allow_managed_hooks_only,
        }
    }

    /// Reports the first malformed hook, in event order.
    pub fn validate(&self) -> Result<(), HookValidationError> {
        for (event, entries) in &self.hooks {
            for (entry_index, entry) in entries.iter().enumerate() {
                for (hook_index, hook) in entry.hooks.iter().enumerate() {
                    hook.validate().map_err(|source| HookValidationError {
                        event: *event,
                        entry_index,
                        hook_index,
                        source,
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Decode the canonical JSON form.
    pub fn from_json(data: &[u8]) -> Result<Self, ParseError> {
        serde_json::from_slice(data).map_err(|e| ParseError::new(CANONICAL_FORMAT, e))
    }

    /// Encode as pretty-printed canonical JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(self).map_err(|e| MarshalError::new(CANONICAL_FORMAT, e))
    }

    pub fn read_file(path: &Path) -> Result<Self, ParseError> {
        let data = std::fs::read(path)
            .map_err(|e| ParseError::new(CANONICAL_FORMAT, e).with_path(path))?;
        Self::from_json(&data).map_err(|e| e.with_path(path))
    }

    pub fn write_file(&self, path: &Path) -> Result<(), WriteError> {
        let data = self
            .to_json()
            .map_err(|e| WriteError::new(path, e).with_format(CANONICAL_FORMAT))?;
        write_private(path, &data).map_err(|e| WriteError::new(path, e).with_format(CANONICAL_FORMAT))
    }
}
