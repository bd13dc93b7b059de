//! Project context documents (`CLAUDE.md`, `AGENTS.md`, `.cursorrules`).
//!
//! Context is authored once as JSON and rendered per tool. Renderers are
//! write-only: the generated markdown is not parsed back.

mod markdown;

pub use markdown::MarkdownContextRenderer;

use crate::error::{MarshalError, ParseError, WriteError};
use crate::fs::write_private;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Conventional file name for the canonical context.
pub const CONTEXT_FILE: &str = "CONTEXT.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagrams: Vec<Diagram>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Fence language, e.g. `mermaid`.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub path: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub severity: Severity,
}

/// What an assistant should know about a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,
    /// Named shell commands such as `build` or `test`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conventions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_package(&mut self, path: impl Into<String>, purpose: impl Into<String>) {
        self.packages.push(Package {
            path: path.into(),
            purpose: purpose.into(),
        });
    }

    pub fn add_convention(&mut self, convention: impl Into<String>) {
        self.conventions.push(convention.into());
    }

    pub fn add_note(&mut self, content: impl Into<String>) {
        self.notes.push(Note {
            content: content.into(),
            ..Note::default()
        });
    }

    pub fn add_note_with_severity(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        severity: Severity,
    ) {
        self.notes.push(Note {
            title: title.into(),
            content: content.into(),
            severity,
        });
    }

    pub fn set_command(&mut self, name: impl Into<String>, command: impl Into<String>) {
        self.commands.insert(name.into(), command.into());
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ParseError> {
        serde_json::from_slice(data).map_err(|e| ParseError::new("context", e))
    }

    pub fn read_file(path: &Path) -> Result<Self, ParseError> {
        let data = std::fs::read(path).map_err(|e| ParseError::new("context", e).with_path(path))?;
        Self::from_json(&data).map_err(|e| e.with_path(path))
    }
}

/// Why a context could not be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContextError {
    #[error("context has no name")]
    MissingName,
}

/// Renders a [`Context`] into one tool's instruction file.
pub trait ContextRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// File name the tool looks for, e.g. `CLAUDE.md`.
    fn output_file(&self) -> &str;

    fn render(&self, ctx: &Context) -> Result<Vec<u8>, MarshalError>;

    fn write_file(&self, ctx: &Context, path: &Path) -> Result<(), WriteError> {
        let data = self
            .render(ctx)
            .map_err(|e| WriteError::new(path, e).with_format(self.name()))?;
        write_private(path, &data).map_err(|e| WriteError::new(path, e).with_format(self.name()))
    }
}

pub type ContextRegistry = Registry<dyn ContextRenderer>;

pub fn builtin_registry() -> ContextRegistry {
    let registry = ContextRegistry::new();
    registry.register(Arc::new(MarkdownContextRenderer::claude()));
    registry.register(Arc::new(MarkdownContextRenderer::codex()));
    registry.register(Arc::new(MarkdownContextRenderer::cursor()));
    registry
}
