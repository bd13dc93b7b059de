//! Slash commands and saved prompts.

mod gemini;
mod markdown;

pub use gemini::{GeminiCommand, GeminiCommandAdapter, ARGS_PLACEHOLDER};
pub use markdown::MarkdownCommandAdapter;

use crate::adapter::CollectionAdapter;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Placeholder Claude and Codex substitute with the command's arguments.
pub const ARGUMENTS_PLACEHOLDER: &str = "$ARGUMENTS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl Argument {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: false,
        }
    }
}

/// A tool-agnostic command definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    /// Prompt body; may contain [`ARGUMENTS_PLACEHOLDER`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn add_argument(&mut self, argument: Argument) {
        self.arguments.push(argument);
    }

    /// Usage hint such as `<version> [notes]`.
    pub fn argument_hint(&self) -> String {
        self.arguments
            .iter()
            .map(|a| {
                if a.required {
                    format!("<{}>", a.name)
                } else {
                    format!("[{}]", a.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Inverse of [`Command::argument_hint`]. Bare words count as required.
pub fn parse_argument_hint(hint: &str) -> Vec<Argument> {
    hint.split_whitespace()
        .filter_map(|token| {
            if let Some(name) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                Some(Argument::optional(name))
            } else {
                let name = token.trim_start_matches('<').trim_end_matches('>');
                (!name.is_empty()).then(|| Argument::required(name))
            }
        })
        .collect()
}

pub type CommandRegistry = Registry<dyn CollectionAdapter<Item = Command>>;

pub fn builtin_registry() -> CommandRegistry {
    let registry = CommandRegistry::new();
    registry.register(Arc::new(MarkdownCommandAdapter::claude()));
    registry.register(Arc::new(MarkdownCommandAdapter::codex()));
    registry.register(Arc::new(GeminiCommandAdapter::new()));
    registry
}
