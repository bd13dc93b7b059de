//! Skills: reusable instruction packs.
//!
//! Claude and Codex keep each skill in its own directory as `SKILL.md`;
//! Kiro flattens skills into steering documents.

mod kiro;
mod markdown;

pub use kiro::KiroSteeringAdapter;
pub use markdown::{MarkdownSkillAdapter, SKILL_FILE};

use crate::adapter::CollectionAdapter;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A tool-agnostic skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    /// Phrases that should activate the skill.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Paths relative to the skill directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
}

impl Skill {
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

    pub fn add_trigger(&mut self, trigger: impl Into<String>) {
        self.triggers.push(trigger.into());
    }

    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.dependencies.push(dependency.into());
    }
}

pub type SkillRegistry = Registry<dyn CollectionAdapter<Item = Skill>>;

pub fn builtin_registry() -> SkillRegistry {
    let registry = SkillRegistry::new();
    registry.register(Arc::new(MarkdownSkillAdapter::claude()));
    registry.register(Arc::new(MarkdownSkillAdapter::codex()));
    registry.register(Arc::new(KiroSteeringAdapter::new()));
    registry
}
