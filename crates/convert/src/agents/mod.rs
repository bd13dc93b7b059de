//! Sub-agent definitions.
//!
//! Claude, Codex and Gemini store agents as markdown with frontmatter;
//! Kiro uses one JSON file per agent.

mod kiro;
mod markdown;

pub use kiro::{KiroAgentAdapter, KiroAgentConfig, KiroMcpServer};
pub use markdown::{AgentDialect, MarkdownAgentAdapter};

use crate::adapter::CollectionAdapter;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A tool-agnostic agent definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// System prompt / body text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    /// Short model alias such as `sonnet`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl Agent {
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

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_tool(&mut self, tool: impl Into<String>) {
        self.tools.push(tool.into());
    }

    pub fn add_skill(&mut self, skill: impl Into<String>) {
        self.skills.push(skill.into());
    }

    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.dependencies.push(dependency.into());
    }
}

pub type AgentRegistry = Registry<dyn CollectionAdapter<Item = Agent>>;

/// A registry holding the claude, codex, gemini and kiro agent adapters.
pub fn builtin_registry() -> AgentRegistry {
    let registry = AgentRegistry::new();
    registry.register(Arc::new(MarkdownAgentAdapter::claude()));
    registry.register(Arc::new(MarkdownAgentAdapter::codex()));
    registry.register(Arc::new(MarkdownAgentAdapter::gemini()));
    registry.register(Arc::new(KiroAgentAdapter::new()));
    registry
}
