//! Kiro CLI agents: one JSON file per agent under `.kiro/agents/`.

use super::Agent;
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ADAPTER_NAME: &str = "kiro";
pub const PROJECT_CONFIG_DIR: &str = ".kiro";
pub const AGENTS_DIR: &str = "agents";
const STEERING_PREFIX: &str = "file://.kiro/steering/";

/// Kiro's agent JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KiroAgentConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, KiroMcpServer>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_mcp_json: bool,
}

/// MCP server entry embedded in a Kiro agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KiroMcpServer {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

fn model_to_canonical(model: &str) -> String {
    match model {
        "claude-sonnet-4" | "claude-4-sonnet" => "sonnet".to_string(),
        "claude-opus-4" | "claude-4-opus" => "opus".to_string(),
        "claude-haiku" | "claude-3-haiku" => "haiku".to_string(),
        other => other.to_string(),
    }
}

fn model_to_kiro(model: &str) -> String {
    match model.to_ascii_lowercase().as_str() {
        "sonnet" => "claude-sonnet-4".to_string(),
        "opus" => "claude-opus-4".to_string(),
        "haiku" => "claude-haiku".to_string(),
        _ => model.to_string(),
    }
}

fn tool_to_canonical(tool: &str) -> Option<String> {
    let mapped = match tool {
        "read" => "Read",
        "write" => "Write",
        "shell" => "Bash",
        "web_search" => "WebSearch",
        "web_fetch" => "WebFetch",
        "grep" => "Grep",
        "glob" => "Glob",
        other => {
            let mut chars = other.chars();
            let first = chars.next()?;
            return Some(first.to_uppercase().chain(chars).collect());
        }
    };
    Some(mapped.to_string())
}

fn tool_to_kiro(tool: &str) -> String {
    match tool {
        "Read" => "read".to_string(),
        "Write" | "Edit" => "write".to_string(),
        "Bash" => "shell".to_string(),
        "WebSearch" => "web_search".to_string(),
        "WebFetch" => "web_fetch".to_string(),
        "Grep" => "grep".to_string(),
        "Glob" => "glob".to_string(),
        other => other.to_lowercase(),
    }
}

/// Steering resource path for a skill.
pub fn skill_resource(skill: &str) -> String {
    format!("{STEERING_PREFIX}{skill}.md")
}

fn skill_from_resource(resource: &str) -> Option<&str> {
    resource.strip_prefix(STEERING_PREFIX)?.strip_suffix(".md")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KiroAgentAdapter;

impl KiroAgentAdapter {
    pub fn new() -> Self {
        Self
    }

    /// `~/.kiro/agents`, when a home directory is known.
    pub fn user_agents_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(PROJECT_CONFIG_DIR).join(AGENTS_DIR))
    }

    pub fn to_core(&self, native: &KiroAgentConfig) -> Agent {
        Agent {
            name: native.name.clone(),
            description: native.description.clone(),
            instructions: native.prompt.clone(),
            model: (!native.model.is_empty()).then(|| model_to_canonical(&native.model)),
            tools: native
                .tools
                .iter()
                .filter_map(|t| tool_to_canonical(t))
                .collect(),
            skills: native
                .resources
                .iter()
                .filter_map(|r| skill_from_resource(r))
                .map(String::from)
                .collect(),
            dependencies: Vec::new(),
        }
    }

    pub fn from_core(&self, agent: &Agent) -> KiroAgentConfig {
        let mut tools: Vec<String> = Vec::with_capacity(agent.tools.len());
        for tool in agent.tools.iter().map(|t| tool_to_kiro(t)) {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }
        if !agent.dependencies.is_empty() {
            tracing::debug!(
                agent = %agent.name,
                "kiro agents have no dependency list, dropping dependencies"
            );
        }
        KiroAgentConfig {
            name: agent.name.clone(),
            description: agent.description.clone(),
            tools,
            resources: agent.skills.iter().map(|s| skill_resource(s)).collect(),
            prompt: agent.instructions.clone(),
            model: agent.model.as_deref().map(model_to_kiro).unwrap_or_default(),
            ..KiroAgentConfig::default()
        }
    }
}

impl Adapter for KiroAgentAdapter {
    type Item = Agent;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Agent, ParseError> {
        let native: KiroAgentConfig =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, agent: &Agent) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(agent)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }

    fn read_file(&self, path: &Path) -> Result<Agent, ParseError> {
        read_named(self, path, |a: &mut Agent, name| a.name = name, |a| !a.name.is_empty())
    }
}

impl CollectionAdapter for KiroAgentAdapter {
    fn relative_path(&self, agent: &Agent) -> PathBuf {
        PathBuf::from(format!("{}.json", sanitize_name(&agent.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_aliases() {
        assert_eq!(model_to_kiro("Sonnet"), "claude-sonnet-4");
        assert_eq!(model_to_kiro("gpt-4o"), "gpt-4o");
        assert_eq!(model_to_canonical("claude-4-opus"), "opus");
        assert_eq!(model_to_canonical("claude-3-haiku"), "haiku");
        assert_eq!(model_to_canonical("custom"), "custom");
    }

    #[test]
    fn tool_names_map_both_ways() {
        assert_eq!(tool_to_kiro("Bash"), "shell");
        assert_eq!(tool_to_kiro("Edit"), "write");
        assert_eq!(tool_to_kiro("TodoWrite"), "todowrite");
        assert_eq!(tool_to_canonical("web_fetch").as_deref(), Some("WebFetch"));
        assert_eq!(tool_to_canonical("aws").as_deref(), Some("Aws"));
        assert_eq!(tool_to_canonical(""), None);
    }

    #[test]
    fn marshal_maps_fields() {
        let agent = Agent::new("release", "Cuts releases")
            .with_model("haiku")
            .with_tools(["Read", "Write", "Edit", "Bash"])
            .with_skills(["changelog"])
            .with_instructions("Tag and publish.");
        let out = KiroAgentAdapter::new().marshal(&agent).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "release",
                "description": "Cuts releases",
                "tools": ["read", "write", "shell"],
                "resources": ["file://.kiro/steering/changelog.md"],
                "prompt": "Tag and publish.",
                "model": "claude-haiku"
            })
        );
    }

    #[test]
    fn parse_recovers_skills_from_steering_resources() {
        let data = br#"{
            "name": "docs",
            "prompt": "Write docs.",
            "model": "claude-sonnet-4",
            "tools": ["read", "shell", "custom_tool"],
            "resources": ["file://.kiro/steering/markdown.md", "file://README.md"],
            "includeMcpJson": true
        }"#;
        let agent = KiroAgentAdapter::new().parse(data).unwrap();
        assert_eq!(agent.model.as_deref(), Some("sonnet"));
        assert_eq!(agent.tools, vec!["Read", "Bash", "Custom_tool"]);
        assert_eq!(agent.skills, vec!["markdown"]);
        assert_eq!(agent.instructions, "Write docs.");
    }

    #[test]
    fn parse_error_names_format() {
        let err = KiroAgentAdapter::new().parse(b"not json").unwrap_err();
        assert_eq!(err.format, "kiro");
    }

    #[test]
    fn read_file_uses_stem_for_missing_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.json");
        std::fs::write(&path, r#"{"prompt": "Sort issues."}"#).unwrap();
        let agent = KiroAgentAdapter::new().read_file(&path).unwrap();
        assert_eq!(agent.name, "triage");
    }
}
