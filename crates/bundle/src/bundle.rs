use assistkit_convert::agents::Agent;
use assistkit_convert::commands::Command;
use assistkit_convert::context::Context;
use assistkit_convert::error::{ParseError, WriteError};
use assistkit_convert::fs::write_private;
use assistkit_convert::hooks::Config;
use assistkit_convert::mcp::{McpConfig, McpServer};
use assistkit_convert::plugins::Plugin;
use assistkit_convert::skills::Skill;
use serde::{Deserialize, Serialize};
use std::path::Path;

const FORMAT: &str = "bundle";

/// Everything a plugin ships, in canonical form.
///
/// The JSON form of this type is the bundle file the CLI reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub plugin: Plugin,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Skill>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub hooks: Config,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default)]
    pub mcp: McpConfig,
}

impl Bundle {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            plugin: Plugin::new(name, version, description),
            ..Self::default()
        }
    }

    pub fn add_skill(&mut self, skill: Skill) {
        self.skills.push(skill);
    }

    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    pub fn set_hooks(&mut self, hooks: Config) {
        self.hooks = hooks;
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = Some(context);
    }

    pub fn add_mcp_server(&mut self, name: impl Into<String>, server: McpServer) {
        self.mcp.add_server(name, server);
    }

    /// True when the bundle carries nothing besides plugin metadata.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.commands.is_empty()
            && !self.hooks.has_hooks()
            && self.agents.is_empty()
            && self.context.is_none()
            && self.mcp.is_empty()
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ParseError> {
        serde_json::from_slice(data).map_err(|e| ParseError::new(FORMAT, e))
    }

    pub fn read_file(path: &Path) -> Result<Self, ParseError> {
        let data = std::fs::read(path).map_err(|e| ParseError::new(FORMAT, e).with_path(path))?;
        Self::from_json(&data).map_err(|e| e.with_path(path))
    }

    pub fn write_file(&self, path: &Path) -> Result<(), WriteError> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| WriteError::new(path, e).with_format(FORMAT))?;
        write_private(path, &data).map_err(|e| WriteError::new(path, e).with_format(FORMAT))
    }
}
