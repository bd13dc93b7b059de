//! Claude Code plugin manifest (`.claude-plugin/plugin.json`).

use super::{Author, Plugin};
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use crate::mcp::{McpConfig, McpJsonAdapter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ADAPTER_NAME: &str = "claude";
pub const MANIFEST_DIR: &str = ".claude-plugin";
pub const MANIFEST_FILE: &str = "plugin.json";

/// Native manifest. `hooks` and `mcpServers` are either a path or an inline object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudePluginManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<Value>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudePluginAdapter;

impl ClaudePluginAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_core(&self, native: &ClaudePluginManifest) -> Plugin {
        let hooks = match &native.hooks {
            Some(Value::String(path)) => Some(path.clone()),
            Some(_) => {
                tracing::debug!(plugin = %native.name, "inline plugin hooks are not carried on the manifest");
                None
            }
            None => None,
        };
        let mcp_servers = match &native.mcp_servers {
            Some(Value::String(path)) => {
                tracing::debug!(plugin = %native.name, %path, "MCP servers referenced by path are not loaded");
                Default::default()
            }
            Some(servers) => McpJsonAdapter::claude().read_servers(servers).servers,
            None => Default::default(),
        };
        Plugin {
            name: native.name.clone(),
            version: native.version.clone().unwrap_or_default(),
            description: native.description.clone().unwrap_or_default(),
            author: native.author.clone(),
            homepage: native.homepage.clone(),
            repository: native.repository.clone(),
            license: native.license.clone(),
            keywords: native.keywords.clone(),
            skills: native.skills.clone(),
            commands: native.commands.clone(),
            agents: native.agents.clone(),
            hooks,
            context_file: None,
            mcp_servers,
        }
    }

    pub fn from_core(&self, plugin: &Plugin) -> ClaudePluginManifest {
        let mcp_servers = (!plugin.mcp_servers.is_empty()).then(|| {
            McpJsonAdapter::claude().servers_value(&McpConfig {
                servers: plugin.mcp_servers.clone(),
            })
        });
        ClaudePluginManifest {
            name: plugin.name.clone(),
            version: non_empty(&plugin.version),
            description: non_empty(&plugin.description),
            author: plugin.author.clone(),
            homepage: plugin.homepage.clone(),
            repository: plugin.repository.clone(),
            license: plugin.license.clone(),
            keywords: plugin.keywords.clone(),
            commands: plugin.commands.clone(),
            agents: plugin.agents.clone(),
            skills: plugin.skills.clone(),
            hooks: plugin.hooks.clone().map(Value::String),
            mcp_servers,
        }
    }
}

impl Adapter for ClaudePluginAdapter {
    type Item = Plugin;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Plugin, ParseError> {
        let native: ClaudePluginManifest =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, plugin: &Plugin) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(plugin)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::McpServer;
    use serde_json::json;

    #[test]
    fn marshal_minimal_manifest() {
        let plugin = Plugin::new("kit", "", "");
        let out = ClaudePluginAdapter::new().marshal(&plugin).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json, json!({"name": "kit"}));
    }

    #[test]
    fn round_trip_full_manifest() {
        let mut plugin = Plugin::new("kit", "0.4.1", "Tools for releases").with_author(Author {
            name: "Dev Team".into(),
            email: Some("dev@example.com".into()),
            url: None,
        });
        plugin.add_keyword("release");
        plugin.commands = Some("./commands/".into());
        plugin.hooks = Some("./hooks/hooks.json".into());
        plugin.add_mcp_server("gh", McpServer::stdio("gh-mcp", ["serve"]));

        let adapter = ClaudePluginAdapter::new();
        let out = adapter.marshal(&plugin).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["hooks"], "./hooks/hooks.json");
        assert_eq!(json["mcpServers"]["gh"], json!({"command": "gh-mcp", "args": ["serve"]}));
        assert_eq!(adapter.parse(&out).unwrap(), plugin);
    }

    #[test]
    fn inline_hooks_are_not_kept_as_path() {
        let data = br#"{"name": "kit", "hooks": {"Stop": []}}"#;
        let plugin = ClaudePluginAdapter::new().parse(data).unwrap();
        assert_eq!(plugin.hooks, None);
    }

    #[test]
    fn name_is_required() {
        assert!(ClaudePluginAdapter::new().parse(br#"{"version": "1.0.0"}"#).is_err());
    }
}
