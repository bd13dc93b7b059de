//! MCP server definitions and the JSON files tools keep them in.

mod json;

pub use json::{McpJsonAdapter, TypeField};

use crate::adapter::Adapter;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// How a client talks to an MCP server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Http,
    Sse,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
            Transport::Sse => "sse",
        }
    }

    /// Recognizes the `type` values tools write. `streamable-http` is an alias for http.
    pub fn from_type(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "stdio" => Some(Transport::Stdio),
            "http" | "streamable-http" | "streamablehttp" => Some(Transport::Http),
            "sse" => Some(Transport::Sse),
            _ => None,
        }
    }

    pub fn is_remote(self) -> bool {
        !matches!(self, Transport::Stdio)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// One MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
}

impl Default for McpServer {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            command: None,
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            url: None,
            headers: BTreeMap::new(),
            enabled: true,
        }
    }
}

impl McpServer {
    /// A local server launched as a child process.
    pub fn stdio<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: Some(command.into()),
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A remote server reached over streamable HTTP.
    pub fn http(url: impl Into<String>) -> Self {
        Self {
            transport: Transport::Http,
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Named MCP servers, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub servers: BTreeMap<String, McpServer>,
}

impl McpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a server.
    pub fn add_server(&mut self, name: impl Into<String>, server: McpServer) {
        self.servers.insert(name.into(), server);
    }

    pub fn get(&self, name: &str) -> Option<&McpServer> {
        self.servers.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<McpServer> {
        self.servers.remove(name)
    }

    pub fn enabled_servers(&self) -> impl Iterator<Item = (&str, &McpServer)> {
        self.servers
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(name, s)| (name.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Servers in `other` replace same-named servers here.
    pub fn merge(&mut self, other: &McpConfig) {
        for (name, server) in &other.servers {
            self.servers.insert(name.clone(), server.clone());
        }
    }
}

pub type McpRegistry = Registry<dyn Adapter<Item = McpConfig>>;

/// Registry holding the claude, codex, cursor, kiro and vscode adapters.
pub fn builtin_registry() -> McpRegistry {
    let registry = McpRegistry::new();
    registry.register(Arc::new(McpJsonAdapter::claude()));
    registry.register(Arc::new(McpJsonAdapter::codex()));
    registry.register(Arc::new(McpJsonAdapter::cursor()));
    registry.register(Arc::new(McpJsonAdapter::kiro()));
    registry.register(Arc::new(McpJsonAdapter::vscode()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_aliases() {
        assert_eq!(Transport::from_type("streamable-http"), Some(Transport::Http));
        assert_eq!(Transport::from_type("SSE"), Some(Transport::Sse));
        assert_eq!(Transport::from_type("websocket"), None);
        assert!(!Transport::Stdio.is_remote());
    }

    #[test]
    fn enabled_servers_skip_disabled() {
        let mut cfg = McpConfig::new();
        cfg.add_server("a", McpServer::stdio("a-server", ["--stdio"]));
        cfg.add_server("b", McpServer::http("https://b.example/mcp").disabled());
        let names: Vec<&str> = cfg.enabled_servers().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn merge_replaces_same_name() {
        let mut base = McpConfig::new();
        base.add_server("db", McpServer::stdio("old", Vec::<String>::new()));
        let mut other = McpConfig::new();
        other.add_server("db", McpServer::stdio("new", Vec::<String>::new()));
        other.add_server("web", McpServer::http("https://x"));
        base.merge(&other);
        assert_eq!(base.len(), 2);
        assert_eq!(base.get("db").unwrap().command.as_deref(), Some("new"));
    }

    #[test]
    fn canonical_json_omits_defaults() {
        let server = McpServer::stdio("npx", ["-y", "server-github"]);
        let json = serde_json::to_value(&server).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"transport": "stdio", "command": "npx", "args": ["-y", "server-github"]})
        );
        let back: McpServer = serde_json::from_value(json).unwrap();
        assert!(back.enabled);
    }

    #[test]
    fn vscode_to_claude() {
        let vscode = br#"{"servers": {"docs": {"type": "sse", "url": "https://docs.example/sse"}}}"#;
        let out = builtin_registry().convert(vscode, "vscode", "claude").unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["mcpServers"]["docs"]["type"], "sse");
        assert_eq!(json["mcpServers"]["docs"]["url"], "https://docs.example/sse");
    }
}
