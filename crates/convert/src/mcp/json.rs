//! JSON MCP config files: `{"mcpServers": {...}}` and VS Code's `{"servers": {...}}`.

use super::{McpConfig, McpServer, Transport};
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// When a server's `type` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeField {
    Always,
    /// Only for http and sse servers; stdio is implied.
    WhenRemote,
    /// Transport is implied by `url` versus `command`.
    Never,
}

#[derive(Debug, Clone, Copy)]
pub struct McpJsonAdapter {
    name: &'static str,
    root_key: &'static str,
    type_field: TypeField,
    project_path: &'static str,
}

impl McpJsonAdapter {
    pub fn claude() -> Self {
        Self {
            name: "claude",
            root_key: "mcpServers",
            type_field: TypeField::WhenRemote,
            project_path: ".mcp.json",
        }
    }

    pub fn cursor() -> Self {
        Self {
            name: "cursor",
            root_key: "mcpServers",
            type_field: TypeField::Never,
            project_path: ".cursor/mcp.json",
        }
    }

    pub fn codex() -> Self {
        Self {
            name: "codex",
            root_key: "mcpServers",
            type_field: TypeField::WhenRemote,
            project_path: ".codex/mcp.json",
        }
    }

    pub fn kiro() -> Self {
        Self {
            name: "kiro",
            root_key: "mcpServers",
            type_field: TypeField::WhenRemote,
            project_path: ".kiro/settings/mcp.json",
        }
    }

    pub fn vscode() -> Self {
        Self {
            name: "vscode",
            root_key: "servers",
            type_field: TypeField::Always,
            project_path: ".vscode/mcp.json",
        }
    }

    /// Top-level key holding the server map.
    pub fn root_key(&self) -> &'static str {
        self.root_key
    }

    /// Project-relative location of the tool's MCP file.
    pub fn project_path(&self) -> PathBuf {
        PathBuf::from(self.project_path)
    }

    /// Reads a server map in this tool's dialect. Malformed entries are skipped.
    pub fn read_servers(&self, servers: &Value) -> McpConfig {
        let mut cfg = McpConfig::new();
        let Some(servers) = servers.as_object() else {
            warn!(tool = self.name, "MCP server map is not an object, ignoring");
            return cfg;
        };
        for (name, config) in servers {
            let Some(config) = config.as_object() else {
                warn!(tool = self.name, server = %name, "Skipping MCP server that is not an object");
                continue;
            };
            if let Some(server) = self.read_server(name, config) {
                cfg.add_server(name.clone(), server);
            }
        }
        cfg
    }

    /// The server map as this tool writes it, without the enclosing root key.
    pub fn servers_value(&self, cfg: &McpConfig) -> Value {
        Value::Object(
            cfg.servers
                .iter()
                .map(|(name, server)| (name.clone(), self.write_server(server)))
                .collect(),
        )
    }

    fn read_server(&self, name: &str, config: &Map<String, Value>) -> Option<McpServer> {
        let url = string_field(config, "url");
        let transport = match config.get("type").and_then(Value::as_str) {
            Some(kind) => Transport::from_type(kind).unwrap_or_else(|| {
                warn!(
                    tool = self.name,
                    server = %name,
                    kind,
                    "Unknown MCP transport type, assuming stdio"
                );
                Transport::Stdio
            }),
            None if url.is_some() => Transport::Http,
            None => Transport::Stdio,
        };
        let command = string_field(config, "command");

        if transport == Transport::Stdio && command.is_none() {
            warn!(
                tool = self.name,
                server = %name,
                "Skipping MCP server with missing or empty 'command' field"
            );
            return None;
        }
        if transport.is_remote() && url.is_none() {
            warn!(tool = self.name, server = %name, %transport, "Remote MCP server has no 'url'");
        }

        let enabled = match (
            config.get("disabled").and_then(Value::as_bool),
            config.get("enabled").and_then(Value::as_bool),
        ) {
            (Some(disabled), _) => !disabled,
            (None, Some(enabled)) => enabled,
            (None, None) => true,
        };

        Some(McpServer {
            transport,
            command,
            args: string_list(name, config.get("args")),
            env: string_map(name, "env", config.get("env")),
            cwd: string_field(config, "cwd"),
            url,
            headers: string_map(name, "headers", config.get("headers")),
            enabled,
        })
    }

    fn write_server(&self, server: &McpServer) -> Value {
        let mut out = Map::new();
        let write_type = match self.type_field {
            TypeField::Always => true,
            TypeField::WhenRemote => server.transport.is_remote(),
            TypeField::Never => false,
        };
        if write_type {
            out.insert("type".into(), Value::from(server.transport.as_str()));
        }
        if let Some(command) = &server.command {
            out.insert("command".into(), Value::from(command.as_str()));
        }
        if !server.args.is_empty() {
            out.insert("args".into(), Value::from(server.args.clone()));
        }
        if !server.env.is_empty() {
            out.insert("env".into(), map_value(&server.env));
        }
        if let Some(cwd) = &server.cwd {
            out.insert("cwd".into(), Value::from(cwd.as_str()));
        }
        if let Some(url) = &server.url {
            out.insert("url".into(), Value::from(url.as_str()));
        }
        if !server.headers.is_empty() {
            out.insert("headers".into(), map_value(&server.headers));
        }
        if !server.enabled {
            out.insert("disabled".into(), Value::Bool(true));
        }
        Value::Object(out)
    }
}

fn string_field(config: &Map<String, Value>, key: &str) -> Option<String> {
    config
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn string_list(server: &str, value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => result.push(s.to_string()),
            None => warn!(
                server = %server,
                index,
                value_type = ?item,
                "Skipping non-string value in MCP server args"
            ),
        }
    }
    result
}

fn string_map(server: &str, field: &str, value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(obj) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    let mut result = BTreeMap::new();
    for (key, item) in obj {
        match item.as_str() {
            Some(s) => {
                result.insert(key.clone(), s.to_string());
            }
            None => warn!(
                server = %server,
                field,
                key = %key,
                value_type = ?item,
                "Skipping non-string value in MCP server map"
            ),
        }
    }
    result
}

fn map_value(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect(),
    )
}

impl Adapter for McpJsonAdapter {
    type Item = McpConfig;

    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, data: &[u8]) -> Result<McpConfig, ParseError> {
        let root: Value = serde_json::from_slice(data).map_err(|e| ParseError::new(self.name, e))?;
        let Value::Object(root) = root else {
            return Err(ParseError::new(self.name, "expected a JSON object at the top level"));
        };
        Ok(root
            .get(self.root_key)
            .map(|servers| self.read_servers(servers))
            .unwrap_or_default())
    }

    fn marshal(&self, cfg: &McpConfig) -> Result<Vec<u8>, MarshalError> {
        let mut root = Map::new();
        root.insert(self.root_key.to_string(), self.servers_value(cfg));
        serde_json::to_vec_pretty(&Value::Object(root)).map_err(|e| MarshalError::new(self.name, e))
    }
}
