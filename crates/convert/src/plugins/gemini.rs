//! Gemini CLI extension manifest (`gemini-extension.json`).

use super::Plugin;
use crate::adapter::Adapter;
use crate::error::{MarshalError, ParseError};
use crate::mcp::{McpConfig, McpJsonAdapter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ADAPTER_NAME: &str = "gemini";
pub const MANIFEST_FILE: &str = "gemini-extension.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiExtensionManifest {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_tools: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiExtensionAdapter;

impl GeminiExtensionAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_core(&self, native: &GeminiExtensionManifest) -> Plugin {
        let mcp_servers = native
            .mcp_servers
            .as_ref()
            .map(|servers| McpJsonAdapter::claude().read_servers(servers).servers)
            .unwrap_or_default();
        if !native.exclude_tools.is_empty() {
            tracing::debug!(extension = %native.name, "excludeTools has no canonical form, dropping");
        }
        Plugin {
            name: native.name.clone(),
            version: native.version.clone(),
            description: native.description.clone().unwrap_or_default(),
            context_file: native.context_file_name.clone(),
            mcp_servers,
            ..Plugin::default()
        }
    }

    /// Component paths, author and links have no place in an extension manifest.
    pub fn from_core(&self, plugin: &Plugin) -> GeminiExtensionManifest {
        GeminiExtensionManifest {
            name: plugin.name.clone(),
            version: plugin.version.clone(),
            description: (!plugin.description.is_empty()).then(|| plugin.description.clone()),
            mcp_servers: (!plugin.mcp_servers.is_empty()).then(|| {
                McpJsonAdapter::claude().servers_value(&McpConfig {
                    servers: plugin.mcp_servers.clone(),
                })
            }),
            context_file_name: plugin.context_file.clone(),
            exclude_tools: Vec::new(),
        }
    }
}

impl Adapter for GeminiExtensionAdapter {
    type Item = Plugin;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Plugin, ParseError> {
        let native: GeminiExtensionManifest =
            serde_json::from_slice(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, plugin: &Plugin) -> Result<Vec<u8>, MarshalError> {
        serde_json::to_vec_pretty(&self.from_core(plugin)).map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }
}
