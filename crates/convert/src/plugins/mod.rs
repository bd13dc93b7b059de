//! Plugin and extension manifests.

mod claude;
mod gemini;

pub use claude::ClaudePluginAdapter;
pub use gemini::GeminiExtensionAdapter;

use crate::adapter::Adapter;
use crate::mcp::McpServer;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A tool-agnostic plugin manifest.
///
/// The component paths (`skills`, `commands`, `agents`, `hooks`) point at
/// directories or files inside the generated plugin and are normally filled
/// in by the bundle generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
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
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<String>,
    /// Context file a tool loads alongside the plugin (Gemini's `contextFileName`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_file: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mcp_servers: BTreeMap<String, McpServer>,
}

impl Plugin {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn add_keyword(&mut self, keyword: impl Into<String>) {
        self.keywords.push(keyword.into());
    }

    pub fn add_mcp_server(&mut self, name: impl Into<String>, server: McpServer) {
        self.mcp_servers.insert(name.into(), server);
    }
}

pub type PluginRegistry = Registry<dyn Adapter<Item = Plugin>>;

pub fn builtin_registry() -> PluginRegistry {
    let registry = PluginRegistry::new();
    registry.register(Arc::new(ClaudePluginAdapter::new()));
    registry.register(Arc::new(GeminiExtensionAdapter::new()));
    registry
}
