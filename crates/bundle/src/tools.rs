//! Where each tool expects each kind of artifact.

/// How a tool receives hooks and MCP servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSink {
    /// Hooks and MCP servers go to their own files.
    SeparateFiles,
    /// Hooks and MCP servers are embedded in the plugin manifest under these keys.
    Inline {
        hooks_key: &'static str,
        mcp_key: &'static str,
    },
}

/// Output locations for one tool, relative to that tool's output directory.
///
/// `None` means the tool does not take that kind of artifact. Collection
/// entries are directories; the rest are file paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: &'static str,
    pub plugin: Option<&'static str>,
    pub skills: Option<&'static str>,
    pub commands: Option<&'static str>,
    pub hooks: Option<&'static str>,
    pub agents: Option<&'static str>,
    pub mcp: Option<&'static str>,
    pub context: Option<&'static str>,
    pub sink: ArtifactSink,
}

const EMPTY: ToolConfig = ToolConfig {
    name: "",
    plugin: None,
    skills: None,
    commands: None,
    hooks: None,
    agents: None,
    mcp: None,
    context: None,
    sink: ArtifactSink::SeparateFiles,
};

pub const TOOL_CONFIGS: &[ToolConfig] = &[
    ToolConfig {
        name: "claude",
        plugin: Some(".claude-plugin/plugin.json"),
        skills: Some("skills"),
        commands: Some("commands"),
        agents: Some("agents"),
        context: Some("CLAUDE.md"),
        sink: ArtifactSink::Inline {
            hooks_key: "hooks",
            mcp_key: "mcpServers",
        },
        ..EMPTY
    },
    ToolConfig {
        name: "kiro",
        skills: Some(".kiro/steering"),
        agents: Some(".kiro/agents"),
        mcp: Some(".kiro/settings/mcp.json"),
        ..EMPTY
    },
    ToolConfig {
        name: "gemini",
        plugin: Some("gemini-extension.json"),
        commands: Some("commands"),
        agents: Some("agents"),
        ..EMPTY
    },
    ToolConfig {
        name: "cursor",
        hooks: Some(".cursor/hooks.json"),
        mcp: Some(".cursor/mcp.json"),
        context: Some(".cursorrules"),
        ..EMPTY
    },
    ToolConfig {
        name: "codex",
        skills: Some("skills"),
        commands: Some("prompts"),
        agents: Some("agents"),
        mcp: Some(".codex/mcp.json"),
        context: Some("AGENTS.md"),
        ..EMPTY
    },
    ToolConfig {
        name: "windsurf",
        hooks: Some(".windsurf/hooks.json"),
        ..EMPTY
    },
];

/// Tools `generate_all` writes, in order.
pub const SUPPORTED_TOOLS: [&str; 6] = ["claude", "kiro", "gemini", "cursor", "codex", "windsurf"];

pub fn tool_config(tool: &str) -> Option<&'static ToolConfig> {
    TOOL_CONFIGS.iter().find(|c| c.name == tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_tool_has_a_config() {
        for tool in SUPPORTED_TOOLS {
            assert_eq!(tool_config(tool).map(|c| c.name), Some(tool));
        }
        assert_eq!(TOOL_CONFIGS.len(), SUPPORTED_TOOLS.len());
        assert!(tool_config("emacs").is_none());
    }

    #[test]
    fn only_claude_is_inline() {
        let inline: Vec<&str> = TOOL_CONFIGS
            .iter()
            .filter(|c| matches!(c.sink, ArtifactSink::Inline { .. }))
            .map(|c| c.name)
            .collect();
        assert_eq!(inline, vec!["claude"]);
    }

    #[test]
    fn inline_tools_have_no_separate_hooks_or_mcp_files() {
        for config in TOOL_CONFIGS {
            if matches!(config.sink, ArtifactSink::Inline { .. }) {
                assert!(config.hooks.is_none() && config.mcp.is_none(), "{}", config.name);
                assert!(config.plugin.is_some(), "{}", config.name);
            }
        }
    }

    #[test]
    fn cursor_hooks_live_in_cursor_dir() {
        assert_eq!(tool_config("cursor").unwrap().hooks, Some(".cursor/hooks.json"));
    }
}
