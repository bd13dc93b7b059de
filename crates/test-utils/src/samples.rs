//! Native configuration files as the tools write them.

/// `.claude/settings.json` with five hooks across four native events.
pub const CLAUDE_SETTINGS: &str = r#"{
  "model": "sonnet",
  "disableAllHooks": true,
  "hooks": {
    "PreToolUse": [
      {
        "matcher": "Bash",
        "hooks": [{"type": "command", "command": "./scripts/check-command.sh", "timeout": 10}]
      },
      {
        "matcher": "mcp__github__.*",
        "hooks": [{"type": "command", "command": "./scripts/audit-mcp.sh"}]
      }
    ],
    "PostToolUse": [
      {
        "matcher": "Write|Edit",
        "hooks": [{"type": "command", "command": "cargo fmt"}]
      }
    ],
    "UserPromptSubmit": [
      {"hooks": [{"type": "command", "command": "./scripts/log-prompt.sh"}]}
    ],
    "Stop": [
      {"hooks": [{"type": "prompt", "prompt": "Check that every task is finished."}]}
    ]
  }
}"#;

/// `.cursor/hooks.json` with four hooks.
pub const CURSOR_HOOKS: &str = r#"{
  "version": 1,
  "hooks": {
    "beforeShellExecution": [
      {"command": "./hooks/deny-rm.sh"},
      {"command": "./hooks/log-shell.sh"}
    ],
    "afterFileEdit": [{"command": "./hooks/format.sh"}],
    "afterAgentThought": [{"command": "./hooks/trace.sh"}]
  }
}"#;

/// `.windsurf/hooks.json` with three hooks.
pub const WINDSURF_HOOKS: &str = r#"{
  "hooks": {
    "pre_run_command": [
      {"command": "python3 guard.py", "show_output": true, "working_directory": "/workspace"}
    ],
    "post_write_code": [{"command": "npx prettier --write ."}],
    "pre_user_prompt": [{"command": "./log.sh"}]
  }
}"#;

/// `.mcp.json` with a stdio, an http and a disabled server.
pub const CLAUDE_MCP: &str = r#"{
  "mcpServers": {
    "github": {
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-github"],
      "env": {"GITHUB_TOKEN": "${GITHUB_TOKEN}"}
    },
    "linear": {
      "type": "http",
      "url": "https://mcp.linear.app/mcp",
      "headers": {"Authorization": "Bearer ${LINEAR_TOKEN}"}
    },
    "legacy": {
      "command": "./bin/legacy-mcp",
      "disabled": true
    }
  }
}"#;

/// A bundle file in the canonical JSON form.
pub const BUNDLE: &str = r#"{
  "plugin": {
    "name": "release-kit",
    "version": "1.0.0",
    "description": "Release automation for assistants",
    "keywords": ["release"]
  },
  "skills": [
    {"name": "changelog", "description": "Writes changelog entries", "instructions": "Group by type."}
  ],
  "commands": [
    {
      "name": "release",
      "description": "Cut a release",
      "arguments": [{"name": "version", "required": true}],
      "instructions": "Release version $ARGUMENTS."
    }
  ],
  "hooks": {
    "hooks": {
      "before_command": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "./guard.sh"}]}],
      "on_stop": [{"hooks": [{"type": "prompt", "prompt": "Confirm the release is tagged."}]}]
    }
  },
  "agents": [
    {
      "name": "release-coordinator",
      "description": "Coordinates releases",
      "model": "sonnet",
      "tools": ["Read", "Bash"],
      "skills": ["changelog"],
      "instructions": "Plan, tag, publish."
    }
  ],
  "context": {
    "name": "release-kit",
    "language": "rust",
    "commands": {"test": "cargo test"}
  },
  "mcp": {
    "servers": {
      "github": {"transport": "stdio", "command": "gh-mcp"}
    }
  }
}"#;
