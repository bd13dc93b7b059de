//! Markdown agents (`<name>.md` with a frontmatter header).

use super::Agent;
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use assistkit_frontmatter::FrontmatterBuilder;
use std::path::{Path, PathBuf};

/// Which header fields a tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentDialect {
    /// `.claude/agents/`: every field, tools as a comma list.
    Claude,
    /// `.codex/agents/`: name and description only.
    Codex,
    /// `.gemini/agents/`: name, description, model and tools.
    Gemini,
}

impl AgentDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentDialect::Claude => "claude",
            AgentDialect::Codex => "codex",
            AgentDialect::Gemini => "gemini",
        }
    }

    /// Conventional agents directory for the tool.
    pub fn default_dir(self) -> &'static str {
        match self {
            AgentDialect::Claude => ".claude/agents",
            AgentDialect::Codex => ".codex/agents",
            AgentDialect::Gemini => ".gemini/agents",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkdownAgentAdapter {
    dialect: AgentDialect,
}

impl MarkdownAgentAdapter {
    pub fn new(dialect: AgentDialect) -> Self {
        Self { dialect }
    }

    pub fn claude() -> Self {
        Self::new(AgentDialect::Claude)
    }

    pub fn codex() -> Self {
        Self::new(AgentDialect::Codex)
    }

    pub fn gemini() -> Self {
        Self::new(AgentDialect::Gemini)
    }

    pub fn dialect(&self) -> AgentDialect {
        self.dialect
    }

    fn header(&self, agent: &Agent) -> FrontmatterBuilder {
        let header = FrontmatterBuilder::new()
            .field("name", &agent.name)
            .field("description", &agent.description);
        match self.dialect {
            AgentDialect::Codex => header,
            AgentDialect::Gemini => header
                .optional("model", agent.model.as_deref())
                .list("tools", &agent.tools),
            AgentDialect::Claude => header
                .optional("model", agent.model.as_deref())
                .joined("tools", &agent.tools)
                .list("skills", &agent.skills)
                .list("dependencies", &agent.dependencies),
        }
    }
}

impl Adapter for MarkdownAgentAdapter {
    type Item = Agent;

    fn name(&self) -> &str {
        self.dialect.as_str()
    }

    /// Reads every known header field regardless of dialect.
    fn parse(&self, data: &[u8]) -> Result<Agent, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(self.name(), e))?;
        let doc = assistkit_frontmatter::parse(text);
        let mut agent = Agent {
            instructions: doc.body.trim().to_string(),
            ..Agent::default()
        };
        if let Some(fm) = doc.frontmatter {
            agent.name = fm.get("name").unwrap_or_default();
            agent.description = fm.get("description").unwrap_or_default();
            agent.model = fm.get("model");
            agent.tools = fm.list("tools");
            agent.skills = fm.list("skills");
            agent.dependencies = fm.list("dependencies");
        }
        Ok(agent)
    }

    fn marshal(&self, agent: &Agent) -> Result<Vec<u8>, MarshalError> {
        Ok(self.header(agent).render(&agent.instructions).into_bytes())
    }

    fn read_file(&self, path: &Path) -> Result<Agent, ParseError> {
        read_named(self, path, |a: &mut Agent, name| a.name = name, |a| !a.name.is_empty())
    }
}

impl CollectionAdapter for MarkdownAgentAdapter {
    fn relative_path(&self, agent: &Agent) -> PathBuf {
        PathBuf::from(format!("{}.md", sanitize_name(&agent.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Agent {
        Agent::new("code-reviewer", "Reviews pull requests")
            .with_model("sonnet")
            .with_tools(["Read", "Grep", "Bash"])
            .with_skills(["style-guide"])
            .with_instructions("Review the diff.\n\nFlag risky changes.")
    }

    #[test]
    fn claude_writes_every_field() {
        let out = MarkdownAgentAdapter::claude().marshal(&sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "---\nname: code-reviewer\ndescription: Reviews pull requests\nmodel: sonnet\n\
             tools: Read, Grep, Bash\nskills: [style-guide]\n---\n\n\
             Review the diff.\n\nFlag risky changes.\n"
        );
    }

    #[test]
    fn claude_round_trip() {
        let adapter = MarkdownAgentAdapter::claude();
        let agent = sample();
        let back = adapter.parse(&adapter.marshal(&agent).unwrap()).unwrap();
        assert_eq!(back, agent);
    }

    #[test]
    fn codex_keeps_only_name_and_description() {
        let adapter = MarkdownAgentAdapter::codex();
        let back = adapter.parse(&adapter.marshal(&sample()).unwrap()).unwrap();
        assert_eq!(back.name, "code-reviewer");
        assert_eq!(back.description, "Reviews pull requests");
        assert!(back.model.is_none());
        assert!(back.tools.is_empty());
        assert_eq!(back.instructions, "Review the diff.\n\nFlag risky changes.");
    }

    #[test]
    fn gemini_writes_tools_as_sequence() {
        let out = MarkdownAgentAdapter::gemini().marshal(&sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tools: [Read, Grep, Bash]\n"));
        assert!(!text.contains("skills"));
    }

    #[test]
    fn parse_without_header_keeps_body() {
        let agent = MarkdownAgentAdapter::claude()
            .parse(b"Just instructions.\n")
            .unwrap();
        assert!(agent.name.is_empty());
        assert_eq!(agent.instructions, "Just instructions.");
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        let err = MarkdownAgentAdapter::gemini().parse(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.format, "gemini");
    }

    #[test]
    fn read_file_fills_missing_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("helper.md");
        std::fs::write(&path, "---\ndescription: Helps\n---\nHelp out.\n").unwrap();

        let agent = MarkdownAgentAdapter::claude().read_file(&path).unwrap();
        assert_eq!(agent.name, "helper");
        assert_eq!(agent.description, "Helps");
    }

    #[test]
    fn write_into_uses_sanitized_name() {
        let dir = TempDir::new().unwrap();
        let mut agent = sample();
        agent.name = "../escape".to_string();
        let path = MarkdownAgentAdapter::claude()
            .write_into(&agent, dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("escape.md"));
        assert!(path.exists());
    }
}
