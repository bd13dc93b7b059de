//! Markdown commands: Claude `.claude/commands/` and Codex `.codex/prompts/`.

use super::{parse_argument_hint, Command};
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use assistkit_frontmatter::FrontmatterBuilder;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct MarkdownCommandAdapter {
    name: &'static str,
    default_dir: &'static str,
    allowed_tools: bool,
}

impl MarkdownCommandAdapter {
    pub fn claude() -> Self {
        Self {
            name: "claude",
            default_dir: ".claude/commands",
            allowed_tools: true,
        }
    }

    pub fn codex() -> Self {
        Self {
            name: "codex",
            default_dir: ".codex/prompts",
            allowed_tools: false,
        }
    }

    pub fn default_dir(&self) -> &'static str {
        self.default_dir
    }
}

impl Adapter for MarkdownCommandAdapter {
    type Item = Command;

    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, data: &[u8]) -> Result<Command, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(self.name, e))?;
        let doc = assistkit_frontmatter::parse(text);
        let mut cmd = Command {
            instructions: doc.body.trim().to_string(),
            ..Command::default()
        };
        if let Some(fm) = doc.frontmatter {
            cmd.name = fm.get("name").unwrap_or_default();
            cmd.description = fm.get("description").unwrap_or_default();
            cmd.arguments = fm
                .get("argument-hint")
                .map(|hint| parse_argument_hint(&hint))
                .unwrap_or_default();
            cmd.allowed_tools = fm.list("allowed-tools");
        }
        Ok(cmd)
    }

    /// The name comes from the file name, so it is not written to the header.
    fn marshal(&self, cmd: &Command) -> Result<Vec<u8>, MarshalError> {
        let mut header = FrontmatterBuilder::new()
            .field("description", &cmd.description)
            .field("argument-hint", &cmd.argument_hint());
        if self.allowed_tools {
            header = header.joined("allowed-tools", &cmd.allowed_tools);
        }
        Ok(header.render(&cmd.instructions).into_bytes())
    }

    fn read_file(&self, path: &Path) -> Result<Command, ParseError> {
        read_named(self, path, |c: &mut Command, name| c.name = name, |c| !c.name.is_empty())
    }
}

impl CollectionAdapter for MarkdownCommandAdapter {
    fn relative_path(&self, cmd: &Command) -> PathBuf {
        PathBuf::from(format!("{}.md", sanitize_name(&cmd.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Argument;

    fn sample() -> Command {
        let mut cmd = Command::new("release", "Cut a release")
            .with_instructions("Bump to $ARGUMENTS and tag.");
        cmd.add_argument(Argument::required("version"));
        cmd.allowed_tools = vec!["Bash(git tag:*)".into(), "Read".into()];
        cmd
    }

    #[test]
    fn claude_header() {
        let out = MarkdownCommandAdapter::claude().marshal(&sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "---\ndescription: Cut a release\nargument-hint: <version>\n\
             allowed-tools: Bash(git tag:*), Read\n---\n\nBump to $ARGUMENTS and tag.\n"
        );
    }

    #[test]
    fn codex_omits_allowed_tools() {
        let out = MarkdownCommandAdapter::codex().marshal(&sample()).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("allowed-tools"));
    }

    #[test]
    fn read_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = MarkdownCommandAdapter::claude();
        let path = adapter.write_into(&sample(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("release.md"));
        assert_eq!(adapter.read_file(&path).unwrap(), sample());
    }

    #[test]
    fn plain_markdown_is_a_prompt() {
        let cmd = MarkdownCommandAdapter::codex().parse(b"Summarize the diff.").unwrap();
        assert_eq!(cmd.instructions, "Summarize the diff.");
        assert!(cmd.arguments.is_empty());
    }
}
