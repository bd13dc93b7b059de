//! `SKILL.md` skills, one directory per skill.

use super::Skill;
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use assistkit_frontmatter::FrontmatterBuilder;
use std::path::{Path, PathBuf};

pub const SKILL_FILE: &str = "SKILL.md";

#[derive(Debug, Clone, Copy)]
pub struct MarkdownSkillAdapter {
    name: &'static str,
    default_dir: &'static str,
    /// Codex reads only name and description from the header.
    extended_header: bool,
}

impl MarkdownSkillAdapter {
    pub fn claude() -> Self {
        Self {
            name: "claude",
            default_dir: ".claude/skills",
            extended_header: true,
        }
    }

    pub fn codex() -> Self {
        Self {
            name: "codex",
            default_dir: ".codex/skills",
            extended_header: false,
        }
    }

    pub fn default_dir(&self) -> &'static str {
        self.default_dir
    }
}

impl Adapter for MarkdownSkillAdapter {
    type Item = Skill;

    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, data: &[u8]) -> Result<Skill, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(self.name, e))?;
        let doc = assistkit_frontmatter::parse(text);
        let mut skill = Skill {
            instructions: doc.body.trim().to_string(),
            ..Skill::default()
        };
        if let Some(fm) = doc.frontmatter {
            skill.name = fm.get("name").unwrap_or_default();
            skill.description = fm.get("description").unwrap_or_default();
            skill.triggers = fm.list("triggers");
            skill.dependencies = fm.list("dependencies");
            skill.scripts = fm.list("scripts");
            skill.references = fm.list("references");
            skill.assets = fm.list("assets");
        }
        Ok(skill)
    }

    fn marshal(&self, skill: &Skill) -> Result<Vec<u8>, MarshalError> {
        let mut header = FrontmatterBuilder::new()
            .field("name", &skill.name)
            .field("description", &skill.description);
        if self.extended_header {
            header = header
                .list("triggers", &skill.triggers)
                .list("dependencies", &skill.dependencies)
                .list("scripts", &skill.scripts)
                .list("references", &skill.references)
                .list("assets", &skill.assets);
        }
        Ok(header.render(&skill.instructions).into_bytes())
    }

    fn read_file(&self, path: &Path) -> Result<Skill, ParseError> {
        read_named(self, path, |s: &mut Skill, name| s.name = name, |s| !s.name.is_empty())
    }
}

impl CollectionAdapter for MarkdownSkillAdapter {
    fn relative_path(&self, skill: &Skill) -> PathBuf {
        PathBuf::from(sanitize_name(&skill.name)).join(SKILL_FILE)
    }
}
