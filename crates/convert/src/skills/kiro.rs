//! Kiro steering documents (`.kiro/steering/<name>.md`).
//!
//! A steering file is plain markdown whose first line is a `# Title`
//! heading. The title becomes the skill description and its kebab-case
//! form the name; everything after the heading is the instructions.

use super::Skill;
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::{sanitize_name, title_case};
use std::path::{Path, PathBuf};

pub const ADAPTER_NAME: &str = "kiro";
pub const STEERING_DIR: &str = ".kiro/steering";

#[derive(Debug, Clone, Copy, Default)]
pub struct KiroSteeringAdapter;

impl KiroSteeringAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn kebab_case(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl Adapter for KiroSteeringAdapter {
    type Item = Skill;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Skill, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
        let mut skill = Skill::default();
        match first.trim_end().strip_prefix("# ") {
            Some(title) => {
                let title = title.trim();
                skill.name = kebab_case(title);
                skill.description = title.to_string();
                skill.instructions = rest.trim().to_string();
            }
            None => skill.instructions = text.trim().to_string(),
        }
        Ok(skill)
    }

    fn marshal(&self, skill: &Skill) -> Result<Vec<u8>, MarshalError> {
        let title = title_case(&skill.name);
        let mut out = format!("# {title}\n\n");
        if !skill.description.is_empty() && skill.description != title {
            out.push_str(&skill.description);
            out.push_str("\n\n");
        }
        if !skill.instructions.is_empty() {
            out.push_str(&skill.instructions);
            if !skill.instructions.ends_with('\n') {
                out.push('\n');
            }
        }
        Ok(out.into_bytes())
    }

    fn read_file(&self, path: &Path) -> Result<Skill, ParseError> {
        read_named(self, path, |s: &mut Skill, name| s.name = name, |s| !s.name.is_empty())
    }
}

impl CollectionAdapter for KiroSteeringAdapter {
    fn relative_path(&self, skill: &Skill) -> PathBuf {
        PathBuf::from(format!("{}.md", sanitize_name(&skill.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_skips_description_equal_to_title() {
        let skill = Skill::new("code-style", "Code Style").with_instructions("Use rustfmt.");
        let out = KiroSteeringAdapter::new().marshal(&skill).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# Code Style\n\nUse rustfmt.\n");
    }

    #[test]
    fn parse_heading() {
        let skill = KiroSteeringAdapter::new()
            .parse(b"# Code Style\n\nUse rustfmt.\nKeep lines short.\n")
            .unwrap();
        assert_eq!(skill.name, "code-style");
        assert_eq!(skill.description, "Code Style");
        assert_eq!(skill.instructions, "Use rustfmt.\nKeep lines short.");
    }

    #[test]
    fn parse_without_heading_keeps_text() {
        let skill = KiroSteeringAdapter::new().parse(b"Always test.\n").unwrap();
        assert!(skill.name.is_empty());
        assert_eq!(skill.instructions, "Always test.");
    }

    #[test]
    fn name_survives_round_trip() {
        let adapter = KiroSteeringAdapter::new();
        let skill = Skill::new("api-design", "How we design APIs").with_instructions("Prefer nouns.");
        let back = adapter.parse(&adapter.marshal(&skill).unwrap()).unwrap();
        assert_eq!(back.name, "api-design");
        // The description paragraph folds into the instructions.
        assert_eq!(back.instructions, "How we design APIs\n\nPrefer nouns.");
    }

    #[test]
    fn relative_path_is_flat() {
        let skill = Skill::new("api-design", "");
        assert_eq!(
            KiroSteeringAdapter::new().relative_path(&skill),
            PathBuf::from("api-design.md")
        );
    }
}
