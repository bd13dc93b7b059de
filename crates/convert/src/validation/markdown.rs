//! Markdown validators: Claude sub-agents and Codex prompts.

use super::body::{self, Layout};
use super::{strip_validator_suffix, ValidationArea, VALIDATOR_SUFFIX};
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use assistkit_frontmatter::FrontmatterBuilder;
use std::path::{Path, PathBuf};

/// Model a Claude validator runs on when the area names none.
pub const DEFAULT_MODEL: &str = "haiku";
/// Tools a Claude validator gets when the area names none.
pub const DEFAULT_TOOLS: [&str; 4] = ["Read", "Grep", "Glob", "Bash"];

const READINESS: &str = "for release readiness.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationDialect {
    /// Sub-agent with model, tools and skills; checks as a table.
    Claude,
    /// Prompt tagged for search; checks as numbered sections.
    Codex,
}

impl ValidationDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationDialect::Claude => "claude",
            ValidationDialect::Codex => "codex",
        }
    }

    pub fn default_dir(self) -> &'static str {
        match self {
            ValidationDialect::Claude => "agents",
            ValidationDialect::Codex => "prompts",
        }
    }

    fn layout(self) -> Layout {
        match self {
            ValidationDialect::Claude => Layout::Table,
            ValidationDialect::Codex => Layout::Numbered,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkdownValidationAdapter {
    dialect: ValidationDialect,
}

impl MarkdownValidationAdapter {
    pub fn new(dialect: ValidationDialect) -> Self {
        Self { dialect }
    }

    pub fn claude() -> Self {
        Self::new(ValidationDialect::Claude)
    }

    pub fn codex() -> Self {
        Self::new(ValidationDialect::Codex)
    }

    pub fn dialect(&self) -> ValidationDialect {
        self.dialect
    }

    pub fn default_dir(&self) -> &'static str {
        self.dialect.default_dir()
    }

    fn header(&self, area: &ValidationArea) -> FrontmatterBuilder {
        let title = area.title();
        let header = FrontmatterBuilder::new().field("name", &area.validator_name());
        match self.dialect {
            ValidationDialect::Claude => {
                let tools = if area.tools.is_empty() {
                    DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect()
                } else {
                    area.tools.clone()
                };
                header
                    .field(
                        "description",
                        &summary(&format!("{title} validation agent {READINESS}"), &area.description),
                    )
                    .field("model", area.model.as_deref().unwrap_or(DEFAULT_MODEL))
                    .joined("tools", &tools)
                    .joined("skills", &area.skills)
            }
            ValidationDialect::Codex => {
                let tags = vec![
                    "validation".to_string(),
                    "release".to_string(),
                    strip_validator_suffix(&area.name).to_string(),
                ];
                header
                    .field(
                        "description",
                        &summary(&format!("{title} validation {READINESS}"), &area.description),
                    )
                    .list("tags", &tags)
                    .optional("model", area.model.as_deref())
            }
        }
    }
}

fn summary(lead: &str, description: &str) -> String {
    format!("{lead} {}", description.trim()).trim_end().to_string()
}

/// Drops the generated lead-in from a header description.
pub(super) fn description_from_summary(text: &str) -> &str {
    text.split_once(READINESS).map_or(text, |(_, rest)| rest).trim()
}

impl Adapter for MarkdownValidationAdapter {
    type Item = ValidationArea;

    fn name(&self) -> &str {
        self.dialect.as_str()
    }

    fn parse(&self, data: &[u8]) -> Result<ValidationArea, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(self.name(), e))?;
        let doc = assistkit_frontmatter::parse(text);
        let parsed = body::parse(&doc.body, self.dialect.layout());
        let mut area = ValidationArea {
            description: parsed.description,
            sign_off_criteria: parsed.sign_off_criteria,
            checks: parsed.checks,
            dependencies: parsed.dependencies,
            instructions: parsed.instructions,
            ..ValidationArea::default()
        };
        if let Some(fm) = doc.frontmatter {
            area.name = fm
                .get("name")
                .map(|n| strip_validator_suffix(&n).to_string())
                .unwrap_or_default();
            if area.description.is_empty() {
                if let Some(text) = fm.get("description") {
                    area.description = description_from_summary(&text).to_string();
                }
            }
            area.model = fm.get("model");
            area.tools = fm.list("tools");
            area.skills = fm.list("skills");
        }
        Ok(area)
    }

    fn marshal(&self, area: &ValidationArea) -> Result<Vec<u8>, MarshalError> {
        let body = body::render(area, self.dialect.layout());
        Ok(self.header(area).render(&body).into_bytes())
    }

    fn read_file(&self, path: &Path) -> Result<ValidationArea, ParseError> {
        let mut area = read_named(self, path, |a: &mut ValidationArea, name| a.name = name, |a| {
            !a.name.is_empty()
        })?;
        area.name = strip_validator_suffix(&area.name).to_string();
        Ok(area)
    }
}

impl CollectionAdapter for MarkdownValidationAdapter {
    fn relative_path(&self, area: &ValidationArea) -> PathBuf {
        let stem = sanitize_name(strip_validator_suffix(&area.name));
        PathBuf::from(format!("{stem}{VALIDATOR_SUFFIX}.md"))
    }
}
