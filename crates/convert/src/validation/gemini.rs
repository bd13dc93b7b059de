//! Gemini CLI validators (`commands/<area>-validator.toml`).
//!
//! The checklist is the command prompt; the directory to validate arrives
//! as `{{args}}`. Model, tools and skills have no Gemini counterpart.

use super::body::{self, Layout};
use super::markdown::description_from_summary;
use super::{strip_validator_suffix, ValidationArea, VALIDATOR_SUFFIX};
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::commands::{GeminiCommand, ARGS_PLACEHOLDER};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use std::path::{Path, PathBuf};

pub const ADAPTER_NAME: &str = "gemini";

const TARGET_LINE: &str = "Target directory:";

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiValidationAdapter;

impl GeminiValidationAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn default_dir(&self) -> &'static str {
        "commands"
    }

    pub fn from_core(&self, area: &ValidationArea) -> GeminiCommand {
        if area.model.is_some() || !area.tools.is_empty() || !area.skills.is_empty() {
            tracing::debug!(area = %area.name, "gemini validators take no model, tools or skills, dropping");
        }
        let description = format!("{} validation for release readiness. {}", area.title(), area.description.trim());
        let body = body::render(area, Layout::Bullets);
        GeminiCommand {
            description: description.trim_end().to_string(),
            prompt: format!("{body}\n{TARGET_LINE} {ARGS_PLACEHOLDER} (the current directory when empty)\n"),
        }
    }

    pub fn to_core(&self, native: &GeminiCommand) -> ValidationArea {
        let parsed = body::parse(&native.prompt, Layout::Bullets);
        let description = if parsed.description.is_empty() {
            description_from_summary(&native.description).to_string()
        } else {
            parsed.description
        };
        ValidationArea {
            description,
            sign_off_criteria: parsed.sign_off_criteria,
            checks: parsed.checks,
            dependencies: parsed.dependencies,
            instructions: parsed.instructions,
            ..ValidationArea::default()
        }
    }
}

impl Adapter for GeminiValidationAdapter {
    type Item = ValidationArea;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<ValidationArea, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        let native: GeminiCommand = toml::from_str(text).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, area: &ValidationArea) -> Result<Vec<u8>, MarshalError> {
        toml::to_string_pretty(&self.from_core(area))
            .map(String::into_bytes)
            .map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }

    /// The command file carries no name; it comes from the file stem.
    fn read_file(&self, path: &Path) -> Result<ValidationArea, ParseError> {
        let mut area = read_named(self, path, |a: &mut ValidationArea, name| a.name = name, |a| {
            !a.name.is_empty()
        })?;
        area.name = strip_validator_suffix(&area.name).to_string();
        Ok(area)
    }
}

impl CollectionAdapter for GeminiValidationAdapter {
    fn relative_path(&self, area: &ValidationArea) -> PathBuf {
        let stem = sanitize_name(strip_validator_suffix(&area.name));
        PathBuf::from(format!("{stem}{VALIDATOR_SUFFIX}.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sample_area;

    #[test]
    fn prompt_takes_target_as_args() {
        let native = GeminiValidationAdapter::new().from_core(&sample_area());
        assert_eq!(
            native.description,
            "Qa validation for release readiness. Checks that the build is shippable."
        );
        assert!(native.prompt.starts_with("# Qa Validator\n"));
        assert!(native.prompt.contains("- **tests** (required): Unit tests pass\n  Command: `cargo test`\n"));
        assert!(native.prompt.contains("Final status: QA VALIDATION: GO or NO-GO"));
        assert!(native.prompt.ends_with("Target directory: {{args}} (the current directory when empty)\n"));
    }

    #[test]
    fn round_trip_keeps_checklist_but_not_agent_settings() {
        let adapter = GeminiValidationAdapter::new();
        let area = sample_area();
        let back = adapter.parse(&adapter.marshal(&area).unwrap()).unwrap();

        let expected = ValidationArea {
            name: String::new(),
            model: None,
            tools: Vec::new(),
            ..area
        };
        assert_eq!(back, expected);
    }

    #[test]
    fn plain_gemini_command_parses() {
        let data = b"description = \"Docs validation for release readiness. READMEs are current.\"\nprompt = \"# Docs Validator\\n\"\n";
        let area = GeminiValidationAdapter::new().parse(data).unwrap();
        assert_eq!(area.description, "READMEs are current.");
        assert!(area.checks.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = GeminiValidationAdapter::new().parse(b"prompt = ").unwrap_err();
        assert_eq!(err.format, "gemini");
    }

    #[test]
    fn read_file_takes_area_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = GeminiValidationAdapter::new();
        let path = adapter.write_into(&sample_area(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("qa-validator.toml"));
        let back = adapter.read_file(&path).unwrap();
        assert_eq!(back.name, "qa");
        assert_eq!(back.checks, sample_area().checks);
    }
}
