//! Release validation areas.
//!
//! An area (QA, documentation, release management, security, ...) owns a
//! set of checks and the criteria for signing off a release. Each area is
//! rendered as a `<area>-validator` artifact: a Claude sub-agent, a Gemini
//! command or a Codex prompt. Canonical areas are stored as JSON.

mod body;
mod gemini;
mod markdown;

pub use gemini::GeminiValidationAdapter;
pub use markdown::{MarkdownValidationAdapter, ValidationDialect};

use crate::adapter::CollectionAdapter;
use crate::error::{ParseError, WriteError};
use crate::fs::write_private;
use crate::names::title_case;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use walkdir::WalkDir;

/// Format tag used in errors for canonical area files.
pub const CANONICAL_FORMAT: &str = "validation";

/// Appended to an area name to form the generated artifact's name.
pub const VALIDATOR_SUFFIX: &str = "-validator";

pub const AREA_QA: &str = "qa";
pub const AREA_DOCUMENTATION: &str = "documentation";
pub const AREA_RELEASE: &str = "release";
pub const AREA_SECURITY: &str = "security";

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    NoGo,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "SKIP")]
    Skip,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 4] = [Self::Go, Self::NoGo, Self::Warn, Self::Skip];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::NoGo => "NO-GO",
            Self::Warn => "WARN",
            Self::Skip => "SKIP",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Self::Go => "check passed",
            Self::NoGo => "check failed and blocks the release",
            Self::Warn => "check failed but does not block the release",
            Self::Skip => "check was not run",
        }
    }

    /// Status for a failed check: required checks block, the rest warn.
    pub fn for_failure(required: bool) -> Self {
        if required {
            Self::NoGo
        } else {
            Self::Warn
        }
    }

    /// Area verdict: NO-GO if any check is NO-GO, otherwise GO.
    pub fn overall(statuses: impl IntoIterator<Item = CheckStatus>) -> Self {
        if statuses.into_iter().any(|s| s == Self::NoGo) {
            Self::NoGo
        } else {
            Self::Go
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for CheckStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One verification step within an area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Shell command whose exit status decides the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Text or regex to look for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Glob limiting which files `pattern` applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_pattern: Option<String>,
    /// A failing required check is NO-GO; an optional one is WARN.
    #[serde(default)]
    pub required: bool,
}

impl Check {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_file_pattern(mut self, glob: impl Into<String>) -> Self {
        self.file_pattern = Some(glob.into());
        self
    }
}

/// A tool-agnostic validation area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationArea {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sign_off_criteria: String,
    #[serde(default)]
    pub checks: Vec<Check>,
    /// CLI tools the checks need on `PATH`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl ValidationArea {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn add_check(&mut self, check: Check) {
        self.checks.push(check);
    }

    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.dependencies.push(dependency.into());
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    pub fn add_tool(&mut self, tool: impl Into<String>) {
        self.tools.push(tool.into());
    }

    pub fn add_tools<I, S>(&mut self, tools: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools.extend(tools.into_iter().map(Into::into));
    }

    pub fn add_skill(&mut self, skill: impl Into<String>) {
        self.skills.push(skill.into());
    }

    /// `qa` becomes `qa-validator`.
    pub fn validator_name(&self) -> String {
        format!("{}{VALIDATOR_SUFFIX}", strip_validator_suffix(&self.name))
    }

    pub fn title(&self) -> String {
        title_case(strip_validator_suffix(&self.name))
    }

    pub fn required_checks(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.required)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ParseError> {
        serde_json::from_slice(data).map_err(|e| ParseError::new(CANONICAL_FORMAT, e))
    }

    pub fn read_file(path: &Path) -> Result<Self, ParseError> {
        let data = std::fs::read(path).map_err(|e| ParseError::new(CANONICAL_FORMAT, e).with_path(path))?;
        Self::from_json(&data).map_err(|e| e.with_path(path))
    }

    pub fn write_file(&self, path: &Path) -> Result<(), WriteError> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| WriteError::new(path, e).with_format(CANONICAL_FORMAT))?;
        write_private(path, &data).map_err(|e| WriteError::new(path, e).with_format(CANONICAL_FORMAT))
    }
}

/// `qa-validator` becomes `qa`; other names are returned unchanged.
pub fn strip_validator_suffix(name: &str) -> &str {
    name.strip_suffix(VALIDATOR_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name)
}

/// Reads every `*.json` area directly inside `dir`, in file-name order.
pub fn read_canonical_dir(dir: &Path) -> Result<Vec<ValidationArea>, ParseError> {
    let mut areas = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ParseError::new(CANONICAL_FORMAT, e).with_path(dir))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            areas.push(ValidationArea::read_file(entry.path())?);
        }
    }
    tracing::debug!(dir = %dir.display(), areas = areas.len(), "read validation areas");
    Ok(areas)
}

/// Writes each area below `dir` with `adapter`, returning the written paths.
pub fn write_areas(
    adapter: &dyn CollectionAdapter<Item = ValidationArea>,
    areas: &[ValidationArea],
    dir: &Path,
) -> Result<Vec<PathBuf>, WriteError> {
    areas.iter().map(|area| adapter.write_into(area, dir)).collect()
}

pub type ValidationRegistry = Registry<dyn CollectionAdapter<Item = ValidationArea>>;

/// A registry holding the claude, codex and gemini validation adapters.
pub fn builtin_registry() -> ValidationRegistry {
    let registry = ValidationRegistry::new();
    registry.register(Arc::new(MarkdownValidationAdapter::claude()));
    registry.register(Arc::new(MarkdownValidationAdapter::codex()));
    registry.register(Arc::new(GeminiValidationAdapter::new()));
    registry
}

#[cfg(test)]
pub(crate) fn sample_area() -> ValidationArea {
    let mut area = ValidationArea::new(AREA_QA, "Checks that the build is shippable.");
    area.sign_off_criteria = "All required checks are GO.".into();
    area.add_check(Check::required("tests", "Unit tests pass").with_command("cargo test"));
    area.add_check(
        Check::optional("todos", "No stray TODOs")
            .with_pattern("TODO")
            .with_file_pattern("src/**/*.rs"),
    );
    area.add_dependency("cargo");
    area.instructions = "Run each check in order.\n\nStop at the first NO-GO.".into();
    area.set_model("sonnet");
    area.add_tools(["Read", "Bash"]);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for status in CheckStatus::ALL {
            assert_eq!(status.as_str().parse::<CheckStatus>().unwrap(), status);
        }
        assert_eq!("no-go".parse::<CheckStatus>().unwrap(), CheckStatus::NoGo);
        assert!("MAYBE".parse::<CheckStatus>().is_err());
        assert_eq!(serde_json::to_string(&CheckStatus::NoGo).unwrap(), "\"NO-GO\"");
    }

    #[test]
    fn overall_is_no_go_only_when_something_blocks() {
        use CheckStatus::*;
        assert_eq!(CheckStatus::overall([Go, Warn, Skip]), Go);
        assert_eq!(CheckStatus::overall([Go, NoGo, Warn]), NoGo);
        assert_eq!(CheckStatus::overall([]), Go);
        assert_eq!(CheckStatus::for_failure(true), NoGo);
        assert_eq!(CheckStatus::for_failure(false), Warn);
    }

    #[test]
    fn validator_name_is_not_doubled() {
        let area = ValidationArea::new("security-validator", "");
        assert_eq!(area.validator_name(), "security-validator");
        assert_eq!(area.title(), "Security");
        assert_eq!(strip_validator_suffix("-validator"), "-validator");
    }

    #[test]
    fn canonical_json_uses_snake_case_and_omits_empty_optionals() {
        let area = ValidationArea::new("docs", "Docs are current");
        let json: serde_json::Value = serde_json::from_slice(&serde_json::to_vec(&area).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "docs",
                "description": "Docs are current",
                "sign_off_criteria": "",
                "checks": [],
                "instructions": ""
            })
        );
    }

    #[test]
    fn canonical_dir_reads_json_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        ValidationArea::new("security", "s").write_file(&dir.path().join("security.json")).unwrap();
        sample_area().write_file(&dir.path().join("qa.json")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let areas = read_canonical_dir(dir.path()).unwrap();
        let names: Vec<&str> = areas.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["qa", "security"]);
        assert_eq!(areas[0], sample_area());
    }

    #[test]
    fn canonical_dir_reports_bad_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = read_canonical_dir(dir.path()).unwrap_err();
        assert_eq!(err.format, CANONICAL_FORMAT);
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn write_areas_uses_each_adapter_layout() {
        let dir = tempfile::tempdir().unwrap();
        let registry = builtin_registry();
        assert_eq!(registry.names(), vec!["claude", "codex", "gemini"]);

        let areas = [sample_area(), ValidationArea::new(AREA_SECURITY, "Secrets stay secret")];
        let adapter = registry.get("gemini").unwrap();
        let written = write_areas(adapter.as_ref(), &areas, dir.path()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("qa-validator.toml"),
                dir.path().join("security-validator.toml"),
            ]
        );
    }
}
