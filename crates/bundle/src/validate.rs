//! Structural checks run before generating a bundle.

use crate::Bundle;
use assistkit_convert::error::HookValidationError;
use assistkit_convert::names::is_kebab_case;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationIssue {
    #[error("plugin name '{0}' is not kebab-case")]
    PluginName(String),
    #[error("plugin version '{version}' is not semver: {reason}")]
    Version { version: String, reason: String },
    #[error("{kind} name '{name}' is not kebab-case")]
    Name { kind: &'static str, name: String },
    #[error("duplicate {kind} name '{name}'")]
    Duplicate { kind: &'static str, name: String },
    #[error(transparent)]
    Hook(#[from] HookValidationError),
}

/// Every issue found in a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bundle has {} validation issue(s)", self.0.len())?;
        for issue in &self.0 {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn check_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !is_kebab_case(name) {
            issues.push(ValidationIssue::Name {
                kind,
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            issues.push(ValidationIssue::Duplicate {
                kind,
                name: name.to_string(),
            });
        }
    }
}

impl Bundle {
    /// Checks names, the plugin version and every hook.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut issues = Vec::new();

        if !is_kebab_case(&self.plugin.name) {
            issues.push(ValidationIssue::PluginName(self.plugin.name.clone()));
        }
        if let Err(e) = semver::Version::parse(&self.plugin.version) {
            issues.push(ValidationIssue::Version {
                version: self.plugin.version.clone(),
                reason: e.to_string(),
            });
        }
        check_names("skill", self.skills.iter().map(|s| s.name.as_str()), &mut issues);
        check_names("command", self.commands.iter().map(|c| c.name.as_str()), &mut issues);
        check_names("agent", self.agents.iter().map(|a| a.name.as_str()), &mut issues);
        if let Err(e) = self.hooks.validate() {
            issues.push(e.into());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(issues))
        }
    }
}
