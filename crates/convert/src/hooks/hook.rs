//! Hook definitions.

use crate::error::HookError;
use serde::{Deserialize, Serialize};

/// How a hook is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookType {
    /// Runs a shell command.
    Command,
    /// Asks the model for a context-aware decision.
    Prompt,
}

impl HookType {
    pub fn as_str(self) -> &'static str {
        match self {
            HookType::Command => "command",
            HookType::Prompt => "prompt",
        }
    }

    /// Parses a native type tag. Unrecognized tags yield `None` so inference can run.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "command" => Some(HookType::Command),
            "prompt" => Some(HookType::Prompt),
            _ => None,
        }
    }
}

/// A single hook triggered by an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<HookType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl Hook {
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            hook_type: Some(HookType::Command),
            command: Some(command.into()),
            ..Self::default()
        }
    }

    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            hook_type: Some(HookType::Prompt),
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_show_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Non-empty command text.
    pub fn command_text(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.is_empty())
    }

    /// Non-empty prompt text.
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// The explicit type, or the type implied by whichever payload is set.
    pub fn effective_type(&self) -> Option<HookType> {
        self.hook_type.or_else(|| {
            if self.command_text().is_some() {
                Some(HookType::Command)
            } else if self.prompt_text().is_some() {
                Some(HookType::Prompt)
            } else {
                None
            }
        })
    }

    pub fn is_command(&self) -> bool {
        self.effective_type() == Some(HookType::Command)
    }

    pub fn is_prompt(&self) -> bool {
        self.effective_type() == Some(HookType::Prompt)
    }

    /// A hook carries exactly one of command or prompt.
    pub fn validate(&self) -> Result<(), HookError> {
        match (self.command_text(), self.prompt_text()) {
            (None, None) => Err(HookError::MissingCommandOrPrompt),
            (Some(_), Some(_)) => Err(HookError::BothCommandAndPrompt),
            _ => Ok(()),
        }
    }

    /// Fills in a missing type from the payload.
    pub(crate) fn with_inferred_type(mut self) -> Self {
        self.hook_type = self.effective_type();
        self
    }
}

/// Hooks sharing an optional tool matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Tool filter such as `Bash` or `Write|Edit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

impl HookEntry {
    pub fn new(matcher: Option<String>, hooks: Vec<Hook>) -> Self {
        Self { matcher, hooks }
    }

    /// The matcher, treating an empty string as absent.
    pub fn matcher(&self) -> Option<&str> {
        self.matcher.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_type() {
        let hook = Hook::command("echo hi");
        assert_eq!(hook.hook_type, Some(HookType::Command));
        assert!(hook.is_command());
        assert!(!hook.is_prompt());

        let hook = Hook::prompt("is this safe?");
        assert!(hook.is_prompt());
    }

    #[test]
    fn builders() {
        let hook = Hook::command("lint")
            .with_timeout(30)
            .with_show_output(true)
            .with_working_dir("/repo");
        assert_eq!(hook.timeout, Some(30));
        assert!(hook.show_output);
        assert_eq!(hook.working_dir.as_deref(), Some("/repo"));
    }

    #[test]
    fn inference_prefers_explicit_type() {
        let hook = Hook {
            hook_type: Some(HookType::Prompt),
            command: Some("echo".into()),
            ..Hook::default()
        };
        assert_eq!(hook.effective_type(), Some(HookType::Prompt));
    }

    #[test]
    fn inference_from_payload() {
        let hook = Hook {
            command: Some("echo".into()),
            ..Hook::default()
        };
        assert_eq!(hook.effective_type(), Some(HookType::Command));

        let hook = Hook {
            prompt: Some("check".into()),
            ..Hook::default()
        };
        assert_eq!(hook.effective_type(), Some(HookType::Prompt));

        let hook = Hook {
            command: Some(String::new()),
            ..Hook::default()
        };
        assert_eq!(hook.effective_type(), None);
    }

    #[test]
    fn validate_requires_exactly_one_payload() {
        assert!(Hook::command("x").validate().is_ok());
        assert!(Hook::prompt("x").validate().is_ok());
        assert_eq!(
            Hook::default().validate(),
            Err(HookError::MissingCommandOrPrompt)
        );
        let both = Hook {
            command: Some("a".into()),
            prompt: Some("b".into()),
            ..Hook::default()
        };
        assert_eq!(both.validate(), Err(HookError::BothCommandAndPrompt));
    }

    #[test]
    fn serde_shape() {
        let hook = Hook::command("fmt").with_show_output(true).with_timeout(5);
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "command", "command": "fmt", "timeout": 5, "showOutput": true})
        );

        let back: Hook = serde_json::from_value(json).unwrap();
        assert_eq!(back, hook);
    }

    #[test]
    fn type_tags() {
        assert_eq!(HookType::from_tag("command"), Some(HookType::Command));
        assert_eq!(HookType::from_tag("prompt"), Some(HookType::Prompt));
        assert_eq!(HookType::from_tag("agent"), None);
        assert_eq!(HookType::Prompt.as_str(), "prompt");
    }

    #[test]
    fn empty_matcher_is_absent() {
        assert_eq!(HookEntry::new(Some(String::new()), vec![]).matcher(), None);
        assert_eq!(HookEntry::new(Some("Bash".into()), vec![]).matcher(), Some("Bash"));
    }
}
