//! Gemini CLI custom commands (`.gemini/commands/<name>.toml`).

use super::{Argument, Command, ARGUMENTS_PLACEHOLDER};
use crate::adapter::{read_named, Adapter, CollectionAdapter};
use crate::error::{MarshalError, ParseError};
use crate::names::sanitize_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ADAPTER_NAME: &str = "gemini";
pub const ARGS_PLACEHOLDER: &str = "{{args}}";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiCommand {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiCommandAdapter;

impl GeminiCommandAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_core(&self, native: &GeminiCommand) -> Command {
        Command {
            description: native.description.clone(),
            arguments: if native.prompt.contains(ARGS_PLACEHOLDER) {
                vec![Argument::optional("args")]
            } else {
                Vec::new()
            },
            instructions: native.prompt.replace(ARGS_PLACEHOLDER, ARGUMENTS_PLACEHOLDER),
            ..Command::default()
        }
    }

    pub fn from_core(&self, cmd: &Command) -> GeminiCommand {
        let mut prompt = cmd.instructions.replace(ARGUMENTS_PLACEHOLDER, ARGS_PLACEHOLDER);
        if !cmd.arguments.is_empty() && !prompt.contains(ARGS_PLACEHOLDER) {
            if !prompt.is_empty() {
                prompt.push_str("\n\n");
            }
            prompt.push_str("Arguments: ");
            prompt.push_str(ARGS_PLACEHOLDER);
        }
        if !cmd.allowed_tools.is_empty() {
            tracing::debug!(command = %cmd.name, "gemini commands have no tool allow-list, dropping");
        }
        GeminiCommand {
            description: cmd.description.clone(),
            prompt,
        }
    }
}

impl Adapter for GeminiCommandAdapter {
    type Item = Command;

    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn parse(&self, data: &[u8]) -> Result<Command, ParseError> {
        let text = std::str::from_utf8(data).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        let native: GeminiCommand = toml::from_str(text).map_err(|e| ParseError::new(ADAPTER_NAME, e))?;
        Ok(self.to_core(&native))
    }

    fn marshal(&self, cmd: &Command) -> Result<Vec<u8>, MarshalError> {
        toml::to_string(&self.from_core(cmd))
            .map(String::into_bytes)
            .map_err(|e| MarshalError::new(ADAPTER_NAME, e))
    }

    fn read_file(&self, path: &Path) -> Result<Command, ParseError> {
        read_named(self, path, |c: &mut Command, name| c.name = name, |c| !c.name.is_empty())
    }
}

impl CollectionAdapter for GeminiCommandAdapter {
    fn relative_path(&self, cmd: &Command) -> PathBuf {
        PathBuf::from(format!("{}.toml", sanitize_name(&cmd.name)))
    }
}
