//! Error types shared by every adapter.

use crate::hooks::Event;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed cause carried by the adapter errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Native bytes could not be decoded into the canonical model.
#[derive(Debug, Error)]
#[error("failed to parse {format} config{}", location(.path))]
pub struct ParseError {
    /// Adapter name, e.g. `claude`.
    pub format: String,
    pub path: Option<PathBuf>,
    #[source]
    pub source: BoxError,
}

impl ParseError {
    pub fn new(format: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            format: format.into(),
            path: None,
            source: source.into(),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" from {}", p.display()))
        .unwrap_or_default()
}

/// A canonical value could not be encoded.
#[derive(Debug, Error)]
#[error("failed to encode {format} config")]
pub struct MarshalError {
    pub format: String,
    #[source]
    pub source: BoxError,
}

impl MarshalError {
    pub fn new(format: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            format: format.into(),
            source: source.into(),
        }
    }
}

/// Writing an encoded value to disk failed.
#[derive(Debug, Error)]
#[error("failed to write {}config to {}", format_prefix(.format), .path.display())]
pub struct WriteError {
    pub format: Option<String>,
    pub path: PathBuf,
    #[source]
    pub source: BoxError,
}

impl WriteError {
    pub fn new(path: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Self {
            format: None,
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

fn format_prefix(format: &Option<String>) -> String {
    format.as_ref().map(|f| format!("{f} ")).unwrap_or_default()
}

/// Why a registry conversion failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionFailure {
    #[error("no adapter registered for source format '{0}'")]
    UnknownSource(String),
    #[error("no adapter registered for target format '{0}'")]
    UnknownTarget(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// A conversion between two registered formats failed.
#[derive(Debug, Error)]
#[error("cannot convert from {from} to {to}{}", event_suffix(.event))]
pub struct ConversionError {
    pub from: String,
    pub to: String,
    pub event: Option<Event>,
    #[source]
    pub failure: ConversionFailure,
}

impl ConversionError {
    pub fn new(from: &str, to: &str, failure: impl Into<ConversionFailure>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            event: None,
            failure: failure.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }
}

fn event_suffix(event: &Option<Event>) -> String {
    event.map(|e| format!(" (event {e})")).unwrap_or_default()
}

/// A single hook is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HookError {
    #[error("hook must have either command or prompt")]
    MissingCommandOrPrompt,
    #[error("hook cannot have both command and prompt")]
    BothCommandAndPrompt,
}

/// Location of a malformed hook within a hooks config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hook at {event}[{entry_index}].hooks[{hook_index}]")]
pub struct HookValidationError {
    pub event: Event,
    pub entry_index: usize,
    pub hook_index: usize,
    #[source]
    pub source: HookError,
}

/// Umbrella error for callers that do not need to distinguish stages.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Marshal(#[from] MarshalError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    HookValidation(#[from] HookValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn parse_error_mentions_path_when_known() {
        let err = ParseError::new("claude", io::Error::other("boom"));
        assert_eq!(err.to_string(), "failed to parse claude config");

        let err = err.with_path("/tmp/settings.json");
        assert_eq!(
            err.to_string(),
            "failed to parse claude config from /tmp/settings.json"
        );
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }

    #[test]
    fn write_error_format_is_optional() {
        let err = WriteError::new("/tmp/out.json", io::Error::other("denied"));
        assert_eq!(err.to_string(), "failed to write config to /tmp/out.json");
        let err = err.with_format("cursor");
        assert_eq!(err.to_string(), "failed to write cursor config to /tmp/out.json");
    }

    #[test]
    fn conversion_error_exposes_failure_as_source() {
        let err = ConversionError::new("claude", "nope", ConversionFailure::UnknownTarget("nope".into()))
            .with_event(Event::BeforeCommand);
        assert_eq!(
            err.to_string(),
            "cannot convert from claude to nope (event before_command)"
        );
        assert_eq!(
            err.source().unwrap().to_string(),
            "no adapter registered for target format 'nope'"
        );
    }

    #[test]
    fn validation_error_locates_hook() {
        let err = HookValidationError {
            event: Event::OnStop,
            entry_index: 1,
            hook_index: 2,
            source: HookError::BothCommandAndPrompt,
        };
        assert_eq!(err.to_string(), "invalid hook at on_stop[1].hooks[2]");
        assert_eq!(
            err.source().unwrap().to_string(),
            "hook cannot have both command and prompt"
        );
    }
}
