use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// No [`ToolConfig`](crate::ToolConfig) exists for the requested tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported tool '{0}'")]
pub struct UnsupportedTool(pub String);

/// Generating one tool's output failed.
///
/// `component` names the failing part, e.g. `hooks` or `skill:changelog`;
/// it is `None` for failures before any component was attempted.
#[derive(Debug, Error)]
#[error("failed to generate {tool}{}", component_suffix(.component))]
pub struct GenerateError {
    pub tool: String,
    pub component: Option<String>,
    #[source]
    pub source: BoxError,
}

impl GenerateError {
    pub fn new(tool: &str, component: Option<String>, source: impl Into<BoxError>) -> Self {
        Self {
            tool: tool.to_string(),
            component,
            source: source.into(),
        }
    }
}

fn component_suffix(component: &Option<String>) -> String {
    component
        .as_ref()
        .map(|c| format!(" {c}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_component() {
        let err = GenerateError::new("cursor", Some("hooks".into()), std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "failed to generate cursor hooks");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn unsupported_tool_has_no_component() {
        let err = GenerateError::new("emacs", None, UnsupportedTool("emacs".into()));
        assert_eq!(err.to_string(), "failed to generate emacs");
        assert_eq!(err.source().unwrap().to_string(), "unsupported tool 'emacs'");
    }
}
