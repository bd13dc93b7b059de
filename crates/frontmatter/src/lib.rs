//! Markdown frontmatter handling for agent, skill and command files.
//!
//! Documents look like:
//!
//! ```text
//! ---
//! name: code-reviewer
//! description: Reviews pull requests
//! tools: [Read, Grep]
//! ---
//! Body text.
//! ```
//!
//! The header is parsed as YAML first. Headers that are not valid YAML
//! (unquoted colons inside values are common in hand-written files) fall
//! back to a line-based `key: value` reader so callers always get fields.
//!
//! # Examples
//!
//! ```
//! use assistkit_frontmatter::{parse, FrontmatterBuilder};
//!
//! let doc = parse("---\nname: helper\ntools: Read, Write\n---\nDo things.");
//! let fm = doc.frontmatter.unwrap();
//! assert_eq!(fm.get("name").as_deref(), Some("helper"));
//! assert_eq!(fm.list("tools"), vec!["Read", "Write"]);
//!
//! let rendered = FrontmatterBuilder::new()
//!     .field("name", "helper")
//!     .render("Do things.");
//! assert!(rendered.starts_with("---\nname: helper\n---\n"));
//! ```

#![deny(unsafe_code)]

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Parsed frontmatter fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Returns the field as a string.
    ///
    /// Scalars are stringified, sequences are joined with `", "`, and
    /// null or empty values yield `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.fields.get(key)?;
        let text = match value {
            Value::Sequence(items) => items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(", "),
            other => scalar_to_string(other)?,
        };
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    /// Returns the field as a list of strings.
    ///
    /// Accepts YAML sequences as well as `[a, b]` and `a, b` strings.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(other) => scalar_to_string(other)
                .map(|s| parse_list(&s))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// A markdown document split into frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Parsed header, if the document has one.
    pub frontmatter: Option<Frontmatter>,
    /// Markdown content after the header.
    pub body: String,
    /// Line number where the body starts (1-indexed).
    pub body_start_line: usize,
}

/// Check if content starts with a frontmatter delimiter.
pub fn has_frontmatter(content: &str) -> bool {
    content.trim_start().starts_with("---")
}

/// Split content into frontmatter and body sections.
///
/// Returns (frontmatter_yaml, body_content, body_start_line). An opening
/// delimiter without a closing one is treated as plain body.
pub fn split_frontmatter(content: &str) -> (Option<String>, String, usize) {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return (None, content.to_string(), 1);
    }

    let leading_lines = content
        .lines()
        .take_while(|line| line.trim().is_empty())
        .count();

    let after_open = trimmed[3..].trim_start_matches(['\r', '\n']);

    // An immediately closed header (`---\n---`) has no YAML at all.
    if let Some(rest) = after_open.strip_prefix("---") {
        let rest = rest.trim_start_matches(['\r', '\n']);
        return (Some(String::new()), rest.to_string(), leading_lines + 3);
    }

    let (end_pos, delimiter_len) = match after_open.find("\n---") {
        Some(pos) => (pos, 4),
        None => return (None, content.to_string(), 1),
    };

    let yaml = after_open[..end_pos].trim_end_matches('\r');
    let rest = after_open[end_pos + delimiter_len..].trim_start_matches(['\r', '\n']);
    let frontmatter_lines = yaml.lines().count() + 2;

    (
        Some(yaml.to_string()),
        rest.to_string(),
        leading_lines + frontmatter_lines + 1,
    )
}

/// Parse a document, tolerating malformed headers.
pub fn parse(content: &str) -> Document {
    let (raw, body, body_start_line) = split_frontmatter(content);
    Document {
        frontmatter: raw.as_deref().map(parse_fields),
        body,
        body_start_line,
    }
}

/// Parse the raw header text into fields.
pub fn parse_fields(yaml: &str) -> Frontmatter {
    if yaml.trim().is_empty() {
        return Frontmatter::default();
    }

    match serde_yaml::from_str::<BTreeMap<String, Value>>(yaml) {
        Ok(fields) => Frontmatter { fields },
        Err(err) => {
            tracing::debug!(error = %err, "frontmatter is not valid YAML, reading key/value lines");
            Frontmatter {
                fields: parse_lines(yaml),
            }
        }
    }
}

fn parse_lines(yaml: &str) -> BTreeMap<String, Value> {
    yaml.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                Value::String(unquote(value.trim()).to_string()),
            )
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Parse a list value written as `[a, b, c]` or `a, b, c`.
pub fn parse_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    value
        .split(',')
        .map(|item| unquote(item.trim()).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Renders a frontmatter header followed by a body.
///
/// Fields are written in insertion order. Empty values and empty lists
/// are skipped.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterBuilder {
    lines: Vec<String>,
}

impl FrontmatterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: &str) -> Self {
        if !value.trim().is_empty() {
            self.lines.push(format!("{key}: {}", escape_scalar(value)));
        }
        self
    }

    pub fn optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub fn list(mut self, key: &str, items: &[String]) -> Self {
        if !items.is_empty() {
            let rendered: Vec<String> = items.iter().map(|i| escape_list_item(i)).collect();
            self.lines.push(format!("{key}: [{}]", rendered.join(", ")));
        }
        self
    }

    /// A list written as a bare comma-separated value (`tools: Read, Grep`).
    pub fn joined(self, key: &str, items: &[String]) -> Self {
        self.field(key, &items.join(", "))
    }

    /// Render the header and body. A builder with no fields renders only the body.
    pub fn render(self, body: &str) -> String {
        if self.lines.is_empty() {
            return ensure_trailing_newline(body);
        }
        let mut out = String::from("---\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("---\n");
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&ensure_trailing_newline(body));
        }
        out
    }
}

fn ensure_trailing_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

const SPECIAL_LEADING: &[char] = &[
    '[', ']', '{', '}', '*', '&', '!', '|', '>', '\'', '"', '%', '@', '`', '-', '?',
];

fn escape_scalar(value: &str) -> String {
    if value.contains('\n') {
        // Literal block scalar keeps line breaks.
        let mut indented = String::with_capacity(value.len() + 2 * value.lines().count());
        for (idx, line) in value.lines().enumerate() {
            if idx > 0 {
                indented.push('\n');
            }
            indented.push_str("  ");
            indented.push_str(line);
        }
        return format!("|\n{indented}");
    }
    if needs_quotes(value) {
        quote(value)
    } else {
        value.to_string()
    }
}

fn escape_list_item(value: &str) -> String {
    if needs_quotes(value) || value.contains(',') {
        quote(value)
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    value.contains(": ")
        || value.ends_with(':')
        || value.contains(" #")
        || value.starts_with(SPECIAL_LEADING)
        || value != value.trim()
        || looks_like_non_string(value)
}

/// Plain scalars YAML would read back as a bool, null or number.
fn looks_like_non_string(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "null" | "~" | "yes" | "no" | "on" | "off"
    ) || value.parse::<f64>().is_ok()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_frontmatter() {
        assert!(has_frontmatter("---\nname: test\n---\n# Content"));
        assert!(has_frontmatter("  ---\nname: test\n---\n# Content"));
        assert!(!has_frontmatter("# No frontmatter"));
        assert!(!has_frontmatter("-- not quite"));
    }

    #[test]
    fn test_split_frontmatter() {
        let content = "---\nname: test\ndescription: A test skill\n---\n# Heading\nBody";
        let (yaml, body, line) = split_frontmatter(content);

        assert!(yaml.unwrap().contains("name: test"));
        assert!(body.starts_with("# Heading"));
        assert_eq!(line, 5);
    }

    #[test]
    fn test_split_no_frontmatter() {
        let content = "# Just markdown\nNo frontmatter here.";
        let (yaml, body, line) = split_frontmatter(content);

        assert!(yaml.is_none());
        assert_eq!(body, content);
        assert_eq!(line, 1);
    }

    #[test]
    fn test_split_unterminated_header_is_body() {
        let content = "---\nname: test\nno closing delimiter";
        let (yaml, body, _) = split_frontmatter(content);
        assert!(yaml.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_crlf() {
        let content = "---\r\nname: test\r\n---\r\nBody";
        let (yaml, body, _) = split_frontmatter(content);
        assert_eq!(yaml.as_deref(), Some("name: test"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_yaml_fields() {
        let doc = parse("---\nname: my-skill\ndescription: Does something useful\n---\n# My Skill");
        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.get("name").as_deref(), Some("my-skill"));
        assert_eq!(fm.get("description").as_deref(), Some("Does something useful"));
        assert!(doc.body.starts_with("# My Skill"));
    }

    #[test]
    fn test_parse_falls_back_to_lines() {
        // "a: b: c" is not valid YAML.
        let doc = parse("---\nname: helper\ndescription: Usage: run it\n# comment\n---\nbody");
        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.get("name").as_deref(), Some("helper"));
        assert_eq!(fm.get("description").as_deref(), Some("Usage: run it"));
        assert!(!fm.contains("# comment"));
    }

    #[test]
    fn test_line_fallback_strips_quotes() {
        let fields = parse_lines("name: \"quoted\"\nmodel: 'single'\n: orphan");
        assert_eq!(fields.get("name"), Some(&Value::String("quoted".into())));
        assert_eq!(fields.get("model"), Some(&Value::String("single".into())));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_list_forms() {
        let fm = parse_fields("a: [Read, Write]\nb: Read, Write\nc:\n  - Read\n  - Write\nd: Read");
        let expected = vec!["Read".to_string(), "Write".to_string()];
        assert_eq!(fm.list("a"), expected);
        assert_eq!(fm.list("b"), expected);
        assert_eq!(fm.list("c"), expected);
        assert_eq!(fm.list("d"), vec!["Read".to_string()]);
        assert!(fm.list("missing").is_empty());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("[a, 'b', \"c\"]"), vec!["a", "b", "c"]);
        assert_eq!(parse_list("a,,b , "), vec!["a", "b"]);
        assert!(parse_list("[]").is_empty());
    }

    #[test]
    fn test_null_and_numbers() {
        let fm = parse_fields("model:\nversion: 2\nenabled: true");
        assert_eq!(fm.get("model"), None);
        assert_eq!(fm.get("version").as_deref(), Some("2"));
        assert_eq!(fm.get("enabled").as_deref(), Some("true"));
    }

    #[test]
    fn test_builder_renders_in_order() {
        let out = FrontmatterBuilder::new()
            .field("name", "reviewer")
            .field("description", "Reviews code")
            .optional("model", None)
            .list("tools", &["Read".to_string(), "Grep".to_string()])
            .list("skills", &[])
            .render("Be thorough.");
        assert_eq!(
            out,
            "---\nname: reviewer\ndescription: Reviews code\ntools: [Read, Grep]\n---\n\nBe thorough.\n"
        );
    }

    #[test]
    fn test_builder_quotes_special_values() {
        let out = FrontmatterBuilder::new()
            .field("description", "Usage: run it # now")
            .render("");
        assert!(out.contains("description: \"Usage: run it # now\""));

        let fm = parse(&out).frontmatter.unwrap();
        assert_eq!(fm.get("description").as_deref(), Some("Usage: run it # now"));
    }

    #[test]
    fn test_builder_multiline_block() {
        let out = FrontmatterBuilder::new()
            .field("description", "line one\nline two")
            .render("body");
        let fm = parse(&out).frontmatter.unwrap();
        assert_eq!(fm.get("description").as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_builder_joined_list() {
        let out = FrontmatterBuilder::new()
            .joined("tools", &["Read".to_string(), "Grep".to_string()])
            .render("");
        assert_eq!(out, "---\ntools: Read, Grep\n---\n");
        let fm = parse(&out).frontmatter.unwrap();
        assert_eq!(fm.list("tools"), vec!["Read", "Grep"]);
    }

    #[test]
    fn test_builder_without_fields() {
        assert_eq!(FrontmatterBuilder::new().render("just body"), "just body\n");
    }

    mod prop {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rendered_plain_values_parse_back(
                name in "[a-z][a-z0-9-]{0,20}",
                desc in "[A-Za-z][A-Za-z0-9 ,.:#]{0,40}[A-Za-z0-9]",
            ) {
                let out = FrontmatterBuilder::new()
                    .field("name", &name)
                    .field("description", &desc)
                    .render("body");
                let fm = parse(&out).frontmatter.unwrap();
                prop_assert_eq!(fm.get("name"), Some(name));
                prop_assert_eq!(fm.get("description"), Some(desc));
            }
        }
    }
}
