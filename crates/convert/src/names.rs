//! Artifact name checks and file-name sanitizing.

use regex::Regex;
use std::sync::LazyLock;

static KEBAB_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// True for lowercase kebab-case names like `code-reviewer`.
pub fn is_kebab_case(name: &str) -> bool {
    KEBAB_CASE.is_match(name)
}

/// Strips path separators and traversal sequences so a name can be used as a file stem.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.replace("..", "");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c == '-' || c.is_whitespace());
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `code-reviewer` becomes `Code Reviewer`.
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case() {
        assert!(is_kebab_case("code-reviewer"));
        assert!(is_kebab_case("v2"));
        assert!(!is_kebab_case("Code-Reviewer"));
        assert!(!is_kebab_case("trailing-"));
        assert!(!is_kebab_case("double--dash"));
        assert!(!is_kebab_case(""));
    }

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_name("../../etc/passwd"), "etc-passwd");
        assert_eq!(sanitize_name("plain"), "plain");
        assert_eq!(sanitize_name("a/b"), "a-b");
        assert_eq!(sanitize_name("..."), "unnamed");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("code-reviewer"), "Code Reviewer");
        assert_eq!(title_case("pdf_tools"), "Pdf Tools");
        assert_eq!(title_case(""), "");
    }
}
