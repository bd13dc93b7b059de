//! Markdown body shared by the validator artifacts.
//!
//! Every tool gets the same section headings; only the check listing and
//! the reporting section differ.

use super::{Check, CheckStatus, ValidationArea};
use std::fmt::Write;

const SIGN_OFF: &str = "Sign-Off Criteria";
const CHECKS: &str = "Validation Checks";
const DEPENDENCIES: &str = "Dependencies";
const INSTRUCTIONS: &str = "Instructions";
const REPORTING: &str = "Reporting Format";

/// How checks and the report template are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Layout {
    /// Markdown table; loses descriptions and file globs.
    Table,
    /// Bullet per check with indented command/pattern/files lines.
    Bullets,
    /// Numbered `###` subsection per check.
    Numbered,
}

pub(super) fn render(area: &ValidationArea, layout: Layout) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_body(&mut out, area, layout);
    out
}

fn write_body(out: &mut String, area: &ValidationArea, layout: Layout) -> std::fmt::Result {
    writeln!(out, "# {} Validator\n", area.title())?;
    if !area.description.trim().is_empty() {
        writeln!(out, "{}\n", area.description.trim())?;
    }
    if !area.sign_off_criteria.trim().is_empty() {
        writeln!(out, "## {SIGN_OFF}\n\n{}\n", area.sign_off_criteria.trim())?;
    }
    if !area.checks.is_empty() {
        writeln!(out, "## {CHECKS}\n")?;
        match layout {
            Layout::Table => write_table(out, &area.checks)?,
            Layout::Bullets => write_bullets(out, &area.checks)?,
            Layout::Numbered => write_numbered(out, &area.checks)?,
        }
    }
    if !area.dependencies.is_empty() {
        writeln!(out, "## {DEPENDENCIES}\n\nRequired CLI tools:\n")?;
        for dep in &area.dependencies {
            writeln!(out, "- `{dep}`")?;
        }
        out.push('\n');
    }
    if !area.instructions.trim().is_empty() {
        writeln!(out, "## {INSTRUCTIONS}\n\n{}\n", area.instructions.trim())?;
    }
    write_reporting(out, area, layout)
}

fn write_table(out: &mut String, checks: &[Check]) -> std::fmt::Result {
    writeln!(out, "| Check | Required | Command/Pattern |")?;
    writeln!(out, "|-------|----------|-----------------|")?;
    for check in checks {
        let level = if check.required { "Required" } else { "Warning" };
        let target = check
            .command
            .as_deref()
            .or(check.pattern.as_deref())
            .map(|c| format!("`{}`", escape_cell(c)))
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "| {} | {level} | {target} |", escape_cell(&check.name))?;
    }
    out.push('\n');
    Ok(())
}

fn write_bullets(out: &mut String, checks: &[Check]) -> std::fmt::Result {
    for check in checks {
        let level = if check.required { "required" } else { "optional" };
        write!(out, "- **{}** ({level})", check.name)?;
        if !check.description.is_empty() {
            write!(out, ": {}", check.description)?;
        }
        out.push('\n');
        if let Some(command) = &check.command {
            writeln!(out, "  Command: `{command}`")?;
        }
        if let Some(pattern) = &check.pattern {
            writeln!(out, "  Pattern: `{pattern}`")?;
        }
        if let Some(files) = &check.file_pattern {
            writeln!(out, "  Files: `{files}`")?;
        }
    }
    out.push('\n');
    Ok(())
}

fn write_numbered(out: &mut String, checks: &[Check]) -> std::fmt::Result {
    for (i, check) in checks.iter().enumerate() {
        let level = if check.required { "Required" } else { "Optional" };
        writeln!(out, "### {}. {} ({level})\n", i + 1, check.name)?;
        if !check.description.is_empty() {
            writeln!(out, "{}\n", check.description)?;
        }
        if let Some(command) = &check.command {
            writeln!(out, "**Command:**\n\n```bash\n{command}\n```\n")?;
        }
        if let Some(pattern) = &check.pattern {
            writeln!(out, "**Pattern to check:** `{pattern}`\n")?;
        }
        if let Some(files) = &check.file_pattern {
            writeln!(out, "**Files:** `{files}`\n")?;
        }
    }
    Ok(())
}

fn write_reporting(out: &mut String, area: &ValidationArea, layout: Layout) -> std::fmt::Result {
    let verdict = format!("{} VALIDATION", area.title().to_uppercase());
    writeln!(out, "## {REPORTING}\n")?;
    match layout {
        Layout::Table | Layout::Bullets => {
            writeln!(out, "Report every check with one of:\n")?;
            for status in CheckStatus::ALL {
                writeln!(out, "- {status}: {}", status.meaning())?;
            }
            write!(out, "\nFinal status: {verdict}: GO or NO-GO")?;
        }
        Layout::Numbered => {
            writeln!(out, "| Status | Meaning |\n|--------|---------|")?;
            for status in CheckStatus::ALL {
                writeln!(out, "| {status} | {} |", status.meaning())?;
            }
            writeln!(out, "\n### Final Report Template\n\n```")?;
            for check in &area.checks {
                writeln!(out, "- [ ] {}: [GO/NO-GO/WARN/SKIP]", check.name)?;
            }
            write!(out, "FINAL STATUS: {verdict} [GO/NO-GO]\n```")?;
        }
    }
    out.push('\n');
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Sections recovered from a rendered body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Parsed {
    pub description: String,
    pub sign_off_criteria: String,
    pub checks: Vec<Check>,
    pub dependencies: Vec<String>,
    pub instructions: String,
}

pub(super) fn parse(body: &str, layout: Layout) -> Parsed {
    let mut preamble = Vec::new();
    let mut sections: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut seen_title = false;

    for line in body.lines() {
        let in_instructions = sections.last().is_some_and(|(h, _)| *h == INSTRUCTIONS);
        if let Some(heading) = line.strip_prefix("## ") {
            // Instructions may carry their own headings.
            if !in_instructions || heading.trim() == REPORTING {
                sections.push((heading.trim(), Vec::new()));
                continue;
            }
        }
        match sections.last_mut() {
            Some((_, lines)) => lines.push(line),
            None if !seen_title && line.starts_with("# ") => seen_title = true,
            None => preamble.push(line),
        }
    }

    let section = |name: &str| {
        sections
            .iter()
            .find(|(h, _)| *h == name)
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or_default()
    };

    Parsed {
        description: preamble.join("\n").trim().to_string(),
        sign_off_criteria: section(SIGN_OFF).join("\n").trim().to_string(),
        checks: match layout {
            Layout::Table => parse_table(section(CHECKS)),
            Layout::Bullets => parse_bullets(section(CHECKS)),
            Layout::Numbered => parse_numbered(section(CHECKS)),
        },
        dependencies: section(DEPENDENCIES)
            .iter()
            .filter_map(|l| l.trim().strip_prefix("- "))
            .map(|d| unquote(d).to_string())
            .collect(),
        instructions: section(INSTRUCTIONS).join("\n").trim().to_string(),
    }
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text)
}

fn parse_table(lines: &[&str]) -> Vec<Check> {
    let mut checks = Vec::new();
    for line in lines {
        let Some(row) = line.trim().strip_prefix('|').and_then(|r| r.strip_suffix('|')) else {
            continue;
        };
        let row = row.replace("\\|", "\u{0}");
        let cells: Vec<String> = row.split('|').map(|c| c.trim().replace('\u{0}', "|")).collect();
        let [name, level, target] = cells.as_slice() else {
            continue;
        };
        if name == "Check" || name.starts_with('-') {
            continue;
        }
        let target = unquote(target);
        checks.push(Check {
            name: name.clone(),
            required: level.eq_ignore_ascii_case("required"),
            command: (target != "-" && !target.is_empty()).then(|| target.to_string()),
            ..Check::default()
        });
    }
    checks
}

fn parse_bullets(lines: &[&str]) -> Vec<Check> {
    let mut checks: Vec<Check> = Vec::new();
    for line in lines {
        if let Some(rest) = line.strip_prefix("- **") {
            let Some((name, rest)) = rest.split_once("**") else {
                continue;
            };
            let rest = rest.trim_start();
            let (required, rest) = if let Some(r) = rest.strip_prefix("(required)") {
                (true, r)
            } else {
                (false, rest.strip_prefix("(optional)").unwrap_or(rest))
            };
            checks.push(Check {
                name: name.to_string(),
                description: rest.trim_start_matches(':').trim().to_string(),
                required,
                ..Check::default()
            });
            continue;
        }
        let Some(check) = checks.last_mut() else {
            continue;
        };
        let detail = line.trim();
        if let Some(command) = detail.strip_prefix("Command:") {
            check.command = Some(unquote(command).to_string());
        } else if let Some(pattern) = detail.strip_prefix("Pattern:") {
            check.pattern = Some(unquote(pattern).to_string());
        } else if let Some(files) = detail.strip_prefix("Files:") {
            check.file_pattern = Some(unquote(files).to_string());
        }
    }
    checks
}

fn parse_numbered(lines: &[&str]) -> Vec<Check> {
    let mut checks: Vec<Check> = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    let mut in_command = false;

    for line in lines {
        if in_command {
            if line.trim_start().starts_with("```") {
                in_command = false;
            } else if let Some(check) = checks.last_mut() {
                let command = check.command.get_or_insert_with(String::new);
                if !command.is_empty() {
                    command.push('\n');
                }
                command.push_str(line);
            }
            continue;
        }
        if let Some(heading) = line.strip_prefix("### ") {
            finish(&mut checks, &mut description);
            let heading = heading
                .split_once(". ")
                .filter(|(n, _)| n.chars().all(|c| c.is_ascii_digit()))
                .map_or(heading, |(_, rest)| rest)
                .trim();
            let (name, required) = if let Some(name) = heading.strip_suffix("(Required)") {
                (name, true)
            } else {
                (heading.strip_suffix("(Optional)").unwrap_or(heading), false)
            };
            checks.push(Check {
                name: name.trim().to_string(),
                required,
                ..Check::default()
            });
            continue;
        }
        let Some(check) = checks.last_mut() else {
            continue;
        };
        let detail = line.trim();
        if detail == "**Command:**" || detail.starts_with("```") {
            in_command = detail.starts_with("```");
        } else if let Some(pattern) = detail.strip_prefix("**Pattern to check:**") {
            check.pattern = Some(unquote(pattern).to_string());
        } else if let Some(files) = detail.strip_prefix("**Files:**") {
            check.file_pattern = Some(unquote(files).to_string());
        } else {
            description.push(line);
        }
    }
    finish(&mut checks, &mut description);
    checks
}

fn finish(checks: &mut [Check], description: &mut Vec<&str>) {
    if let Some(check) = checks.last_mut() {
        check.description = description.join("\n").trim().to_string();
    }
    description.clear();
}
