use super::{Context, ContextError, ContextRenderer, Severity};
use crate::error::MarshalError;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Architecture,
    Packages,
    Commands,
    Conventions,
    Notes,
}

/// Commands listed first, in this order; the rest follow alphabetically.
const COMMAND_ORDER: [&str; 5] = ["build", "test", "lint", "format", "run"];

#[derive(Debug, Clone, Copy)]
pub struct MarkdownContextRenderer {
    name: &'static str,
    output_file: &'static str,
    sections: &'static [Section],
    conventions_heading: &'static str,
    footer: bool,
}

impl MarkdownContextRenderer {
    pub fn claude() -> Self {
        Self {
            name: "claude",
            output_file: "CLAUDE.md",
            sections: &[
                Section::Architecture,
                Section::Packages,
                Section::Commands,
                Section::Conventions,
                Section::Notes,
            ],
            conventions_heading: "Conventions",
            footer: true,
        }
    }

    /// `AGENTS.md` leads with the commands an agent needs to build and test.
    pub fn codex() -> Self {
        Self {
            name: "codex",
            output_file: "AGENTS.md",
            sections: &[
                Section::Commands,
                Section::Conventions,
                Section::Architecture,
                Section::Packages,
                Section::Notes,
            ],
            conventions_heading: "Conventions",
            footer: true,
        }
    }

    /// `.cursorrules` leads with conventions, phrased as rules.
    pub fn cursor() -> Self {
        Self {
            name: "cursor",
            output_file: ".cursorrules",
            sections: &[
                Section::Conventions,
                Section::Commands,
                Section::Architecture,
                Section::Packages,
                Section::Notes,
            ],
            conventions_heading: "Rules",
            footer: false,
        }
    }

    fn write_section(&self, out: &mut String, section: Section, ctx: &Context) -> std::fmt::Result {
        match section {
            Section::Architecture => {
                let Some(arch) = &ctx.architecture else {
                    return Ok(());
                };
                out.push_str("## Architecture\n\n");
                if !arch.pattern.is_empty() {
                    writeln!(out, "**Pattern:** {}\n", arch.pattern)?;
                }
                if !arch.summary.is_empty() {
                    writeln!(out, "{}\n", arch.summary)?;
                }
                for diagram in &arch.diagrams {
                    if !diagram.title.is_empty() {
                        writeln!(out, "### {}\n", diagram.title)?;
                    }
                    writeln!(out, "```{}\n{}\n```\n", diagram.kind, diagram.content.trim_end())?;
                }
            }
            Section::Packages if !ctx.packages.is_empty() => {
                out.push_str("## Packages\n\n| Package | Purpose |\n|---------|---------|\n");
                for pkg in &ctx.packages {
                    writeln!(out, "| `{}` | {} |", pkg.path, pkg.purpose)?;
                }
                out.push('\n');
            }
            Section::Commands if !ctx.commands.is_empty() => {
                out.push_str("## Commands\n\n```bash\n");
                let ordered = COMMAND_ORDER
                    .iter()
                    .filter_map(|key| ctx.commands.get_key_value(*key));
                let rest = ctx
                    .commands
                    .iter()
                    .filter(|(key, _)| !COMMAND_ORDER.contains(&key.as_str()));
                for (key, command) in ordered.chain(rest) {
                    writeln!(out, "# {key}\n{command}\n")?;
                }
                out.push_str("```\n\n");
            }
            Section::Conventions if !ctx.conventions.is_empty() => {
                writeln!(out, "## {}\n", self.conventions_heading)?;
                for convention in &ctx.conventions {
                    writeln!(out, "- {convention}")?;
                }
                out.push('\n');
            }
            Section::Notes if !ctx.notes.is_empty() => {
                out.push_str("## Notes\n\n");
                for note in &ctx.notes {
                    let prefix = match note.severity {
                        Severity::Info => "",
                        Severity::Warning => "**Warning:** ",
                        Severity::Critical => "**CRITICAL:** ",
                    };
                    if note.title.is_empty() {
                        writeln!(out, "- {prefix}{}", note.content)?;
                    } else {
                        writeln!(out, "### {}\n\n{prefix}{}\n", note.title, note.content)?;
                    }
                }
                out.push('\n');
            }
            Section::Packages | Section::Commands | Section::Conventions | Section::Notes => {}
        }
        Ok(())
    }

    fn render_text(&self, ctx: &Context) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "# {}\n", ctx.name)?;
        if !ctx.description.is_empty() {
            writeln!(out, "{}\n", ctx.description)?;
        }
        match (ctx.version.is_empty(), ctx.language.is_empty()) {
            (false, false) => writeln!(
                out,
                "**Version:** {} | **Language:** {}\n",
                ctx.version, ctx.language
            )?,
            (false, true) => writeln!(out, "**Version:** {}\n", ctx.version)?,
            (true, false) => writeln!(out, "**Language:** {}\n", ctx.language)?,
            (true, true) => {}
        }
        for section in self.sections {
            self.write_section(&mut out, *section, ctx)?;
        }
        if self.footer {
            out.push_str("---\n*Generated from CONTEXT.json*\n");
        } else {
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
            out.push('\n');
        }
        Ok(out)
    }
}

impl ContextRenderer for MarkdownContextRenderer {
    fn name(&self) -> &str {
        self.name
    }

    fn output_file(&self) -> &str {
        self.output_file
    }

    fn render(&self, ctx: &Context) -> Result<Vec<u8>, MarshalError> {
        if ctx.name.trim().is_empty() {
            return Err(MarshalError::new(self.name, ContextError::MissingName));
        }
        self.render_text(ctx)
            .map(String::into_bytes)
            .map_err(|e| MarshalError::new(self.name, e))
    }
}
