use crate::cli::{Cli, Commands, Kind};
use anyhow::{bail, Context, Result};
use assistkit_bundle::{Bundle, BundleGenerator};
use assistkit_convert::fs::write_private;
use assistkit_convert::hooks::Event;
use assistkit_convert::validation;
use assistkit_convert::{Adapter, Named, Registries, Registry};
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;

/// Parses the command line and runs it against the built-in adapters.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let registries = Registries::builtin();
    let stdout = io::stdout();
    execute(cli.command, &registries, &mut stdout.lock())
}

fn execute(command: Commands, registries: &Registries, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Convert {
            kind,
            from,
            to,
            input,
            output,
        } => {
            let data = convert(registries, kind, &from, &to, &input)?;
            match output {
                Some(path) => {
                    write_private(&path, &data)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(kind = kind.as_str(), %from, %to, output = %path.display(), "converted");
                }
                None => out.write_all(&data)?,
            }
        }
        Commands::Adapters { kind } => list_adapters(registries, kind, out)?,
        Commands::Events => print_events(out)?,
        Commands::Validate { bundle } => {
            let bundle = read_bundle(&bundle)?;
            bundle.validate()?;
            writeln!(out, "{} {} is valid", bundle.plugin.name, bundle.plugin.version)?;
        }
        Commands::Generate {
            bundle,
            tools,
            all,
            output_dir,
        } => {
            let bundle = read_bundle(&bundle)?;
            bundle.validate()?;
            let generator = BundleGenerator::new(registries);
            let written = if all || tools.is_empty() {
                generator.generate_all(&bundle, &output_dir)?
            } else {
                let mut written = Vec::new();
                for tool in &tools {
                    written.extend(generator.generate(&bundle, tool, &output_dir.join(tool))?);
                }
                written
            };
            for path in written {
                writeln!(out, "{}", path.display())?;
            }
        }
        Commands::Validators {
            specs,
            adapters,
            output_dir,
        } => {
            let areas = validation::read_canonical_dir(&specs)
                .with_context(|| format!("failed to read validation areas from {}", specs.display()))?;
            let registry = &registries.validation;
            let adapters = if adapters.is_empty() { registry.names() } else { adapters };
            for name in &adapters {
                let Some(adapter) = registry.get(name) else {
                    bail!("no validation adapter named '{name}' (known: {})", registry.names().join(", "));
                };
                for path in validation::write_areas(adapter.as_ref(), &areas, &output_dir.join(name))? {
                    writeln!(out, "{}", path.display())?;
                }
            }
            tracing::info!(areas = areas.len(), adapters = adapters.len(), "rendered validators");
        }
    }
    Ok(())
}

fn read_bundle(path: &Path) -> Result<Bundle> {
    Bundle::read_file(path).with_context(|| format!("failed to load bundle {}", path.display()))
}

fn convert(registries: &Registries, kind: Kind, from: &str, to: &str, input: &Path) -> Result<Vec<u8>> {
    match kind {
        Kind::Hooks => convert_bytes(&registries.hooks, from, to, input),
        Kind::Mcp => convert_bytes(&registries.mcp, from, to, input),
        Kind::Agents => convert_file(&registries.agents, kind, from, to, input),
        Kind::Skills => convert_file(&registries.skills, kind, from, to, input),
        Kind::Commands => convert_file(&registries.commands, kind, from, to, input),
        Kind::Validation => convert_file(&registries.validation, kind, from, to, input),
    }
}

fn convert_bytes<A>(registry: &Registry<A>, from: &str, to: &str, input: &Path) -> Result<Vec<u8>>
where
    A: ?Sized + Named + Adapter,
{
    let data = std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    registry
        .convert(&data, from, to)
        .with_context(|| format!("failed to convert {}", input.display()))
}

/// Reads through the source adapter's `read_file` so file-named artifacts
/// pick up their name from the path.
fn convert_file<A>(
    registry: &Registry<A>,
    kind: Kind,
    from: &str,
    to: &str,
    input: &Path,
) -> Result<Vec<u8>>
where
    A: ?Sized + Named + Adapter,
{
    let Some(source) = registry.get(from) else {
        bail!("no {} adapter named '{from}' (known: {})", kind.as_str(), registry.names().join(", "));
    };
    let Some(target) = registry.get(to) else {
        bail!("no {} adapter named '{to}' (known: {})", kind.as_str(), registry.names().join(", "));
    };
    let item = source.read_file(input)?;
    Ok(target.marshal(&item)?)
}

fn list_adapters(registries: &Registries, kind: Option<Kind>, out: &mut dyn Write) -> Result<()> {
    let rows: Vec<(&str, Vec<String>)> = vec![
        ("hooks", registries.hooks.names()),
        ("mcp", registries.mcp.names()),
        ("agents", registries.agents.names()),
        ("skills", registries.skills.names()),
        ("commands", registries.commands.names()),
        ("plugins", registries.plugins.names()),
        ("context", registries.context.names()),
        ("validation", registries.validation.names()),
    ];
    for (name, adapters) in rows {
        if kind.is_some_and(|k| k.as_str() != name) {
            continue;
        }
        writeln!(out, "{name}: {}", adapters.join(", "))?;
    }
    Ok(())
}

fn print_events(out: &mut dyn Write) -> Result<()> {
    let mark = |yes: bool| if yes { "yes" } else { "-" };
    writeln!(out, "{:<18} {:<6} {:<6} {:<6} {:<8}", "EVENT", "BLOCK", "CLAUDE", "CURSOR", "WINDSURF")?;
    for event in Event::ALL {
        let support = event.tool_support();
        writeln!(
            out,
            "{:<18} {:<6} {:<6} {:<6} {:<8}",
            event.as_str(),
            mark(event.can_block()),
            mark(support.claude),
            mark(support.cursor),
            mark(support.windsurf),
        )?;
    }
    Ok(())
}
