//! Writes a [`Bundle`] into each tool's native layout.

use crate::error::{BoxError, GenerateError, UnsupportedTool};
use crate::tools::{tool_config, ArtifactSink, ToolConfig, SUPPORTED_TOOLS};
use crate::Bundle;
use assistkit_convert::fs::{create_private_dir, write_private};
use assistkit_convert::mcp::McpConfig;
use assistkit_convert::{Adapter, CollectionAdapter, Registries, Registry};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Routes each part of a bundle to the adapter registered for a tool.
///
/// Components the tool does not support, or that have no registered
/// adapter, are skipped. The first write failure aborts the tool; files
/// already written are left in place.
#[derive(Debug, Clone, Copy)]
pub struct BundleGenerator<'r> {
    registries: &'r Registries,
}

impl<'r> BundleGenerator<'r> {
    pub fn new(registries: &'r Registries) -> Self {
        Self { registries }
    }

    /// Generates `bundle` for `tool` into `output_dir`, returning the written files.
    pub fn generate(
        &self,
        bundle: &Bundle,
        tool: &str,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let config = tool_config(tool)
            .ok_or_else(|| GenerateError::new(tool, None, UnsupportedTool(tool.to_string())))?;
        create_private_dir(output_dir).map_err(|e| GenerateError::new(tool, None, e))?;

        let mut written = Vec::new();
        self.generate_plugin(bundle, config, output_dir, &mut written)?;
        write_collection(
            config,
            "skill",
            &bundle.skills,
            config.skills,
            &self.registries.skills,
            |s| &s.name,
            output_dir,
            &mut written,
        )?;
        write_collection(
            config,
            "command",
            &bundle.commands,
            config.commands,
            &self.registries.commands,
            |c| &c.name,
            output_dir,
            &mut written,
        )?;
        if bundle.hooks.has_hooks() {
            write_single(
                config,
                "hooks",
                &bundle.hooks,
                config.hooks,
                &self.registries.hooks,
                output_dir,
                &mut written,
            )?;
        }
        write_collection(
            config,
            "agent",
            &bundle.agents,
            config.agents,
            &self.registries.agents,
            |a| &a.name,
            output_dir,
            &mut written,
        )?;
        if !bundle.mcp.is_empty() {
            write_single(
                config,
                "mcp",
                &bundle.mcp,
                config.mcp,
                &self.registries.mcp,
                output_dir,
                &mut written,
            )?;
        }
        self.generate_context(bundle, config, output_dir, &mut written)?;

        info!(tool, files = written.len(), dir = %output_dir.display(), "generated bundle");
        Ok(written)
    }

    /// Generates every supported tool into `<output_dir>/<tool>`.
    pub fn generate_all(&self, bundle: &Bundle, output_dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
        let mut written = Vec::new();
        for tool in SUPPORTED_TOOLS {
            written.extend(self.generate(bundle, tool, &output_dir.join(tool))?);
        }
        Ok(written)
    }

    fn generate_plugin(
        &self,
        bundle: &Bundle,
        config: &ToolConfig,
        output_dir: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let Some(location) = config.plugin else {
            return Ok(());
        };
        let Some(adapter) = self.registries.plugins.get(config.name) else {
            debug!(tool = config.name, component = "plugin", "no adapter registered, skipping");
            return Ok(());
        };

        let mut plugin = bundle.plugin.clone();
        let component_dir = |dir: Option<&str>, present: bool| {
            dir.filter(|_| present).map(|d| format!("./{d}/"))
        };
        plugin.skills = component_dir(config.skills, !bundle.skills.is_empty()).or(plugin.skills);
        plugin.commands = component_dir(config.commands, !bundle.commands.is_empty()).or(plugin.commands);
        plugin.agents = component_dir(config.agents, !bundle.agents.is_empty()).or(plugin.agents);

        // Bundle servers replace same-named servers declared on the plugin.
        let mut servers = McpConfig {
            servers: plugin.mcp_servers.clone(),
        };
        servers.merge(&bundle.mcp);

        let data = match config.sink {
            ArtifactSink::SeparateFiles => {
                if config.mcp.is_none() {
                    plugin.mcp_servers = servers.servers;
                }
                if let Some(hooks) = config.hooks.filter(|_| bundle.hooks.has_hooks()) {
                    plugin.hooks = Some(format!("./{hooks}"));
                }
                adapter.marshal(&plugin).map_err(|e| failure(config.name, "plugin", e))?
            }
            ArtifactSink::Inline { hooks_key, mcp_key } => {
                let manifest = adapter
                    .marshal(&plugin)
                    .map_err(|e| failure(config.name, "plugin", e))?;
                let mut manifest: Value = serde_json::from_slice(&manifest)
                    .map_err(|e| failure(config.name, "plugin", e))?;
                let Some(object) = manifest.as_object_mut() else {
                    return Err(failure(config.name, "plugin", "plugin manifest is not a JSON object"));
                };
                if bundle.hooks.has_hooks() {
                    let hooks = project(config, "hooks", &bundle.hooks, &self.registries.hooks, hooks_key)?;
                    if let Some(hooks) = hooks {
                        object.insert(hooks_key.to_string(), hooks);
                    }
                }
                if !servers.is_empty() {
                    let servers = project(config, "mcp", &servers, &self.registries.mcp, mcp_key)?;
                    if let Some(servers) = servers {
                        object.insert(mcp_key.to_string(), servers);
                    }
                }
                serde_json::to_vec_pretty(&manifest).map_err(|e| failure(config.name, "plugin", e))?
            }
        };

        let path = output_dir.join(location);
        write_private(&path, &data).map_err(|e| failure(config.name, "plugin", e))?;
        written.push(path);
        Ok(())
    }

    fn generate_context(
        &self,
        bundle: &Bundle,
        config: &ToolConfig,
        output_dir: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerateError> {
        let (Some(ctx), Some(location)) = (&bundle.context, config.context) else {
            return Ok(());
        };
        let Some(renderer) = self.registries.context.get(config.name) else {
            debug!(tool = config.name, component = "context", "no renderer registered, skipping");
            return Ok(());
        };
        let path = output_dir.join(location);
        renderer
            .write_file(ctx, &path)
            .map_err(|e| failure(config.name, "context", e))?;
        written.push(path);
        Ok(())
    }
}

fn failure(tool: &str, component: &str, source: impl Into<BoxError>) -> GenerateError {
    GenerateError::new(tool, Some(component.to_string()), source)
}

/// Marshals `item` with the tool's adapter and takes `key` from the resulting object.
fn project<T: 'static>(
    config: &ToolConfig,
    component: &str,
    item: &T,
    registry: &Registry<dyn Adapter<Item = T>>,
    key: &str,
) -> Result<Option<Value>, GenerateError> {
    let Some(adapter) = registry.get(config.name) else {
        debug!(tool = config.name, component, "no adapter registered, not embedding");
        return Ok(None);
    };
    let data = adapter.marshal(item).map_err(|e| failure(config.name, component, e))?;
    let mut value: Value =
        serde_json::from_slice(&data).map_err(|e| failure(config.name, component, e))?;
    let embedded = value
        .as_object_mut()
        .and_then(|o| o.remove(key))
        .filter(|v| v.as_object().map_or(true, |o| !o.is_empty()));
    Ok(embedded)
}

#[allow(clippy::too_many_arguments)]
fn write_collection<T: 'static>(
    config: &ToolConfig,
    kind: &str,
    items: &[T],
    location: Option<&str>,
    registry: &Registry<dyn CollectionAdapter<Item = T>>,
    item_name: impl Fn(&T) -> &str,
    output_dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<(), GenerateError> {
    if items.is_empty() {
        return Ok(());
    }
    let Some(location) = location else {
        debug!(tool = config.name, component = kind, "tool does not support component, skipping");
        return Ok(());
    };
    let Some(adapter) = registry.get(config.name) else {
        debug!(tool = config.name, component = kind, "no adapter registered, skipping");
        return Ok(());
    };
    let dir = output_dir.join(location);
    create_private_dir(&dir).map_err(|e| GenerateError::new(config.name, Some(format!("{kind}s")), e))?;
    for item in items {
        let path = adapter.write_into(item, &dir).map_err(|e| {
            GenerateError::new(config.name, Some(format!("{kind}:{}", item_name(item))), e)
        })?;
        written.push(path);
    }
    Ok(())
}

fn write_single<T: 'static>(
    config: &ToolConfig,
    component: &str,
    item: &T,
    location: Option<&str>,
    registry: &Registry<dyn Adapter<Item = T>>,
    output_dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<(), GenerateError> {
    let Some(location) = location else {
        debug!(tool = config.name, component, "no separate file for component, skipping");
        return Ok(());
    };
    let Some(adapter) = registry.get(config.name) else {
        debug!(tool = config.name, component, "no adapter registered, skipping");
        return Ok(());
    };
    let path = output_dir.join(location);
    adapter
        .write_file(item, &path)
        .map_err(|e| failure(config.name, component, e))?;
    written.push(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistkit_convert::hooks::{Config, Event, Hook};
    use assistkit_convert::mcp::McpServer;
    use assistkit_convert::skills::Skill;

    #[test]
    fn unknown_tool_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let registries = Registries::builtin();
        let out = dir.path().join("out");
        let err = BundleGenerator::new(&registries)
            .generate(&Bundle::new("kit", "1.0.0", ""), "emacs", &out)
            .unwrap_err();
        assert_eq!(err.tool, "emacs");
        assert!(err.component.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn missing_adapters_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let registries = Registries::empty();
        let mut bundle = Bundle::new("kit", "1.0.0", "");
        bundle.add_skill(Skill::new("notes", "Takes notes"));
        let mut hooks = Config::new();
        hooks.add(Event::BeforeCommand, Hook::command("guard.sh"));
        bundle.set_hooks(hooks);

        let written = BundleGenerator::new(&registries)
            .generate(&bundle, "claude", dir.path())
            .unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn gemini_manifest_embeds_mcp_servers() {
        let dir = tempfile::tempdir().unwrap();
        let registries = Registries::builtin();
        let mut bundle = Bundle::new("kit", "1.0.0", "Kit");
        bundle.add_mcp_server("fs", McpServer::stdio("mcp-fs", ["."]));

        BundleGenerator::new(&registries)
            .generate(&bundle, "gemini", dir.path())
            .unwrap();
        let manifest: Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("gemini-extension.json")).unwrap()).unwrap();
        assert_eq!(manifest["mcpServers"]["fs"]["command"], "mcp-fs");
    }

    #[test]
    fn project_drops_empty_objects() {
        let registries = Registries::builtin();
        let config = tool_config("claude").unwrap();
        let mut hooks = Config::new();
        // No claude counterpart, so the projected map is empty.
        hooks.add(Event::AfterTabEdit, Hook::command("tab.sh"));
        let projected = project(config, "hooks", &hooks, &registries.hooks, "hooks").unwrap();
        assert_eq!(projected, None);
    }
}
