//! Composition root for the built-in adapters.

use crate::{agents, commands, context, hooks, mcp, plugins, skills, validation};

/// One registry per artifact kind, each holding the built-in adapters.
///
/// Callers that need extra adapters register them on the relevant field.
#[derive(Debug)]
pub struct Registries {
    pub hooks: hooks::HookRegistry,
    pub agents: agents::AgentRegistry,
    pub skills: skills::SkillRegistry,
    pub commands: commands::CommandRegistry,
    pub mcp: mcp::McpRegistry,
    pub plugins: plugins::PluginRegistry,
    pub context: context::ContextRegistry,
    pub validation: validation::ValidationRegistry,
}

impl Registries {
    pub fn builtin() -> Self {
        Self {
            hooks: hooks::builtin_registry(),
            agents: agents::builtin_registry(),
            skills: skills::builtin_registry(),
            commands: commands::builtin_registry(),
            mcp: mcp::builtin_registry(),
            plugins: plugins::builtin_registry(),
            context: context::builtin_registry(),
            validation: validation::builtin_registry(),
        }
    }

    /// Empty registries, for callers that register everything themselves.
    pub fn empty() -> Self {
        Self {
            hooks: Default::default(),
            agents: Default::default(),
            skills: Default::default(),
            commands: Default::default(),
            mcp: Default::default(),
            plugins: Default::default(),
            context: Default::default(),
            validation: Default::default(),
        }
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::builtin()
    }
}
