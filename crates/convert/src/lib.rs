//! Canonical models for AI-assistant configuration and the adapters that
//! convert them to and from each tool's native files.
//!
//! Every artifact kind (hooks, agents, skills, commands, MCP servers, plugin
//! manifests, project context, release validators) has a canonical type and
//! a [`Registry`] of per-tool adapters. [`Registries::builtin`] wires up
//! everything shipped with the crate.
//!
//! ```
//! use assistkit_convert::Registries;
//!
//! let registries = Registries::builtin();
//! let cursor = br#"{"version": 1, "hooks": {"stop": [{"command": "notify.sh"}]}}"#;
//! let claude = registries.hooks.convert(cursor, "cursor", "claude").unwrap();
//! assert!(String::from_utf8(claude).unwrap().contains("\"Stop\""));
//! ```

#![deny(unsafe_code)]

pub mod adapter;
pub mod agents;
mod builtin;
pub mod commands;
pub mod context;
pub mod error;
pub mod fs;
pub mod hooks;
pub mod mcp;
pub mod names;
pub mod plugins;
pub mod registry;
pub mod skills;
pub mod validation;

pub use adapter::{Adapter, CollectionAdapter};
pub use builtin::Registries;
pub use error::{
    ConversionError, ConversionFailure, Error, HookError, HookValidationError, MarshalError,
    ParseError, Result, WriteError,
};
pub use registry::{Named, Registry};
