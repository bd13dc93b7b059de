//! Bundles: one canonical set of assistant artifacts generated into the
//! native layout of each supported tool.
//!
//! ```no_run
//! use assistkit_bundle::{Bundle, BundleGenerator};
//! use assistkit_convert::skills::Skill;
//! use assistkit_convert::Registries;
//! use std::path::Path;
//!
//! let mut bundle = Bundle::new("release-kit", "1.0.0", "Release helpers");
//! bundle.add_skill(Skill::new("changelog", "Writes changelog entries"));
//!
//! let registries = Registries::builtin();
//! let generator = BundleGenerator::new(&registries);
//! generator.generate_all(&bundle, Path::new("dist")).unwrap();
//! ```

#![deny(unsafe_code)]

mod bundle;
mod error;
mod generate;
mod tools;
mod validate;

pub use bundle::Bundle;
pub use error::{GenerateError, UnsupportedTool};
pub use generate::BundleGenerator;
pub use tools::{tool_config, ArtifactSink, ToolConfig, SUPPORTED_TOOLS, TOOL_CONFIGS};
pub use validate::{ValidationErrors, ValidationIssue};
