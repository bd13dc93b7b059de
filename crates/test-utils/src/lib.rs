//! Shared test utilities for assistkit crates.
//!
//! Provides a temporary home directory fixture, environment guards for
//! tests that touch `HOME`, and native configuration samples for each
//! supported tool.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use walkdir::WalkDir;

pub mod samples;

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = assistkit_test_utils::set_env_var("ASSISTKIT_DOC_VAR", Some("value"));
/// assert_eq!(std::env::var("ASSISTKIT_DOC_VAR").unwrap(), "value");
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    match value {
        Some(val) => std::env::set_var(key, val),
        None => std::env::remove_var(key),
    }
    EnvVarGuard { key, previous }
}

/// A temporary home directory with the per-tool config directories created.
///
/// The tempdir is removed when the fixture drops.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// `$HOME/.claude`
    pub claude_dir: PathBuf,
    /// `$HOME/.cursor`
    pub cursor_dir: PathBuf,
    /// `$HOME/.codeium/windsurf`
    pub windsurf_dir: PathBuf,
}

impl TestFixture {
    /// Does NOT set HOME - use `home_guard()` for that.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let claude_dir = tempdir.path().join(".claude");
        let cursor_dir = tempdir.path().join(".cursor");
        let windsurf_dir = tempdir.path().join(".codeium/windsurf");

        for dir in [&claude_dir, &cursor_dir, &windsurf_dir] {
            std::fs::create_dir_all(dir)?;
        }

        Ok(Self {
            tempdir,
            claude_dir,
            cursor_dir,
            windsurf_dir,
        })
    }

    /// Get the path that should be set as HOME.
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Create an RAII guard that sets HOME to this fixture's temp directory.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.home_path().to_string_lossy()))
    }

    /// Write `content` to `relative` under the fixture root, creating parents.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> std::io::Result<PathBuf> {
        let path = self.home_path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Relative paths of every regular file below `root`, sorted.
pub fn list_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
