//! Trait definitions for format adapters.

use crate::error::{MarshalError, ParseError, WriteError};
use crate::fs::write_private;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Converts between a tool's native bytes and a canonical value.
///
/// `read_file` and `write_file` wrap `parse` and `marshal` with file I/O.
/// Read failures surface as [`ParseError`] carrying the path; write
/// failures as [`WriteError`] carrying path and format.
#[cfg_attr(test, automock(type Item = crate::hooks::Config;))]
pub trait Adapter: Send + Sync {
    /// Canonical value this adapter produces and consumes.
    type Item;

    /// Tool identifier (e.g. "claude", "cursor").
    fn name(&self) -> &str;

    /// Decode native bytes.
    fn parse(&self, data: &[u8]) -> Result<Self::Item, ParseError>;

    /// Encode a canonical value as native bytes.
    fn marshal(&self, item: &Self::Item) -> Result<Vec<u8>, MarshalError>;

    fn read_file(&self, path: &Path) -> Result<Self::Item, ParseError> {
        let data = std::fs::read(path).map_err(|e| ParseError::new(self.name(), e).with_path(path))?;
        self.parse(&data).map_err(|e| e.with_path(path))
    }

    fn write_file(&self, item: &Self::Item, path: &Path) -> Result<(), WriteError> {
        let data = self
            .marshal(item)
            .map_err(|e| WriteError::new(path, e).with_format(self.name()))?;
        write_private(path, &data).map_err(|e| WriteError::new(path, e).with_format(self.name()))
    }
}

/// Adapter for artifacts stored one file (or directory) per item.
pub trait CollectionAdapter: Adapter {
    /// Location of `item` relative to the collection directory.
    fn relative_path(&self, item: &Self::Item) -> PathBuf;

    /// Write `item` below `dir`, returning the written path.
    fn write_into(&self, item: &Self::Item, dir: &Path) -> Result<PathBuf, WriteError> {
        let path = dir.join(self.relative_path(item));
        self.write_file(item, &path)?;
        Ok(path)
    }
}

/// Infers an artifact name from a file path when its header omits one.
///
/// `SKILL.md` files take their parent directory name.
pub(crate) fn name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.eq_ignore_ascii_case("skill") {
        return path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(String::from);
    }
    Some(stem.to_string())
}

/// Read helper for markdown collections: fills in a missing name from the path.
pub(crate) fn read_named<A, T>(
    adapter: &A,
    path: &Path,
    set_name: impl FnOnce(&mut T, String),
    has_name: impl FnOnce(&T) -> bool,
) -> Result<T, ParseError>
where
    A: Adapter<Item = T> + ?Sized,
{
    let data = std::fs::read(path).map_err(|e| ParseError::new(adapter.name(), e).with_path(path))?;
    let mut item = adapter.parse(&data).map_err(|e| e.with_path(path))?;
    if !has_name(&item) {
        if let Some(name) = name_from_path(path) {
            set_name(&mut item, name);
        }
    }
    Ok(item)
}
