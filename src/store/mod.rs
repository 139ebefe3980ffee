// src/store/mod.rs
//! Hierarchical key/value configuration store
//!
//! The sensor logic only needs five capabilities from the operating system
//! store: open a key for reading, open-or-create a key for writing, list
//! child key names, and get/set named string values. Keys are handles that
//! release their underlying resource when dropped.

pub mod memory;

#[cfg(windows)]
pub mod registry;

use crate::error::Result;

pub use memory::MemoryStore;

#[cfg(windows)]
pub use registry::RegistryStore;

/// Separator between path segments, as used by the Windows registry
pub const PATH_SEPARATOR: char = '\\';

/// An open key in a configuration store
pub trait StoreKey {
    /// Names of the immediate child keys, in whatever order the store yields them
    fn subkey_names(&self) -> Result<Vec<String>>;

    /// Read a named string value, `None` when no value has that name
    fn get_string(&self, name: &str) -> Result<Option<String>>;

    /// Write a named string value, replacing any existing one
    fn set_string(&self, name: &str, value: &str) -> Result<()>;
}

/// A configuration store addressed by backslash separated paths
pub trait ConfigStore {
    type Key: StoreKey;

    /// Open an existing key for reading, `None` when it does not exist
    fn open(&self, path: &str) -> Result<Option<Self::Key>>;

    /// Open a key for writing, creating it if missing.
    ///
    /// Only the last path segment may be created; its parent must exist.
    fn create(&self, path: &str) -> Result<Self::Key>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    type Key = S::Key;

    fn open(&self, path: &str) -> Result<Option<Self::Key>> {
        (**self).open(path)
    }

    fn create(&self, path: &str) -> Result<Self::Key> {
        (**self).create(path)
    }
}

/// The operating system store holding sensor driver settings (`HKEY_LOCAL_MACHINE`)
#[cfg(windows)]
pub fn system_store() -> Result<RegistryStore> {
    Ok(RegistryStore::local_machine())
}

#[cfg(not(windows))]
pub fn system_store() -> Result<MemoryStore> {
    Err(crate::error::FakeGpsError::Other(
        "The sensor driver registry is only available on Windows".to_string(),
    ))
}

/// Join path segments with the store separator, skipping empty segments
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches(PATH_SEPARATOR))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string())
}

/// Split a path into its parent and last segment
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let path = path.trim_matches(PATH_SEPARATOR);
    path.rsplit_once(PATH_SEPARATOR)
}
