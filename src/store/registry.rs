// src/store/registry.rs
//! Windows Registry backend

#[cfg(windows)]
use {
    super::{split_parent, ConfigStore, StoreKey},
    crate::error::{FakeGpsError, Result},
    std::io,
    winreg::{
        enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_CREATE_SUB_KEY, KEY_READ, KEY_WRITE},
        RegKey,
    },
};

/// Registry hive used as the root of every path
#[cfg(windows)]
pub struct RegistryStore {
    hive: RegKey,
}

/// An open registry key, closed when dropped
#[cfg(windows)]
pub struct RegistryKey {
    key: RegKey,
    path: String,
}

#[cfg(windows)]
fn store_error(action: &str, path: &str, error: io::Error) -> FakeGpsError {
    FakeGpsError::Store(format!("Failed to {} {}: {}", action, path, error))
}

#[cfg(windows)]
impl RegistryStore {
    /// `HKEY_LOCAL_MACHINE`, where sensor drivers keep their parameters
    pub fn local_machine() -> Self {
        Self {
            hive: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }

    /// `HKEY_CURRENT_USER`, used for application settings
    pub fn current_user() -> Self {
        Self {
            hive: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

#[cfg(windows)]
impl ConfigStore for RegistryStore {
    type Key = RegistryKey;

    fn open(&self, path: &str) -> Result<Option<RegistryKey>> {
        match self.hive.open_subkey_with_flags(path, KEY_READ) {
            Ok(key) => Ok(Some(RegistryKey {
                key,
                path: path.to_string(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error("open registry key", path, e)),
        }
    }

    fn create(&self, path: &str) -> Result<RegistryKey> {
        let (parent_path, leaf) = split_parent(path).ok_or_else(|| {
            FakeGpsError::Store(format!("Cannot create top-level registry key {}", path))
        })?;

        // The parent must already exist; only the leaf may be created
        let parent = self
            .hive
            .open_subkey_with_flags(parent_path, KEY_CREATE_SUB_KEY)
            .map_err(|e| store_error("open registry key", parent_path, e))?;

        let (key, _disposition) = parent
            .create_subkey_with_flags(leaf, KEY_READ | KEY_WRITE)
            .map_err(|e| store_error("create registry key", path, e))?;

        Ok(RegistryKey {
            key,
            path: path.to_string(),
        })
    }
}

#[cfg(windows)]
impl StoreKey for RegistryKey {
    fn subkey_names(&self) -> Result<Vec<String>> {
        self.key
            .enum_keys()
            .collect::<io::Result<Vec<String>>>()
            .map_err(|e| store_error("enumerate registry key", &self.path, e))
    }

    fn get_string(&self, name: &str) -> Result<Option<String>> {
        match self.key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(&format!("read {} from", name), &self.path, e)),
        }
    }

    fn set_string(&self, name: &str, value: &str) -> Result<()> {
        self.key
            .set_value(name, &value.to_string())
            .map_err(|e| store_error(&format!("write {} to", name), &self.path, e))
    }
}
