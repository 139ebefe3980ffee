// src/store/memory.rs
//! In-memory configuration store
//!
//! Mirrors the registry's observable behaviour: case-insensitive key paths
//! and value names, child keys listed in insertion order. Individual keys or
//! value writes can be made to fail so error paths can be exercised.

use super::{join_path, split_parent, ConfigStore, StoreKey, PATH_SEPARATOR};
use crate::error::{FakeGpsError, Result};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[derive(Debug, Default)]
struct Node {
    /// Child key names as inserted (original case)
    children: Vec<String>,
    /// Lowercase value name -> value
    values: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: HashMap<String, Node>,
    denied_keys: HashSet<String>,
    failing_values: HashSet<String>,
}

/// Shared in-memory store. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: Arc<RwLock<Tree>>,
}

/// Handle to a key of a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryKey {
    tree: Arc<RwLock<Tree>>,
    path: String,
}

fn normalize(path: &str) -> String {
    join_path(&[path]).to_lowercase()
}

fn read_tree(tree: &RwLock<Tree>) -> Result<RwLockReadGuard<'_, Tree>> {
    tree.read()
        .map_err(|_| FakeGpsError::Store("memory store lock poisoned".to_string()))
}

fn write_tree(tree: &RwLock<Tree>) -> Result<RwLockWriteGuard<'_, Tree>> {
    tree.write()
        .map_err(|_| FakeGpsError::Store("memory store lock poisoned".to_string()))
}

impl Tree {
    fn check_access(&self, key: &str) -> Result<()> {
        if self.denied_keys.contains(key) {
            return Err(FakeGpsError::Store(format!("access denied to key {}", key)));
        }
        Ok(())
    }

    fn insert_key(&mut self, path: &str) {
        let mut current = String::new();
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            let parent = current.clone();
            current = join_path(&[current.as_str(), segment]);
            let key = current.to_lowercase();

            if self.nodes.contains_key(&key) {
                continue;
            }
            self.nodes.insert(key, Node::default());
            if !parent.is_empty() {
                if let Some(node) = self.nodes.get_mut(&parent.to_lowercase()) {
                    node.children.push(segment.to_string());
                }
            }
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key and any missing ancestors
    pub fn insert_key(&self, path: &str) -> Result<()> {
        write_tree(&self.tree)?.insert_key(path);
        Ok(())
    }

    /// Create a key (and ancestors) and store a string value in it
    pub fn insert_value(&self, path: &str, name: &str, value: &str) -> Result<()> {
        let mut tree = write_tree(&self.tree)?;
        tree.insert_key(path);
        if let Some(node) = tree.nodes.get_mut(&normalize(path)) {
            node.values.insert(name.to_lowercase(), value.to_string());
        }
        Ok(())
    }

    /// Remove a key and everything below it
    pub fn remove_key(&self, path: &str) -> Result<()> {
        let mut tree = write_tree(&self.tree)?;
        let key = normalize(path);
        let prefix = format!("{}{}", key, PATH_SEPARATOR);
        tree.nodes.retain(|k, _| k != &key && !k.starts_with(&prefix));

        if let Some((parent, leaf)) = split_parent(path) {
            if let Some(node) = tree.nodes.get_mut(&normalize(parent)) {
                node.children.retain(|c| !c.eq_ignore_ascii_case(leaf));
            }
        }
        Ok(())
    }

    /// Read a value directly, bypassing access checks
    pub fn value(&self, path: &str, name: &str) -> Option<String> {
        let tree = read_tree(&self.tree).ok()?;
        tree.nodes
            .get(&normalize(path))
            .and_then(|node| node.values.get(&name.to_lowercase()).cloned())
    }

    pub fn contains_key(&self, path: &str) -> bool {
        read_tree(&self.tree)
            .map(|tree| tree.nodes.contains_key(&normalize(path)))
            .unwrap_or(false)
    }

    /// Make every open or create of this key fail with an access error
    pub fn deny_access(&self, path: &str) -> Result<()> {
        write_tree(&self.tree)?.denied_keys.insert(normalize(path));
        Ok(())
    }

    /// Make every write of the named value fail, in any key
    pub fn fail_writes_to(&self, name: &str) -> Result<()> {
        write_tree(&self.tree)?.failing_values.insert(name.to_lowercase());
        Ok(())
    }

    /// All keys and their values, ordered for comparison
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let Ok(tree) = read_tree(&self.tree) else {
            return BTreeMap::new();
        };
        tree.nodes
            .iter()
            .map(|(path, node)| {
                let values = node
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                (path.clone(), values)
            })
            .collect()
    }

    fn key(&self, path: String) -> MemoryKey {
        MemoryKey {
            tree: Arc::clone(&self.tree),
            path,
        }
    }
}

impl ConfigStore for MemoryStore {
    type Key = MemoryKey;

    fn open(&self, path: &str) -> Result<Option<MemoryKey>> {
        let key = normalize(path);
        let tree = read_tree(&self.tree)?;
        tree.check_access(&key)?;

        if tree.nodes.contains_key(&key) {
            Ok(Some(self.key(key)))
        } else {
            Ok(None)
        }
    }

    fn create(&self, path: &str) -> Result<MemoryKey> {
        let key = normalize(path);
        let mut tree = write_tree(&self.tree)?;
        tree.check_access(&key)?;

        if tree.nodes.contains_key(&key) {
            return Ok(self.key(key));
        }

        let (parent, leaf) = split_parent(path)
            .ok_or_else(|| FakeGpsError::Store(format!("cannot create top-level key {}", path)))?;
        let parent_key = normalize(parent);
        match tree.nodes.get_mut(&parent_key) {
            Some(node) => node.children.push(leaf.to_string()),
            None => {
                return Err(FakeGpsError::Store(format!(
                    "cannot create {}: parent key {} does not exist",
                    path, parent
                )))
            }
        }
        tree.nodes.insert(key.clone(), Node::default());
        Ok(self.key(key))
    }
}

impl MemoryKey {
    fn missing(&self) -> FakeGpsError {
        FakeGpsError::Store(format!("key {} has been deleted", self.path))
    }
}

impl StoreKey for MemoryKey {
    fn subkey_names(&self) -> Result<Vec<String>> {
        let tree = read_tree(&self.tree)?;
        let node = tree.nodes.get(&self.path).ok_or_else(|| self.missing())?;
        Ok(node.children.clone())
    }

    fn get_string(&self, name: &str) -> Result<Option<String>> {
        let tree = read_tree(&self.tree)?;
        let node = tree.nodes.get(&self.path).ok_or_else(|| self.missing())?;
        Ok(node.values.get(&name.to_lowercase()).cloned())
    }

    fn set_string(&self, name: &str, value: &str) -> Result<()> {
        let mut tree = write_tree(&self.tree)?;
        let name = name.to_lowercase();
        if tree.failing_values.contains(&name) {
            return Err(FakeGpsError::Store(format!(
                "write of value {} in {} failed",
                name, self.path
            )));
        }

        let path = self.path.clone();
        let node = tree
            .nodes
            .get_mut(&path)
            .ok_or_else(|| FakeGpsError::Store(format!("key {} has been deleted", path)))?;
        node.values.insert(name, value.to_string());
        Ok(())
    }
}
