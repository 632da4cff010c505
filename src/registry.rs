//! Per-document deduplication of embedded assets by caller-chosen key
//!
//! The first payload registered under a key wins. Later lookups with the same key
//! return the stored handle and never look at the new payload.

use crate::document::{AssetHandle, DocumentModel};
use crate::error::Result;
use crate::resource::ImageFormat;
use std::collections::HashMap;
use std::io;
use tracing::{debug, trace};

/// What a registry stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    File,
}

/// Append-only map from key to stored asset
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    kind: AssetKind,
    handles: HashMap<String, AssetHandle>,
}

impl ResourceRegistry {
    /// Empty registry for one kind of asset
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            handles: HashMap::new(),
        }
    }

    /// Kind of asset stored here
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Handle stored for `key`, if any
    pub fn get(&self, key: &str) -> Option<AssetHandle> {
        self.handles.get(key).copied()
    }

    /// Whether `key` was registered
    pub fn contains(&self, key: &str) -> bool {
        self.handles.contains_key(key)
    }

    /// Registered keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing was registered yet
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Return the handle stored for `key`, calling `register` only when the key is new
    pub fn resolve<F>(&mut self, key: &str, register: F) -> Result<AssetHandle>
    where
        F: FnOnce() -> io::Result<AssetHandle>,
    {
        if let Some(handle) = self.get(key) {
            trace!("Reusing {:?} asset '{}' as {:?}", self.kind, key, handle);
            return Ok(handle);
        }

        let handle = register()?;
        debug!("Registered {:?} asset '{}' as {:?}", self.kind, key, handle);
        self.handles.insert(key.to_string(), handle);
        Ok(handle)
    }

    /// Resolve a picture through the document's binary asset store
    pub fn resolve_image<D: DocumentModel>(
        &mut self,
        doc: &mut D,
        key: &str,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<AssetHandle> {
        self.resolve(key, || doc.register_binary_asset(bytes, format))
    }

    /// Resolve a file through the document's object package store
    pub fn resolve_file<D: DocumentModel>(
        &mut self,
        doc: &mut D,
        key: &str,
        bytes: &[u8],
        display_name: &str,
    ) -> Result<AssetHandle> {
        self.resolve(key, || doc.register_object_package(bytes, display_name))
    }
}
