//! Model resource access behind a trait, so hosts choose the transport.
//!
//! The registry hands out relative asset paths; a [`ModelSource`] turns
//! them into meshes. The terminal host reads from disk, the web host
//! pushes fetched bytes into a [`MemoryModelSource`].

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ModelError;
use crate::geometry::Mesh;
use crate::obj::parse_obj;

pub trait ModelSource {
    fn load(&self, path: &str) -> Result<Mesh, ModelError>;
}

/// Reads `.obj` assets relative to an asset root on disk.
pub struct FsModelSource {
    root: PathBuf,
}

impl FsModelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ModelSource for FsModelSource {
    fn load(&self, path: &str) -> Result<Mesh, ModelError> {
        let full = self.root.join(path);
        let is_obj = full
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if !is_obj {
            return Err(ModelError::UnsupportedFormat { path: full });
        }
        let text = std::fs::read_to_string(&full).map_err(|source| ModelError::Io {
            path: full.clone(),
            source,
        })?;
        parse_obj(&text).map_err(|err| ModelError::Parse {
            path: full,
            detail: err.to_string(),
        })
    }
}

/// Holds OBJ text by registry path. Web hosts fill it from fetches;
/// tests fill it inline.
#[derive(Debug, Default)]
pub struct MemoryModelSource {
    entries: HashMap<String, String>,
}

impl MemoryModelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, obj_text: impl Into<String>) {
        self.entries.insert(path.into(), obj_text.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}

impl ModelSource for MemoryModelSource {
    fn load(&self, path: &str) -> Result<Mesh, ModelError> {
        let text = self.entries.get(path).ok_or_else(|| ModelError::Io {
            path: PathBuf::from(path),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        parse_obj(text).map_err(|err| ModelError::Parse {
            path: PathBuf::from(path),
            detail: err.to_string(),
        })
    }
}
