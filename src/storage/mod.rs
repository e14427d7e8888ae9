/// Flat-file persistence for the post collection
///
/// The entire collection lives in a single JSON file holding an array of
/// post objects. `load` reads the whole file; `commit` rewrites it in full.
/// There is no partial-write protection: the last writer wins. The trait
/// seam exists so tests can substitute an in-memory store.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use crate::error::Result;
use crate::models::Post;

/// Storage backend for the post collection.
pub trait PostStore: Send + Sync {
    /// Load the entire collection into memory.
    ///
    /// Never fails toward the caller: a missing or malformed backing
    /// resource yields an empty collection.
    fn load(&self) -> Result<Vec<Post>>;

    /// Persist `posts`, replacing the prior contents entirely.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails; unlike a load failure, a lost
    /// commit must surface to the caller.
    fn commit(&self, posts: &[Post]) -> Result<()>;
}

/// `PostStore` backed by a single JSON file.
pub struct FilePostStore {
    path: PathBuf,
}

impl FilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostStore for FilePostStore {
    fn load(&self) -> Result<Vec<Post>> {
        if !self.path.is_file() {
            // Seed an empty collection so subsequent reads find the file.
            if let Err(err) = fs::write(&self.path, "[]") {
                tracing::warn!(
                    path = %self.path.display(),
                    "failed to create collection file, serving empty collection: {err}"
                );
            }
            return Ok(Vec::new());
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "failed to read collection file, serving empty collection: {err}"
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(posts) => Ok(posts),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "malformed collection file, serving empty collection: {err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn commit(&self, posts: &[Post]) -> Result<()> {
        // Full-file overwrite, pretty-printed with 4-space indentation.
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        posts.serialize(&mut ser)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }
}

/// In-memory `PostStore` for tests.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }
}

impl PostStore for MemoryPostStore {
    fn load(&self) -> Result<Vec<Post>> {
        Ok(self.posts.lock().expect("store lock poisoned").clone())
    }

    fn commit(&self, posts: &[Post]) -> Result<()> {
        *self.posts.lock().expect("store lock poisoned") = posts.to_vec();
        Ok(())
    }
}
