//! Content-addressed disk cache for expensive external calls.
//!
//! Keys are the SHA-256 of a request payload's JSON encoding, so identical
//! requests map to the same file across runs:
//!
//! ```text
//! {"task":"sections","batch":[...]}  --sha256-->  3f9a...c2.json
//! ```
//!
//! There is no invalidation. Delete the directory to start over.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::Result;

/// A directory of JSON responses keyed by request hash.
///
/// ## Example
///
/// ```rust
/// use folios::DiskCache;
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let cache = DiskCache::new(dir.path()).unwrap();
///
/// let request = json!({"task": "sections", "batch": ["a", "b"]});
/// assert_eq!(cache.get::<_, Vec<String>>(&request).unwrap(), None);
///
/// cache.put(&request, &vec!["x".to_string()]).unwrap();
/// assert_eq!(cache.get::<_, Vec<String>>(&request).unwrap(), Some(vec!["x".to_string()]));
/// ```
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Open a cache rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The cache directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file name a request is stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be encoded as JSON.
    pub fn key<K: Serialize + ?Sized>(request: &K) -> Result<String> {
        let encoded = serde_json::to_string(request)?;
        let mut hasher = Sha256::new();
        hasher.update(encoded.as_bytes());
        Ok(format!("{:x}.json", hasher.finalize()))
    }

    /// Look up a stored response.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be read or decoded.
    pub fn get<K, V>(&self, request: &K) -> Result<Option<V>>
    where
        K: Serialize + ?Sized,
        V: DeserializeOwned,
    {
        let path = self.root.join(Self::key(request)?);
        if !path.exists() {
            debug!(path = %path.display(), "cache miss");
            return Ok(None);
        }
        debug!(path = %path.display(), "cache hit");
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Store a response, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be encoded or written.
    pub fn put<K, V>(&self, request: &K, response: &V) -> Result<()>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        let path = self.root.join(Self::key(request)?);
        let encoded = serde_json::to_string_pretty(response)?;
        fs::write(&path, encoded)?;
        debug!(path = %path.display(), "cache put");
        Ok(())
    }
}
