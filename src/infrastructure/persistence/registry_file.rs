//! JSON document backing the registry.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::domain::entities::Registry;

/// Errors raised while reading or writing the registry file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The on-disk registry document.
///
/// Saves overwrite the whole document: the JSON is written to a sibling
/// `.tmp` file which is then renamed over the target, so a crash leaves
/// either the previous or the new document, never a torn one.
#[derive(Debug, Clone)]
pub struct RegistryFile {
    path: PathBuf,
}

impl RegistryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// Returns `Ok(None)` when the file does not exist. An empty file is an
    /// empty registry.
    pub async fn read(&self) -> Result<Option<Registry>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Registry::new()));
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrites the document with `registry`.
    pub async fn save(&self, registry: &Registry) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(registry)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        let tmp = self.sibling("tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|source| self.write_error(source))?;
        if let Err(source) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.write_error(source));
        }

        debug!(path = %self.path.display(), bytes = json.len(), "Registry saved");
        Ok(())
    }

    /// Moves an unreadable document aside to `<file>.corrupt`.
    pub async fn quarantine(&self) -> Result<PathBuf, StorageError> {
        let target = self.sibling("corrupt");
        fs::rename(&self.path, &target)
            .await
            .map_err(|source| self.write_error(source))?;
        Ok(target)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
