use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServerError;

/// Verify that a resolved path stays within the upload directory.
fn ensure_within(base: &Path, target: &Path) -> Result<PathBuf, ServerError> {
    let canonical_base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
    let mut resolved = canonical_base.clone();
    for component in target
        .strip_prefix(base)
        .unwrap_or(target)
        .components()
    {
        match component {
            Component::Normal(c) => resolved.push(c),
            Component::ParentDir => {
                return Err(ServerError::BadRequest("Path traversal detected".to_string()));
            }
            _ => {} // RootDir, CurDir, Prefix
        }
    }
    if !resolved.starts_with(&canonical_base) {
        return Err(ServerError::BadRequest("Path traversal detected".to_string()));
    }
    Ok(resolved)
}

/// Uploaded images on disk, one file per upload named `<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    base_path: PathBuf,
    max_size: usize,
}

impl UploadStore {
    pub async fn new(base_path: PathBuf, max_size: usize) -> Result<Self, ServerError> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            ServerError::Internal(format!(
                "Failed to create upload directory '{}': {}",
                base_path.display(),
                e
            ))
        })?;

        info!(path = %base_path.display(), "Upload store initialized");

        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Store an accepted image and return its file name.
    pub async fn store(&self, data: &[u8], extension: &str) -> Result<String, ServerError> {
        if data.is_empty() {
            return Err(ServerError::BadRequest("Empty upload".to_string()));
        }
        if data.len() > self.max_size {
            return Err(ServerError::PayloadTooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }
        if extension.is_empty() || !extension.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ServerError::BadRequest(format!(
                "Invalid file extension: {extension}"
            )));
        }

        let name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.safe_path(&name)?;

        fs::write(&path, data)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to write upload {name}: {e}")))?;

        debug!(name = %name, size = data.len(), "Stored upload");
        Ok(name)
    }

    pub async fn remove(&self, name: &str) -> Result<(), ServerError> {
        let path = self.safe_path(name)?;

        if !path.exists() {
            return Err(ServerError::NotFound(format!("Upload {name}")));
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to delete upload {name}: {e}")))?;

        debug!(name = %name, "Deleted upload");
        Ok(())
    }

    /// File names of every stored upload, sorted.
    pub async fn list(&self) -> Result<Vec<String>, ServerError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to list uploads: {e}")))?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            ServerError::Internal(format!("Failed to read directory entry: {e}"))
        })? {
            if let Some(name) = entry.file_name().to_str() {
                let is_upload = name
                    .split_once('.')
                    .is_some_and(|(stem, _)| Uuid::parse_str(stem).is_ok());
                if is_upload {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn safe_path(&self, name: &str) -> Result<PathBuf, ServerError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(ServerError::BadRequest("Path traversal detected".to_string()));
        }
        ensure_within(&self.base_path, &self.base_path.join(name))
    }
}
