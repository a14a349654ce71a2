use crate::domain::ports::Storage;
use crate::utils::error::{BepError, Result};
use crate::utils::validation::validate_relative_path;
use std::path::{Path, PathBuf};

/// Reads and writes documents relative to a base directory. Paths that would
/// leave the base directory are rejected.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        validate_relative_path("storage path", path)?;
        Ok(Path::new(&self.base_path).join(path))
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        let data = tokio::fs::read(&full_path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), full_path.display());
        Ok(data)
    }

    /// Returns the full path written.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path.display().to_string())
    }
}

/// Reads a UTF-8 document through a storage rooted at its own directory.
pub async fn read_text_document(path: &str) -> Result<String> {
    let path = Path::new(path);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| BepError::validation(format!("'{}' is not a file", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    };

    let bytes = LocalStorage::new(dir).read_file(file_name).await?;
    String::from_utf8(bytes)
        .map_err(|_| BepError::validation(format!("'{}' is not UTF-8 text", path.display())))
}
