use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::line_codec;
use crate::repositories::traits::{ContactRepository, LoadReport};

/// Contact repository backed by a comma-delimited text file.
///
/// The whole file is read on every load and rewritten on every save. There is
/// no locking: two concurrent writers race and the last save wins.
pub struct FileContactRepository {
    path: PathBuf,
}

impl FileContactRepository {
    /// Create a repository over the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl ContactRepository for FileContactRepository {
    async fn load_all(&self) -> StoreResult<LoadReport> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Contact file missing, treating as empty");
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let (contacts, dropped_rows) = line_codec::parse_document(&content);

        if dropped_rows > 0 {
            tracing::warn!(
                path = %self.path.display(),
                dropped_rows = dropped_rows,
                "Skipped malformed contact rows"
            );
        }

        Ok(LoadReport {
            contacts,
            dropped_rows,
        })
    }

    async fn save_all(&self, contacts: &[Contact]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let body = line_codec::format_document(contacts);
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), count = contacts.len(), "Contacts saved");
        Ok(())
    }
}
