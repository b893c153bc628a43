// ABOUTME: Storage for the backend session token
// ABOUTME: In-memory store for tests and embedding, file store for the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{BackendError, BackendResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Holds the opaque bearer token issued by the backend
pub trait TokenStore: Send + Sync {
    /// Stored token, if any
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be read
    fn load(&self) -> BackendResult<Option<String>>;

    /// Replace the stored token
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be written
    fn save(&self, token: &str) -> BackendResult<()>;

    /// Forget the stored token; succeeds when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be written
    fn clear(&self) -> BackendResult<()>;
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> BackendResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> BackendResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> BackendResult<()> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

/// Token kept in a single file, created on first save
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the token lives in
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: &std::io::Error) -> BackendError {
        BackendError::Storage(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> BackendResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_error("read", &e)),
        }
    }

    fn save(&self, token: &str) -> BackendResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory for", &e))?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| self.storage_error("open", &e))?;

        // A file that already existed keeps its old mode until restricted here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error("restrict permissions on", &e))?;
        }

        file.write_all(token.as_bytes())
            .map_err(|e| self.storage_error("write", &e))?;

        debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    fn clear(&self) -> BackendResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", &e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
