//! Backend selection.
//!
//! The backend is chosen once, when the process starts. The returned handle is
//! shared for the rest of the process lifetime and never re-evaluated.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{RemoteTodoStore, SqliteTodoStore, TodoStore, TodoStoreResult};

/// Which backend serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Local SQLite file.
    Embedded,
    /// Hosted PostgREST table.
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Storage settings.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Remote endpoint URL.
    pub remote_url: Option<String>,
    /// Remote access credential.
    pub remote_key: Option<String>,
    /// Path of the embedded database file.
    pub sqlite_path: PathBuf,
}

// Hand-written so the credential never ends up in logs
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("remote_url", &self.remote_url)
            .field("remote_key", &self.remote_key.as_ref().map(|_| "<redacted>"))
            .field("sqlite_path", &self.sqlite_path)
            .finish()
    }
}

impl StoreConfig {
    /// Creates a config that only uses the embedded store at `path`.
    pub fn embedded(path: impl AsRef<Path>) -> Self {
        Self {
            remote_url: None,
            remote_key: None,
            sqlite_path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the remote URL and key if both are set and non-empty.
    pub fn remote_credentials(&self) -> Option<(&str, &str)> {
        let url = self.remote_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.remote_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((url, key))
    }

    /// Decides which backend this configuration selects.
    pub fn backend_kind(&self) -> BackendKind {
        if self.remote_credentials().is_some() {
            BackendKind::Remote
        } else {
            BackendKind::Embedded
        }
    }
}

/// Opens the backend selected by `config`.
///
/// The embedded store creates its file and schema here, before any request is
/// served. The remote store is not probed; a bad URL or key only shows up when
/// the first request fails.
pub async fn open_store(config: &StoreConfig) -> TodoStoreResult<Arc<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match config.remote_credentials() {
        Some((url, key)) => {
            tracing::info!(url = %url, "Using remote todo backend");
            Arc::new(RemoteTodoStore::new(url, key))
        }
        None => {
            tracing::info!(path = %config.sqlite_path.display(), "Using embedded todo backend");
            Arc::new(SqliteTodoStore::open(&config.sqlite_path).await?)
        }
    };

    Ok(store)
}
