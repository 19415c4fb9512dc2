//! Application state management

use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use parkease_core::{Error, ParkingStore, Result, SqliteBlobStore, StoreConfig};

pub const CONFIG_FILE: &str = "parkease.toml";
pub const DATABASE_FILE: &str = "parkease.db";

/// Main application state
pub struct AppState {
    pub store: Arc<ParkingStore<SqliteBlobStore>>,
    data_dir: PathBuf,
}

impl AppState {
    /// Open the store in the platform data directory
    pub fn new() -> Result<Self> {
        Self::open_in(&Self::data_path()?)
    }

    /// Open the store in an explicit directory
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE);
        let config = StoreConfig::load_or_default(&config_path)?;
        tracing::info!(
            config = %config_path.display(),
            legacy_login_fallback = config.legacy_login_fallback,
            latency = config.latency.enabled,
            "Store configuration loaded"
        );

        let blobs = SqliteBlobStore::open(data_dir.join(DATABASE_FILE))?;

        Ok(Self {
            store: Arc::new(ParkingStore::new(blobs, config)),
            data_dir: data_dir.to_path_buf(),
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("app", "parkease", "parkease").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::open_in(dir.path()).unwrap();
        assert!(dir.path().join(DATABASE_FILE).exists());
        assert_eq!(state.data_dir(), dir.path());
        assert!(state.store.config().legacy_login_fallback);
    }

    #[test]
    fn test_open_in_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "legacy_login_fallback = false\n[latency]\nenabled = false\n",
        )
        .unwrap();

        let state = AppState::open_in(dir.path()).unwrap();
        assert!(!state.store.config().legacy_login_fallback);
        assert!(!state.store.config().latency.enabled);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "admin_code = 5").unwrap();
        assert!(AppState::open_in(dir.path()).is_err());
    }
}
