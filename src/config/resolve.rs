use super::{Config, MEMORY_SENTINEL};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use strum::Display;
use tracing::{info, warn};

const TEMP_DIR_NAME: &str = ".prompt-refiner";
const TEMP_DB_NAME: &str = "prompt_refiner.db";
const PROBE_FILE_NAME: &str = ".probe-write";

/// Which fallback tier the resolver ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StorageTier {
    Configured,
    Temp,
    Memory,
}

/// A resolved storage location: a file path, or in-memory.
#[derive(Debug, Clone)]
pub struct StorageTarget {
    pub path: Option<PathBuf>,
    pub tier: StorageTier,
}

impl StorageTarget {
    pub fn memory() -> Self {
        Self {
            path: None,
            tier: StorageTier::Memory,
        }
    }

    /// Connection string for `SqlitePool::connect`.
    pub fn sqlite_url(&self) -> String {
        match &self.path {
            Some(path) => format!("sqlite:{}?mode=rwc", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }
}

/// Resolve a writable storage target with ordered fallback: configured
/// path, then the process temp directory, then in-memory. Never fails;
/// each downgrade logs a warning.
pub fn resolve_storage(config: &Config) -> StorageTarget {
    let configured = config.expanded_database_path();

    if configured == MEMORY_SENTINEL {
        warn!("using in-memory database; history will not survive this session");
        return StorageTarget::memory();
    }

    let configured_path = PathBuf::from(&configured);
    match probe_parent_writable(&configured_path) {
        Ok(()) => {
            info!(path = %configured_path.display(), "using configured database path");
            return StorageTarget {
                path: Some(configured_path),
                tier: StorageTier::Configured,
            };
        }
        Err(err) => {
            warn!(
                path = %configured_path.display(),
                error = %err,
                "configured database path is not writable; trying temp directory"
            );
        }
    }

    let temp_path = std::env::temp_dir().join(TEMP_DIR_NAME).join(TEMP_DB_NAME);
    match probe_parent_writable(&temp_path) {
        Ok(()) => {
            warn!(
                path = %temp_path.display(),
                "using temp directory; this location may be cleaned up by the system"
            );
            return StorageTarget {
                path: Some(temp_path),
                tier: StorageTier::Temp,
            };
        }
        Err(err) => {
            warn!(
                path = %temp_path.display(),
                error = %err,
                "temp directory is not writable"
            );
        }
    }

    warn!("no writable location found; falling back to in-memory database");
    StorageTarget::memory()
}

/// Create the parent directory if needed, then verify writability with a
/// probe file that is written and deleted again.
fn probe_parent_writable(db_path: &Path) -> io::Result<()> {
    let dir = db_path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "database path has no parent")
    })?;
    fs::create_dir_all(dir)?;

    let probe = dir.join(PROBE_FILE_NAME);
    fs::write(&probe, b"probe")?;
    fs::remove_file(&probe)?;
    Ok(())
}
