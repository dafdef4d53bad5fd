mod repository;
mod schema;
mod types;

pub use types::{DecisionRecord, HistoryEntry, PromptRecord, TableCounts, VariantRecord};

use crate::config::{StorageTarget, StorageTier};
use crate::error::StorageError;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;

/// Default limit for history listings when the caller passes none.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// SQLite-backed persistent store for prompts, variants, and decisions.
///
/// Opened once at startup and shared for the life of the process. The
/// request loop is strictly sequential, so the pool holds exactly one
/// connection (which also keeps an in-memory database coherent).
pub struct Storage {
    pool: SqlitePool,
    target: StorageTarget,
}

impl Storage {
    /// Open (or create) the database at the resolved target and run the
    /// idempotent schema bootstrap.
    pub async fn open(target: StorageTarget) -> Result<Self, StorageError> {
        if let Some(parent) = target.path.as_deref().and_then(Path::parent) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Bootstrap(err.to_string()))?;
        }

        // The single connection must live as long as the process: an
        // in-memory database is dropped with its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(&target.sqlite_url())
            .await?;
        schema::init_schema(&pool).await?;

        Ok(Self { pool, target })
    }

    /// Open a non-persistent store (the memory tier, also used by tests).
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::open(StorageTarget::memory()).await
    }

    pub fn tier(&self) -> StorageTier {
        self.target.tier
    }

    pub fn path(&self) -> Option<&Path> {
        self.target.path.as_deref()
    }

    // ── Operations ───────────────────────────────────────────────────────

    pub async fn save_prompt(&self, text: &str) -> Result<i64, StorageError> {
        repository::save_prompt(&self.pool, text).await
    }

    pub async fn get_prompt(&self, prompt_id: i64) -> Result<Option<PromptRecord>, StorageError> {
        repository::get_prompt(&self.pool, prompt_id).await
    }

    pub async fn save_variant(
        &self,
        prompt_id: i64,
        style: &str,
        refined_text: &str,
    ) -> Result<i64, StorageError> {
        repository::save_variant(&self.pool, prompt_id, style, refined_text).await
    }

    pub async fn get_variant(
        &self,
        variant_id: i64,
    ) -> Result<Option<VariantRecord>, StorageError> {
        repository::get_variant(&self.pool, variant_id).await
    }

    pub async fn variants_for_prompt(
        &self,
        prompt_id: i64,
    ) -> Result<Vec<VariantRecord>, StorageError> {
        repository::variants_for_prompt(&self.pool, prompt_id).await
    }

    pub async fn save_decision(
        &self,
        prompt_id: i64,
        variant_id: i64,
    ) -> Result<i64, StorageError> {
        repository::save_decision(&self.pool, prompt_id, variant_id).await
    }

    pub async fn get_decision(
        &self,
        decision_id: i64,
    ) -> Result<Option<DecisionRecord>, StorageError> {
        repository::get_decision(&self.pool, decision_id).await
    }

    pub async fn history(&self, limit: Option<i64>) -> Result<Vec<HistoryEntry>, StorageError> {
        repository::history(&self.pool, limit.unwrap_or(DEFAULT_HISTORY_LIMIT)).await
    }

    pub async fn counts(&self) -> Result<TableCounts, StorageError> {
        repository::counts(&self.pool).await
    }
}
