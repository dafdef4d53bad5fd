use crate::error::StorageError;
use sqlx::SqlitePool;

/// Idempotent schema bootstrap. Re-running against an existing database
/// is a no-op and never touches existing rows.
pub(super) async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::raw_sql(
        "CREATE TABLE IF NOT EXISTS prompts (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            original_text TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS variants (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            prompt_id    INTEGER NOT NULL,
            style        TEXT NOT NULL,
            refined_text TEXT NOT NULL,
            created_at   TEXT NOT NULL,
            FOREIGN KEY (prompt_id) REFERENCES prompts(id)
        );
        CREATE INDEX IF NOT EXISTS idx_variants_prompt ON variants(prompt_id);

        CREATE TABLE IF NOT EXISTS decisions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            prompt_id  INTEGER NOT NULL,
            variant_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (prompt_id)  REFERENCES prompts(id),
            FOREIGN KEY (variant_id) REFERENCES variants(id)
        );",
    )
    .execute(pool)
    .await
    .map_err(|err| StorageError::Bootstrap(err.to_string()))?;

    Ok(())
}
