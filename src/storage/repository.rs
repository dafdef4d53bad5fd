use super::types::{DecisionRecord, HistoryEntry, PromptRecord, TableCounts, VariantRecord};
use crate::error::StorageError;
use chrono::Utc;
use sqlx::SqlitePool;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

// ── Append-only inserts ──────────────────────────────────────────────────────

pub(super) async fn save_prompt(pool: &SqlitePool, text: &str) -> Result<i64, StorageError> {
    let result = sqlx::query("INSERT INTO prompts (original_text, created_at) VALUES (?1, ?2)")
        .bind(text)
        .bind(now_rfc3339())
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub(super) async fn save_variant(
    pool: &SqlitePool,
    prompt_id: i64,
    style: &str,
    refined_text: &str,
) -> Result<i64, StorageError> {
    let result = sqlx::query(
        "INSERT INTO variants (prompt_id, style, refined_text, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(prompt_id)
    .bind(style)
    .bind(refined_text)
    .bind(now_rfc3339())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub(super) async fn save_decision(
    pool: &SqlitePool,
    prompt_id: i64,
    variant_id: i64,
) -> Result<i64, StorageError> {
    let result =
        sqlx::query("INSERT INTO decisions (prompt_id, variant_id, created_at) VALUES (?1, ?2, ?3)")
            .bind(prompt_id)
            .bind(variant_id)
            .bind(now_rfc3339())
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

// ── Point lookups ────────────────────────────────────────────────────────────

pub(super) async fn get_prompt(
    pool: &SqlitePool,
    prompt_id: i64,
) -> Result<Option<PromptRecord>, StorageError> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, original_text, created_at FROM prompts WHERE id = ?1")
            .bind(prompt_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(id, original_text, created_at)| PromptRecord {
        id,
        original_text,
        created_at,
    }))
}

pub(super) async fn get_variant(
    pool: &SqlitePool,
    variant_id: i64,
) -> Result<Option<VariantRecord>, StorageError> {
    let row: Option<(i64, i64, String, String, String)> = sqlx::query_as(
        "SELECT id, prompt_id, style, refined_text, created_at FROM variants WHERE id = ?1",
    )
    .bind(variant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(variant_from_row))
}

pub(super) async fn get_decision(
    pool: &SqlitePool,
    decision_id: i64,
) -> Result<Option<DecisionRecord>, StorageError> {
    let row: Option<(i64, i64, i64, String)> =
        sqlx::query_as("SELECT id, prompt_id, variant_id, created_at FROM decisions WHERE id = ?1")
            .bind(decision_id)
            .fetch_optional(pool)
            .await?;
    Ok(
        row.map(|(id, prompt_id, variant_id, created_at)| DecisionRecord {
            id,
            prompt_id,
            variant_id,
            created_at,
        }),
    )
}

// ── Listings ─────────────────────────────────────────────────────────────────

/// A prompt's variants, ordered by style name.
pub(super) async fn variants_for_prompt(
    pool: &SqlitePool,
    prompt_id: i64,
) -> Result<Vec<VariantRecord>, StorageError> {
    let rows: Vec<(i64, i64, String, String, String)> = sqlx::query_as(
        "SELECT id, prompt_id, style, refined_text, created_at
         FROM variants WHERE prompt_id = ?1 ORDER BY style",
    )
    .bind(prompt_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(variant_from_row).collect())
}

/// Recent prompts with their variants and latest acceptance, most recent
/// first. Ids are append-only, so `id DESC` is recency ordering.
pub(super) async fn history(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<HistoryEntry>, StorageError> {
    let prompts: Vec<(i64, String, String)> = sqlx::query_as(
        "SELECT id, original_text, created_at FROM prompts ORDER BY id DESC LIMIT ?1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut entries = Vec::with_capacity(prompts.len());
    for (id, original_text, created_at) in prompts {
        let variants = variants_for_prompt(pool, id).await?;
        let accepted: Option<(i64,)> = sqlx::query_as(
            "SELECT variant_id FROM decisions WHERE prompt_id = ?1 ORDER BY id DESC LIMIT 1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        entries.push(HistoryEntry {
            prompt: PromptRecord {
                id,
                original_text,
                created_at,
            },
            variants,
            accepted_variant_id: accepted.map(|(variant_id,)| variant_id),
        });
    }

    Ok(entries)
}

pub(super) async fn counts(pool: &SqlitePool) -> Result<TableCounts, StorageError> {
    let (prompts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prompts")
        .fetch_one(pool)
        .await?;
    let (variants,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM variants")
        .fetch_one(pool)
        .await?;
    let (decisions,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM decisions")
        .fetch_one(pool)
        .await?;
    Ok(TableCounts {
        prompts,
        variants,
        decisions,
    })
}

fn variant_from_row(row: (i64, i64, String, String, String)) -> VariantRecord {
    let (id, prompt_id, style, refined_text, created_at) = row;
    VariantRecord {
        id,
        prompt_id,
        style,
        refined_text,
        created_at,
    }
}
