use serde::Serialize;

/// A stored prompt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRecord {
    pub id: i64,
    pub original_text: String,
    pub created_at: String,
}

/// One styled rewrite of a prompt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub id: i64,
    pub prompt_id: i64,
    pub style: String,
    pub refined_text: String,
    pub created_at: String,
}

/// A recorded user choice of one variant as final. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub id: i64,
    pub prompt_id: i64,
    pub variant_id: i64,
    pub created_at: String,
}

/// One prompt with its variants and the most recent acceptance, as
/// returned by the history listing.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub prompt: PromptRecord,
    pub variants: Vec<VariantRecord>,
    pub accepted_variant_id: Option<i64>,
}

/// Row counts surfaced by the `info` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub prompts: i64,
    pub variants: i64,
    pub decisions: i64,
}
