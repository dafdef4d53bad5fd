//! Structured view records handed to the host renderer.
//!
//! These are plain serializable data; the host owns layout and escaping.

use crate::diff::DiffEntry;
use crate::storage::{HistoryEntry, PromptRecord, VariantRecord};
use crate::style::Style;
use serde::Serialize;

/// Style metadata embedded in view records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub accent: &'static str,
}

impl From<Style> for StyleInfo {
    fn from(style: Style) -> Self {
        Self {
            key: style.key(),
            name: style.display_name(),
            description: style.description(),
            accent: style.accent(),
        }
    }
}

/// Stored style tags always come from the closed set; an unknown tag in a
/// hand-edited database degrades to the first style rather than failing.
fn style_info_for(key: &str) -> StyleInfo {
    Style::from_key(key).unwrap_or(Style::Concise).into()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCard {
    pub id: i64,
    pub style: StyleInfo,
    pub text: String,
}

/// Renderable display of one prompt and its styled variants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantsView {
    pub kind: &'static str,
    pub prompt_id: i64,
    pub original: String,
    pub variants: Vec<VariantCard>,
}

pub fn variants_view(prompt: &PromptRecord, variants: &[VariantRecord]) -> VariantsView {
    VariantsView {
        kind: "variants",
        prompt_id: prompt.id,
        original: prompt.original_text.clone(),
        variants: variants
            .iter()
            .map(|variant| VariantCard {
                id: variant.id,
                style: style_info_for(&variant.style),
                text: variant.refined_text.clone(),
            })
            .collect(),
    }
}

/// Renderable diff between a prompt and one of its variants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffView {
    pub kind: &'static str,
    pub prompt_id: i64,
    pub variant_id: i64,
    pub style: StyleInfo,
    pub entries: Vec<DiffEntry>,
}

pub fn diff_view(prompt: &PromptRecord, variant: &VariantRecord, entries: Vec<DiffEntry>) -> DiffView {
    DiffView {
        kind: "diff",
        prompt_id: prompt.id,
        variant_id: variant.id,
        style: style_info_for(&variant.style),
        entries,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryVariantCard {
    pub id: i64,
    pub style: StyleInfo,
    pub text: String,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCard {
    pub prompt_id: i64,
    pub created_at: String,
    pub original: String,
    pub variants: Vec<HistoryVariantCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_variant_id: Option<i64>,
}

/// Renderable refinement history; an empty history is an explicit empty
/// view rather than an absent one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub kind: &'static str,
    pub count: usize,
    pub entries: Vec<HistoryCard>,
}

pub fn history_view(entries: &[HistoryEntry]) -> HistoryView {
    HistoryView {
        kind: "history",
        count: entries.len(),
        entries: entries
            .iter()
            .map(|entry| HistoryCard {
                prompt_id: entry.prompt.id,
                created_at: entry.prompt.created_at.clone(),
                original: entry.prompt.original_text.clone(),
                variants: entry
                    .variants
                    .iter()
                    .map(|variant| HistoryVariantCard {
                        id: variant.id,
                        style: style_info_for(&variant.style),
                        text: variant.refined_text.clone(),
                        accepted: entry.accepted_variant_id == Some(variant.id),
                    })
                    .collect(),
                accepted_variant_id: entry.accepted_variant_id,
            })
            .collect(),
    }
}
