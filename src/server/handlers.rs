//! Tool handlers. Validation failures and missing entities are structured
//! failure results inside a success envelope; only storage faults bubble
//! up as errors.

use crate::diff::diff_lines;
use crate::llm::Refiner;
use crate::render;
use crate::storage::Storage;
use crate::style::{Style, all_guidance};
use anyhow::Context;
use serde_json::{Value, json};

const DEFAULT_HISTORY_LIMIT: i64 = 20;

fn failure(message: impl Into<String>) -> Value {
    json!({ "success": false, "error": message.into() })
}

pub(super) async fn refine_prompt(
    storage: &Storage,
    refiner: &Refiner,
    args: &Value,
) -> anyhow::Result<Value> {
    let prompt_text = args
        .get("prompt")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if prompt_text.is_empty() {
        return Ok(failure("Prompt is required and must not be empty"));
    }

    let prompt_id = storage.save_prompt(prompt_text).await?;

    for style in Style::ALL {
        let refined_text = refiner.rewrite(prompt_text, style).await;
        storage
            .save_variant(prompt_id, style.key(), &refined_text)
            .await?;
    }

    let prompt = storage
        .get_prompt(prompt_id)
        .await?
        .context("prompt vanished after insert")?;
    let variants = storage.variants_for_prompt(prompt_id).await?;
    let view = render::variants_view(&prompt, &variants);

    Ok(json!({
        "success": true,
        "promptId": prompt_id,
        "originalPrompt": prompt_text,
        "variantCount": variants.len(),
        "guidance": all_guidance(),
        "variants": variants,
        "view": view,
    }))
}

pub(super) async fn save_variant(storage: &Storage, args: &Value) -> anyhow::Result<Value> {
    let prompt_id = args.get("promptId").and_then(Value::as_i64);
    let style_key = args.get("style").and_then(Value::as_str);
    let refined_text = args.get("refinedText").and_then(Value::as_str);

    let (Some(prompt_id), Some(style_key), Some(refined_text)) =
        (prompt_id, style_key, refined_text)
    else {
        return Ok(failure("promptId, style and refinedText are required"));
    };

    let Some(style) = Style::from_key(style_key) else {
        return Ok(failure(format!("Unknown style: {style_key}")));
    };

    if storage.get_prompt(prompt_id).await?.is_none() {
        return Ok(failure(format!("Prompt not found: {prompt_id}")));
    }

    let variant_id = storage
        .save_variant(prompt_id, style.key(), refined_text)
        .await?;

    Ok(json!({
        "success": true,
        "variantId": variant_id,
        "promptId": prompt_id,
        "style": style.key(),
    }))
}

pub(super) async fn get_diff(storage: &Storage, args: &Value) -> anyhow::Result<Value> {
    let prompt_id = args.get("promptId").and_then(Value::as_i64);
    let variant_id = args.get("variantId").and_then(Value::as_i64);

    let (Some(prompt_id), Some(variant_id)) = (prompt_id, variant_id) else {
        return Ok(failure("promptId and variantId are required"));
    };

    let Some(prompt) = storage.get_prompt(prompt_id).await? else {
        return Ok(failure(format!("Prompt not found: {prompt_id}")));
    };
    let Some(variant) = storage.get_variant(variant_id).await? else {
        return Ok(failure(format!("Variant not found: {variant_id}")));
    };
    if variant.prompt_id != prompt.id {
        return Ok(failure(format!(
            "Variant {variant_id} does not belong to prompt {prompt_id}"
        )));
    }

    let entries = diff_lines(&prompt.original_text, &variant.refined_text);
    let view = render::diff_view(&prompt, &variant, entries.clone());

    Ok(json!({
        "success": true,
        "promptId": prompt_id,
        "variantId": variant_id,
        "style": variant.style,
        "diff": entries,
        "view": view,
    }))
}

pub(super) async fn accept_variant(storage: &Storage, args: &Value) -> anyhow::Result<Value> {
    let Some(variant_id) = args.get("variantId").and_then(Value::as_i64) else {
        return Ok(failure("variantId is required"));
    };

    let Some(variant) = storage.get_variant(variant_id).await? else {
        return Ok(failure(format!("Variant not found: {variant_id}")));
    };

    let decision_id = storage.save_decision(variant.prompt_id, variant.id).await?;

    Ok(json!({
        "success": true,
        "decisionId": decision_id,
        "promptId": variant.prompt_id,
        "variantId": variant.id,
    }))
}

pub(super) async fn get_history(storage: &Storage, args: &Value) -> anyhow::Result<Value> {
    let limit = match args.get("limit") {
        None | Some(Value::Null) => DEFAULT_HISTORY_LIMIT,
        Some(value) => match value.as_i64() {
            Some(limit) if limit > 0 => limit,
            _ => return Ok(failure("limit must be a positive integer")),
        },
    };

    let entries = storage.history(Some(limit)).await?;
    let view = render::history_view(&entries);

    Ok(json!({
        "success": true,
        "count": entries.len(),
        "view": view,
    }))
}

pub(super) async fn show_variants(storage: &Storage, args: &Value) -> anyhow::Result<Value> {
    let Some(prompt_id) = args.get("promptId").and_then(Value::as_i64) else {
        return Ok(failure("promptId is required"));
    };

    let Some(prompt) = storage.get_prompt(prompt_id).await? else {
        return Ok(failure(format!("Prompt not found: {prompt_id}")));
    };

    let variants = storage.variants_for_prompt(prompt_id).await?;
    let view = render::variants_view(&prompt, &variants);

    Ok(json!({
        "success": true,
        "promptId": prompt_id,
        "count": variants.len(),
        "view": view,
    }))
}
