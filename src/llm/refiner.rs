use super::RewriteProvider;
use super::prompt::fallback_rewrite;
use crate::style::Style;
use std::sync::Arc;
use tracing::warn;

/// Produces one styled rewrite per call, absorbing provider failures.
///
/// A failed outbound call is replaced by the deterministic templated
/// fallback for that style; an empty completion falls back to the
/// original text. Callers never see an error.
pub struct Refiner {
    provider: Arc<dyn RewriteProvider>,
}

impl Refiner {
    pub fn new(provider: Arc<dyn RewriteProvider>) -> Self {
        Self { provider }
    }

    pub async fn rewrite(&self, original: &str, style: Style) -> String {
        match self.provider.rewrite(original, style).await {
            Ok(text) if text.trim().is_empty() => original.to_string(),
            Ok(text) => text,
            Err(err) => {
                warn!(
                    provider = self.provider.name(),
                    style = %style,
                    error = %err,
                    "rewrite call failed; using local fallback"
                );
                fallback_rewrite(original, style)
            }
        }
    }
}
