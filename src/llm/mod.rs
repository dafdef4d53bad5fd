pub mod anthropic;
pub mod prompt;
pub mod refiner;

pub use anthropic::AnthropicClient;
pub use refiner::Refiner;

use crate::error::ProviderError;
use crate::style::Style;
use async_trait::async_trait;

/// Seam for the outbound text-generation endpoint.
///
/// Implementations perform one network call per invocation; fallback
/// behavior on failure belongs to [`Refiner`], not to implementations.
#[async_trait]
pub trait RewriteProvider: Send + Sync {
    /// Provider identifier (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Produce one styled rewrite of `original`.
    async fn rewrite(&self, original: &str, style: Style) -> Result<String, ProviderError>;
}
