use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `prompt-refiner`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum RefinerError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Storage ─────────────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Rewrite provider ────────────────────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("schema bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}

// ─── Rewrite provider errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} returned a malformed response: {message}")]
    Malformed { provider: String, message: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RefinerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = RefinerError::Config(ConfigError::Load("bad json".into()));
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn provider_request_displays_provider_name() {
        let err = RefinerError::Provider(ProviderError::Request {
            provider: "anthropic".into(),
            message: "503 Service Unavailable".into(),
        });
        assert!(err.to_string().contains("anthropic"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let refiner_err: RefinerError = anyhow_err.into();
        assert!(refiner_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn storage_bootstrap_displays_correctly() {
        let err = RefinerError::Storage(StorageError::Bootstrap("locked".into()));
        assert!(err.to_string().contains("schema bootstrap failed"));
    }
}
