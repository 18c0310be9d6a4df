//! Injectable sink for translation diagnostics.

use std::fmt;

/// Receives warning-level diagnostics, e.g. for unresolved keys.
pub trait LogSink: fmt::Debug + Send + Sync {
    fn warning(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `i18n_translator` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn warning(&self, message: &str) {
        tracing::warn!(target: "i18n_translator", "{message}");
    }
}
