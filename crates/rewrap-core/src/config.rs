//! View configuration

/// Per-view settings
///
/// Defaults: no label (logs use the property set's type name) and no
/// per-access tracing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfig {
    /// Name used in log events for this view
    pub label: Option<String>,

    /// Emit a `trace` event for every field read and write
    pub trace_access: bool,
}

impl ViewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Enable or disable per-access tracing
    #[inline]
    #[must_use]
    pub fn with_access_tracing(mut self, enabled: bool) -> Self {
        self.trace_access = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ViewConfig::new();
        assert!(config.label.is_none());
        assert!(!config.trace_access);
    }

    #[test]
    fn builder_sets_fields() {
        let config = ViewConfig::new()
            .with_label("telemetry")
            .with_access_tracing(true);
        assert_eq!(config.label.as_deref(), Some("telemetry"));
        assert!(config.trace_access);
    }
}
