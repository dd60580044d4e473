//! Configuration for CSS rendering

use serde::Deserialize;

/// Custom property carrying the anchor marker unless configured otherwise
pub const DEFAULT_ANCHOR_PROPERTY: &str = "--overlay-anchor-origin";

/// Configuration options for CSS output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Custom property carrying the anchor marker
    pub anchor_property: String,

    /// Selector wrapping the declarations; bare declarations when unset
    pub selector: Option<String>,

    /// Whether to put each declaration on its own line
    pub pretty_print: bool,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            anchor_property: DEFAULT_ANCHOR_PROPERTY.to_string(),
            selector: None,
            pretty_print: true,
        }
    }
}

impl CssConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor marker property name
    pub fn with_anchor_property(mut self, name: impl Into<String>) -> Self {
        self.anchor_property = name.into();
        self
    }

    /// Wrap declarations in a rule for `selector`
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CssConfig::default();
        assert_eq!(config.anchor_property, "--overlay-anchor-origin");
        assert_eq!(config.selector, None);
        assert!(config.pretty_print);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CssConfig::new()
            .with_anchor_property("--v-overlay-anchor-origin")
            .with_selector(".menu")
            .with_pretty_print(false);

        assert_eq!(config.anchor_property, "--v-overlay-anchor-origin");
        assert_eq!(config.selector, Some(".menu".to_string()));
        assert!(!config.pretty_print);
    }
}
