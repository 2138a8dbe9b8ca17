//! Tree configuration.

use crate::error::Result;
use crate::scroll::ScrollBarVisibility;
use serde::{Deserialize, Serialize};

/// Settings shared by every view in a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Document size of a new scrolling container before its first resize.
    pub initial_document_size: (f64, f64),

    /// Horizontal and vertical scroll bar visibility of a new scrolling container.
    pub scroll_bar_visibility: (ScrollBarVisibility, ScrollBarVisibility),

    /// Only send `bounds_changed` when the resolved frame actually changed.
    pub deduplicate_bounds_changed: bool,

    /// Maximum number of frame size changes requested by layout handlers that are applied after a
    /// single layout pass.
    pub max_deferred_resizes: usize,
}

impl Default for TreeConfig {
    fn default() -> TreeConfig {
        TreeConfig {
            initial_document_size: (4000., 4000.),
            scroll_bar_visibility: (
                ScrollBarVisibility::OnlyIfNeeded,
                ScrollBarVisibility::OnlyIfNeeded,
            ),
            deduplicate_bounds_changed: true,
            max_deferred_resizes: 64,
        }
    }
}

impl TreeConfig {
    /// Reads a configuration from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<TreeConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TreeConfig::from_json(
            r#"{ "deduplicate_bounds_changed": false, "scroll_bar_visibility": ["Never", "Always"] }"#,
        )
        .unwrap();

        assert!(!config.deduplicate_bounds_changed);
        assert_eq!(
            config.scroll_bar_visibility,
            (ScrollBarVisibility::Never, ScrollBarVisibility::Always)
        );
        assert_eq!(config.initial_document_size, (4000., 4000.));
        assert_eq!(config.max_deferred_resizes, 64);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        match TreeConfig::from_json(r#"{ "max_deferred_resizes": "lots" }"#) {
            Err(Error::Config(_)) => {}
            other => panic!("expected a config error, got {:?}", other),
        }
    }
}
