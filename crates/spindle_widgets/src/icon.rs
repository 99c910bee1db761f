//! Icon registry
//!
//! Maps icon names to a pair of visual assets: the normal rendition and the
//! selected rendition. The renderer crossfades between the two using the
//! item's selection blend. An unresolvable name is an error the carousel
//! downgrades to a diagnostic, skipping the item instead of failing.

use std::collections::HashMap;

use thiserror::Error;

/// Icon resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconError {
    /// The named icon is not present in the set
    #[error("unknown icon \"{0}\"")]
    UnknownIcon(String),
}

/// A normal/selected asset pair for one icon
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconAsset {
    /// Asset reference for the resting rendition
    pub normal: String,
    /// Asset reference for the centered/selected rendition
    pub selected: String,
}

/// A named collection of icon assets
#[derive(Clone, Debug)]
pub struct IconSet {
    assets: HashMap<String, IconAsset>,
}

impl IconSet {
    /// Create an empty set
    pub fn empty() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// The stock icon set shipped with the launch screen
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        for name in ["book", "coffee", "face", "file", "travel"] {
            set.register(
                name,
                format!("icons/{name}.png"),
                format!("icons/{name}_select.png"),
            );
        }
        set
    }

    /// Register (or replace) an icon
    pub fn register(
        &mut self,
        name: impl Into<String>,
        normal: impl Into<String>,
        selected: impl Into<String>,
    ) {
        self.assets.insert(
            name.into(),
            IconAsset {
                normal: normal.into(),
                selected: selected.into(),
            },
        );
    }

    /// Look up an icon by name
    pub fn resolve(&self, name: &str) -> Result<&IconAsset, IconError> {
        self.assets
            .get(name)
            .ok_or_else(|| IconError::UnknownIcon(name.to_string()))
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::builtin()
    }
}
