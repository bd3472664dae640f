//! Compiler configuration.
//!
//! Page geometry, the named-color table, and the catalog placeholder live
//! here instead of in module-level constants, so every compilation states
//! exactly which values it ran with. Loadable from TOML:
//!
//! ```toml
//! placeholder_image = "https://example.com/cover.png"
//!
//! [page]
//! width = 794
//! height = 1123
//!
//! [colors]
//! orange = "#ffa500"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration for a compilation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub page: PageConfig,
    /// Named colors, keyed by lowercase name, valued as canonical hex.
    pub colors: BTreeMap<String, String>,
    /// Cover shown in the catalog when a book has no image.
    pub placeholder_image: String,
}

/// Fixed page geometry and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Background used when the body declares none (or an unresolvable one).
    pub background: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            colors: default_colors(),
            placeholder_image: "https://placehold.net/300x208.png".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            id: "page-1".to_string(),
            width: 794.0,
            height: 1123.0,
            background: "#ffffff".to_string(),
        }
    }
}

impl CompileConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// Entries of a `[colors]` table extend the default table, overriding
    /// same-named colors.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let parsed: RawConfig = toml::from_str(source)?;
        let mut config = CompileConfig {
            page: parsed.page,
            placeholder_image: parsed.placeholder_image,
            ..Default::default()
        };
        for (name, hex) in parsed.colors {
            config.colors.insert(name.trim().to_ascii_lowercase(), hex);
        }
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    page: PageConfig,
    colors: BTreeMap<String, String>,
    placeholder_image: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = CompileConfig::default();
        Self {
            page: defaults.page,
            colors: BTreeMap::new(),
            placeholder_image: defaults.placeholder_image,
        }
    }
}

fn default_colors() -> BTreeMap<String, String> {
    [
        ("white", "#ffffff"),
        ("black", "#000000"),
        ("red", "#ff0000"),
        ("green", "#008000"),
        ("blue", "#0000ff"),
        ("yellow", "#ffff00"),
        ("gray", "#808080"),
        ("grey", "#808080"),
        ("transparent", "#00000000"),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), hex.to_string()))
    .collect()
}
