//! Asset Manifest
//!
//! The fixed app-shell asset list and the cache generation it lives in.
//! Bump `cache_name` whenever the shipped asset set changes.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CacheError, CacheResult};

/// Pixel sizes of the shipped icon set
pub const ICON_SIZES: [u32; 12] = [16, 32, 72, 96, 128, 144, 152, 180, 192, 256, 384, 512];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheManifest {
    /// Name of the cache generation; doubles as the version key
    pub cache_name: String,
    /// Human-facing app version, reported over `GET_VERSION`
    pub version: String,
    /// Document served when an HTML navigation fails offline
    pub shell: String,
    /// Relative paths precached on install, in order
    pub assets: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        let mut assets: Vec<String> = [
            "./",
            "./index.html",
            "./header.html",
            "./banking.html",
            "./styles.css",
            "./quote_desk_ui.js",
            "./quote_desk_ui_bg.wasm",
            "./manifest.json",
            "./assets/logo.png",
        ]
        .iter()
        .map(|path| path.to_string())
        .collect();
        assets.extend(ICON_SIZES.iter().map(|size| format!("./assets/icons/icon-{}.png", size)));

        Self {
            cache_name: "quote-desk-v2".to_string(),
            version: "2.0.0".to_string(),
            shell: "./index.html".to_string(),
            assets,
        }
    }
}

impl CacheManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve every asset against the worker scope
    pub fn resolve(&self, scope: &Url) -> CacheResult<Vec<Url>> {
        self.assets.iter().map(|path| join(scope, path)).collect()
    }

    pub fn shell_url(&self, scope: &Url) -> CacheResult<Url> {
        join(scope, &self.shell)
    }
}

fn join(scope: &Url, path: &str) -> CacheResult<Url> {
    scope
        .join(path)
        .map_err(|e| CacheError::InvalidUrl(format!("{}: {}", path, e)))
}
