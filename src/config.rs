use crate::browser;
use crate::gallery::scroll::DEFAULT_SPEED;
use serde::{Deserialize, Serialize};

/// Page tunables, read from `launcher.json` next to `index.html`. Every field
/// is optional in the file; missing ones keep their default.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub snow: SnowConfig,
    pub gallery: GalleryConfig,
    pub search: SearchConfig,
    pub meta: MetaConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnowConfig {
    /// particles per pixel of surface width
    pub density: f64,
    pub min_particles: usize,
}

impl Default for SnowConfig {
    fn default() -> Self {
        SnowConfig {
            density: 0.15,
            min_particles: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    /// pixels per frame; anything but a positive number means the default
    pub scroll_speed: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            scroll_speed: DEFAULT_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub suggestion_limit: usize,
    pub blur_delay_ms: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            suggestion_limit: 6,
            blur_delay_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaConfig {
    pub refresh_ms: i32,
}

impl Default for MetaConfig {
    fn default() -> Self {
        MetaConfig { refresh_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// how long the object URL of a downloaded document stays alive
    pub revoke_delay_ms: i32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            revoke_delay_ms: 1500,
        }
    }
}

impl Config {
    /// Never fails: a missing or malformed file falls back to the defaults.
    pub async fn load(path: &str) -> Config {
        match browser::fetch_json::<Config>(path).await {
            Ok(config) => config,
            Err(err) => {
                log!("Using default config, could not load {} : {:#}", path, err);
                Config::default()
            }
        }
    }
}
