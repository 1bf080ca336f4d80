//! Player preferences
//!
//! Persisted in LocalStorage. Only presentation choices live here; score
//! and game state are never saved.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Default projectile sprite
pub const DEFAULT_SPRITE_URL: &str = "images/big_toucan.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the background starfield
    pub starfield: bool,
    /// Spark bursts on hits (scoring is unaffected)
    pub particles: bool,
    /// Keep targets at a steady size instead of pulsing
    pub reduced_motion: bool,
    /// Projectile sprite image
    pub sprite_url: String,
    /// Nearest-neighbour scaling for the pixel-art sprite
    pub pixelated_sprite: bool,
    /// Fixed RNG seed; time-based when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starfield: true,
            particles: true,
            reduced_motion: false,
            sprite_url: DEFAULT_SPRITE_URL.to_string(),
            pixelated_sprite: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sling_splash_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
