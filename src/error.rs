//! Error types
//!
//! None of these are fatal in steady state: the driver logs them and
//! either skips initialization or skips a frame's draw.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A required DOM element (canvas or container) is not mounted yet
    MissingSurface(&'static str),
    /// Projectile sprite has not finished loading
    AssetNotReady,
    /// Container reported a zero or near-zero size
    DegenerateGeometry { width: f32, height: f32 },
    /// Settings JSON could not be parsed
    Config(String),
    /// A browser API call failed
    Js(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingSurface(id) => write!(f, "missing surface element #{id}"),
            GameError::AssetNotReady => write!(f, "sprite not loaded yet"),
            GameError::DegenerateGeometry { width, height } => {
                write!(f, "degenerate surface size {width}x{height}")
            }
            GameError::Config(msg) => write!(f, "bad settings: {msg}"),
            GameError::Js(msg) => write!(f, "browser call failed: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        GameError::Js(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
