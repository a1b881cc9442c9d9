use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EmbedError, Result};

pub const DEFAULT_PLAYER_BASE_URL: &str = "https://player.vimeo.com/video/";
pub const DEFAULT_CSS_CLASS: &str = "vimeo-video";

/// How field values are interpolated into the markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Values are written verbatim, byte-for-byte with existing pages
    #[default]
    Compatible,

    /// Video id is percent-encoded and attributes are HTML-escaped
    Strict,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Compatible => write!(f, "compatible"),
            RenderMode::Strict => write!(f, "strict"),
        }
    }
}

/// Host-supplied rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedOptions {
    /// Player URL prefix; the video id is appended directly
    pub player_base_url: String,

    /// Value of the iframe `class` attribute
    pub css_class: String,

    pub mode: RenderMode,

    /// Emit the vendor fullscreen attributes
    pub allow_fullscreen: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            player_base_url: DEFAULT_PLAYER_BASE_URL.to_string(),
            css_class: DEFAULT_CSS_CLASS.to_string(),
            mode: RenderMode::Compatible,
            allow_fullscreen: true,
        }
    }
}

impl EmbedOptions {
    pub fn strict() -> Self {
        Self {
            mode: RenderMode::Strict,
            ..Self::default()
        }
    }

    /// Parse options from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| EmbedError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.player_base_url.is_empty() {
            return Err(EmbedError::InvalidOptions(
                "player_base_url must not be empty".to_string(),
            ));
        }
        if self.mode == RenderMode::Strict {
            url::Url::parse(&self.player_base_url)?;
        }
        Ok(())
    }
}
