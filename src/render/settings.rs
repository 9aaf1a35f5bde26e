use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::png::PngDecodeOpts;
use crate::foundation::core::{Pixel, Size};
use crate::foundation::error::{SnowballError, SnowballResult};

/// Compositor construction settings.
///
/// Every field has a default, so `{}` is a valid JSON document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    /// Dimensions of the back buffer (surface 0).
    pub back_buffer: Size,
    /// If set, the back buffer is cleared to this color once at construction.
    pub clear_color: Option<Pixel>,
    /// Options applied to every image loaded through the compositor.
    pub png: PngDecodeOpts,
}

impl GraphicsSettings {
    /// Default back buffer width.
    pub const DEFAULT_WIDTH: i32 = 256;
    /// Default back buffer height.
    pub const DEFAULT_HEIGHT: i32 = 240;

    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SnowballResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SnowballError::serde(format!("parse graphics settings JSON: {e}")))
    }

    /// Parse settings from a JSON string.
    pub fn from_json(s: &str) -> SnowballResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SnowballResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SnowballError::configuration(format!(
                "open graphics settings '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> SnowballResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnowballError::serde(format!("serialize graphics settings: {e}")))
    }

    /// Check that the back buffer has positive dimensions.
    pub fn validate(&self) -> SnowballResult<()> {
        let Size { width, height } = self.back_buffer;
        if width <= 0 || height <= 0 {
            return Err(SnowballError::configuration(format!(
                "back buffer must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(())
    }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            back_buffer: Size::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            clear_color: None,
            png: PngDecodeOpts::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
