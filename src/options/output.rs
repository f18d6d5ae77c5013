use serde::{Deserialize, Serialize};

/// Encoded image container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless RGBA.
    #[default]
    Png,
    /// RGB at a fixed quality.
    Jpeg,
}

impl ImageFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Output image size, format and sidecar options.
pub struct OutputOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Encoded image format.
    pub format: ImageFormat,
    /// Write a JSON state sidecar next to each image.
    pub save_state: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 1536,
            format: ImageFormat::Png,
            save_state: false,
        }
    }
}
