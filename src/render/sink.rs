//! Where rendered images and sidecars go.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage, RgbaImage};
use log::info;

use super::state::RenderState;
use crate::engine::RenderedImage;
use crate::error::MolsnapError;
use crate::options::ImageFormat;

/// Fixed JPEG quality factor.
pub const JPEG_QUALITY: u8 = 90;

/// Receives finished images and state sidecars.
pub trait ImageSink {
    /// Store one image under `file_name`.
    fn write_image(
        &mut self,
        file_name: &str,
        image: &RenderedImage,
        format: ImageFormat,
    ) -> Result<(), MolsnapError>;

    /// Store one state sidecar under `file_name`.
    fn write_state(&mut self, file_name: &str, state: &RenderState) -> Result<(), MolsnapError>;
}

/// Writes files into an output directory.
#[derive(Debug, Clone)]
pub struct FileImageWriter {
    dir: PathBuf,
}

impl FileImageWriter {
    /// Writer into `dir`, creating it if needed.
    pub fn create(dir: &Path) -> Result<Self, MolsnapError> {
        std::fs::create_dir_all(dir).map_err(MolsnapError::Io)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Blend straight-alpha RGBA over white.
fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        let over = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb([over(r), over(g), over(b)])
    })
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> MolsnapError {
    MolsnapError::ImageWrite(format!("{}: {e}", path.display()))
}

impl ImageSink for FileImageWriter {
    fn write_image(
        &mut self,
        file_name: &str,
        image: &RenderedImage,
        format: ImageFormat,
    ) -> Result<(), MolsnapError> {
        let path = self.dir.join(file_name);
        let rgba = RgbaImage::from_raw(image.width, image.height, image.rgba.clone())
            .ok_or_else(|| write_error(&path, "pixel buffer does not match image size"))?;
        match format {
            ImageFormat::Png => rgba
                .save_with_format(&path, image::ImageFormat::Png)
                .map_err(|e| write_error(&path, e))?,
            ImageFormat::Jpeg => {
                let file = File::create(&path).map_err(|e| write_error(&path, e))?;
                let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
                flatten_on_white(&rgba)
                    .write_with_encoder(encoder)
                    .map_err(|e| write_error(&path, e))?;
            }
        }
        info!("wrote {}", path.display());
        Ok(())
    }

    fn write_state(&mut self, file_name: &str, state: &RenderState) -> Result<(), MolsnapError> {
        let path = self.dir.join(file_name);
        let json = state.to_json().map_err(MolsnapError::Json)?;
        std::fs::write(&path, json).map_err(MolsnapError::Io)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
