use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::SpriteResult;

/// Decoded sprite-sheet raster. Cheap to clone; pixels are shared.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    pixels: Arc<image::RgbaImage>,
}

impl SpriteImage {
    pub fn from_rgba(pixels: image::RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Fully transparent sprite, mostly useful in tests.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::from_rgba(image::RgbaImage::new(width, height))
    }

    pub fn open(path: &Path) -> SpriteResult<Self> {
        let img = image::open(path)?;
        tracing::debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "decoded sprite"
        );
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at integer coordinates, `None` outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return None;
        }
        Some(self.pixels.get_pixel(x as u32, y as u32).0)
    }
}
