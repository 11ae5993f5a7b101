use crate::foundation::core::{Rect, Rgba8, Size};
use crate::render::projection::Surface;
use crate::sprite::SpriteImage;

/// CPU surface backed by an [`image::RgbaImage`].
///
/// A pixel is covered by a shape when its center lies inside it.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: image::RgbaImage,
}

impl RasterSurface {
    pub fn new(size: Size) -> Self {
        let (w, h) = pixel_dims(size);
        Self {
            image: image::RgbaImage::new(w, h),
        }
    }

    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.image.width() && y < self.image.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Integer pixel span whose centers fall inside `[a, b)`, clipped to `len`.
    fn covered(a: f64, b: f64, len: u32) -> std::ops::Range<u32> {
        let start = (a - 0.5).ceil().max(0.0);
        let end = (b - 0.5).ceil().clamp(0.0, f64::from(len));
        if end.is_nan() || start >= end {
            return 0..0;
        }
        start as u32..end as u32
    }
}

fn pixel_dims(size: Size) -> (u32, u32) {
    let w = size.width.round().clamp(0.0, f64::from(u32::MAX)) as u32;
    let h = size.height.round().clamp(0.0, f64::from(u32::MAX)) as u32;
    (w, h)
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.image.width()), f64::from(self.image.height()))
    }

    fn resize(&mut self, size: Size) {
        let (w, h) = pixel_dims(size);
        self.image = image::RgbaImage::new(w, h);
    }

    fn clear(&mut self, color: Rgba8) {
        let px = image::Rgba(color.to_array());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let r = rect.abs();
        for y in Self::covered(r.y0, r.y1, self.image.height()) {
            for x in Self::covered(r.x0, r.x1, self.image.width()) {
                let p = self.image.get_pixel_mut(x, y);
                p.0 = color.blend_over(p.0);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        if width <= 0.0 {
            return;
        }
        let r = rect.abs();
        let h = width / 2.0;
        let bands = [
            Rect::new(r.x0 - h, r.y0 - h, r.x1 + h, r.y0 + h),
            Rect::new(r.x0 - h, r.y1 - h, r.x1 + h, r.y1 + h),
            Rect::new(r.x0 - h, r.y0 + h, r.x0 + h, r.y1 - h),
            Rect::new(r.x1 - h, r.y0 + h, r.x1 + h, r.y1 - h),
        ];
        for band in bands {
            if band.width() > 0.0 && band.height() > 0.0 {
                self.fill_rect(band, color);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &SpriteImage, src: Rect, dst: Rect) {
        let (src, dst) = (src.abs(), dst.abs());
        if src.width() <= 0.0 || src.height() <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            return;
        }
        let sx = src.width() / dst.width();
        let sy = src.height() / dst.height();
        for y in Self::covered(dst.y0, dst.y1, self.image.height()) {
            let v = src.y0 + (f64::from(y) + 0.5 - dst.y0) * sy;
            for x in Self::covered(dst.x0, dst.x1, self.image.width()) {
                let u = src.x0 + (f64::from(x) + 0.5 - dst.x0) * sx;
                let Some([r, g, b, a]) = sprite.pixel(u.floor() as i64, v.floor() as i64) else {
                    continue;
                };
                let p = self.image.get_pixel_mut(x, y);
                p.0 = Rgba8::new(r, g, b, a).blend_over(p.0);
            }
        }
    }
}
