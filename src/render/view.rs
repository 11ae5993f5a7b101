use crate::config::EditorConfig;
use crate::foundation::core::{Point, Size, Vec2};

/// Maps client (screen) coordinates onto sprite pixels.
///
/// The canvas shows the sprite inset by `padding` and is scaled as a whole by the
/// zoom factor, so `sprite = (client - canvas_origin) / scale - padding`.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    scale: f64,
    canvas_origin: Point,
    scroll: Vec2,
    padding: f64,
    min_canvas: Size,
    min_zoom_percent: f64,
    max_zoom_percent: f64,
}

impl Viewport {
    pub fn from_config(cfg: &EditorConfig) -> Self {
        Self {
            scale: 1.0,
            canvas_origin: Point::ORIGIN,
            scroll: Vec2::ZERO,
            padding: cfg.canvas_padding,
            min_canvas: cfg.min_canvas,
            min_zoom_percent: cfg.min_zoom_percent,
            max_zoom_percent: cfg.max_zoom_percent,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn zoom_percent(&self) -> f64 {
        self.scale * 100.0
    }

    /// Set zoom from a percent input, clamped to the configured range.
    /// Non-numeric input leaves the zoom unchanged. Returns the applied percent.
    pub fn set_zoom_percent(&mut self, percent: f64) -> f64 {
        if percent.is_finite() {
            let p = percent.clamp(self.min_zoom_percent, self.max_zoom_percent);
            self.scale = p / 100.0;
        }
        self.zoom_percent()
    }

    /// Client-space position of the canvas' top-left corner.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// Scroll offset of the container holding the canvas, in client pixels.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    pub fn client_to_sprite(&self, p: Point) -> Point {
        let local = (p - self.canvas_origin) * (1.0 / self.scale);
        Point::new(local.x - self.padding, local.y - self.padding)
    }

    pub fn client_delta_to_sprite(&self, d: Vec2) -> Vec2 {
        d * (1.0 / self.scale)
    }

    /// Length in sprite pixels of `px` screen pixels.
    pub fn screen_len_to_sprite(&self, px: f64) -> f64 {
        px / self.scale
    }

    /// Top-left sprite pixel currently scrolled into view.
    pub fn visible_origin(&self) -> Point {
        let p = self.scroll * (1.0 / self.scale);
        Point::new(p.x.max(0.0), p.y.max(0.0))
    }

    /// Unscaled canvas size for a sprite, or the blank markup size without one.
    pub fn canvas_size(&self, sprite: Option<Size>) -> Size {
        match sprite {
            Some(s) if s.width > 0.0 && s.height > 0.0 => Size::new(
                s.width + self.padding * 2.0,
                s.height + self.padding * 2.0,
            ),
            _ => self.min_canvas,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
